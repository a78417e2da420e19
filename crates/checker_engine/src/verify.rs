use std::time::Duration;

use chrono::Utc;
use checker_core::{Candidate, Profile};
use engine_logging::{engine_debug, engine_warn};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::VerifyError;

#[derive(Debug, Clone)]
pub struct VerifySettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Path appended to the host, without a leading slash.
    pub endpoint_path: String,
    pub max_body_bytes: u64,
}

impl Default for VerifySettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            endpoint_path: "player_api.php".to_string(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait Verifier: Send + Sync {
    /// Check one credential set against its host.
    async fn verify(
        &self,
        username: &str,
        password: &str,
        host: &str,
    ) -> Result<Profile, VerifyError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestVerifier {
    settings: VerifySettings,
}

impl ReqwestVerifier {
    pub fn new(settings: VerifySettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, VerifyError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| {
                engine_warn!("Could not build http client: {}", err);
                VerifyError::transport()
            })
    }

    fn endpoint_url(
        &self,
        host: &str,
        username: &str,
        password: &str,
    ) -> Result<reqwest::Url, VerifyError> {
        let clean_host = host.strip_suffix('/').unwrap_or(host);
        let mut url = reqwest::Url::parse(&format!(
            "{clean_host}/{}",
            self.settings.endpoint_path
        ))
        .map_err(|err| {
            engine_warn!("Unusable host {:?}: {}", host, err);
            VerifyError::transport()
        })?;
        url.query_pairs_mut()
            .append_pair("username", username)
            .append_pair("password", password);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl Verifier for ReqwestVerifier {
    async fn verify(
        &self,
        username: &str,
        password: &str,
        host: &str,
    ) -> Result<Profile, VerifyError> {
        if username.is_empty() || password.is_empty() || host.is_empty() {
            return Err(VerifyError::invalid_input());
        }

        let url = self.endpoint_url(host, username, password)?;
        let client = self.build_client()?;
        engine_debug!("Verifying {} at {}", username, host);

        let response = client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(VerifyError::remote_rejected(status));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_body_bytes {
                engine_warn!("Response from {} too large: {} bytes", host, content_len);
                return Err(VerifyError::transport());
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_body_bytes {
                engine_warn!(
                    "Response from {} exceeded {} bytes",
                    host,
                    self.settings.max_body_bytes
                );
                return Err(VerifyError::transport());
            }
            body.extend_from_slice(&chunk);
        }
        let json: Value = serde_json::from_slice(&body).map_err(|err| {
            engine_warn!("Malformed response body from {}: {}", host, err);
            VerifyError::transport()
        })?;

        let candidate = Candidate::new(username, password, host);
        Ok(normalize_profile(
            &json,
            &candidate,
            Utc::now().timestamp_millis(),
        ))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> VerifyError {
    let cause = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_decode() || err.is_body() {
        "body"
    } else {
        "network"
    };
    // The url carries the password in its query.
    engine_warn!("Request failed ({}): {}", cause, err.without_url());
    VerifyError::transport()
}

/// Map a loosely-typed `player_api` body into a [`Profile`].
///
/// Total over every JSON value: anything that is not an object behaves like
/// `{}`. `now_millis` stamps the profile and doubles as the id when the remote
/// provides none.
pub fn normalize_profile(body: &Value, candidate: &Candidate, now_millis: i64) -> Profile {
    let user_info = body.get("user_info");
    let field = |name: &str| user_info.and_then(|info| info.get(name));

    Profile {
        id: present_string(field("auth"))
            .or_else(|| present_string(body.get("user_id")))
            .unwrap_or_else(|| now_millis.to_string()),
        name: present_string(field("username")).unwrap_or_else(|| candidate.username.clone()),
        username: candidate.username.clone(),
        password: candidate.password.clone(),
        host: candidate.host.clone(),
        max_connections: count(field("max_connections")),
        active_connections: count(field("active_cons")),
        expires_at: present_string(field("exp_date")),
        status: present_string(field("status")).unwrap_or_else(|| "active".to_string()),
        verified_at_millis: now_millis,
    }
}

/// Non-empty strings and non-zero numbers; everything else is absent.
fn present_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        _ => None,
    }
}

fn count(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
