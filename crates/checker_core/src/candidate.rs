use std::collections::HashSet;

use url::Url;

/// One username/password/host triple pulled out of raw text.
///
/// Equality is exact and case-sensitive over all three fields. `host` is an
/// origin (`scheme://host[:port]`) without path or trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub username: String,
    pub password: String,
    pub host: String,
}

impl Candidate {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            host: host.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty() && !self.host.is_empty()
    }
}

/// Drop repeated candidates, keeping the first occurrence of each.
pub fn dedupe_candidates(candidates: impl IntoIterator<Item = Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.clone()))
        .collect()
}

/// Reduce a host-ish value to its origin.
///
/// Values without a scheme are read as `http://` and must have a dotted host.
/// Anything that is not an http(s) URL with a host yields `None`.
pub fn normalize_origin(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = if trimmed.contains("://") {
        Url::parse(trimmed).ok()?
    } else {
        let parsed = Url::parse(&format!("http://{trimmed}")).ok()?;
        // Bare words such as "Online" are status text.
        if !parsed.host_str()?.contains('.') {
            return None;
        }
        parsed
    };
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return None;
    }
    Some(parsed.origin().ascii_serialization())
}
