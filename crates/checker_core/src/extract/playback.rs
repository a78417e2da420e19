use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::Candidate;

/// `http(s)://authority/.../get.php?...` or `.../player_api.php?...`.
static PLAYBACK_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://[^\s/?#"'<>]+(?:/[^\s?#"'<>]*)?/(?:get|player_api)\.php\?[^\s"'<>]+"#)
        .expect("playback url pattern")
});

/// One candidate per line that carries a playback URL.
pub(super) fn extract_lines(text: &str) -> Vec<Candidate> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(find_playback_candidate)
        .collect()
}

/// Read the first playback URL in `text`.
///
/// Only the first match is considered; if it does not parse or lacks a
/// username or password the result is `None`.
pub(super) fn find_playback_candidate(text: &str) -> Option<Candidate> {
    let found = PLAYBACK_URL.find(text)?;
    candidate_from_url(found.as_str())
}

fn candidate_from_url(raw: &str) -> Option<Candidate> {
    let parsed = Url::parse(raw).ok()?;
    parsed.host_str()?;

    let mut username = None;
    let mut password = None;
    for (key, value) in parsed.query_pairs() {
        match key.as_ref() {
            "username" if username.is_none() => username = Some(value.into_owned()),
            "password" if password.is_none() => password = Some(value.into_owned()),
            _ => {}
        }
    }

    let candidate = Candidate::new(
        username?,
        password?,
        parsed.origin().ascii_serialization(),
    );
    candidate.is_complete().then_some(candidate)
}
