use std::sync::LazyLock;

use regex::Regex;

use super::playback::find_playback_candidate;
use crate::glyph::fuzzy_word;
use crate::{normalize_origin, Candidate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Password,
    Host,
}

/// A labeled line pattern. Lower `priority` is tried first within a field.
struct LabelRule {
    field: Field,
    priority: u8,
    regex: Regex,
}

/// Decoration allowed in front of a label: numbering, bullets, emoji, box drawing.
const LEAD: &str = r"^[^\S\n]*[^\p{L}\n]*?";
/// Between label and value: one colon or arrow (optionally trailed by more
/// arrows), a dash or pipe standing between spaces, or just spaces. Value
/// characters are never consumed, so `User: -bob` keeps its leading dash and
/// `User-Agent` is not a label.
const SEPARATOR: &str = concat!(
    r"(?:[^\S\n]*(?:-->|==>|->|=>|>>|[:：=»›→⇒⇨➔➜➝➞➟➠➡➤➥➦⮕])\u{FE0F}?",
    r"(?:[^\S\n]*[→⇒⇨➔➜➝➞➟➠➡➤➥➦⮕]\u{FE0F}?)*[^\S\n]*",
    r"|[^\S\n]+[|•~\-–—][^\S\n]+",
    r"|[^\S\n]+)",
);
const VALUE: &str = r"(?P<value>[^\s].*?)[^\S\n]*$";

static LABEL_RULES: LazyLock<Vec<LabelRule>> = LazyLock::new(|| {
    let optional = |word: &str| format!("(?:[^\\S\\n]?{})?", fuzzy_word(word));
    let mut rules = vec![
        label_rule(
            Field::Username,
            0,
            &format!("{}{}", fuzzy_word("user"), optional("name")),
        ),
        label_rule(Field::Username, 1, &fuzzy_word("login")),
        label_rule(
            Field::Password,
            0,
            &format!("{}{}", fuzzy_word("pass"), optional("word")),
        ),
        label_rule(Field::Host, 0, &fuzzy_word("host")),
        label_rule(Field::Host, 1, &fuzzy_word("url")),
        label_rule(Field::Host, 2, &fuzzy_word("portal")),
        label_rule(Field::Host, 3, &fuzzy_word("server")),
    ];
    rules.sort_by_key(|rule| rule.priority);
    rules
});

/// Section markers, most specific first. Each matches a whole line.
static BLOCK_DELIMITERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // ━━━━━━━━━━
        delimiter(r"(?m)^[^\n]*━{5,}[^\n]*$"),
        // ══════════
        delimiter(r"(?m)^[^\n]*═{5,}[^\n]*$"),
        // ▂▃▅▇█▓▒░ banner ░▒▓█▇▅▃▂
        delimiter(r"(?m)^[^\n]*[▂▃▅▆▇█▓▒░]{4,}[^\n]*$"),
        // 🔥 HIT BY ..., 🅷🅸🆃 ...
        delimiter(&format!(
            r"(?m)^[^\S\n]*[^\p{{L}}\p{{N}}\n]*{}(?:[^\p{{L}}\p{{N}}\n][^\n]*)?$",
            fuzzy_word("hit")
        )),
    ]
});

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[^\S\n]*\n)+").expect("blank line pattern"));

fn label_rule(field: Field, priority: u8, label: &str) -> LabelRule {
    let pattern = format!("(?mi){LEAD}(?:{label}){SEPARATOR}{VALUE}");
    LabelRule {
        field,
        priority,
        regex: Regex::new(&pattern).expect("label pattern"),
    }
}

fn delimiter(pattern: &str) -> Regex {
    Regex::new(pattern).expect("delimiter pattern")
}

pub(super) fn extract(text: &str) -> Vec<Candidate> {
    split_blocks(text)
        .into_iter()
        .filter_map(parse_block)
        .collect()
}

/// Split on the first delimiter that yields more than one non-empty block,
/// falling back to blank lines.
fn split_blocks(text: &str) -> Vec<&str> {
    for delimiter in BLOCK_DELIMITERS.iter() {
        let blocks = non_empty_blocks(delimiter.split(text));
        if blocks.len() > 1 {
            return blocks;
        }
    }
    non_empty_blocks(BLANK_LINES.split(text))
}

fn non_empty_blocks<'t>(pieces: impl Iterator<Item = &'t str>) -> Vec<&'t str> {
    pieces.filter(|block| !block.trim().is_empty()).collect()
}

fn parse_block(block: &str) -> Option<Candidate> {
    let mut username = find_field(block, Field::Username);
    let mut password = find_field(block, Field::Password);
    let mut host = find_field(block, Field::Host);

    if username.is_none() || password.is_none() || host.is_none() {
        if let Some(fallback) = find_playback_candidate(block) {
            username.get_or_insert(fallback.username);
            password.get_or_insert(fallback.password);
            host.get_or_insert(fallback.host);
        }
    }

    let candidate = Candidate::new(username?, password?, host?);
    candidate.is_complete().then_some(candidate)
}

fn find_field(block: &str, field: Field) -> Option<String> {
    LABEL_RULES
        .iter()
        .filter(|rule| rule.field == field)
        .find_map(|rule| {
            let captures = rule.regex.captures(block)?;
            let value = captures.name("value")?.as_str().trim();
            match field {
                Field::Host => value.split_whitespace().next().and_then(normalize_origin),
                Field::Username | Field::Password => {
                    (!value.is_empty()).then(|| value.to_string())
                }
            }
        })
}
