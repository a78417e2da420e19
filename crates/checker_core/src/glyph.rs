//! Regex fragments that match ASCII letters together with the stylized
//! lookalikes dumps use for labels (`𝐔𝐬𝐞𝐫`, `🆄🆂🅴🆁`, `Ｕｓｅｒ`, `ᴜꜱᴇʀ`, ...).

/// Mathematical alphanumeric symbols: 13 styles of `A-Z` followed by `a-z`.
const MATH_ALPHA_START: u32 = 0x1D400;
const MATH_ALPHA_STYLES: u32 = 13;

/// Blocks with one glyph per letter, `a` first.
const LETTER_RUNS: &[u32] = &[
    0x24B6,  // circled capital
    0x24D0,  // circled small
    0x249C,  // parenthesized small
    0x1F130, // squared capital
    0x1F150, // negative circled capital
    0x1F170, // negative squared capital
    0x1F1E6, // regional indicator
    0xFF21,  // fullwidth capital
    0xFF41,  // fullwidth small
];

/// Letterlike symbols that fill the reserved holes of the math alphabet.
const LETTERLIKE: &[(char, char)] = &[
    ('b', 'ℬ'),
    ('c', 'ℂ'),
    ('c', 'ℭ'),
    ('e', 'ℯ'),
    ('e', 'ℰ'),
    ('f', 'ℱ'),
    ('g', 'ℊ'),
    ('h', 'ℋ'),
    ('h', 'ℌ'),
    ('h', 'ℍ'),
    ('h', 'ℎ'),
    ('i', 'ℐ'),
    ('i', 'ℑ'),
    ('l', 'ℒ'),
    ('m', 'ℳ'),
    ('n', 'ℕ'),
    ('o', 'ℴ'),
    ('p', 'ℙ'),
    ('q', 'ℚ'),
    ('r', 'ℛ'),
    ('r', 'ℜ'),
    ('r', 'ℝ'),
    ('z', 'ℤ'),
    ('z', 'ℨ'),
];

const SMALL_CAPITALS: [char; 26] = [
    'ᴀ', 'ʙ', 'ᴄ', 'ᴅ', 'ᴇ', 'ꜰ', 'ɢ', 'ʜ', 'ɪ', 'ᴊ', 'ᴋ', 'ʟ', 'ᴍ', 'ɴ', 'ᴏ', 'ᴘ', 'ǫ', 'ʀ', 'ꜱ', 'ᴛ',
    'ᴜ', 'ᴠ', 'ᴡ', 'x', 'ʏ', 'ᴢ',
];

/// Invisible code points that ride along with emoji letters.
const JOINERS: &str = r"[\u{FE0F}\u{200B}\u{200C}\u{200D}]*";

/// Character class matching `letter` in any supported style.
///
/// Non-letters are returned escaped and matched literally.
pub(crate) fn letter_class(letter: char) -> String {
    if !letter.is_ascii_alphabetic() {
        return regex::escape(&letter.to_string());
    }
    let lower = letter.to_ascii_lowercase();
    let idx = lower as u32 - 'a' as u32;

    let mut class = String::from("[");
    class.push(lower);
    class.push(lower.to_ascii_uppercase());
    for style in 0..MATH_ALPHA_STYLES {
        let base = MATH_ALPHA_START + style * 52;
        class.extend(char::from_u32(base + idx));
        class.extend(char::from_u32(base + 26 + idx));
    }
    for run in LETTER_RUNS {
        class.extend(char::from_u32(run + idx));
    }
    class.extend(
        LETTERLIKE
            .iter()
            .filter(|(ascii, _)| *ascii == lower)
            .map(|(_, glyph)| *glyph),
    );
    let small_cap = SMALL_CAPITALS[idx as usize];
    if small_cap != lower {
        class.push(small_cap);
    }
    class.push(']');
    class
}

/// Regex fragment matching `word` spelled with any mix of lookalike glyphs.
pub(crate) fn fuzzy_word(word: &str) -> String {
    word.chars()
        .map(|c| format!("{}{JOINERS}", letter_class(c)))
        .collect()
}
