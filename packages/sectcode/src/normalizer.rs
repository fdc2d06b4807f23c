//! Canonicalization of raw address text.
//!
//! Three passes run in order, each feeding the next:
//!
//! 1. character-class collapse: whitespace is removed, 台 is handled per
//!    [`TaiHandling`], full-width forms are folded to ASCII
//! 2. punctuation substitution: 之, en dash and em dash become `-`
//! 3. numeral contraction: CJK numerals in number position become ASCII
//!    digits, repeated until nothing changes
//!
//! Normalization is total. Every input yields a string, possibly unchanged.

use unicode_normalization::UnicodeNormalization;

use crate::config::TaiHandling;

const TAI: char = '台';
const TAI_CANONICAL: char = '臺';
const TEN: char = '十';
const HYPHEN: char = '-';

/// Characters turned into a hyphen by the punctuation pass.
const HYPHEN_VARIANTS: &[char] = &['之', '–', '—'];

/// Canonicalizes raw address strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    tai: TaiHandling,
}

impl Normalizer {
    pub fn new(tai: TaiHandling) -> Self {
        Self { tai }
    }

    /// Normalize a raw address.
    ///
    /// # Examples
    /// ```
    /// use sectcode::Normalizer;
    ///
    /// let normalizer = Normalizer::default();
    /// assert_eq!(normalizer.normalize("２７７"), "277");
    /// assert_eq!(normalizer.normalize("二五四之四十三"), "254-43");
    /// ```
    pub fn normalize(&self, raw: &str) -> String {
        let collapsed = self.collapse(raw);
        let hyphenated = substitute_hyphens(&collapsed);
        contract_numerals(&hyphenated)
    }

    fn collapse(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        for c in raw.chars() {
            if is_compatibility_form(c) {
                for folded in std::iter::once(c).nfkc() {
                    self.push_collapsed(&mut out, folded);
                }
            } else {
                self.push_collapsed(&mut out, c);
            }
        }
        out
    }

    fn push_collapsed(&self, out: &mut String, c: char) {
        if c.is_whitespace() {
            return;
        }
        match (c, self.tai) {
            (TAI, TaiHandling::Canonical) => out.push(TAI_CANONICAL),
            (TAI, TaiHandling::Delete) => {}
            _ => out.push(c),
        }
    }
}

/// Normalize with the default settings.
pub fn normalize(raw: &str) -> String {
    Normalizer::default().normalize(raw)
}

/// Full-width/half-width forms and CJK compatibility ideographs.
fn is_compatibility_form(c: char) -> bool {
    matches!(
        c,
        '\u{FF00}'..='\u{FFEF}' | '\u{F900}'..='\u{FAFF}' | '\u{2F800}'..='\u{2FA1F}'
    )
}

fn substitute_hyphens(s: &str) -> String {
    s.chars()
        .map(|c| if HYPHEN_VARIANTS.contains(&c) { HYPHEN } else { c })
        .collect()
}

fn cjk_digit(c: char) -> Option<u32> {
    let value = match c {
        '一' => 1,
        '二' => 2,
        '三' => 3,
        '四' => 4,
        '五' => 5,
        '六' => 6,
        '七' => 7,
        '八' => 8,
        '九' => 9,
        _ => return None,
    };
    Some(value)
}

fn contract_numerals(s: &str) -> String {
    let mut current = s.to_string();
    loop {
        let next = contract_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One left-to-right scan replacing every non-overlapping numeral run.
fn contract_once(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut pos = 0;
    while pos < chars.len() {
        match match_numeral_run(&chars, pos) {
            Some(end) => {
                out.push_str(&numeral_value(&chars[pos..end]).to_string());
                pos = end;
            }
            None => {
                out.push(chars[pos]);
                pos += 1;
            }
        }
    }
    out
}

/// Match `[d]?[d]?[十]?[d]` at `start`, followed by a number terminator.
///
/// Optional parts are tried greedily and given up in backtracking order,
/// so the longest acceptable run starting at `start` wins. Returns the end
/// index of the run.
fn match_numeral_run(chars: &[char], start: usize) -> Option<usize> {
    const CHOICES: [bool; 2] = [true, false];
    for take_first in CHOICES {
        for take_second in CHOICES {
            for take_ten in CHOICES {
                let mut pos = start;
                if take_first && !advance_if(chars, &mut pos, is_cjk_digit) {
                    continue;
                }
                if take_second && !advance_if(chars, &mut pos, is_cjk_digit) {
                    continue;
                }
                if take_ten && !advance_if(chars, &mut pos, |c| c == TEN) {
                    continue;
                }
                if !advance_if(chars, &mut pos, is_cjk_digit) {
                    continue;
                }
                if is_number_terminator(chars, pos) {
                    return Some(pos);
                }
            }
        }
    }
    None
}

fn advance_if(chars: &[char], pos: &mut usize, wanted: impl Fn(char) -> bool) -> bool {
    match chars.get(*pos) {
        Some(&c) if wanted(c) => {
            *pos += 1;
            true
        }
        _ => false,
    }
}

fn is_cjk_digit(c: char) -> bool {
    cjk_digit(c).is_some()
}

/// A hyphen, 號, 地號, the list separator, or the end of the text.
fn is_number_terminator(chars: &[char], pos: usize) -> bool {
    match chars.get(pos) {
        None => true,
        Some('-' | '號' | '、') => true,
        Some('地') => chars.get(pos + 1) == Some(&'號'),
        Some(_) => false,
    }
}

/// Value of a matched run: `X十Y` is `X*10+Y` (X defaults to 1), a run
/// without 十 is read digit by digit. A two-digit prefix before 十 is also
/// read digit by digit, so `二五十三` is 253.
fn numeral_value(run: &[char]) -> u32 {
    let digits_of = |part: &[char]| {
        part.iter()
            .filter_map(|&c| cjk_digit(c))
            .fold(0, |acc, d| acc * 10 + d)
    };
    match run.iter().position(|&c| c == TEN) {
        Some(ten) => {
            let tens = match digits_of(&run[..ten]) {
                0 => 1,
                n => n,
            };
            tens * 10 + digits_of(&run[ten + 1..])
        }
        None => digits_of(run),
    }
}
