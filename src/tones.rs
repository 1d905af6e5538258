//! # Tone-Mark Engine
//!
//! Turns a Pinyin spelling into its four diacritic-marked tones plus the
//! unmarked neutral form.
//!
//! ## Vowel Selection
//! Exactly one vowel carries the mark, chosen from the spelling:
//! 1. `a` if present (`hao → hǎo`)
//! 2. else `e` (`xue → xué`)
//! 3. else the `o` of `ou` (`zhou → zhōu`)
//! 4. else the rightmost of `a o e i u ü v` (`gui → guì`, `liu → liú`)
//!
//! A spelling with no vowel at all comes back unchanged in every slot.
//!
//! The rules only look at Latin letters, so they work on any spelling, not
//! only on chart cells.
//!
//! ## Example
//! ```rust
//! use pinyin_chart::tones;
//!
//! assert_eq!(tones("ma"), ["mā", "má", "mǎ", "mà", "ma"]);
//! assert_eq!(tones("nü")[2], "nǚ");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four lexical tones. The neutral tone has no audio clip and is
/// not a playback tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Tone {
    First,
    Second,
    Third,
    Fourth,
}

impl Tone {
    /// Tones in drill order.
    pub const ALL: [Tone; 4] = [Tone::First, Tone::Second, Tone::Third, Tone::Fourth];

    pub fn number(self) -> u8 {
        match self {
            Tone::First => 1,
            Tone::Second => 2,
            Tone::Third => 3,
            Tone::Fourth => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Tone::First),
            2 => Some(Tone::Second),
            3 => Some(Tone::Third),
            4 => Some(Tone::Fourth),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self.number() as usize - 1
    }
}

impl From<Tone> for u8 {
    fn from(tone: Tone) -> Self {
        tone.number()
    }
}

impl TryFrom<u8> for Tone {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Tone::from_number(n).ok_or_else(|| format!("tone must be 1-4, got {}", n))
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Vowels eligible for the right-to-left fallback scan.
const VOWELS: [char; 7] = ['a', 'o', 'e', 'i', 'u', 'ü', 'v'];

/// Marked forms for tones 1-4. `v` is the ASCII stand-in for `ü` and is
/// marked the same way.
fn marks(vowel: char) -> Option<[char; 4]> {
    match vowel {
        'a' => Some(['ā', 'á', 'ǎ', 'à']),
        'o' => Some(['ō', 'ó', 'ǒ', 'ò']),
        'e' => Some(['ē', 'é', 'ě', 'è']),
        'i' => Some(['ī', 'í', 'ǐ', 'ì']),
        'u' => Some(['ū', 'ú', 'ǔ', 'ù']),
        'ü' | 'v' => Some(['ǖ', 'ǘ', 'ǚ', 'ǜ']),
        _ => None,
    }
}

/// Byte offset and character of the vowel that takes the tone mark.
fn main_vowel(pinyin: &str) -> Option<(usize, char)> {
    if let Some(i) = pinyin.find('a') {
        return Some((i, 'a'));
    }
    if let Some(i) = pinyin.find('e') {
        return Some((i, 'e'));
    }
    if let Some(i) = pinyin.find("ou") {
        return Some((i, 'o'));
    }
    pinyin
        .char_indices()
        .rev()
        .find(|(_, c)| VOWELS.contains(c))
}

/// The five renderings of a spelling: tones 1-4, then the neutral form.
///
/// The last slot is always the input itself. When no vowel is found, all
/// five slots hold the input, so callers must not assume they differ.
pub fn tones(pinyin: &str) -> [String; 5] {
    let Some((index, vowel)) = main_vowel(pinyin) else {
        return std::array::from_fn(|_| pinyin.to_string());
    };
    let Some(marked) = marks(vowel) else {
        return std::array::from_fn(|_| pinyin.to_string());
    };

    let pre = &pinyin[..index];
    let post = &pinyin[index + vowel.len_utf8()..];

    std::array::from_fn(|slot| match marked.get(slot) {
        Some(mark) => format!("{}{}{}", pre, mark, post),
        None => pinyin.to_string(),
    })
}

/// A single tone rendering of a spelling.
pub fn marked(pinyin: &str, tone: Tone) -> String {
    let [first, second, third, fourth, _] = tones(pinyin);
    match tone.index() {
        0 => first,
        1 => second,
        2 => third,
        _ => fourth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tones_open_vowel() {
        assert_eq!(tones("ma"), ["mā", "má", "mǎ", "mà", "ma"]);
        assert_eq!(tones("hao")[2], "hǎo");
        assert_eq!(tones("guai")[3], "guài");
        assert_eq!(tones("yuan")[1], "yuán");
    }

    #[test]
    fn test_tones_mid_vowel() {
        assert_eq!(tones("xue")[1], "xué");
        assert_eq!(tones("wei")[3], "wèi");
        assert_eq!(tones("lüe")[3], "lüè");
    }

    #[test]
    fn test_tones_ou() {
        assert_eq!(tones("zhou")[0], "zhōu");
        assert_eq!(tones("you")[2], "yǒu");
    }

    #[test]
    fn test_tones_rightmost_fallback() {
        assert_eq!(tones("gui")[3], "guì");
        assert_eq!(tones("liu")[1], "liú");
        assert_eq!(tones("duo")[0], "duō");
        assert_eq!(tones("nü"), ["nǖ", "nǘ", "nǚ", "nǜ", "nü"]);
        assert_eq!(tones("zhi")[2], "zhǐ");
    }

    #[test]
    fn test_tones_v_alias() {
        assert_eq!(tones("lv"), ["lǖ", "lǘ", "lǚ", "lǜ", "lv"]);
    }

    #[test]
    fn test_tones_no_vowel_returns_input() {
        let out = tones("hm");
        assert_eq!(out, ["hm", "hm", "hm", "hm", "hm"]);
        assert_eq!(tones(""), ["", "", "", "", ""]);
    }

    #[test]
    fn test_neutral_slot_is_input() {
        for s in ["ma", "zhuang", "er", "ng", "xiong", "qv", "abc"] {
            assert_eq!(tones(s)[4], s);
        }
    }

    #[test]
    fn test_marked() {
        assert_eq!(marked("ba", Tone::First), "bā");
        assert_eq!(marked("ba", Tone::Fourth), "bà");
    }

    #[test]
    fn test_tone_numbers() {
        for (i, tone) in Tone::ALL.iter().enumerate() {
            assert_eq!(tone.number() as usize, i + 1);
            assert_eq!(Tone::from_number(tone.number()), Some(*tone));
        }
        assert_eq!(Tone::from_number(0), None);
        assert_eq!(Tone::from_number(5), None);
    }
}
