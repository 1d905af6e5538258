//! # Syllable Inventory
//!
//! Static tables describing the Mandarin syllable chart.
//!
//! ## Chart Layout
//! ```text
//!              standalone   b    p    m   ...  zh   ch   sh   r     <- Onset (21 columns)
//!   row 0  -i     (none)                       zhi  chi  shi  ri
//!   row 1  -a     a         ba   pa   ma  ...  zha  cha  sha
//!   ...
//!   row 11 -i     yi        bi   pi   mi  ...
//!   ...
//!   row 36 -ün    yun
//!   ^
//!   RimeSlot (37 rows)
//! ```
//!
//! ## Key Concepts
//!
//! ### RimeSlot
//! The bare high-front vowel `i` occurs twice: row 0 holds the buzzed `i` of
//! `zi ci si zhi chi shi ri`, row 11 holds the plain `i` of `bi pi mi ...`.
//! Because the two rows accept different onsets, a row is identified by
//! `(rime, row)` rather than by the rime alone.
//!
//! ### Spellings
//! Rimes are stored in their phonemic spelling (`iou`, `uei`, `uen`, `ü`...).
//! Written forms (`-iu`, `ju`, ...) are produced by [`crate::phonology`].
//!
//! ### Valid combinations
//! [`VALID_COMBINATIONS`] is the ground truth for which canonical spellings
//! exist. Row and onset-class rules only pre-filter before this lookup.
//!
//! ## Related Modules
//! - `phonology` - Validity, normalization and selections over these tables
//! - `notation` - Per-locale glyphs keyed by onset/rime spelling
//! - `chart` - Renders these tables into rows of cells

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::Serialize;

use crate::error::ChartError;

/// Place of articulation for an initial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnsetClass {
    /// b p m f
    Labial,
    /// d t n l
    Alveolar,
    /// g k h
    Velar,
    /// j q x (alveolo-palatal, "soft")
    Palatal,
    /// z c s
    DentalSibilant,
    /// zh ch sh r ("hard")
    Retroflex,
}

/// A syllable initial, in chart column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "&'static str")]
pub enum Onset {
    B,
    P,
    M,
    F,
    D,
    T,
    N,
    L,
    G,
    K,
    H,
    J,
    Q,
    X,
    Z,
    C,
    S,
    Zh,
    Ch,
    Sh,
    R,
}

/// All initials in display column order (z c s before zh ch sh).
pub const ONSETS: [Onset; 21] = [
    Onset::B,
    Onset::P,
    Onset::M,
    Onset::F,
    Onset::D,
    Onset::T,
    Onset::N,
    Onset::L,
    Onset::G,
    Onset::K,
    Onset::H,
    Onset::J,
    Onset::Q,
    Onset::X,
    Onset::Z,
    Onset::C,
    Onset::S,
    Onset::Zh,
    Onset::Ch,
    Onset::Sh,
    Onset::R,
];

impl Onset {
    pub fn as_str(self) -> &'static str {
        match self {
            Onset::B => "b",
            Onset::P => "p",
            Onset::M => "m",
            Onset::F => "f",
            Onset::D => "d",
            Onset::T => "t",
            Onset::N => "n",
            Onset::L => "l",
            Onset::G => "g",
            Onset::K => "k",
            Onset::H => "h",
            Onset::J => "j",
            Onset::Q => "q",
            Onset::X => "x",
            Onset::Z => "z",
            Onset::C => "c",
            Onset::S => "s",
            Onset::Zh => "zh",
            Onset::Ch => "ch",
            Onset::Sh => "sh",
            Onset::R => "r",
        }
    }

    pub fn class(self) -> OnsetClass {
        match self {
            Onset::B | Onset::P | Onset::M | Onset::F => OnsetClass::Labial,
            Onset::D | Onset::T | Onset::N | Onset::L => OnsetClass::Alveolar,
            Onset::G | Onset::K | Onset::H => OnsetClass::Velar,
            Onset::J | Onset::Q | Onset::X => OnsetClass::Palatal,
            Onset::Z | Onset::C | Onset::S => OnsetClass::DentalSibilant,
            Onset::Zh | Onset::Ch | Onset::Sh | Onset::R => OnsetClass::Retroflex,
        }
    }

    /// Zero-based display column (the standalone column is not counted).
    pub fn column(self) -> usize {
        // ONSETS is declared in enum order
        self as usize
    }

    /// Initials that take the buzzed `i` of row 0.
    pub fn takes_buzzed_i(self) -> bool {
        matches!(
            self.class(),
            OnsetClass::DentalSibilant | OnsetClass::Retroflex
        )
    }

    /// Initials that take the plain `i` of the later `i` row.
    pub fn takes_plain_i(self) -> bool {
        matches!(
            self,
            Onset::B
                | Onset::P
                | Onset::M
                | Onset::D
                | Onset::T
                | Onset::N
                | Onset::L
                | Onset::J
                | Onset::Q
                | Onset::X
        )
    }

    pub fn is_palatal(self) -> bool {
        self.class() == OnsetClass::Palatal
    }
}

impl From<Onset> for &'static str {
    fn from(onset: Onset) -> Self {
        onset.as_str()
    }
}

impl fmt::Display for Onset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Onset {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ONSETS
            .iter()
            .copied()
            .find(|o| o.as_str() == trimmed)
            .ok_or_else(|| ChartError::UnknownOnset(trimmed.to_string()))
    }
}

/// A syllable final in phonemic spelling. `V*` variants carry the
/// front-rounded vowel `ü`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum Rime {
    I,
    A,
    Ai,
    An,
    Ang,
    Ao,
    E,
    Ei,
    En,
    Eng,
    Er,
    Ia,
    Ian,
    Iang,
    Iao,
    Ie,
    In,
    Ing,
    Iong,
    Iou,
    O,
    Ong,
    Ou,
    U,
    Ua,
    Uai,
    Uan,
    Uang,
    Uei,
    Uen,
    Ueng,
    Uo,
    V,
    Van,
    Ve,
    Vn,
}

const ALL_RIMES: [Rime; 36] = [
    Rime::I,
    Rime::A,
    Rime::Ai,
    Rime::An,
    Rime::Ang,
    Rime::Ao,
    Rime::E,
    Rime::Ei,
    Rime::En,
    Rime::Eng,
    Rime::Er,
    Rime::Ia,
    Rime::Ian,
    Rime::Iang,
    Rime::Iao,
    Rime::Ie,
    Rime::In,
    Rime::Ing,
    Rime::Iong,
    Rime::Iou,
    Rime::O,
    Rime::Ong,
    Rime::Ou,
    Rime::U,
    Rime::Ua,
    Rime::Uai,
    Rime::Uan,
    Rime::Uang,
    Rime::Uei,
    Rime::Uen,
    Rime::Ueng,
    Rime::Uo,
    Rime::V,
    Rime::Van,
    Rime::Ve,
    Rime::Vn,
];

impl Rime {
    /// Phonemic spelling, as used for notation keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Rime::I => "i",
            Rime::A => "a",
            Rime::Ai => "ai",
            Rime::An => "an",
            Rime::Ang => "ang",
            Rime::Ao => "ao",
            Rime::E => "e",
            Rime::Ei => "ei",
            Rime::En => "en",
            Rime::Eng => "eng",
            Rime::Er => "er",
            Rime::Ia => "ia",
            Rime::Ian => "ian",
            Rime::Iang => "iang",
            Rime::Iao => "iao",
            Rime::Ie => "ie",
            Rime::In => "in",
            Rime::Ing => "ing",
            Rime::Iong => "iong",
            Rime::Iou => "iou",
            Rime::O => "o",
            Rime::Ong => "ong",
            Rime::Ou => "ou",
            Rime::U => "u",
            Rime::Ua => "ua",
            Rime::Uai => "uai",
            Rime::Uan => "uan",
            Rime::Uang => "uang",
            Rime::Uei => "uei",
            Rime::Uen => "uen",
            Rime::Ueng => "ueng",
            Rime::Uo => "uo",
            Rime::V => "ü",
            Rime::Van => "üan",
            Rime::Ve => "üe",
            Rime::Vn => "ün",
        }
    }

    /// Spelling used after an initial and in row headers: the three rimes
    /// whose written form is contracted (`iou`, `uei`, `uen`) map to
    /// `iu`, `ui`, `un`; everything else is unchanged.
    pub fn display(self) -> &'static str {
        match self {
            Rime::Iou => "iu",
            Rime::Uei => "ui",
            Rime::Uen => "un",
            other => other.as_str(),
        }
    }

    /// Whether the rime starts with the front-rounded vowel `ü`.
    pub fn is_front_rounded(self) -> bool {
        matches!(self, Rime::V | Rime::Van | Rime::Ve | Rime::Vn)
    }

    /// Whether the rime starts with the high back vowel `u`.
    pub fn is_back_rounded(self) -> bool {
        matches!(
            self,
            Rime::U
                | Rime::Ua
                | Rime::Uai
                | Rime::Uan
                | Rime::Uang
                | Rime::Uei
                | Rime::Uen
                | Rime::Ueng
                | Rime::Uo
        )
    }
}

impl From<Rime> for &'static str {
    fn from(rime: Rime) -> Self {
        rime.as_str()
    }
}

impl fmt::Display for Rime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rime {
    type Err = ChartError;

    /// Accepts the phonemic spelling, with `v` standing in for `ü`
    /// (`"v"`, `"van"`, `"ve"`, `"vn"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let spelled = trimmed.replace('v', "ü");
        ALL_RIMES
            .iter()
            .copied()
            .find(|r| r.as_str() == spelled)
            .ok_or_else(|| ChartError::UnknownRime(trimmed.to_string()))
    }
}

/// Rime rows in display order. `Rime::I` appears at rows 0 and 11.
pub const RIMES: [Rime; 37] = [
    // Buzzed i after z/c/s/zh/ch/sh/r
    Rime::I,
    // a group
    Rime::A,
    Rime::Ai,
    Rime::An,
    Rime::Ang,
    Rime::Ao,
    // e group
    Rime::E,
    Rime::Ei,
    Rime::En,
    Rime::Eng,
    Rime::Er,
    // i group
    Rime::I,
    Rime::Ia,
    Rime::Ian,
    Rime::Iang,
    Rime::Iao,
    Rime::Ie,
    Rime::In,
    Rime::Ing,
    Rime::Iong,
    Rime::Iou,
    // o group
    Rime::O,
    Rime::Ong,
    Rime::Ou,
    // u group
    Rime::U,
    Rime::Ua,
    Rime::Uai,
    Rime::Uan,
    Rime::Uang,
    Rime::Uei,
    Rime::Uen,
    Rime::Ueng,
    Rime::Uo,
    // ü group
    Rime::V,
    Rime::Van,
    Rime::Ve,
    Rime::Vn,
];

/// Zero-onset spelling per row, aligned with [`RIMES`].
const STANDALONE: [Option<&str>; 37] = [
    None,
    Some("a"),
    Some("ai"),
    Some("an"),
    Some("ang"),
    Some("ao"),
    Some("e"),
    Some("ei"),
    Some("en"),
    Some("eng"),
    Some("er"),
    // plain i stands alone as yi; the buzzed i row above has no zero-onset form
    Some("yi"),
    Some("ya"),
    Some("yan"),
    Some("yang"),
    Some("yao"),
    Some("ye"),
    Some("yin"),
    Some("ying"),
    Some("yong"),
    Some("you"),
    Some("o"),
    None,
    Some("ou"),
    Some("wu"),
    Some("wa"),
    Some("wai"),
    Some("wan"),
    Some("wang"),
    Some("wei"),
    Some("wen"),
    Some("weng"),
    Some("wo"),
    Some("yu"),
    Some("yuan"),
    Some("yue"),
    Some("yun"),
];

/// One occurrence of a rime in the chart: the rime plus its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RimeSlot {
    rime: Rime,
    row: usize,
}

impl RimeSlot {
    /// The slot at a display row.
    pub fn at(row: usize) -> Result<Self, ChartError> {
        RIMES
            .get(row)
            .map(|&rime| Self { rime, row })
            .ok_or(ChartError::InvalidRow {
                row,
                rows: RIMES.len(),
            })
    }

    /// Every slot the rime occupies, top to bottom. Only `Rime::I` has two.
    pub fn slots_of(rime: Rime) -> impl Iterator<Item = RimeSlot> {
        RIMES
            .iter()
            .enumerate()
            .filter(move |(_, &r)| r == rime)
            .map(|(row, &rime)| RimeSlot { rime, row })
    }

    /// The last (for `i`: the plain) occurrence of a rime.
    pub fn of(rime: Rime) -> Self {
        // Every rime has at least one row
        Self::slots_of(rime)
            .last()
            .unwrap_or(RimeSlot { rime, row: 0 })
    }

    /// All 37 slots in display order.
    pub fn all() -> impl Iterator<Item = RimeSlot> {
        RIMES
            .iter()
            .enumerate()
            .map(|(row, &rime)| RimeSlot { rime, row })
    }

    pub fn rime(self) -> Rime {
        self.rime
    }

    pub fn row(self) -> usize {
        self.row
    }

    /// Whether this is the topmost row at which the rime occurs.
    pub fn is_first_occurrence(self) -> bool {
        RIMES.iter().position(|&r| r == self.rime) == Some(self.row)
    }

    /// Zero-onset spelling of this row, if the rime can stand alone.
    pub(crate) fn standalone(self) -> Option<&'static str> {
        STANDALONE.get(self.row).copied().flatten()
    }
}

/// Parses a row index, e.g. `"11"` for the plain `i` row.
impl FromStr for RimeSlot {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let row = trimmed
            .parse()
            .map_err(|_| ChartError::MalformedRow(trimmed.to_string()))?;
        RimeSlot::at(row)
    }
}

impl fmt::Display for RimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{} (row {})", self.rime.display(), self.row)
    }
}

/// Canonical spellings that occur in Mandarin, grouped by row.
pub const VALID_COMBINATIONS: &[&str] = &[
    // buzzed i
    "zi", "ci", "si", "zhi", "chi", "shi", "ri",
    // a
    "a", "ba", "pa", "ma", "fa", "da", "ta", "na", "la", "ga", "ka", "ha", "za", "ca", "sa",
    "zha", "cha", "sha",
    // ai
    "ai", "bai", "pai", "mai", "dai", "tai", "nai", "lai", "gai", "kai", "hai", "zai", "cai",
    "sai", "zhai", "chai", "shai",
    // an
    "an", "ban", "pan", "man", "fan", "dan", "tan", "nan", "lan", "gan", "kan", "han", "zan",
    "can", "san", "zhan", "chan", "shan", "ran",
    // ang
    "ang", "bang", "pang", "mang", "fang", "dang", "tang", "nang", "lang", "gang", "kang",
    "hang", "zang", "cang", "sang", "zhang", "chang", "shang", "rang",
    // ao
    "ao", "bao", "pao", "mao", "dao", "tao", "nao", "lao", "gao", "kao", "hao", "zao", "cao",
    "sao", "zhao", "chao", "shao", "rao",
    // e
    "e", "me", "de", "te", "ne", "le", "ge", "ke", "he", "ze", "ce", "se", "zhe", "che", "she",
    "re",
    // ei
    "ei", "bei", "pei", "mei", "fei", "dei", "nei", "lei", "gei", "hei", "zei", "zhei", "shei",
    // en
    "en", "ben", "pen", "men", "fen", "nen", "gen", "ken", "hen", "zen", "cen", "sen", "zhen",
    "chen", "shen", "ren",
    // eng
    "eng", "beng", "peng", "meng", "feng", "deng", "teng", "neng", "leng", "geng", "keng",
    "heng", "zeng", "ceng", "seng", "zheng", "cheng", "sheng", "reng",
    // er
    "er",
    // plain i
    "yi", "bi", "pi", "mi", "di", "ti", "ni", "li", "ji", "qi", "xi",
    // ia
    "ya", "dia", "lia", "jia", "qia", "xia",
    // ian
    "yan", "bian", "pian", "mian", "dian", "tian", "nian", "lian", "jian", "qian", "xian",
    // iang
    "yang", "niang", "liang", "jiang", "qiang", "xiang",
    // iao
    "yao", "biao", "piao", "miao", "diao", "tiao", "niao", "liao", "jiao", "qiao", "xiao",
    // ie
    "ye", "bie", "pie", "mie", "die", "tie", "nie", "lie", "jie", "qie", "xie",
    // in
    "yin", "bin", "pin", "min", "nin", "lin", "jin", "qin", "xin",
    // ing
    "ying", "bing", "ping", "ming", "ding", "ting", "ning", "ling", "jing", "qing", "xing",
    // iong
    "yong", "jiong", "qiong", "xiong",
    // iou (written -iu)
    "you", "miu", "diu", "niu", "liu", "jiu", "qiu", "xiu",
    // o
    "o", "bo", "po", "mo", "fo",
    // ong
    "dong", "tong", "nong", "long", "gong", "kong", "hong", "zong", "cong", "song", "zhong",
    "chong", "rong",
    // ou
    "ou", "pou", "mou", "fou", "dou", "tou", "lou", "gou", "kou", "hou", "zou", "cou", "sou",
    "zhou", "chou", "shou", "rou",
    // u
    "wu", "bu", "pu", "mu", "fu", "du", "tu", "nu", "lu", "gu", "ku", "hu", "zu", "cu", "su",
    "zhu", "chu", "shu", "ru",
    // ua
    "wa", "gua", "kua", "hua", "zhua", "shua",
    // uai
    "wai", "guai", "kuai", "huai", "zhuai", "chuai", "shuai",
    // uan
    "wan", "duan", "tuan", "nuan", "luan", "guan", "kuan", "huan", "zuan", "cuan", "suan",
    "zhuan", "chuan", "shuan", "ruan",
    // uang
    "wang", "guang", "kuang", "huang", "zhuang", "chuang", "shuang",
    // uei (written -ui)
    "wei", "dui", "tui", "gui", "kui", "hui", "zui", "cui", "sui", "zhui", "chui", "shui", "rui",
    // uen (written -un)
    "wen", "dun", "tun", "lun", "gun", "kun", "hun", "zun", "cun", "sun", "zhun", "chun", "shun",
    "run",
    // ueng
    "weng",
    // uo
    "wo", "duo", "tuo", "nuo", "luo", "guo", "kuo", "huo", "zuo", "cuo", "suo", "zhuo", "chuo",
    "shuo", "ruo",
    // ü
    "yu", "nü", "lü", "ju", "qu", "xu",
    // üan
    "yuan", "juan", "quan", "xuan",
    // üe
    "yue", "nüe", "lüe", "jue", "que", "xue",
    // ün
    "yun", "jun", "qun", "xun",
];

/// Membership test against [`VALID_COMBINATIONS`].
pub fn is_valid_combination(spelling: &str) -> bool {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| VALID_COMBINATIONS.iter().copied().collect())
        .contains(spelling)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onset_columns_follow_declaration_order() {
        for (i, onset) in ONSETS.iter().enumerate() {
            assert_eq!(onset.column(), i);
        }
        assert_eq!(Onset::Z.column(), 14);
        assert_eq!(Onset::Zh.column(), 17);
    }

    #[test]
    fn test_onset_parse() {
        assert_eq!("zh".parse::<Onset>().unwrap(), Onset::Zh);
        assert_eq!(" q ".parse::<Onset>().unwrap(), Onset::Q);
        assert_eq!(
            "y".parse::<Onset>(),
            Err(ChartError::UnknownOnset("y".to_string()))
        );
    }

    #[test]
    fn test_rime_parse_accepts_v_alias() {
        assert_eq!("ü".parse::<Rime>().unwrap(), Rime::V);
        assert_eq!("v".parse::<Rime>().unwrap(), Rime::V);
        assert_eq!("van".parse::<Rime>().unwrap(), Rime::Van);
        assert_eq!("iou".parse::<Rime>().unwrap(), Rime::Iou);
        assert!("iu".parse::<Rime>().is_err());
    }

    #[test]
    fn test_rime_display_contractions() {
        assert_eq!(Rime::Iou.display(), "iu");
        assert_eq!(Rime::Uei.display(), "ui");
        assert_eq!(Rime::Uen.display(), "un");
        assert_eq!(Rime::Ueng.display(), "ueng");
        assert_eq!(Rime::Van.display(), "üan");
    }

    #[test]
    fn test_every_rime_has_a_row() {
        for rime in ALL_RIMES {
            assert!(RimeSlot::slots_of(rime).count() >= 1, "{} has no row", rime);
        }
        assert_eq!(RimeSlot::slots_of(Rime::I).count(), 2);
        assert_eq!(RimeSlot::all().count(), 37);
    }

    #[test]
    fn test_bare_i_slots() {
        let rows: Vec<usize> = RimeSlot::slots_of(Rime::I).map(|s| s.row()).collect();
        assert_eq!(rows, vec![0, 11]);

        let first = RimeSlot::at(0).unwrap();
        let plain = RimeSlot::at(11).unwrap();
        assert!(first.is_first_occurrence());
        assert!(!plain.is_first_occurrence());
        assert_eq!(RimeSlot::of(Rime::I), plain);
    }

    #[test]
    fn test_row_out_of_range() {
        assert_eq!(
            RimeSlot::at(37),
            Err(ChartError::InvalidRow { row: 37, rows: 37 })
        );
    }

    #[test]
    fn test_row_from_text() {
        assert_eq!("11".parse::<RimeSlot>(), RimeSlot::at(11));
        assert_eq!(
            "40".parse::<RimeSlot>(),
            Err(ChartError::InvalidRow { row: 40, rows: 37 })
        );
        assert_eq!(
            "ua".parse::<RimeSlot>(),
            Err(ChartError::MalformedRow("ua".to_string()))
        );
        assert!("-1".parse::<RimeSlot>().is_err());
    }

    #[test]
    fn test_standalone_forms_are_valid() {
        for slot in RimeSlot::all() {
            if let Some(form) = slot.standalone() {
                assert!(is_valid_combination(form), "{} not in inventory", form);
            }
        }
    }

    #[test]
    fn test_valid_combinations_have_no_duplicates() {
        let set: HashSet<&str> = VALID_COMBINATIONS.iter().copied().collect();
        assert_eq!(set.len(), VALID_COMBINATIONS.len());
    }
}
