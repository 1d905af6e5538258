//! # Notation Lookup
//!
//! Per-locale phonetic notation for onsets and rimes, and the combinator
//! that builds a cell's notation from its two halves.
//!
//! ## Purpose
//! The glyphs themselves are configuration, not derived: a [`NotationTable`]
//! is loaded from YAML, and any number of alternative tables (different
//! scripts, IPA, teaching variants) go through the same lookup.
//!
//! ## Table Format
//! ```yaml
//! onsets:
//!   zh:
//!     glyphs: { urdu: "چ", ipa: "[tʂ]" }
//!     class: hard
//!     note: "Hard/Retroflex – curl tongue back"
//! rimes:
//!   a:
//!     glyphs: { urdu: "آ" }
//!     marks: "مدّہ"
//! ```
//!
//! ## Missing Data
//! A missing onset, rime or locale renders as an empty string. The other half
//! of the notation is still produced, so a partially filled table never
//! breaks a chart.
//!
//! ## Example
//! ```rust
//! use pinyin_chart::{JoinMode, NotationTable};
//!
//! let table = NotationTable::builtin();
//! assert_eq!(table.notate("b", "a", "urdu", JoinMode::Joined), "پآ");
//! assert_eq!(table.notate("b", "a", "urdu", JoinMode::Separated), "پ + آ");
//! assert_eq!(table.notate("b", "a", "ipa", JoinMode::Separated), "[p] + ");
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::inventory::{Onset, Rime};

const BUILTIN_TABLE: &str = include_str!("../data/notation.yaml");

/// How onset and rime notation are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    /// Onset notation immediately followed by rime notation
    #[default]
    Joined,
    /// `onset + rime`, for a decomposed teaching view
    Separated,
}

impl JoinMode {
    pub fn as_str(self) -> &'static str {
        match self {
            JoinMode::Joined => "joined",
            JoinMode::Separated => "separated",
        }
    }

    /// The other mode, for a join/split toggle.
    pub fn toggled(self) -> Self {
        match self {
            JoinMode::Joined => JoinMode::Separated,
            JoinMode::Separated => JoinMode::Joined,
        }
    }

    pub fn combine(self, onset: &str, rime: &str) -> String {
        match self {
            JoinMode::Joined => format!("{}{}", onset, rime),
            JoinMode::Separated => format!("{} + {}", onset, rime),
        }
    }
}

impl fmt::Display for JoinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinMode {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "joined" => Ok(JoinMode::Joined),
            "separated" => Ok(JoinMode::Separated),
            other => Err(ChartError::UnknownJoinMode(other.to_string())),
        }
    }
}

/// Notation attached to one onset or rime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotationEntry {
    /// Display text per locale
    pub glyphs: BTreeMap<String, String>,
    /// Phonological class tag, e.g. `soft` / `hard`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Diacritics the glyph relies on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks: Option<String>,
    /// Free-text teaching note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl NotationEntry {
    /// Glyph for a locale, or `""` when the entry has none.
    pub fn glyph(&self, locale: &str) -> &str {
        self.glyphs.get(locale).map(String::as_str).unwrap_or("")
    }
}

/// Onset and rime notation, keyed by spelling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotationTable {
    pub onsets: HashMap<String, NotationEntry>,
    pub rimes: HashMap<String, NotationEntry>,
}

impl NotationTable {
    /// Parse a table from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, ChartError> {
        serde_yaml::from_str(content).map_err(|e| ChartError::NotationError(e.to_string()))
    }

    /// Read and parse a YAML table file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ChartError::NotationError(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let table = Self::from_yaml(&content)?;
        tracing::debug!(
            path = %path.display(),
            onsets = table.onsets.len(),
            rimes = table.rimes.len(),
            "loaded notation table"
        );
        Ok(table)
    }

    /// The table shipped with the crate (Urdu script and IPA).
    pub fn builtin() -> &'static NotationTable {
        static BUILTIN: OnceLock<NotationTable> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Self::from_yaml(BUILTIN_TABLE).unwrap_or_else(|e| {
                tracing::error!(error = %e, "built-in notation table is malformed");
                NotationTable::default()
            })
        })
    }

    pub fn onset_entry(&self, onset: &str) -> Option<&NotationEntry> {
        self.onsets.get(onset)
    }

    /// Rime entries are keyed by phonemic spelling; `v` is accepted for `ü`.
    pub fn rime_entry(&self, rime: &str) -> Option<&NotationEntry> {
        self.rimes
            .get(rime)
            .or_else(|| self.rimes.get(&rime.replace('v', "ü")))
    }

    pub fn onset_glyph(&self, onset: &str, locale: &str) -> &str {
        self.onset_entry(onset).map(|e| e.glyph(locale)).unwrap_or("")
    }

    pub fn rime_glyph(&self, rime: &str, locale: &str) -> &str {
        self.rime_entry(rime).map(|e| e.glyph(locale)).unwrap_or("")
    }

    /// Notation for an onset/rime pair in one locale.
    ///
    /// Each half is looked up on its own; whatever is missing contributes an
    /// empty string.
    pub fn notate(&self, onset: &str, rime: &str, locale: &str, mode: JoinMode) -> String {
        mode.combine(self.onset_glyph(onset, locale), self.rime_glyph(rime, locale))
    }

    /// Typed form of [`NotationTable::notate`].
    pub fn notate_cell(&self, onset: Onset, rime: Rime, locale: &str, mode: JoinMode) -> String {
        self.notate(onset.as_str(), rime.as_str(), locale, mode)
    }

    /// Every locale that appears anywhere in the table, sorted.
    pub fn locales(&self) -> Vec<String> {
        let locales: BTreeSet<&String> = self
            .onsets
            .values()
            .chain(self.rimes.values())
            .flat_map(|entry| entry.glyphs.keys())
            .collect();
        locales.into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_parses() {
        let table = NotationTable::from_yaml(BUILTIN_TABLE).unwrap();
        assert_eq!(table.onsets.len(), 21);
        assert_eq!(table.rimes.len(), 36);
    }

    #[test]
    fn test_builtin_covers_inventory() {
        let table = NotationTable::builtin();
        for onset in crate::inventory::ONSETS {
            assert!(table.onset_entry(onset.as_str()).is_some(), "missing {}", onset);
        }
        for slot in crate::inventory::RimeSlot::all() {
            let rime = slot.rime().as_str();
            assert!(table.rime_entry(rime).is_some(), "missing {}", rime);
        }
    }

    #[test]
    fn test_notate_modes() {
        let table = NotationTable::builtin();
        assert_eq!(table.notate("zh", "i", "urdu", JoinMode::Joined), "چی");
        assert_eq!(table.notate("zh", "i", "urdu", JoinMode::Separated), "چ + ی");
        assert_eq!(
            table.notate_cell(Onset::M, Rime::A, "urdu", JoinMode::Joined),
            "مآ"
        );
    }

    #[test]
    fn test_notate_missing_pieces_degrade_to_empty() {
        let table = NotationTable::builtin();
        // rimes carry no IPA in the built-in table
        assert_eq!(table.notate("m", "a", "ipa", JoinMode::Joined), "[m]");
        assert_eq!(table.notate("y", "a", "urdu", JoinMode::Joined), "آ");
        assert_eq!(table.notate("y", "zz", "urdu", JoinMode::Separated), " + ");
        assert_eq!(table.notate("b", "a", "cyrillic", JoinMode::Joined), "");
    }

    #[test]
    fn test_rime_entry_accepts_v() {
        let table = NotationTable::builtin();
        assert_eq!(table.rime_glyph("van", "urdu"), table.rime_glyph("üan", "urdu"));
        assert!(!table.rime_glyph("ve", "urdu").is_empty());
    }

    #[test]
    fn test_entry_metadata() {
        let table = NotationTable::builtin();
        let j = table.onset_entry("j").unwrap();
        assert_eq!(j.class.as_deref(), Some("soft"));
        assert!(j.note.is_some());
        assert_eq!(table.rime_entry("a").unwrap().marks.as_deref(), Some("مدّہ"));
    }

    #[test]
    fn test_locales() {
        assert_eq!(NotationTable::builtin().locales(), vec!["ipa", "urdu"]);
    }

    #[test]
    fn test_custom_table() {
        let yaml = r#"
onsets:
  b:
    glyphs: { pinyin-zhuyin: "ㄅ" }
rimes:
  a:
    glyphs: { pinyin-zhuyin: "ㄚ" }
"#;
        let table = NotationTable::from_yaml(yaml).unwrap();
        assert_eq!(table.notate("b", "a", "pinyin-zhuyin", JoinMode::Joined), "ㄅㄚ");
    }

    #[test]
    fn test_malformed_table() {
        let err = NotationTable::from_yaml("onsets: [1, 2").unwrap_err();
        assert!(matches!(err, ChartError::NotationError(_)));
    }

    #[test]
    fn test_join_mode_parse() {
        assert_eq!("joined".parse::<JoinMode>().unwrap(), JoinMode::Joined);
        assert_eq!("separated".parse::<JoinMode>().unwrap(), JoinMode::Separated);
        assert_eq!(
            "split".parse::<JoinMode>(),
            Err(ChartError::UnknownJoinMode("split".to_string()))
        );
        assert_eq!(JoinMode::Joined.toggled(), JoinMode::Separated);
    }
}
