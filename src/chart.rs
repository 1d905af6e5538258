//! # Chart Model
//!
//! The data a UI needs to draw the chart: one header per onset column, one
//! row per rime slot with its standalone cell and one cell per onset. Invalid
//! combinations are `None` so the UI can draw an empty cell.
//!
//! Layout, hover state and styling stay in the UI; this module only fills in
//! spellings, notation and tone renderings.
//!
//! ## Example
//! ```rust
//! use pinyin_chart::{Chart, JoinMode, NotationTable};
//!
//! let chart = Chart::build(NotationTable::builtin(), "urdu", JoinMode::Joined);
//! assert_eq!(chart.rows.len(), 37);
//! assert_eq!(chart.rows[20].label, "-iu");
//!
//! let cell = chart.rows[1].cells[0].as_ref().unwrap();
//! assert_eq!(cell.pinyin, "ba");
//! assert_eq!(cell.tones[0], "bā");
//! ```

use serde::Serialize;

use crate::inventory::{Onset, Rime, RimeSlot, ONSETS};
use crate::notation::{JoinMode, NotationTable};
use crate::phonology::{is_valid, locate, normalize, standalone_form, Cell};
use crate::tones::tones;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeader {
    pub onset: Onset,
    pub notation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartCell {
    pub pinyin: String,
    pub notation: String,
    /// Tones 1-4 and the neutral form
    pub tones: [String; 5],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRow {
    pub row: usize,
    pub rime: Rime,
    /// Row header, e.g. `-iu` for `iou`
    pub label: String,
    pub notation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub standalone: Option<ChartCell>,
    /// One entry per onset column, `None` where no syllable exists
    pub cells: Vec<Option<ChartCell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub locale: String,
    pub join: JoinMode,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<ChartRow>,
}

impl Chart {
    pub fn build(table: &NotationTable, locale: &str, join: JoinMode) -> Self {
        let columns = ONSETS
            .iter()
            .map(|&onset| {
                let entry = table.onset_entry(onset.as_str());
                ColumnHeader {
                    onset,
                    notation: table.onset_glyph(onset.as_str(), locale).to_string(),
                    class: entry.and_then(|e| e.class.clone()),
                    note: entry.and_then(|e| e.note.clone()),
                }
            })
            .collect();

        let rows = RimeSlot::all()
            .map(|slot| build_row(table, locale, join, slot))
            .collect();

        Self {
            locale: locale.to_string(),
            join,
            columns,
            rows,
        }
    }

    /// The cell holding a canonical spelling (`v` accepted for `ü`).
    pub fn find(&self, pinyin: &str) -> Option<&ChartCell> {
        match locate(pinyin)? {
            Cell::Syllable(onset, slot) => self.rows.get(slot.row())?.cells.get(onset.column())?.as_ref(),
            Cell::Standalone(slot) => self.rows.get(slot.row())?.standalone.as_ref(),
        }
    }
}

fn build_row(table: &NotationTable, locale: &str, join: JoinMode, slot: RimeSlot) -> ChartRow {
    let rime = slot.rime();
    let rime_notation = table.rime_glyph(rime.as_str(), locale).to_string();

    // The standalone column shows the rime's own notation
    let standalone = standalone_form(slot).map(|pinyin| ChartCell {
        tones: tones(&pinyin),
        notation: rime_notation.clone(),
        pinyin,
    });

    let cells = ONSETS
        .iter()
        .map(|&onset| {
            if !is_valid(onset, slot) {
                return None;
            }
            let pinyin = normalize(onset, slot);
            Some(ChartCell {
                tones: tones(&pinyin),
                notation: table.notate_cell(onset, rime, locale, join),
                pinyin,
            })
        })
        .collect();

    ChartRow {
        row: slot.row(),
        rime,
        label: format!("-{}", rime.display()),
        notation: rime_notation,
        note: table.rime_entry(rime.as_str()).and_then(|e| e.note.clone()),
        standalone,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(join: JoinMode) -> Chart {
        Chart::build(NotationTable::builtin(), "urdu", join)
    }

    #[test]
    fn test_chart_dimensions() {
        let chart = chart(JoinMode::Joined);
        assert_eq!(chart.columns.len(), 21);
        assert_eq!(chart.rows.len(), 37);
        assert!(chart.rows.iter().all(|r| r.cells.len() == 21));
    }

    #[test]
    fn test_buzzed_i_row_cells() {
        let chart = chart(JoinMode::Joined);
        let row0 = &chart.rows[0];
        assert!(row0.standalone.is_none());
        assert!(row0.cells[Onset::B.column()].is_none());
        let zhi = row0.cells[Onset::Zh.column()].as_ref().unwrap();
        assert_eq!(zhi.pinyin, "zhi");
        assert_eq!(zhi.notation, "چی");
    }

    #[test]
    fn test_standalone_cell_uses_rime_notation() {
        let chart = chart(JoinMode::Separated);
        let you = chart.rows[20].standalone.as_ref().unwrap();
        assert_eq!(you.pinyin, "you");
        assert_eq!(you.notation, "یو");
        assert_eq!(you.tones[2], "yǒu");
    }

    #[test]
    fn test_separated_notation() {
        let chart = chart(JoinMode::Separated);
        let ba = chart.find("ba").unwrap();
        assert_eq!(ba.notation, "پ + آ");
    }

    #[test]
    fn test_headers() {
        let chart = chart(JoinMode::Joined);
        assert_eq!(chart.columns[Onset::J.column()].class.as_deref(), Some("soft"));
        assert_eq!(chart.rows[29].label, "-ui");
        assert_eq!(chart.rows[33].label, "-ü");
    }

    #[test]
    fn test_find() {
        let chart = chart(JoinMode::Joined);
        assert_eq!(chart.find("lv").map(|c| c.pinyin.as_str()), Some("lü"));
        assert_eq!(chart.find("yi").map(|c| c.pinyin.as_str()), Some("yi"));
        assert!(chart.find("bong").is_none());
    }

    #[test]
    fn test_unknown_locale_leaves_text_empty() {
        let chart = Chart::build(NotationTable::builtin(), "klingon", JoinMode::Joined);
        assert!(chart.columns.iter().all(|c| c.notation.is_empty()));
        assert_eq!(chart.find("ma").unwrap().notation, "");
    }

    #[test]
    fn test_chart_json() {
        let chart = chart(JoinMode::Joined);
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["join"], "joined");
        assert_eq!(json["columns"][0]["onset"], "b");
        assert_eq!(json["rows"][0]["rime"], "i");
        assert!(json["rows"][0]["cells"][0].is_null());
    }
}
