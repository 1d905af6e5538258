//! # Phonology Engine
//!
//! Pure functions over the [`crate::inventory`] tables.
//!
//! ## Purpose
//! - [`normalize()`] - Spell an (onset, rime slot) pair the way Pinyin writes it
//! - [`is_valid()`] - Decide whether a chart cell holds a real syllable
//! - [`standalone_form()`] - The zero-onset spelling of a row (`yi`, `wu`, `yu`...)
//! - [`decompose()`] - Find the cell a canonical spelling came from
//! - Row/column selections used as playback input
//!
//! ## Spelling Rules
//! Applied in order after concatenating onset and rime:
//! 1. **Contraction**: `iou → iu`, `uei → ui`, `uen → un` (`liou → liu`)
//! 2. **Umlaut dropping**: after `j q x`, a leading `ü` is written `u` (`jü → ju`)
//!
//! ## Validity
//! ```text
//! slot is row-0 i   ──> onset must be z c s zh ch sh r   ─┐
//! slot is later i   ──> onset must be b p m d t n l j q x ├─> normalize ∈ VALID_COMBINATIONS
//! anything else     ─────────────────────────────────────-┘
//! ```
//! The row checks run before the table lookup: `bi` exists, but not in row 0.
//!
//! After umlaut dropping, `j q x` spell the same in the `u` and `ü` rows
//! (`ju`, `juan`, `jun`), so both cells are valid and share a spelling.
//! [`locate()`] resolves such a spelling to the `ü` cell.
//!
//! ## Example
//! ```rust
//! use pinyin_chart::{is_valid, normalize, Onset, Rime, RimeSlot};
//!
//! let slot = RimeSlot::of(Rime::V);
//! assert_eq!(normalize(Onset::J, slot), "ju");
//! assert!(is_valid(Onset::J, slot));
//!
//! let buzzed_i = RimeSlot::at(0)?;
//! assert_eq!(normalize(Onset::Zh, buzzed_i), "zhi");
//! assert!(is_valid(Onset::Zh, buzzed_i));
//! assert!(!is_valid(Onset::B, buzzed_i));
//! # Ok::<(), pinyin_chart::ChartError>(())
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::inventory::{is_valid_combination, Onset, Rime, RimeSlot, ONSETS};

const PALATALS: [&str; 3] = ["j", "q", "x"];

/// Apply the Pinyin spelling rules to an arbitrary onset/rime spelling pair.
///
/// Never fails: spellings outside the inventory just produce strings that
/// [`is_valid`] will reject.
pub fn spell(onset: &str, rime: &str) -> String {
    let written = match rime {
        "iou" => "iu",
        "uei" => "ui",
        "uen" => "un",
        other => other,
    };

    if PALATALS.contains(&onset) {
        if let Some(rest) = written.strip_prefix('ü') {
            return format!("{}u{}", onset, rest);
        }
    }

    format!("{}{}", onset, written)
}

/// Row-header spelling of a rime (`iou` shows as `iu`).
pub fn display_rime(rime: Rime) -> &'static str {
    rime.display()
}

/// Canonical Pinyin spelling of a chart cell.
pub fn normalize(onset: Onset, slot: RimeSlot) -> String {
    spell(onset.as_str(), slot.rime().as_str())
}

/// Whether the cell at (onset, slot) holds a syllable that exists.
pub fn is_valid(onset: Onset, slot: RimeSlot) -> bool {
    if !passes_row_rules(onset, slot) {
        return false;
    }
    is_valid_combination(&normalize(onset, slot))
}

/// The bare `i` rows split their onsets by row position.
fn passes_row_rules(onset: Onset, slot: RimeSlot) -> bool {
    if slot.rime() != Rime::I {
        return true;
    }
    if slot.is_first_occurrence() {
        onset.takes_buzzed_i()
    } else {
        onset.takes_plain_i()
    }
}

/// Zero-onset spelling for a row. `None` for the buzzed `i` row and `-ong`.
pub fn standalone_form(slot: RimeSlot) -> Option<String> {
    slot.standalone().map(str::to_string)
}

/// Where a canonical spelling sits in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// An initial + final cell
    Syllable(Onset, RimeSlot),
    /// The standalone column of a row
    Standalone(RimeSlot),
}

impl Cell {
    pub fn slot(self) -> RimeSlot {
        match self {
            Cell::Syllable(_, slot) | Cell::Standalone(slot) => slot,
        }
    }

    pub fn onset(self) -> Option<Onset> {
        match self {
            Cell::Syllable(onset, _) => Some(onset),
            Cell::Standalone(_) => None,
        }
    }
}

/// Spelling → cell. Rows are inserted top to bottom, so a spelling shared by
/// a `u` row and a `ü` row keeps the `ü` cell.
fn cell_index() -> &'static HashMap<String, Cell> {
    static INDEX: OnceLock<HashMap<String, Cell>> = OnceLock::new();
    INDEX.get_or_init(|| {
        let mut index = HashMap::new();
        for slot in RimeSlot::all() {
            if let Some(form) = slot.standalone() {
                index.insert(form.to_string(), Cell::Standalone(slot));
            }
            for onset in ONSETS {
                if is_valid(onset, slot) {
                    index.insert(normalize(onset, slot), Cell::Syllable(onset, slot));
                }
            }
        }
        index
    })
}

/// Locate the chart cell that spells `canonical`.
///
/// Accepts `v` for `ü`. Returns `None` for spellings that are not in the chart.
pub fn locate(canonical: &str) -> Option<Cell> {
    let spelled = canonical.trim().replace('v', "ü");
    cell_index().get(&spelled).copied()
}

/// Recover the (onset, slot) an onset-bearing canonical spelling came from.
///
/// `normalize(decompose(x)) == x` for every valid syllable with an initial.
/// For `ju`/`juan`/`jun` and their `q`/`x` forms the `ü` row is returned.
pub fn decompose(canonical: &str) -> Option<(Onset, RimeSlot)> {
    match locate(canonical)? {
        Cell::Syllable(onset, slot) => Some((onset, slot)),
        Cell::Standalone(_) => None,
    }
}

/// All syllables of one row: the standalone form first, then each valid
/// cell in column order.
pub fn row_selection(slot: RimeSlot) -> Vec<String> {
    let mut selection: Vec<String> = standalone_form(slot).into_iter().collect();
    selection.extend(
        ONSETS
            .iter()
            .filter(|&&onset| is_valid(onset, slot))
            .map(|&onset| normalize(onset, slot)),
    );
    selection
}

/// All syllables of one onset column, top to bottom.
pub fn column_selection(onset: Onset) -> Vec<String> {
    RimeSlot::all()
        .filter(|&slot| is_valid(onset, slot))
        .map(|slot| normalize(onset, slot))
        .collect()
}

/// The standalone column, top to bottom.
pub fn standalone_column() -> Vec<String> {
    RimeSlot::all().filter_map(standalone_form).collect()
}
