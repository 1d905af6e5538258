//! # Pinyin Chart
//!
//! The syllable inventory of Mandarin pinyin as an onset × rime chart, with
//! tone marking, learner notation and sequential tone-drill playback.
//!
//! ## Modules
//! - `inventory` - The 21 onsets, 36 rimes and 37 chart rows
//! - `phonology` - Spelling rules, validity and cell lookup
//! - `tones` - Written tone marks
//! - `notation` - Onset/rime glyphs for a target-language script
//! - `chart` - Serializable chart model for UIs
//! - `playback` - Queue, pacing and cancellation for audio drills
//! - `config` - YAML configuration
//!
//! ## Example
//! ```rust
//! use pinyin_chart::{is_valid, normalize, tones, Onset, Rime, RimeSlot};
//!
//! let slot = RimeSlot::of(Rime::Uen);
//! assert!(is_valid(Onset::D, slot));
//! assert_eq!(normalize(Onset::D, slot), "dun");
//! assert_eq!(tones("dun")[3], "dùn");
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod inventory;
pub mod notation;
pub mod phonology;
pub mod playback;
pub mod tones;

pub use chart::{Chart, ChartCell, ChartRow, ColumnHeader};
pub use config::{ChartConfig, PacingConfig};
pub use error::*;
pub use inventory::{
    is_valid_combination, Onset, OnsetClass, Rime, RimeSlot, ONSETS, RIMES, VALID_COMBINATIONS,
};
pub use notation::{JoinMode, NotationEntry, NotationTable};
pub use phonology::{
    column_selection, decompose, display_rime, is_valid, locate, normalize, row_selection, spell,
    standalone_column, standalone_form, Cell,
};
pub use tones::{marked, tones, Tone};
