//! # Playback Module
//!
//! Tone-drill audio playback for a chart selection.
//!
//! ## Purpose
//! Clicking a row, a column or a single cell plays every syllable of the
//! selection in all four tones, one clip at a time, highlighting the clip
//! that is playing:
//!
//! ```text
//! selection ["ba", "bo"]
//!   ba1 ─350ms─ ba2 ─350ms─ ba3 ─350ms─ ba4 ─800ms─ bo1 ─350ms─ bo2 ...
//! ```
//!
//! ## Sub-modules
//! - `types` - PlaybackItem, Ticket, Cue, Directive, Pacing
//! - `scheduler` - The state machine that owns the queue
//! - `locator` - (syllable, tone) → clip path/URL templates
//! - `timeline` - Virtual-clock driver producing a highlight timeline
//!
//! ## Cancellation
//! At most one sequence is active. `start` during playback cancels the old
//! sequence first; `stop` drops the queue immediately. Signals and timers
//! from a cancelled sequence carry an outdated [`Ticket`] and are ignored.
//!
//! ## Failures
//! A clip that fails to load or play is skipped after [`Pacing::error_gap`],
//! which is shorter than the normal tone gap. Nothing is retried, so a
//! sequence always terminates.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use pinyin_chart::playback::{simulate, PlaybackScheduler, UniformTransport};
//!
//! let mut scheduler = PlaybackScheduler::default();
//! let mut transport = UniformTransport::new(Duration::from_millis(600));
//! let timeline = simulate(&mut scheduler, &mut transport, &["ba", "bo"]);
//!
//! assert_eq!(timeline.len(), 8);
//! assert_eq!(timeline[1].delay_ms, 350); // ba1 -> ba2
//! assert_eq!(timeline[4].delay_ms, 800); // ba4 -> bo1
//! assert!(scheduler.active().is_none());
//! ```
//!
//! ## Related Modules
//! - `phonology` - Builds row/column selections
//! - `tones` - Tone enum and written tone marks
//! - `config` - Pacing and locator template from YAML

mod locator;
mod scheduler;
mod timeline;
mod types;


pub use locator::{ascii_alias, Locate, LocatorTemplate};
pub use scheduler::{build_queue, PlaybackScheduler};
pub use timeline::{simulate, AudioTransport, Outcome, TimelineEntry, TransportError, UniformTransport};
pub use types::{Cue, Directive, Pacing, PlaybackItem, PlaybackState, Ticket};

pub use crate::tones::Tone;
