//! Playback type definitions
//!
//! Items, tickets and directives exchanged between the scheduler and the
//! audio transport that drives it.

use std::time::Duration;

use serde::Serialize;

use crate::tones::Tone;

/// One clip to play: a syllable in one tone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackItem {
    pub syllable: String,
    pub tone: Tone,
}

impl PlaybackItem {
    pub fn new(syllable: impl Into<String>, tone: Tone) -> Self {
        Self {
            syllable: syllable.into(),
            tone,
        }
    }
}

/// Identifies one item of one sequence.
///
/// Every signal from the transport carries the ticket of the item it is
/// about. A ticket from a stopped or restarted sequence no longer matches and
/// the signal is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub(crate) generation: u64,
    pub(crate) position: usize,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Zero-based index of the item within its sequence.
    pub fn position(&self) -> usize {
        self.position
    }
}

/// An item ready to be handed to the audio transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub ticket: Ticket,
    pub item: PlaybackItem,
    pub locator: String,
}

/// What the transport should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Wait `delay`, call [`admit`](super::PlaybackScheduler::admit) with the
    /// cue's ticket, and play the cue's locator if admitted.
    Play { cue: Cue, delay: Duration },
    /// The sequence ran out of items; the scheduler is idle.
    Finished,
    /// The signal belonged to a cancelled or superseded item; nothing to do.
    Ignored,
}

/// Scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// No sequence active
    #[default]
    Idle,
    /// Next item chosen, inter-item delay running
    Waiting,
    /// Item admitted, audio resource resolving
    Loading,
    /// Item audible
    Playing,
}

/// Inter-item delays.
///
/// - `tone_gap`: next tone of the same syllable
/// - `syllable_gap`: first tone of the next syllable
/// - `error_gap`: after a clip failed to load or play (shorter than `tone_gap`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub tone_gap: Duration,
    pub syllable_gap: Duration,
    pub error_gap: Duration,
}

impl Pacing {
    pub const DEFAULT_TONE_GAP_MS: u64 = 350;
    pub const DEFAULT_SYLLABLE_GAP_MS: u64 = 800;
    pub const DEFAULT_ERROR_GAP_MS: u64 = 150;

    pub fn from_millis(tone_gap: u64, syllable_gap: u64, error_gap: u64) -> Self {
        Self {
            tone_gap: Duration::from_millis(tone_gap),
            syllable_gap: Duration::from_millis(syllable_gap),
            error_gap: Duration::from_millis(error_gap),
        }
    }

    /// Delay before `next` after `previous` finished normally: the tone gap
    /// while the syllable stays the same, the syllable gap when it changes.
    pub fn between(&self, previous: &PlaybackItem, next: &PlaybackItem) -> Duration {
        if previous.syllable == next.syllable {
            self.tone_gap
        } else {
            self.syllable_gap
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from_millis(
            Self::DEFAULT_TONE_GAP_MS,
            Self::DEFAULT_SYLLABLE_GAP_MS,
            Self::DEFAULT_ERROR_GAP_MS,
        )
    }
}
