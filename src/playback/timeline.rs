//! Virtual-clock playback driver
//!
//! Runs a [`PlaybackScheduler`] to completion against an [`AudioTransport`]
//! without real audio or real timers, producing the timeline a UI would
//! highlight: when each clip starts, how long it lasts, and whether it was
//! played or skipped.

use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use super::locator::Locate;
use super::scheduler::PlaybackScheduler;
use super::types::Directive;
use crate::tones::Tone;

/// Why a clip could not be played.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("audio resource not found: {0}")]
    NotFound(String),

    #[error("audio resource '{locator}' is unplayable: {reason}")]
    Unplayable { locator: String, reason: String },
}

/// Resolves clips for the timeline driver.
pub trait AudioTransport {
    /// Length of the clip at `locator`, or why it cannot be played.
    fn clip_length(&mut self, locator: &str) -> Result<Duration, TransportError>;
}

/// Every clip has the same length, except locators listed as missing.
#[derive(Debug, Clone, Default)]
pub struct UniformTransport {
    pub clip: Duration,
    pub missing: HashSet<String>,
}

impl UniformTransport {
    pub fn new(clip: Duration) -> Self {
        Self {
            clip,
            missing: HashSet::new(),
        }
    }

    pub fn with_missing(mut self, locator: impl Into<String>) -> Self {
        self.missing.insert(locator.into());
        self
    }
}

impl AudioTransport for UniformTransport {
    fn clip_length(&mut self, locator: &str) -> Result<Duration, TransportError> {
        if self.missing.contains(locator) {
            Err(TransportError::NotFound(locator.to_string()))
        } else {
            Ok(self.clip)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Played,
    Skipped,
}

/// One item on the playback timeline.
///
/// # Fields
/// - `start_ms`: when the clip starts, from the start of the sequence
/// - `duration_ms`: clip length (0 for skipped clips)
/// - `delay_ms`: pause between the previous item and this one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub start_ms: u64,
    pub duration_ms: u64,
    pub delay_ms: u64,
    pub syllable: String,
    pub tone: Tone,
    pub locator: String,
    pub outcome: Outcome,
}

/// Play `selection` through the scheduler on a virtual clock.
pub fn simulate<L, T, S>(
    scheduler: &mut PlaybackScheduler<L>,
    transport: &mut T,
    selection: &[S],
) -> Vec<TimelineEntry>
where
    L: Locate,
    T: AudioTransport,
    S: AsRef<str>,
{
    let mut entries = Vec::new();
    let mut clock = Duration::ZERO;
    let mut directive = scheduler.start(selection);

    while let Directive::Play { cue, delay } = directive {
        clock += delay;
        if !scheduler.admit(cue.ticket) {
            break;
        }

        let mut entry = TimelineEntry {
            start_ms: millis(clock),
            duration_ms: 0,
            delay_ms: millis(delay),
            syllable: cue.item.syllable.clone(),
            tone: cue.item.tone,
            locator: cue.locator.clone(),
            outcome: Outcome::Played,
        };

        directive = match transport.clip_length(&cue.locator) {
            Ok(length) => {
                scheduler.on_loaded(cue.ticket);
                entry.duration_ms = millis(length);
                clock += length;
                scheduler.on_finished(cue.ticket)
            }
            Err(e) => {
                tracing::debug!(error = %e, "transport failed");
                entry.outcome = Outcome::Skipped;
                scheduler.on_failed(cue.ticket)
            }
        };
        entries.push(entry);
    }

    entries
}

fn millis(d: Duration) -> u64 {
    d.as_millis() as u64
}
