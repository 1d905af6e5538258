//! Sequential playback scheduler
//!
//! A single-owner state machine that expands a selection of syllables into a
//! tone drill and hands items to an audio transport one at a time.
//!
//! ```text
//!            start(selection)
//!   Idle ─────────────────────> Waiting ──admit──> Loading ──on_loaded──> Playing
//!    ^                             ^                  │                      │
//!    │                             └── on_finished / on_failed (next item) ──┘
//!    └──── stop() / queue exhausted ──────────────────────────────────────────
//! ```
//!
//! The scheduler never sleeps or touches audio itself. It returns
//! [`Directive`]s and reacts to the transport's signals, each of which carries
//! the [`Ticket`] of the item it refers to. `start` and `stop` bump the
//! sequence generation, so a timer or completion callback left over from a
//! cancelled sequence fails the ticket check and does nothing.

use std::collections::VecDeque;
use std::time::Duration;

use super::locator::{Locate, LocatorTemplate};
use super::types::{Cue, Directive, Pacing, PlaybackItem, PlaybackState, Ticket};
use crate::tones::Tone;

/// Expand a selection into its drill queue: each syllable followed
/// immediately by its tones 1, 2, 3, 4, in selection order.
pub fn build_queue<S: AsRef<str>>(selection: &[S]) -> VecDeque<PlaybackItem> {
    selection
        .iter()
        .flat_map(|syllable| {
            Tone::ALL
                .iter()
                .map(move |&tone| PlaybackItem::new(syllable.as_ref(), tone))
        })
        .collect()
}

pub struct PlaybackScheduler<L = LocatorTemplate> {
    locator: L,
    pacing: Pacing,
    state: PlaybackState,
    generation: u64,
    position: usize,
    queue: VecDeque<PlaybackItem>,
    active: Option<PlaybackItem>,
}

impl Default for PlaybackScheduler<LocatorTemplate> {
    fn default() -> Self {
        Self::new(LocatorTemplate::default(), Pacing::default())
    }
}

impl<L: Locate> PlaybackScheduler<L> {
    pub fn new(locator: L, pacing: Pacing) -> Self {
        Self {
            locator,
            pacing,
            state: PlaybackState::Idle,
            generation: 0,
            position: 0,
            queue: VecDeque::new(),
            active: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// The item to highlight, if a sequence is active.
    pub fn active(&self) -> Option<&PlaybackItem> {
        self.active.as_ref()
    }

    /// Items still queued after the active one.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn queued(&self) -> impl Iterator<Item = &PlaybackItem> {
        self.queue.iter()
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Ticket of the active item.
    pub fn current_ticket(&self) -> Option<Ticket> {
        self.active.as_ref().map(|_| Ticket {
            generation: self.generation,
            position: self.position,
        })
    }

    /// Start a new sequence, cancelling any active one first.
    ///
    /// The first item is returned with a zero delay. An empty selection
    /// leaves the scheduler idle and returns [`Directive::Finished`].
    pub fn start<S: AsRef<str>>(&mut self, selection: &[S]) -> Directive {
        if self.state != PlaybackState::Idle {
            self.stop();
        }

        self.generation += 1;
        self.queue = build_queue(selection);
        tracing::debug!(
            generation = self.generation,
            syllables = selection.len(),
            items = self.queue.len(),
            "starting playback sequence"
        );

        match self.queue.pop_front() {
            Some(first) => {
                self.position = 0;
                self.activate(first, Duration::ZERO)
            }
            None => {
                self.finish();
                Directive::Finished
            }
        }
    }

    /// The delay for a cue elapsed. Returns whether the transport should
    /// actually start loading it; `false` means the cue is stale.
    pub fn admit(&mut self, ticket: Ticket) -> bool {
        if self.state != PlaybackState::Waiting || !self.is_current(ticket) {
            tracing::debug!(?ticket, "ignoring stale admit");
            return false;
        }
        self.state = PlaybackState::Loading;
        true
    }

    /// The transport finished resolving the clip and it is now audible.
    pub fn on_loaded(&mut self, ticket: Ticket) -> bool {
        if self.state != PlaybackState::Loading || !self.is_current(ticket) {
            tracing::debug!(?ticket, "ignoring stale load signal");
            return false;
        }
        self.state = PlaybackState::Playing;
        true
    }

    /// The clip played to its end.
    pub fn on_finished(&mut self, ticket: Ticket) -> Directive {
        if !self.is_in_flight(ticket) {
            tracing::debug!(?ticket, "ignoring stale completion");
            return Directive::Ignored;
        }
        let pacing = self.pacing;
        self.advance(|previous, next| pacing.between(previous, next))
    }

    /// The clip could not be resolved or played. The item is skipped, never
    /// retried, and the sequence continues after the error gap.
    pub fn on_failed(&mut self, ticket: Ticket) -> Directive {
        if !self.is_in_flight(ticket) {
            tracing::debug!(?ticket, "ignoring stale failure");
            return Directive::Ignored;
        }
        if let Some(item) = &self.active {
            tracing::warn!(
                syllable = %item.syllable,
                tone = item.tone.number(),
                "audio unavailable, skipping"
            );
        }
        let error_gap = self.pacing.error_gap;
        self.advance(|_, _| error_gap)
    }

    /// Cancel the active sequence.
    ///
    /// Returns the ticket of the item whose audio is loading or playing, so
    /// the transport can halt it. Every outstanding ticket becomes stale.
    pub fn stop(&mut self) -> Option<Ticket> {
        if self.state == PlaybackState::Idle {
            return None;
        }
        let in_flight = match self.state {
            PlaybackState::Loading | PlaybackState::Playing => self.current_ticket(),
            _ => None,
        };
        tracing::debug!(
            generation = self.generation,
            dropped = self.queue.len(),
            "stopping playback sequence"
        );
        self.generation += 1;
        self.finish();
        in_flight
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.active.is_some() && ticket.generation == self.generation && ticket.position == self.position
    }

    fn is_in_flight(&self, ticket: Ticket) -> bool {
        matches!(self.state, PlaybackState::Loading | PlaybackState::Playing) && self.is_current(ticket)
    }

    fn advance(&mut self, delay: impl Fn(&PlaybackItem, &PlaybackItem) -> Duration) -> Directive {
        let Some(previous) = self.active.take() else {
            self.finish();
            return Directive::Finished;
        };

        match self.queue.pop_front() {
            Some(next) => {
                let wait = delay(&previous, &next);
                self.position += 1;
                self.activate(next, wait)
            }
            None => {
                tracing::debug!(generation = self.generation, "playback sequence finished");
                self.finish();
                Directive::Finished
            }
        }
    }

    fn activate(&mut self, item: PlaybackItem, delay: Duration) -> Directive {
        let ticket = Ticket {
            generation: self.generation,
            position: self.position,
        };
        let locator = self.locator.locate(&item.syllable, item.tone);
        tracing::debug!(
            syllable = %item.syllable,
            tone = item.tone.number(),
            delay_ms = delay.as_millis() as u64,
            %locator,
            "next item"
        );
        self.active = Some(item.clone());
        self.state = PlaybackState::Waiting;
        Directive::Play {
            cue: Cue {
                ticket,
                item,
                locator,
            },
            delay,
        }
    }

    fn finish(&mut self) {
        self.queue.clear();
        self.active = None;
        self.position = 0;
        self.state = PlaybackState::Idle;
    }
}
