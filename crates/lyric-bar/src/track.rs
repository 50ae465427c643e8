//! Global timeline cursor over a song's phrases.
//!
//! The track owns the ordered phrase list and the two display slots, and
//! alternates phrases between the slots by cursor parity: while an
//! even-indexed phrase is live in one slot, the odd-indexed successor warms
//! up in the other. At most two phrases are ever in flight.

use std::sync::Arc;

use crate::animation::AnimationHost;
use crate::slot::{DEFAULT_ANIMATION_TIME, PhraseSlot};
use crate::types::{LyricConfig, LyricDisplayMode, LyricFrame, LyricPhrase};

/// Gap between consecutive phrases at or above which the bar is allowed to
/// sit empty before the next phrase pre-stages, seconds.
const PHRASE_DISTANCE_THRESHOLD: f64 = 1.0;

pub struct LyricTrack {
    config: LyricConfig,
    phrases: Vec<Arc<LyricPhrase>>,
    cursor: usize,
    slots: [PhraseSlot; 2],
    enabled: bool,
}

impl LyricTrack {
    pub fn new() -> Self {
        Self::with_config(LyricConfig::default())
    }

    pub fn with_config(config: LyricConfig) -> Self {
        Self {
            config,
            phrases: Vec::new(),
            cursor: 0,
            slots: [PhraseSlot::new(0), PhraseSlot::new(1)],
            enabled: false,
        }
    }

    /// Replace the phrase list for a newly loaded song.
    ///
    /// Resets the cursor and both slots. The display stays disabled for an
    /// empty list or when the configured mode is `Disabled`.
    pub fn on_load(&mut self, phrases: Vec<LyricPhrase>) {
        self.phrases = phrases.into_iter().map(Arc::new).collect();
        self.cursor = 0;
        self.slots = [PhraseSlot::new(0), PhraseSlot::new(1)];
        self.enabled =
            !self.phrases.is_empty() && self.config.display_mode != LyricDisplayMode::Disabled;
    }

    /// Per-frame scheduling. `now` is the song playback position in seconds,
    /// monotonically non-decreasing across calls.
    pub fn tick(&mut self, now: f64, host: &mut dyn AnimationHost) {
        if !self.enabled {
            return;
        }

        for slot in &mut self.slots {
            slot.tick(now, host);
        }

        let Some(current) = self.phrases.get(self.cursor) else {
            return;
        };
        let time_to_next_phrase = current.start - now;

        let (left, right) = self.slots.split_at_mut(1);
        let (active, inactive) = if self.cursor % 2 == 0 {
            (&mut left[0], &mut right[0])
        } else {
            (&mut right[0], &mut left[0])
        };

        // Nothing live in the main bar: bring the cursor phrase straight in
        // once it is within the upcoming threshold. Covers startup and the
        // empty-bar gap case.
        if !active.is_main()
            && !inactive.is_main()
            && time_to_next_phrase <= self.config.upcoming_threshold
        {
            active.assign(current, now, host);
            active.promote_to_main(DEFAULT_ANIMATION_TIME, host);
        }

        // On the last phrase there is nothing to pre-stage and the exit
        // animation must never be shortened; the cursor also stays put so
        // the retiring slot keeps its hint.
        let Some(next) = self.phrases.get(self.cursor + 1) else {
            active.set_next_phrase_end(f64::INFINITY);
            return;
        };

        // Pre-stage the next phrase in the idle slot while the current one
        // is live, unless the gap is long enough for an empty bar.
        if active.is_main()
            && !inactive.is_main()
            && next.start - current.end <= self.config.upcoming_threshold
        {
            inactive.assign(next, now, host);
        }

        // The main bar just freed up: a pre-staged phrase moves in.
        if !active.is_main() && !inactive.is_main() {
            inactive.promote_to_main(DEFAULT_ANIMATION_TIME, host);
        }

        // Lets a retiring slot shorten its exit when two phrases end almost
        // simultaneously.
        active.set_next_phrase_end(next.end);

        // Advance past finished phrases, but not while a retiring slot might
        // still need its hint maintained: the successor must be a full empty
        // bar away, or already due.
        while let Some(finished) = self.phrases.get(self.cursor) {
            if finished.end > now {
                break;
            }
            let advance = match self.phrases.get(self.cursor + 1) {
                None => true,
                Some(upcoming) => {
                    upcoming.start - finished.end >= PHRASE_DISTANCE_THRESHOLD
                        || upcoming.start <= now
                }
            };
            if !advance {
                break;
            }
            self.cursor += 1;
        }
    }

    /// Complete snapshot needed to render the lyric HUD this frame.
    pub fn frame(&self) -> LyricFrame {
        LyricFrame {
            display_mode: self.config.display_mode,
            slots: [self.slots[0].frame(), self.slots[1].frame()],
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for LyricTrack {
    fn default() -> Self {
        Self::new()
    }
}
