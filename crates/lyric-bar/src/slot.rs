//! One of the two reusable visual containers that alternately host a phrase.
//!
//! A slot owns the visual state of a single lyric phrase: its bar state
//! (hidden/upcoming/main/retiring), the target pose the renderer should be
//! tweening toward, and the highlighted display text. All transitions are
//! driven by the song clock passed into [`PhraseSlot::tick`]; animation
//! completion is derived from that clock rather than host callbacks, so the
//! state machine stays deterministic.

use std::sync::Arc;

use crate::animation::{AnimationHost, AnimationRequest, SlotProperty};
use crate::types::{BarState, LyricPhrase, SlotFrame};
use crate::words::{self, DisplayText};

/// Transition length used everywhere a full-length animation fits, seconds.
pub const DEFAULT_ANIMATION_TIME: f64 = 0.1;

const INITIAL_Y: f32 = -60.0;
const UPCOMING_Y: f32 = -53.7;
const MAIN_Y: f32 = 0.0;
const END_Y: f32 = 30.0;

const HIDDEN_ALPHA: f32 = 0.0;
const UPCOMING_ALPHA: f32 = 0.36;
const MAIN_ALPHA: f32 = 1.0;

const UPCOMING_FONT_SIZE: f32 = 28.0;
const MAIN_FONT_SIZE: f32 = 36.0;

pub struct PhraseSlot {
    id: usize,
    phrase: Option<Arc<LyricPhrase>>,
    /// Last phrase this slot hosted, kept across reset so a finished phrase
    /// cannot re-enter while the cursor still points at it.
    retired_phrase: Option<Arc<LyricPhrase>>,
    sung_words: usize,
    bar_state: BarState,
    /// End time of the phrase after the assigned one. A retiring slot
    /// shortens its exit animation so it is gone before this time.
    next_phrase_end: f64,
    /// Song time at which the running exit animation completes and the slot
    /// resets to idle.
    hidden_at: Option<f64>,
    position_y: f32,
    alpha: f32,
    font_size: f32,
    display: DisplayText,
}

impl PhraseSlot {
    pub(crate) fn new(id: usize) -> Self {
        Self {
            id,
            phrase: None,
            retired_phrase: None,
            sung_words: 0,
            bar_state: BarState::Hidden,
            next_phrase_end: f64::INFINITY,
            hidden_at: None,
            position_y: INITIAL_Y,
            alpha: HIDDEN_ALPHA,
            font_size: UPCOMING_FONT_SIZE,
            display: DisplayText::default(),
        }
    }

    /// Return to the freshly-constructed idle pose. The last phrase
    /// reference survives so the duplicate-assign guard keeps holding while
    /// the track's cursor sits on a finished phrase.
    pub(crate) fn reset(&mut self) {
        let retired = self.phrase.take().or(self.retired_phrase.take());
        *self = Self::new(self.id);
        self.retired_phrase = retired;
    }

    /// Assign a phrase to this slot.
    ///
    /// Rejected (returns `false`, no state change) when the phrase is already
    /// the assigned one or the slot is not idle. On success the slot begins
    /// in the upcoming pose with unhighlighted text. When the phrase starts
    /// in less than one default transition, the slot snaps straight to the
    /// upcoming pose and promotes with only the remaining time, so it never
    /// shows an animation inconsistent with the true time left.
    pub fn assign(
        &mut self,
        phrase: &Arc<LyricPhrase>,
        now: f64,
        host: &mut dyn AnimationHost,
    ) -> bool {
        let same = self
            .phrase
            .as_ref()
            .or(self.retired_phrase.as_ref())
            .is_some_and(|current| Arc::ptr_eq(current, phrase));
        if same || self.bar_state != BarState::Hidden {
            return false;
        }

        self.phrase = Some(Arc::clone(phrase));
        self.retired_phrase = None;
        self.sung_words = 0;
        self.display = words::assemble(&phrase.words, 0);
        self.next_phrase_end = f64::INFINITY;
        self.hidden_at = None;
        self.bar_state = BarState::Upcoming;

        let time_until_start = phrase.start - now;
        if time_until_start < DEFAULT_ANIMATION_TIME {
            // Tight chart timing: place the slot at the upcoming pose and run
            // only the remaining animation into the main bar.
            self.position_y = UPCOMING_Y;
            self.alpha = UPCOMING_ALPHA;
            self.promote_to_main(time_until_start.max(0.0), host);
            return true;
        }

        self.request(host, SlotProperty::PositionY, UPCOMING_Y, DEFAULT_ANIMATION_TIME);
        self.request(host, SlotProperty::Alpha, UPCOMING_ALPHA, DEFAULT_ANIMATION_TIME);
        true
    }

    /// Move an upcoming phrase into the main bar over `duration` seconds.
    ///
    /// Rejected unless the slot is in the upcoming position with a phrase
    /// assigned.
    pub fn promote_to_main(&mut self, duration: f64, host: &mut dyn AnimationHost) -> bool {
        if self.bar_state != BarState::Upcoming || self.phrase.is_none() {
            return false;
        }

        self.request(host, SlotProperty::PositionY, MAIN_Y, duration);
        self.request(host, SlotProperty::FontSize, MAIN_FONT_SIZE, duration);
        self.request(host, SlotProperty::Alpha, MAIN_ALPHA, duration);
        self.bar_state = BarState::Main;
        true
    }

    /// Per-frame update. Idempotent for a fixed `now`.
    pub fn tick(&mut self, now: f64, host: &mut dyn AnimationHost) {
        if let Some(at) = self.hidden_at {
            if now >= at {
                self.reset();
                return;
            }
        }

        let Some(phrase) = self.phrase.clone() else {
            return;
        };

        if self.bar_state == BarState::Main && now > phrase.end {
            let duration = DEFAULT_ANIMATION_TIME.min(self.next_phrase_end - now);
            if duration < DEFAULT_ANIMATION_TIME {
                tracing::debug!(
                    slot = self.id,
                    duration,
                    "retiring animation shortened by imminent next phrase"
                );
            }
            if duration <= 0.0 {
                self.reset();
                return;
            }
            self.request(host, SlotProperty::PositionY, END_Y, duration);
            self.request(host, SlotProperty::Alpha, HIDDEN_ALPHA, duration);
            self.bar_state = BarState::Retiring;
            self.hidden_at = Some(now + duration);
        }

        // Word highlight advances independently of bar transitions, and only
        // forward.
        let mut sung = self.sung_words;
        while sung < phrase.words.len() && phrase.words[sung].start <= now {
            sung += 1;
        }
        if sung != self.sung_words {
            self.sung_words = sung;
            self.display = words::assemble(&phrase.words, sung);
        }
    }

    pub fn bar_state(&self) -> BarState {
        self.bar_state
    }

    pub fn is_main(&self) -> bool {
        self.bar_state == BarState::Main
    }

    pub fn phrase(&self) -> Option<&Arc<LyricPhrase>> {
        self.phrase.as_ref()
    }

    pub fn display(&self) -> &DisplayText {
        &self.display
    }

    pub(crate) fn set_next_phrase_end(&mut self, end: f64) {
        self.next_phrase_end = end;
    }

    /// Render instructions for this slot, this frame.
    pub fn frame(&self) -> SlotFrame {
        SlotFrame {
            text: self.display.text.clone(),
            highlight_end: self.display.highlight_end,
            bar_state: self.bar_state,
            position_y: self.position_y,
            alpha: self.alpha,
            font_size: self.font_size,
        }
    }

    fn request(
        &mut self,
        host: &mut dyn AnimationHost,
        property: SlotProperty,
        to: f32,
        duration: f64,
    ) {
        let from = match property {
            SlotProperty::PositionY => self.position_y,
            SlotProperty::Alpha => self.alpha,
            SlotProperty::FontSize => self.font_size,
        };
        host.animate(AnimationRequest {
            slot: self.id,
            property,
            from,
            to,
            duration,
        });
        match property {
            SlotProperty::PositionY => self.position_y = to,
            SlotProperty::Alpha => self.alpha = to,
            SlotProperty::FontSize => self.font_size = to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{NullAnimationHost, RecordingAnimationHost};
    use crate::types::LyricWord;

    fn word(text: &str, start: f64, join_with_next: bool) -> LyricWord {
        LyricWord {
            text: text.to_string(),
            start,
            join_with_next,
        }
    }

    fn phrase(words: &[(&str, f64, bool)], start: f64, end: f64) -> Arc<LyricPhrase> {
        Arc::new(LyricPhrase {
            words: words.iter().map(|&(t, s, j)| word(t, s, j)).collect(),
            start,
            end,
        })
    }

    fn shine() -> Arc<LyricPhrase> {
        phrase(
            &[("shine", 10.0, true), ("on", 10.5, false), ("you", 11.0, false)],
            10.0,
            12.0,
        )
    }

    #[test]
    fn assign_enters_upcoming_with_unhighlighted_text() {
        let mut host = RecordingAnimationHost::default();
        let mut slot = PhraseSlot::new(0);

        assert!(slot.assign(&shine(), 9.0, &mut host));
        assert_eq!(slot.bar_state(), BarState::Upcoming);
        assert_eq!(slot.display().text, "shineon you");
        assert_eq!(slot.display().highlight_end, 0);

        // Entry animation: position and alpha toward the upcoming pose.
        assert_eq!(host.requests.len(), 2);
        assert!(host.requests.iter().all(|r| r.duration == DEFAULT_ANIMATION_TIME));
    }

    #[test]
    fn assign_rejects_same_phrase_and_nonidle_slot() {
        let mut host = NullAnimationHost;
        let mut slot = PhraseSlot::new(0);
        let p = shine();

        assert!(slot.assign(&p, 9.0, &mut host));
        let before = slot.frame();

        // Same phrase again, and a different phrase while not idle.
        assert!(!slot.assign(&p, 9.0, &mut host));
        let other = phrase(&[("later", 20.0, false)], 20.0, 21.0);
        assert!(!slot.assign(&other, 9.0, &mut host));

        assert_eq!(slot.frame(), before);
    }

    #[test]
    fn tight_assignment_snaps_and_promotes_with_remaining_time() {
        let mut host = RecordingAnimationHost::default();
        let mut slot = PhraseSlot::new(1);

        // Assigned 0.05s before the phrase starts: less than one default
        // transition, so the slot must go straight to main.
        assert!(slot.assign(&shine(), 9.95, &mut host));
        assert_eq!(slot.bar_state(), BarState::Main);

        let last = host.requests.last().unwrap();
        assert!((last.duration - 0.05).abs() < 1e-9);
        // The promote tweens start from the snapped upcoming pose.
        let pos = host
            .requests
            .iter()
            .find(|r| r.property == SlotProperty::PositionY)
            .unwrap();
        assert_eq!(pos.from, -53.7);
        assert_eq!(pos.to, 0.0);
    }

    #[test]
    fn assignment_after_start_promotes_instantly() {
        let mut host = RecordingAnimationHost::default();
        let mut slot = PhraseSlot::new(0);

        assert!(slot.assign(&shine(), 10.2, &mut host));
        assert_eq!(slot.bar_state(), BarState::Main);
        assert!(host.requests.iter().all(|r| r.duration == 0.0));
    }

    #[test]
    fn promote_rejects_outside_upcoming() {
        let mut host = NullAnimationHost;
        let mut slot = PhraseSlot::new(0);

        assert!(!slot.promote_to_main(0.1, &mut host));

        slot.assign(&shine(), 9.0, &mut host);
        assert!(slot.promote_to_main(0.1, &mut host));
        assert!(!slot.promote_to_main(0.1, &mut host));
    }

    #[test]
    fn highlight_advances_monotonically() {
        let mut host = NullAnimationHost;
        let mut slot = PhraseSlot::new(0);
        slot.assign(&shine(), 9.0, &mut host);
        slot.promote_to_main(DEFAULT_ANIMATION_TIME, &mut host);

        let mut previous = 0;
        for step in 0..40 {
            let now = 9.0 + f64::from(step) * 0.1;
            slot.tick(now, &mut host);
            if slot.phrase().is_none() {
                break;
            }
            assert!(slot.display().highlight_end >= previous);
            previous = slot.display().highlight_end;
        }
    }

    #[test]
    fn highlight_splits_mid_phrase() {
        let mut host = NullAnimationHost;
        let mut slot = PhraseSlot::new(0);
        slot.assign(&shine(), 9.0, &mut host);
        slot.promote_to_main(DEFAULT_ANIMATION_TIME, &mut host);

        slot.tick(10.6, &mut host);
        let display = slot.display();
        assert_eq!(&display.text[..display.highlight_end], "shineon");
        assert_eq!(&display.text[display.highlight_end..], " you");
    }

    #[test]
    fn retires_with_full_duration_when_no_phrase_follows() {
        let mut host = RecordingAnimationHost::default();
        let mut slot = PhraseSlot::new(0);
        slot.assign(&shine(), 9.0, &mut host);
        slot.promote_to_main(DEFAULT_ANIMATION_TIME, &mut host);
        host.requests.clear();

        // Hint stays infinite: full-length exit.
        slot.tick(12.01, &mut host);
        assert_eq!(slot.bar_state(), BarState::Retiring);
        assert!(host.requests.iter().all(|r| r.duration == DEFAULT_ANIMATION_TIME));

        // Resets once the scheduled exit completes.
        slot.tick(12.12, &mut host);
        assert_eq!(slot.bar_state(), BarState::Hidden);
        assert!(slot.phrase().is_none());
    }

    #[test]
    fn retirement_shortened_by_next_phrase_end_hint() {
        let mut host = RecordingAnimationHost::default();
        let mut slot = PhraseSlot::new(0);
        slot.assign(&shine(), 9.0, &mut host);
        slot.promote_to_main(DEFAULT_ANIMATION_TIME, &mut host);
        slot.set_next_phrase_end(12.05);
        host.requests.clear();

        slot.tick(12.0 + 1e-9, &mut host);
        assert_eq!(slot.bar_state(), BarState::Retiring);
        let exit = host.requests.last().unwrap();
        assert!(exit.duration > 0.0 && exit.duration < 0.06);
    }

    #[test]
    fn nonpositive_exit_window_resets_immediately() {
        let mut host = NullAnimationHost;
        let mut slot = PhraseSlot::new(0);
        slot.assign(&shine(), 9.0, &mut host);
        slot.promote_to_main(DEFAULT_ANIMATION_TIME, &mut host);
        slot.set_next_phrase_end(12.0);

        slot.tick(12.01, &mut host);
        assert_eq!(slot.bar_state(), BarState::Hidden);
        assert!(slot.phrase().is_none());
    }

    #[test]
    fn assign_rejects_phrase_that_already_retired() {
        let mut host = NullAnimationHost;
        let mut slot = PhraseSlot::new(0);
        let p = shine();

        slot.assign(&p, 9.0, &mut host);
        slot.promote_to_main(DEFAULT_ANIMATION_TIME, &mut host);
        slot.tick(12.01, &mut host);
        slot.tick(12.5, &mut host);
        assert_eq!(slot.bar_state(), BarState::Hidden);

        // The slot is idle again, but its last phrase must not come back.
        assert!(!slot.assign(&p, 12.5, &mut host));
        assert_eq!(slot.bar_state(), BarState::Hidden);

        // A different phrase is still welcome.
        let other = phrase(&[("later", 20.0, false)], 20.0, 21.0);
        assert!(slot.assign(&other, 19.5, &mut host));
    }

    #[test]
    fn full_lifecycle_returns_to_fresh_idle_state() {
        let mut host = NullAnimationHost;
        let fresh = PhraseSlot::new(0).frame();

        let mut slot = PhraseSlot::new(0);
        slot.assign(&shine(), 9.0, &mut host);
        slot.promote_to_main(DEFAULT_ANIMATION_TIME, &mut host);
        for step in 0..40 {
            slot.tick(9.0 + f64::from(step) * 0.1, &mut host);
        }

        assert_eq!(slot.frame(), fresh);
    }
}
