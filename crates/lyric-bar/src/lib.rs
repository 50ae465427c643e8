//! # Two-slot rolling lyric display
//!
//! Render-state core for a karaoke-style lyric HUD synchronized to song
//! playback. Two [`PhraseSlot`]s alternate hosting phrases: while one is in
//! the main bar, the next phrase warms up dimmed below it, then moves in as
//! the first retires. [`LyricTrack`] owns the phrase timeline and schedules
//! the slots; per-word highlighting advances from the same clock.
//!
//! The core performs no rendering and no interpolation. Each tick it emits a
//! [`LyricFrame`] snapshot (text, highlight range, target pose per slot) and
//! issues fire-and-forget tween requests through the [`AnimationHost`] seam.
//! Feed it a monotonically non-decreasing song time once per frame and
//! render whatever it reports.

pub mod animation;
pub mod slot;
pub mod track;
pub mod types;
pub mod words;

pub use animation::{
    AnimationHost, AnimationRequest, NullAnimationHost, RecordingAnimationHost, SlotProperty,
};
pub use slot::PhraseSlot;
pub use track::LyricTrack;
pub use types::{
    BarState, LyricConfig, LyricDisplayMode, LyricFrame, LyricPhrase, LyricWord, SlotFrame,
};
pub use words::DisplayText;
