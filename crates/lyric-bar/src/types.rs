/// One timed word inside a phrase.
///
/// `start` is the song time (seconds) at which the word begins being sung.
/// `join_with_next` suppresses the separating space between this word and the
/// following one when the phrase is assembled for display (syllable splits,
/// hyphenated words).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
pub struct LyricWord {
    pub text: String,
    pub start: f64,
    pub join_with_next: bool,
}

/// A time-bounded lyric line composed of timed words.
///
/// Words are ordered by non-decreasing `start`, and every word start lies
/// within `[start, end]`. Built once per song load and immutable afterwards.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
pub struct LyricPhrase {
    pub words: Vec<LyricWord>,
    pub start: f64,
    pub end: f64,
}

/// Visual state of one slot's bar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize, specta::Type,
)]
pub enum BarState {
    /// Idle, parked off-screen with zero alpha.
    #[default]
    Hidden,
    /// Pre-staged below the main bar, dimmed.
    Upcoming,
    /// Fully visible, currently-sung position.
    Main,
    /// Animating out after the phrase's end time passed.
    Retiring,
}

/// Which background the renderer should draw behind the lyric bar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize, specta::Type,
)]
pub enum LyricDisplayMode {
    Disabled,
    #[default]
    Normal,
    Transparent,
    NoBackground,
}

/// Construction-time configuration for [`crate::track::LyricTrack`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
pub struct LyricConfig {
    /// How long before a phrase's start it should begin pre-staging, seconds.
    pub upcoming_threshold: f64,
    pub display_mode: LyricDisplayMode,
}

impl Default for LyricConfig {
    fn default() -> Self {
        Self {
            upcoming_threshold: 1.0,
            display_mode: LyricDisplayMode::default(),
        }
    }
}

/// Per-slot render instructions for one frame.
///
/// `highlight_end` is a byte offset into `text`: everything before it has
/// been sung and should be drawn highlighted. The visual fields are the
/// current animation *targets*; interpolation between them is owned by the
/// host's tween engine.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
pub struct SlotFrame {
    pub text: String,
    pub highlight_end: usize,
    pub bar_state: BarState,
    pub position_y: f32,
    pub alpha: f32,
    pub font_size: f32,
}

/// Complete snapshot of lyric display state at a point in time.
///
/// This is the rendering contract: everything a UI layer needs to draw the
/// lyric HUD for one frame, whether that UI is a game scene, the terminal
/// replay tool, or a test assertion. Produced by
/// [`crate::track::LyricTrack::frame`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
pub struct LyricFrame {
    pub display_mode: LyricDisplayMode,
    pub slots: [SlotFrame; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_contract_round_trips_through_json() {
        let slot = SlotFrame {
            text: "shineon you".to_string(),
            highlight_end: 7,
            bar_state: BarState::Main,
            position_y: 0.0,
            alpha: 1.0,
            font_size: 36.0,
        };
        let frame = LyricFrame {
            display_mode: LyricDisplayMode::Transparent,
            slots: [slot.clone(), slot],
        };

        let json = serde_json::to_string(&frame).unwrap();
        let back: LyricFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn config_defaults() {
        let config = LyricConfig::default();
        assert_eq!(config.upcoming_threshold, 1.0);
        assert_eq!(config.display_mode, LyricDisplayMode::Normal);
    }
}
