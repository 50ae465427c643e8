use lyric_bar::{LyricPhrase, LyricWord};

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Fixture {
    /// Relaxed timing with an empty-bar gap mid-song.
    Ballad,
    /// Tight timing: back-to-back phrases and near-simultaneous endings.
    Rapid,
}

impl Fixture {
    pub fn phrases(self) -> Vec<LyricPhrase> {
        match self {
            Fixture::Ballad => ballad(),
            Fixture::Rapid => rapid(),
        }
    }
}

fn phrase(words: &[(&str, f64, bool)], start: f64, end: f64) -> LyricPhrase {
    LyricPhrase {
        words: words
            .iter()
            .map(|&(text, at, join_with_next)| LyricWord {
                text: text.to_string(),
                start: at,
                join_with_next,
            })
            .collect(),
        start,
        end,
    }
}

fn ballad() -> Vec<LyricPhrase> {
    vec![
        phrase(
            &[
                ("Morn", 2.0, true),
                ("ing", 2.4, false),
                ("light", 2.8, false),
                ("on", 3.4, false),
                ("the", 3.6, false),
                ("water", 3.8, false),
            ],
            2.0,
            5.0,
        ),
        phrase(
            &[
                ("Car", 5.4, true),
                ("ries", 5.8, false),
                ("me", 6.2, false),
                ("home", 6.8, false),
            ],
            5.4,
            8.5,
        ),
        // Instrumental break: the bar goes empty here.
        phrase(
            &[
                ("Eve", 12.0, true),
                ("ning", 12.4, false),
                ("shadows", 12.8, false),
                ("fall", 13.6, false),
            ],
            12.0,
            15.0,
        ),
        phrase(
            &[
                ("And", 15.2, false),
                ("call", 15.6, false),
                ("me", 16.0, false),
                ("home", 16.6, false),
            ],
            15.2,
            18.0,
        ),
    ]
}

fn rapid() -> Vec<LyricPhrase> {
    vec![
        phrase(
            &[
                ("Quick", 1.0, false),
                ("step", 1.3, false),
                ("double", 1.6, false),
                ("time", 1.9, false),
            ],
            1.0,
            2.4,
        ),
        // Starts right as the previous phrase ends.
        phrase(
            &[
                ("Nev", 2.45, true),
                ("er", 2.6, false),
                ("miss", 2.8, false),
                ("a", 3.0, false),
                ("beat", 3.2, false),
            ],
            2.45,
            3.6,
        ),
        // Ends within a transition of the previous phrase's end.
        phrase(
            &[("Keep", 3.62, false), ("up", 3.66, false)],
            3.62,
            3.68,
        ),
        phrase(
            &[
                ("Catch", 4.1, false),
                ("your", 4.4, false),
                ("breath", 4.7, false),
            ],
            4.1,
            5.5,
        ),
    ]
}
