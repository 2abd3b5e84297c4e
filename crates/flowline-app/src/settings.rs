use std::{num::NonZero, time::Duration};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Settings {
    pub hints: HintSettings,
    pub history: HistorySettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintSettings {
    /// Hints available per attempt.
    pub max_hints: u32,
    /// Time to draw the hinted path from its first to its last point.
    pub animation: Duration,
    /// How long the fully drawn hint stays on screen.
    pub visible: Duration,
}

impl HintSettings {
    /// Total time a hint is on screen.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.animation + self.visible
    }
}

impl Default for HintSettings {
    fn default() -> Self {
        Self {
            max_hints: 3,
            animation: Duration::from_millis(600),
            visible: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySettings {
    pub capacity: NonZero<usize>,
}

impl HistorySettings {
    pub const fn default_capacity() -> NonZero<usize> {
        NonZero::new(500).unwrap()
    }
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
        }
    }
}
