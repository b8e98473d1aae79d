use crate::settings::Settings;

/// Per-run statistics plus the high score carried across runs.
#[derive(Debug, Clone)]
pub struct GameStats {
    pub ships_left: u32,
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
}

impl GameStats {
    pub fn new(settings: &Settings, high_score: u32) -> Self {
        let mut stats = Self {
            ships_left: 0,
            score: 0,
            level: 1,
            high_score,
        };
        stats.reset_stats(settings);
        stats
    }

    /// Reinitialise the fields that change during a game. The high score is
    /// left alone.
    pub fn reset_stats(&mut self, settings: &Settings) {
        self.ships_left = settings.ship_limit;
        self.score = 0;
        self.level = 1;
    }

    /// Raise the high score if the current score beats it. Returns true when
    /// it changed.
    pub fn check_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}
