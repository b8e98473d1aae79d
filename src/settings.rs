use std::time::Duration;

use ratatui::style::Color;

/// Static and dynamic tuning for a run.
///
/// The dynamic subset (speeds, spawn rate, alien value) is reset by
/// [`Settings::initialize_dynamic_settings`] at every new game and scaled up
/// by [`Settings::increase_speed`] on every level-up.
#[derive(Debug, Clone)]
pub struct Settings {
    // Field, in terminal cells
    pub bg_color: Color,
    pub screen_width: u16,
    pub screen_height: u16,

    // Ship
    pub ship_speed: f32,
    pub ship_limit: u32,

    // Bullets
    pub bullet_speed: f32,
    pub bullet_width: u16,
    pub bullet_height: u16,
    pub bullet_color: Color,
    pub bullets_allowed: usize,

    // Aliens
    pub alien_speed: f32,
    /// Aliens spawned per second.
    pub alien_spawn_rate: f32,
    pub alien_points: u32,

    // Progression
    pub speedup_scale: f32,
    pub score_increase: u32,
    pub aliens_per_level: u32,

    // Pacing
    /// Length of one simulation frame.
    pub frame_period: Duration,
    /// Wall-clock pause after losing a ship.
    pub hit_pause: Duration,
    /// Frames a movement key stays held without a repeat.
    pub key_hold_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            bg_color: Color::Rgb(0, 0, 5),
            screen_width: 80,
            screen_height: 24,
            ship_speed: 0.0,
            ship_limit: 3,
            bullet_speed: 0.0,
            bullet_width: 2,
            bullet_height: 1,
            bullet_color: Color::Rgb(200, 200, 200),
            bullets_allowed: 3,
            alien_speed: 0.0,
            alien_spawn_rate: 0.0,
            alien_points: 0,
            speedup_scale: 1.1,
            score_increase: 10,
            aliens_per_level: 10,
            frame_period: Duration::from_millis(16),
            hit_pause: Duration::from_millis(500),
            key_hold_frames: 8,
        };
        settings.initialize_dynamic_settings();
        settings
    }
}

impl Settings {
    pub fn initialize_dynamic_settings(&mut self) {
        self.ship_speed = 0.5;
        self.bullet_speed = 1.0;
        self.alien_speed = 0.2;
        self.alien_spawn_rate = 0.5;
        self.alien_points = 50;
    }

    pub fn increase_speed(&mut self) {
        self.ship_speed *= self.speedup_scale;
        self.bullet_speed *= self.speedup_scale;
        self.alien_speed *= self.speedup_scale;
        self.alien_spawn_rate *= self.speedup_scale;
        self.alien_points += self.score_increase;
    }

    /// Period of the alien spawn timer for the current spawn rate.
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.alien_spawn_rate.max(f32::EPSILON))
    }

    /// Whole frames covering `hit_pause` at the current frame period.
    pub fn hit_pause_frames(&self) -> u32 {
        let period = self.frame_period.as_nanos().max(1);
        self.hit_pause.as_nanos().div_ceil(period) as u32
    }
}
