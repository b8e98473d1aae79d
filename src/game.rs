use std::time::Duration;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::{Position, Rect};

use crate::entities::{Alien, Bullet, Entity, Ship};
use crate::game_stats::GameStats;
use crate::settings::Settings;

/// How key releases reach the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// The terminal reports releases, so movement lasts until the key is let go.
    KeyRelease,
    /// No release events; movement lapses after `key_hold_frames` without a
    /// repeat.
    AutoRelease,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    /// Before the first game or after game over. Only the play button works.
    Inactive,
    Active,
    /// Frozen pause after losing a ship. Input other than quit is dropped.
    Stunned { frames_left: u32 },
}

/// Owns every entity and sequences a run: spawn, score, level-up, ship-hit
/// and game over.
pub struct SidewaysShooter {
    settings: Settings,
    stats: GameStats,
    ship: Ship,
    bullets: Vec<Bullet>,
    aliens: Vec<Alien>,
    state: GameState,
    aliens_until_level_up: u32,
    input_mode: InputMode,
    hold_frames_left: u32,
    spawn_interval_change: Option<Duration>,
    play_button: Option<Rect>,
    pointer: Option<Position>,
    pointer_visible: bool,
    played: bool,
    should_quit: bool,
    rng: StdRng,
}

impl SidewaysShooter {
    pub fn new(settings: Settings, high_score: u32) -> Self {
        Self::with_rng(settings, high_score, StdRng::from_entropy())
    }

    pub fn with_rng(settings: Settings, high_score: u32, rng: StdRng) -> Self {
        let stats = GameStats::new(&settings, high_score);
        let ship = Ship::new(&settings);
        let aliens_until_level_up = settings.aliens_per_level.max(1);
        Self {
            settings,
            stats,
            ship,
            bullets: Vec::new(),
            aliens: Vec::new(),
            state: GameState::Inactive,
            aliens_until_level_up,
            input_mode: InputMode::KeyRelease,
            hold_frames_left: 0,
            spawn_interval_change: None,
            play_button: None,
            pointer: None,
            pointer_visible: true,
            played: false,
            should_quit: false,
            rng,
        }
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, GameState::Inactive)
    }

    /// Inactive after at least one game.
    pub fn is_game_over(&self) -> bool {
        self.played && self.state == GameState::Inactive
    }

    pub fn aliens_until_level_up(&self) -> u32 {
        self.aliens_until_level_up
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Where to draw the pointer, if it is showing.
    pub fn pointer(&self) -> Option<Position> {
        self.pointer.filter(|_| self.pointer_visible)
    }

    /// Screen area of the play button from the last frame, used to hit-test
    /// clicks.
    pub fn set_play_button(&mut self, area: Option<Rect>) {
        self.play_button = area;
    }

    /// New spawn timer period, if it changed since the last call.
    pub fn take_spawn_interval(&mut self) -> Option<Duration> {
        self.spawn_interval_change.take()
    }

    /// Match the field to the drawable area.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.settings.screen_width && height == self.settings.screen_height {
            return;
        }
        debug!("field resized to {width}x{height}");
        self.settings.screen_width = width;
        self.settings.screen_height = height;
        self.ship.clamp(&self.settings);
    }

    pub fn start_game(&mut self) {
        self.settings.initialize_dynamic_settings();
        self.stats.reset_stats(&self.settings);
        self.aliens.clear();
        self.bullets.clear();
        self.ship.center_ship(&self.settings);
        self.ship.stop();
        self.aliens_until_level_up = self.settings.aliens_per_level.max(1);
        self.state = GameState::Active;
        self.played = true;
        self.pointer_visible = false;
        self.spawn_interval_change = Some(self.settings.spawn_interval());
        info!("new game with {} ships", self.stats.ships_left);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let pressed = matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat);
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if pressed && (ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))) {
            self.should_quit = true;
            return;
        }

        match self.state {
            GameState::Stunned { .. } => return,
            GameState::Inactive => {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P'))
                {
                    self.start_game();
                }
                return;
            }
            GameState::Active => {}
        }

        if pressed {
            match key.code {
                KeyCode::Up => {
                    self.ship.moving_up = true;
                    self.hold_frames_left = self.settings.key_hold_frames;
                }
                KeyCode::Down => {
                    self.ship.moving_down = true;
                    self.hold_frames_left = self.settings.key_hold_frames;
                }
                KeyCode::Char(' ') if key.kind == KeyEventKind::Press => {
                    self.fire_bullet();
                }
                _ => {}
            }
        } else {
            match key.code {
                KeyCode::Up => self.ship.moving_up = false,
                KeyCode::Down => self.ship.moving_down = false,
                _ => {}
            }
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        let pos = Position::new(mouse.column, mouse.row);
        self.pointer = Some(pos);
        if mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && self.state == GameState::Inactive
            && self.play_button.is_some_and(|button| button.contains(pos))
        {
            self.start_game();
        }
    }

    /// The spawn timer fired.
    pub fn on_spawn_tick(&mut self) {
        if self.state != GameState::Active {
            return;
        }
        let alien = Alien::spawn(&self.settings, &mut self.rng);
        debug!("alien spawned at row {}", alien.bounds().top());
        self.aliens.push(alien);
    }

    /// Advance one frame.
    pub fn on_tick(&mut self) {
        match self.state {
            GameState::Inactive => {}
            GameState::Stunned { frames_left } => {
                self.state = if frames_left > 1 {
                    GameState::Stunned { frames_left: frames_left - 1 }
                } else {
                    GameState::Active
                };
            }
            GameState::Active => {
                self.expire_held_keys();
                self.ship.update(&self.settings);
                self.update_aliens();
                self.update_bullets();
                self.check_bullet_alien_collisions();
                self.check_ship_hit();
            }
        }
    }

    /// Returns false when the magazine is full.
    pub fn fire_bullet(&mut self) -> bool {
        if self.bullets.len() >= self.settings.bullets_allowed {
            return false;
        }
        self.bullets.push(Bullet::new(&self.settings, &self.ship));
        true
    }

    fn expire_held_keys(&mut self) {
        if self.input_mode != InputMode::AutoRelease
            || !(self.ship.moving_up || self.ship.moving_down)
        {
            return;
        }
        if self.hold_frames_left == 0 {
            self.ship.stop();
        } else {
            self.hold_frames_left -= 1;
        }
    }

    fn update_aliens(&mut self) {
        for alien in &mut self.aliens {
            alien.update(&self.settings);
        }
    }

    fn update_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.update(&self.settings);
        }
        let settings = &self.settings;
        self.bullets.retain(|b| !b.is_off_field(settings));
    }

    /// Pair each bullet with at most one overlapping alien and remove both.
    fn check_bullet_alien_collisions(&mut self) {
        let aliens = &self.aliens;
        let mut destroyed = vec![false; aliens.len()];
        let mut kills = 0u32;
        self.bullets.retain(|bullet| {
            let target = (0..aliens.len())
                .find(|&i| !destroyed[i] && bullet.bounds().intersects(&aliens[i].bounds()));
            match target {
                Some(i) => {
                    destroyed[i] = true;
                    kills += 1;
                    false
                }
                None => true,
            }
        });
        if kills == 0 {
            return;
        }

        let mut index = 0;
        self.aliens.retain(|_| {
            let keep = !destroyed[index];
            index += 1;
            keep
        });

        self.stats.score += self.settings.alien_points * kills;
        if self.stats.check_high_score() {
            debug!("new high score {}", self.stats.high_score);
        }
        self.record_kills(kills);
    }

    fn record_kills(&mut self, kills: u32) {
        self.aliens_until_level_up = self.aliens_until_level_up.saturating_sub(kills);
        if self.aliens_until_level_up == 0 {
            self.start_new_level();
        }
    }

    fn start_new_level(&mut self) {
        self.stats.level += 1;
        self.aliens_until_level_up = self.settings.aliens_per_level.max(1);
        self.settings.increase_speed();
        self.spawn_interval_change = Some(self.settings.spawn_interval());
        info!(
            "level {} reached, aliens worth {}",
            self.stats.level, self.settings.alien_points
        );
    }

    fn check_ship_hit(&mut self) {
        let ship = self.ship.bounds();
        let hit = self
            .aliens
            .iter()
            .any(|alien| alien.reached_left_edge() || alien.bounds().intersects(&ship));
        if hit {
            self.ship_hit();
        }
    }

    fn ship_hit(&mut self) {
        if self.stats.ships_left > 0 {
            self.stats.ships_left -= 1;
            self.aliens.clear();
            self.bullets.clear();
            self.ship.center_ship(&self.settings);
            self.ship.stop();
            self.state = match self.settings.hit_pause_frames() {
                0 => GameState::Active,
                frames => GameState::Stunned { frames_left: frames },
            };
            debug!("ship hit, {} left", self.stats.ships_left);
        } else {
            self.state = GameState::Inactive;
            self.ship.stop();
            self.pointer_visible = true;
            info!("game over with score {}", self.stats.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with(settings: Settings) -> SidewaysShooter {
        let mut game = SidewaysShooter::with_rng(settings, 0, StdRng::seed_from_u64(42));
        game.start_game();
        game
    }

    fn game() -> SidewaysShooter {
        game_with(Settings::default())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Aliens stacked on the ship's row, so a volley from the ship meets them
    /// all in the same frame.
    fn stack_aliens_in_line(game: &mut SidewaysShooter, count: usize) {
        let row = game.ship.bounds().top();
        for _ in 0..count {
            game.aliens.push(Alien::new(&game.settings, row));
        }
    }

    fn tick_until(game: &mut SidewaysShooter, mut done: impl FnMut(&SidewaysShooter) -> bool) {
        for _ in 0..10_000 {
            if done(game) {
                return;
            }
            game.on_tick();
        }
        panic!("condition never reached");
    }

    #[test]
    fn starts_inactive_until_play() {
        let mut game = SidewaysShooter::with_rng(Settings::default(), 0, StdRng::seed_from_u64(1));
        assert_eq!(game.state(), GameState::Inactive);
        assert!(!game.is_game_over());
        game.on_spawn_tick();
        game.on_key(press(KeyCode::Char(' ')));
        assert!(game.aliens().is_empty());
        assert!(game.bullets().is_empty());

        game.on_key(press(KeyCode::Enter));
        assert_eq!(game.state(), GameState::Active);
        assert!(game.pointer().is_none());
        assert_eq!(game.take_spawn_interval(), Some(Duration::from_secs(2)));
        assert_eq!(game.take_spawn_interval(), None);
    }

    #[test]
    fn play_button_click_starts_game() {
        let mut game = SidewaysShooter::with_rng(Settings::default(), 0, StdRng::seed_from_u64(1));
        game.set_play_button(Some(Rect::new(30, 10, 12, 3)));
        game.on_mouse(click(5, 5));
        assert_eq!(game.state(), GameState::Inactive);
        assert_eq!(game.pointer(), Some(Position::new(5, 5)));

        game.on_mouse(click(35, 11));
        assert_eq!(game.state(), GameState::Active);
        assert_eq!(game.pointer(), None);
    }

    #[test]
    fn fourth_bullet_is_refused() {
        let mut game = game();
        for _ in 0..3 {
            game.on_key(press(KeyCode::Char(' ')));
        }
        assert_eq!(game.bullets().len(), 3);
        game.on_key(press(KeyCode::Char(' ')));
        assert_eq!(game.bullets().len(), 3);
        assert!(!game.fire_bullet());

        tick_until(&mut game, |g| g.bullets().is_empty());
        assert!(game.fire_bullet());
        assert_eq!(game.bullets().len(), 1);
    }

    #[test]
    fn bullets_never_exceed_allowance() {
        let mut settings = Settings::default();
        settings.bullets_allowed = 2;
        let mut game = game_with(settings);
        for _ in 0..200 {
            game.fire_bullet();
            game.on_tick();
            assert!(game.bullets().len() <= 2);
        }
    }

    #[test]
    fn ship_follows_held_keys() {
        let mut game = game();
        let start = game.ship().bounds().top();
        game.on_key(press(KeyCode::Up));
        for _ in 0..4 {
            game.on_tick();
        }
        assert_eq!(game.ship().bounds().top(), start - 2);
        game.on_key(release(KeyCode::Up));
        game.on_tick();
        assert_eq!(game.ship().bounds().top(), start - 2);
    }

    #[test]
    fn auto_release_stops_without_repeats() {
        let mut game = game();
        game.set_input_mode(InputMode::AutoRelease);
        let start = game.ship().bounds().top();
        game.on_key(press(KeyCode::Down));
        for _ in 0..50 {
            game.on_tick();
        }
        assert!(!game.ship().moving_down);
        let settings = game.settings();
        let travelled = settings.key_hold_frames as f32 * settings.ship_speed;
        assert_eq!(game.ship().bounds().top(), start + travelled as i32);
    }

    #[test]
    fn volley_scores_one_alien_per_bullet() {
        let mut game = game();
        stack_aliens_in_line(&mut game, 3);
        for _ in 0..3 {
            game.fire_bullet();
        }
        tick_until(&mut game, |g| g.stats().score > 0);
        assert_eq!(game.stats().score, 3 * 50);
        assert!(game.aliens().is_empty());
        assert!(game.bullets().is_empty());
    }

    #[test]
    fn spare_alien_survives_short_volley() {
        let mut game = game();
        stack_aliens_in_line(&mut game, 3);
        game.fire_bullet();
        game.fire_bullet();
        tick_until(&mut game, |g| g.stats().score > 0);
        assert_eq!(game.stats().score, 2 * 50);
        assert_eq!(game.aliens().len(), 1);
        assert!(game.bullets().is_empty());
    }

    #[test]
    fn batches_add_up_across_frames() {
        let mut game = game();
        stack_aliens_in_line(&mut game, 1);
        game.fire_bullet();
        tick_until(&mut game, |g| g.stats().score > 0);
        stack_aliens_in_line(&mut game, 2);
        game.fire_bullet();
        game.fire_bullet();
        tick_until(&mut game, |g| g.aliens().is_empty());
        assert_eq!(game.stats().score, 50 + 2 * 50);
    }

    #[test]
    fn high_score_tracks_only_greater_scores() {
        let settings = Settings::default();
        let mut game = SidewaysShooter::with_rng(settings, 100, StdRng::seed_from_u64(3));
        game.start_game();
        stack_aliens_in_line(&mut game, 2);
        game.fire_bullet();
        game.fire_bullet();
        tick_until(&mut game, |g| g.stats().score > 0);
        assert_eq!(game.stats().score, 100);
        assert_eq!(game.stats().high_score, 100);

        stack_aliens_in_line(&mut game, 1);
        game.fire_bullet();
        tick_until(&mut game, |g| g.aliens().is_empty());
        assert_eq!(game.stats().high_score, 150);

        game.start_game();
        assert_eq!(game.stats().score, 0);
        assert_eq!(game.stats().high_score, 150);
    }

    #[test]
    fn level_up_escalates_settings() {
        let mut settings = Settings::default();
        settings.aliens_per_level = 2;
        let mut game = game_with(settings);
        game.take_spawn_interval();
        let before = game.settings().clone();

        stack_aliens_in_line(&mut game, 2);
        game.fire_bullet();
        game.fire_bullet();
        tick_until(&mut game, |g| g.stats().score > 0);

        let after = game.settings();
        assert_eq!(game.stats().level, 2);
        assert_eq!(game.aliens_until_level_up(), 2);
        assert!((after.alien_speed - before.alien_speed * before.speedup_scale).abs() < 1e-5);
        assert!((after.ship_speed - before.ship_speed * before.speedup_scale).abs() < 1e-5);
        assert_eq!(after.alien_points, before.alien_points + before.score_increase);
        let interval = game.take_spawn_interval().expect("spawn interval should change");
        assert!(interval < before.spawn_interval());
    }

    #[test]
    fn new_game_resets_progression() {
        let mut settings = Settings::default();
        settings.aliens_per_level = 1;
        let mut game = game_with(settings);
        stack_aliens_in_line(&mut game, 1);
        game.fire_bullet();
        tick_until(&mut game, |g| g.stats().level == 2);

        game.start_game();
        assert_eq!(game.stats().level, 1);
        assert_eq!(game.settings().alien_points, 50);
        assert!((game.settings().alien_speed - 0.2).abs() < 1e-6);
    }

    #[test]
    fn alien_reaching_left_edge_costs_one_ship() {
        let mut game = game();
        game.bullets.push(Bullet::new(&game.settings, &game.ship));
        // Row 0 keeps the alien clear of the centred ship; on the ship's own
        // row it would collide with the ship before reaching the edge.
        game.aliens.push(Alien::new(&game.settings, 0));
        let ships = game.stats().ships_left;
        assert!(!game.aliens[0].bounds().intersects(&game.ship().bounds()));

        tick_until(&mut game, |g| g.aliens().first().is_some_and(|a| a.bounds().right() == 0));
        assert_eq!(game.stats().ships_left, ships);
        assert_eq!(game.state(), GameState::Active);

        tick_until(&mut game, |g| g.aliens().is_empty());
        assert_eq!(game.stats().ships_left, ships - 1);
        assert!(game.bullets().is_empty());
        assert!(matches!(game.state(), GameState::Stunned { .. }));

        for _ in 0..100 {
            game.on_tick();
        }
        assert_eq!(game.stats().ships_left, ships - 1);
        assert_eq!(game.state(), GameState::Active);
    }

    #[test]
    fn alien_touching_ship_costs_one_ship() {
        let mut game = game();
        stack_aliens_in_line(&mut game, 1);
        tick_until(&mut game, |g| g.aliens().is_empty());
        assert_eq!(game.stats().ships_left, 2);
        let ship = game.ship().bounds();
        assert_eq!(ship.left(), 0);
        assert_eq!(ship.top(), (24 - ship.height) / 2);
    }

    #[test]
    fn stun_drops_input_and_spawns() {
        let mut game = game();
        game.ship_hit();
        assert_eq!(
            game.state(),
            GameState::Stunned { frames_left: game.settings().hit_pause_frames() }
        );
        game.on_key(press(KeyCode::Char(' ')));
        game.on_key(press(KeyCode::Up));
        game.on_spawn_tick();
        assert!(game.bullets().is_empty());
        assert!(game.aliens().is_empty());
        assert!(!game.ship().moving_up);

        game.on_key(press(KeyCode::Char('q')));
        assert!(game.should_quit());
    }

    #[test]
    fn slow_frames_shorten_the_stun_in_frames() {
        let mut settings = Settings::default();
        settings.frame_period = Duration::from_millis(100);
        let mut game = game_with(settings);
        game.ship_hit();
        for _ in 0..4 {
            game.on_tick();
            assert!(matches!(game.state(), GameState::Stunned { .. }));
        }
        game.on_tick();
        assert_eq!(game.state(), GameState::Active);
    }

    #[test]
    fn game_over_happens_once() {
        let mut settings = Settings::default();
        settings.ship_limit = 1;
        settings.hit_pause = Duration::ZERO;
        let mut game = game_with(settings);

        game.ship_hit();
        assert_eq!(game.stats().ships_left, 0);
        assert_eq!(game.state(), GameState::Active);

        stack_aliens_in_line(&mut game, 1);
        tick_until(&mut game, |g| g.state() == GameState::Inactive);
        assert_eq!(game.stats().ships_left, 0);
        assert!(game.pointer_visible);
        assert!(game.is_game_over());

        let frozen: Vec<_> = game.aliens().iter().map(|a| a.bounds()).collect();
        for _ in 0..50 {
            game.on_tick();
            game.on_spawn_tick();
        }
        let still: Vec<_> = game.aliens().iter().map(|a| a.bounds()).collect();
        assert_eq!(frozen, still);
        assert_eq!(game.state(), GameState::Inactive);
        assert_eq!(game.stats().ships_left, 0);
    }

    #[test]
    fn spawn_tick_adds_one_alien_on_right_edge() {
        let mut game = game();
        game.on_spawn_tick();
        assert_eq!(game.aliens().len(), 1);
        assert_eq!(game.aliens()[0].bounds().right(), game.settings().screen_width as i32);
    }

    #[test]
    fn resize_keeps_ship_on_field() {
        let mut game = game();
        game.on_key(press(KeyCode::Down));
        tick_until(&mut game, |g| g.ship().bounds().bottom() == 24);
        game.resize(60, 12);
        assert_eq!(game.settings().screen_width, 60);
        assert_eq!(game.ship().bounds().bottom(), 12);
    }
}
