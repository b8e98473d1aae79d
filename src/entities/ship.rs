use super::{image_size, Bounds, Entity, Image};
use crate::settings::Settings;

const SHIP_IMAGE: Image = &[
    "▄▄  ",
    "███▶",
    "▀▀  ",
];

/// The player's ship. It lives on the left edge and only moves vertically.
#[derive(Debug, Clone)]
pub struct Ship {
    y: f32,
    bounds: Bounds,
    pub moving_up: bool,
    pub moving_down: bool,
}

impl Ship {
    pub fn new(settings: &Settings) -> Self {
        let (width, height) = image_size(SHIP_IMAGE);
        let mut ship = Self {
            y: 0.0,
            bounds: Bounds::new(0, 0, width, height),
            moving_up: false,
            moving_down: false,
        };
        ship.center_ship(settings);
        ship
    }

    /// Park the ship at the vertical middle of the left edge.
    pub fn center_ship(&mut self, settings: &Settings) {
        self.y = (settings.screen_height as f32 - self.bounds.height as f32) / 2.0;
        self.y = self.y.max(0.0).floor();
        self.bounds.y = self.y as i32;
    }

    /// Keep the ship inside the field after the field changed size.
    pub fn clamp(&mut self, settings: &Settings) {
        let max_y = (settings.screen_height as f32 - self.bounds.height as f32).max(0.0);
        self.y = self.y.clamp(0.0, max_y);
        self.bounds.y = self.y as i32;
    }

    pub fn stop(&mut self) {
        self.moving_up = false;
        self.moving_down = false;
    }
}

impl Entity for Ship {
    fn update(&mut self, settings: &Settings) {
        if self.moving_up {
            self.y -= settings.ship_speed;
        }
        if self.moving_down {
            self.y += settings.ship_speed;
        }
        self.clamp(settings);
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn image(&self) -> Option<Image> {
        Some(SHIP_IMAGE)
    }
}
