use super::{Bounds, Entity, Ship};
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Bullet {
    x: f32,
    bounds: Bounds,
}

impl Bullet {
    /// A bullet leaving the ship's nose, centred on it vertically.
    pub fn new(settings: &Settings, ship: &Ship) -> Self {
        let ship_bounds = ship.bounds();
        let width = settings.bullet_width as i32;
        let height = settings.bullet_height as i32;
        let x = ship_bounds.right();
        let y = ship_bounds.center_y() - height / 2;
        Self {
            x: x as f32,
            bounds: Bounds::new(x, y, width, height),
        }
    }

    /// Past the right edge of the field.
    pub fn is_off_field(&self, settings: &Settings) -> bool {
        self.bounds.left() > settings.screen_width as i32
    }
}

impl Entity for Bullet {
    fn update(&mut self, settings: &Settings) {
        self.x += settings.bullet_speed;
        self.bounds.x = self.x as i32;
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }
}
