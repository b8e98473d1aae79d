use rand::Rng;

use super::{image_size, Bounds, Entity, Image};
use crate::settings::Settings;

const ALIEN_IMAGE: Image = &[
    "▗▆▖",
    "◀█▌",
    "▝▀▘",
];

#[derive(Debug, Clone)]
pub struct Alien {
    x: f32,
    bounds: Bounds,
}

impl Alien {
    /// An alien flush with the right edge at row `y`.
    pub fn new(settings: &Settings, y: i32) -> Self {
        let (width, height) = image_size(ALIEN_IMAGE);
        let x = settings.screen_width as i32 - width;
        Self {
            x: x as f32,
            bounds: Bounds::new(x, y, width, height),
        }
    }

    /// An alien on the right edge at a uniformly random row that keeps the
    /// whole sprite on the field.
    pub fn spawn(settings: &Settings, rng: &mut impl Rng) -> Self {
        let (_, height) = image_size(ALIEN_IMAGE);
        let max_y = (settings.screen_height as i32 - height).max(0);
        Self::new(settings, rng.gen_range(0..=max_y))
    }

    /// Fully past the left edge.
    pub fn reached_left_edge(&self) -> bool {
        self.bounds.right() < 0
    }
}

impl Entity for Alien {
    fn update(&mut self, settings: &Settings) {
        self.x -= settings.alien_speed;
        self.bounds.x = self.x.floor() as i32;
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn image(&self) -> Option<Image> {
        Some(ALIEN_IMAGE)
    }
}
