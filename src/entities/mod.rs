pub mod alien;
pub mod bullet;
pub mod ship;

pub use alien::Alien;
pub use bullet::Bullet;
pub use ship::Ship;

use crate::settings::Settings;

/// Text-art image of an entity, one string per row. Every row has the same
/// width in single-width characters; spaces are transparent.
pub type Image = &'static [&'static str];

pub fn image_size(image: Image) -> (i32, i32) {
    let width = image.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    (width as i32, image.len() as i32)
}

/// Integer bounding box on the play field, in cells. Unlike
/// `ratatui::layout::Rect` it can sit partly off-field on any side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    /// True when the two boxes share a positive area. Touching edges do not
    /// count.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Shared capability of everything on the field.
pub trait Entity {
    /// Advance one frame at the current speeds.
    fn update(&mut self, settings: &Settings);

    fn bounds(&self) -> Bounds;

    /// Sprite to draw, or `None` for a plain filled rectangle.
    fn image(&self) -> Option<Image> {
        None
    }
}
