use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::entities::Entity;
use crate::game::{GameState, SidewaysShooter};

type Grid = Vec<Vec<(char, Style)>>;

/// Stamp an entity onto the grid: its image if it has one, otherwise a
/// filled block of its bounds. Cells off the grid are skipped.
fn draw_entity(grid: &mut Grid, entity: &dyn Entity, style: Style) {
    let h = grid.len() as i32;
    let w = grid.first().map_or(0, |row| row.len()) as i32;
    let b = entity.bounds();
    let mut put = |x: i32, y: i32, ch: char| {
        if ch != ' ' && (0..w).contains(&x) && (0..h).contains(&y) {
            grid[y as usize][x as usize] = (ch, style);
        }
    };

    match entity.image() {
        Some(image) => {
            for (dy, row) in image.iter().enumerate() {
                for (dx, ch) in row.chars().enumerate() {
                    put(b.x + dx as i32, b.y + dy as i32, ch);
                }
            }
        }
        None => {
            for y in b.top()..b.bottom() {
                for x in b.left()..b.right() {
                    put(x, y, '█');
                }
            }
        }
    }
}

fn build_grid(game: &SidewaysShooter, width: usize, height: usize) -> Grid {
    let settings = game.settings();
    let bg = Style::default().bg(settings.bg_color);
    let mut grid: Grid = vec![vec![(' ', bg); width]; height];

    let bullet_style = bg.fg(settings.bullet_color);
    for bullet in game.bullets() {
        draw_entity(&mut grid, bullet, bullet_style);
    }

    let alien_style = bg.fg(Color::Rgb(80, 255, 150));
    for alien in game.aliens() {
        draw_entity(&mut grid, alien, alien_style);
    }

    // Blink the ship while it waits out a hit.
    let ship_visible = match game.state() {
        GameState::Stunned { frames_left } => (frames_left / 4) % 2 == 0,
        _ => true,
    };
    if ship_visible {
        let ship_style = bg.fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD);
        draw_entity(&mut grid, game.ship(), ship_style);
    }

    grid
}

pub fn render_field(frame: &mut Frame, game: &SidewaysShooter, area: Rect) {
    let w = area.width as usize;
    let h = area.height as usize;
    if w == 0 || h == 0 {
        return;
    }

    let lines: Vec<Line<'static>> = build_grid(game, w, h)
        .into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}
