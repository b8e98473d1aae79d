use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::game::SidewaysShooter;

pub fn render_scoreboard(frame: &mut Frame, game: &SidewaysShooter, area: Rect) {
    let stats = game.stats();
    let ships = "\u{25b6} ".repeat(stats.ships_left as usize);
    let sep = || Span::styled(" | ", Style::default().fg(Color::DarkGray));

    let line = Line::from(vec![
        Span::styled(
            format!(" Score: {} ", stats.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled(
            format!("High: {} ", stats.high_score),
            Style::default().fg(Color::Cyan),
        ),
        sep(),
        Span::styled(
            format!("Level: {} ", stats.level),
            Style::default().fg(Color::Green),
        ),
        sep(),
        Span::styled(
            format!("Ships: {}", ships),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled(
            format!("Next level: {} ", game.aliens_until_level_up()),
            Style::default().fg(Color::Rgb(255, 80, 80)),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
