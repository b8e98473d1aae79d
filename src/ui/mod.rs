pub mod button;
pub mod field;
pub mod scoreboard;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::game::{GameState, SidewaysShooter};

pub fn render(frame: &mut Frame, game: &mut SidewaysShooter) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" Sideways Shooter ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Scoreboard
            Constraint::Min(4),    // Field
            Constraint::Length(1), // Help
        ])
        .split(inner);

    scoreboard::render_scoreboard(frame, game, chunks[0]);

    game.resize(chunks[1].width, chunks[1].height);
    field::render_field(frame, game, chunks[1]);

    if game.is_active() {
        game.set_play_button(None);
    } else {
        let button = button::render_play_button(frame, chunks[1], game.is_game_over());
        game.set_play_button(Some(button));
    }

    render_help(frame, game.state(), chunks[2]);

    if let Some(pointer) = game.pointer() {
        if frame.area().contains(pointer) {
            let spot = Rect::new(pointer.x, pointer.y, 1, 1);
            frame.render_widget(
                Paragraph::new("➤").style(Style::default().fg(Color::Rgb(255, 220, 80))),
                spot,
            );
        }
    }
}

fn render_help(frame: &mut Frame, state: GameState, area: Rect) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let sep = Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60)));

    let line = match state {
        GameState::Inactive => Line::from(vec![
            Span::styled(" Click PLAY ", key),
            Span::styled("or press Enter ", dim),
            sep,
            Span::styled("Q Quit", dim),
        ]),
        GameState::Stunned { .. } => Line::from(vec![Span::styled(
            " SHIP LOST! ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )]),
        GameState::Active => Line::from(vec![
            Span::styled(" \u{2191}\u{2193} Move ", dim),
            sep.clone(),
            Span::styled("Space Shoot ", key),
            sep,
            Span::styled("Q Quit", dim),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}
