use ratatui::prelude::*;
use ratatui::widgets::*;

const BUTTON_WIDTH: u16 = 16;
const BUTTON_HEIGHT: u16 = 3;

/// Area of a button centred in `area`, clipped to it.
pub fn button_area(area: Rect) -> Rect {
    let w = BUTTON_WIDTH.min(area.width);
    let h = BUTTON_HEIGHT.min(area.height);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}

/// Draw the play button and return where it landed.
pub fn render_play_button(frame: &mut Frame, area: Rect, game_over: bool) -> Rect {
    let button = button_area(area);
    frame.render_widget(Clear, button);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 220, 80)))
        .style(Style::default().bg(Color::Rgb(0, 135, 0)));
    let label = if game_over { "PLAY AGAIN" } else { "PLAY" };
    let p = Paragraph::new(Line::from(Span::styled(
        label,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(block);
    frame.render_widget(p, button);

    if game_over && button.y > area.y {
        let banner = Rect::new(area.x, button.y - 1, area.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            banner,
        );
    }
    button
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_is_centred() {
        let b = button_area(Rect::new(1, 2, 80, 20));
        assert_eq!(b, Rect::new(1 + 32, 2 + 8, 16, 3));
    }

    #[test]
    fn button_shrinks_to_tiny_areas() {
        let area = Rect::new(0, 0, 10, 2);
        let b = button_area(area);
        assert_eq!(b, Rect::new(0, 0, 10, 2));
        assert!(area.contains(Position::new(b.x, b.y)));
    }
}
