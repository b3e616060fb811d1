use crate::ui::theme::Theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Rows around the message: two borders, a spacer and the button
const CHROME_ROWS: u16 = 4;

/// Centered area sized to the wrapped message, clamped to the screen
pub fn popup_area(screen: Rect, message: &str) -> Rect {
    let width = (screen.width / 2).max(20).min(screen.width);
    let text_width = width.saturating_sub(2).max(1) as usize;
    let message_rows = textwrap::wrap(message, text_width).len().max(1) as u16;
    let height = message_rows.saturating_add(CHROME_ROWS).min(screen.height);

    Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y + (screen.height - height) / 2,
        width,
        height,
    }
}

pub fn render_error_popup(f: &mut Frame, message: &str, theme: &Theme) {
    let popup_area = popup_area(f.area(), message);

    // Clear the area behind the popup
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error));

    let inner_area = block.inner(popup_area);
    f.render_widget(block, popup_area);

    // Split inner area into message and button sections
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Message
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Button
        ])
        .split(inner_area);

    let error_text = Paragraph::new(message)
        .style(Style::default().fg(theme.error))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    f.render_widget(error_text, chunks[0]);

    let button_text = Line::from(vec![Span::styled(
        "[OK]",
        Style::default()
            .fg(theme.success)
            .add_modifier(Modifier::BOLD),
    )]);
    let button = Paragraph::new(button_text).alignment(Alignment::Center);
    f.render_widget(button, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    #[test]
    fn test_height_follows_message() {
        let short = popup_area(SCREEN, "Config file is not valid JSON");
        assert_eq!(short.height, 1 + CHROME_ROWS);
        assert_eq!(short.width, 40);
        assert_eq!(short.x, 20);

        let warnings = "Ignoring invalid link: empty href\nIgnoring invalid link: empty anchor text\nNo usable links, using defaults";
        let tall = popup_area(SCREEN, warnings);
        assert!(tall.height >= 3 + CHROME_ROWS);
        assert!(tall.height > short.height);
    }

    #[test]
    fn test_height_clamped_to_screen() {
        let message = vec!["warning"; 60].join("\n");
        let area = popup_area(SCREEN, &message);
        assert_eq!(area.height, SCREEN.height);
        assert_eq!(area.y, 0);
    }
}
