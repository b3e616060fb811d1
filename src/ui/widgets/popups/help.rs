use crate::ui::theme::Theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render_help_popup(f: &mut Frame, theme: &Theme) {
    // Calculate popup size (70% width, 80% height)
    let popup_width = (f.area().width as f32 * 0.7) as u16;
    let popup_height = (f.area().height as f32 * 0.8) as u16;

    let popup_x = (f.area().width.saturating_sub(popup_width)) / 2;
    let popup_y = (f.area().height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect {
        x: popup_x,
        y: popup_y,
        width: popup_width,
        height: popup_height,
    };

    let heading = |text: &'static str| {
        Line::from(vec![Span::styled(
            text,
            Style::default().add_modifier(Modifier::BOLD).fg(theme.accent),
        )])
    };

    let help_text = vec![
        heading("DEMO PAGE"),
        Line::from(""),
        Line::from("  j / ↓              Next link or setting"),
        Line::from("  k / ↑              Previous link or setting"),
        Line::from("  Enter              Open the selected dialog"),
        Line::from("  Space              Toggle the selected setting"),
        Line::from("  1 / 2 / 3          Toggle click / pagehide / pageshow"),
        Line::from("  Tab                Switch between links and settings"),
        Line::from("  v                  Next variant (reloads the page)"),
        Line::from("  c                  Toggle bfcache"),
        Line::from("  e                  Toggle event log"),
        Line::from(""),
        heading("DIALOG"),
        Line::from(""),
        Line::from("  Enter / o          Click the link"),
        Line::from("  x / Esc            Close button"),
        Line::from("  Mouse outside      Backdrop click"),
        Line::from("  h / H              Fire pagehide (not persisted / persisted)"),
        Line::from("  s / S              Fire pageshow (not persisted / persisted)"),
        Line::from(""),
        heading("DESTINATION PAGE"),
        Line::from(""),
        Line::from("  Backspace / b / ←  Go back"),
        Line::from(""),
        heading("APPLICATION"),
        Line::from(""),
        Line::from("  ? / F1             Toggle this help"),
        Line::from("  q / Ctrl-c         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press Esc or ? to close",
            Style::default().fg(theme.muted),
        )]),
    ];

    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn rendered_rows(width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| render_help_popup(f, &Theme::dark()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_lowercase_injection_keys_are_not_persisted() {
        let rows = rendered_rows(120, 50);
        let find = |needle: &str| rows.iter().find(|row| row.contains(needle)).cloned();

        let pagehide = find("Fire pagehide").unwrap();
        assert!(pagehide.contains("h / H"));
        assert!(pagehide.contains("(not persisted / persisted)"));

        let pageshow = find("Fire pageshow").unwrap();
        assert!(pageshow.contains("s / S"));
        assert!(pageshow.contains("(not persisted / persisted)"));
    }
}
