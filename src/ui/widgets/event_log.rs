use crate::event_log::{EntryKind, EventLog};
use crate::ui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct EventLogPanel<'a> {
    log: &'a EventLog,
    theme: &'a Theme,
}

impl<'a> EventLogPanel<'a> {
    pub fn new(log: &'a EventLog, theme: &'a Theme) -> Self {
        Self { log, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Event log")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted));

        let visible = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = if self.log.is_empty() {
            vec![Line::from(Span::styled(
                "[No events yet]",
                Style::default().fg(self.theme.muted),
            ))]
        } else {
            self.log
                .recent(visible)
                .map(|entry| {
                    let tag = match entry.kind {
                        EntryKind::Dialog => "dialog",
                        EntryKind::Lifecycle => "event ",
                        EntryKind::Navigation => "nav   ",
                        EntryKind::Settings => "config",
                    };
                    Line::from(vec![
                        Span::styled(
                            entry.timestamp.format("%H:%M:%S ").to_string(),
                            Style::default().fg(self.theme.muted),
                        ),
                        Span::styled(format!("{} ", tag), Style::default().fg(self.theme.accent)),
                        Span::styled(entry.message.clone(), Style::default().fg(self.theme.text)),
                    ])
                })
                .collect()
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
