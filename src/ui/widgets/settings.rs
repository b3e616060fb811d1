use crate::types::{CloseActionSet, DemoVariant, TriggerKind};
use crate::ui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

/// Close-action checkboxes; read-only explanation for fixed variants
pub struct SettingsPanel<'a> {
    actions: CloseActionSet,
    variant: DemoVariant,
    selected_idx: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SettingsPanel<'a> {
    pub fn new(
        actions: CloseActionSet,
        variant: DemoVariant,
        selected_idx: usize,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            actions,
            variant,
            selected_idx,
            focused,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.text)
        };

        let block = Block::default()
            .title("Close actions")
            .borders(Borders::ALL)
            .border_style(border_style);

        if !self.variant.is_configurable() {
            let text = match self.variant {
                DemoVariant::Minimal => "Manual close only.\nNo lifecycle listeners are installed.",
                _ => "Close button and backdrop only.\nListeners log bfcache transitions.",
            };
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(self.theme.muted))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = TriggerKind::ALL
            .iter()
            .map(|kind| {
                let mark = if self.actions.contains(*kind) { "[x]" } else { "[ ]" };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} {:<9}", mark, kind.name()), Style::default().fg(self.theme.text)),
                    Span::styled(kind.description(), Style::default().fg(self.theme.muted)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(self.theme.highlight_bg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        if self.focused {
            list_state.select(Some(self.selected_idx));
        }

        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
