use crate::dialog::DialogTrigger;
use crate::links::LinkManager;
use crate::ui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// The demo entries, one trigger button per link
pub struct LinksPanel<'a> {
    triggers: &'a [DialogTrigger],
    selected_idx: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> LinksPanel<'a> {
    pub fn new(triggers: &'a [DialogTrigger], selected_idx: usize, focused: bool, theme: &'a Theme) -> Self {
        Self {
            triggers,
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
            .title("Contents")
            .borders(Borders::ALL)
            .border_style(border_style);

        let items: Vec<ListItem> = self
            .triggers
            .iter()
            .map(|trigger| {
                let link = trigger.link();
                ListItem::new(vec![
                    Line::from(Span::styled(
                        LinkManager::trigger_label(link),
                        Style::default().fg(self.theme.text).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("  {} → {}", link.anchor_text, link.href),
                        Style::default().fg(self.theme.muted),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(self.theme.highlight_bg))
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected_idx));

        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
