use crate::constants::{MODAL_HEIGHT, MODAL_WIDTH_PERCENT};
use crate::dialog::DialogTrigger;
use crate::links::LinkManager;
use crate::types::{CloseMode, LinkDestination};
use crate::ui::theme::Theme;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const CLOSE_BUTTON: &str = "[x]";
const MAX_ANCHOR_LINES: usize = 2;

/// Screen regions of the modal, shared by rendering and mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalLayout {
    pub area: Rect,
    pub close_button: Rect,
    pub anchor: Rect,
}

/// What a mouse click landed on while the modal is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalHit {
    CloseButton,
    Anchor,
    Inside,
    Backdrop,
}

impl ModalLayout {
    pub fn new(screen: Rect, anchor_text: &str) -> Self {
        let width = (screen.width as u32 * MODAL_WIDTH_PERCENT as u32 / 100) as u16;
        let width = width.max(20).min(screen.width);
        let height = MODAL_HEIGHT.min(screen.height);
        let area = Rect {
            x: screen.x + (screen.width - width) / 2,
            y: screen.y + (screen.height - height) / 2,
            width,
            height,
        };

        let button_width = CLOSE_BUTTON.len() as u16;
        let close_button = Rect {
            x: area.right().saturating_sub(button_width + 2),
            y: area.y,
            width: button_width,
            height: 1,
        };

        // Anchor starts on the second inner row
        let inner_width = area.width.saturating_sub(4);
        let anchor_rows = anchor_lines(anchor_text, inner_width).len() as u16;
        let anchor = Rect {
            x: area.x + 2,
            y: area.y + 2,
            width: inner_width,
            height: anchor_rows,
        };

        ModalLayout {
            area,
            close_button,
            anchor,
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> ModalHit {
        let position = Position::new(column, row);
        if self.close_button.contains(position) {
            ModalHit::CloseButton
        } else if self.anchor.contains(position) {
            ModalHit::Anchor
        } else if self.area.contains(position) {
            ModalHit::Inside
        } else {
            ModalHit::Backdrop
        }
    }
}

/// Wrap anchor text to the modal width, truncating with "..." past two lines
pub fn anchor_lines(text: &str, width: u16) -> Vec<String> {
    let width = (width as usize).max(1);
    let mut lines: Vec<String> = textwrap::wrap(text, width)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();

    if lines.len() > MAX_ANCHOR_LINES {
        lines.truncate(MAX_ANCHOR_LINES);
        if let Some(last) = lines.last_mut() {
            let keep = width.saturating_sub(3);
            let truncated: String = last.chars().take(keep).collect();
            *last = format!("{}...", truncated);
        }
    }
    lines
}

/// Render the open dialog over a dimmed backdrop
pub fn render_link_modal(f: &mut Frame, dialog: &DialogTrigger, theme: &Theme) {
    let screen = f.area();
    let link = dialog.link();
    let layout = ModalLayout::new(screen, &link.anchor_text);

    // Backdrop dims whatever is behind the modal
    f.buffer_mut()
        .set_style(screen, Style::default().fg(theme.muted).bg(theme.backdrop));

    f.render_widget(Clear, layout.area);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", LinkManager::modal_title(link)),
            Style::default()
                .fg(theme.bar_fg)
                .bg(theme.bar_bg)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    f.render_widget(block, layout.area);

    let destination = match LinkManager::classify(&link.href) {
        LinkDestination::External => "external",
        LinkDestination::Internal => "internal",
    };
    let target = if link.blank { "new tab" } else { "same tab" };

    let anchor_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let mut lines: Vec<Line> = anchor_lines(&link.anchor_text, layout.anchor.width)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, anchor_style)))
        .collect();

    lines.push(Line::from(Span::styled(
        format!("{} ({}, {})", link.href, destination, target),
        Style::default().fg(theme.muted),
    )));
    lines.push(Line::from(""));

    let policy = match (dialog.close_mode(), dialog.mounted_actions()) {
        (CloseMode::ManualOnly, _) | (_, None) => "Manual close only".to_string(),
        (CloseMode::Coordinated, Some(actions)) if actions.is_empty() => {
            "Close actions: none (listeners observe only)".to_string()
        }
        (CloseMode::Coordinated, Some(actions)) => format!("Close actions: {}", actions),
    };
    lines.push(Line::from(Span::styled(policy, Style::default().fg(theme.text))));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter follow link  x/Esc close  h/H pagehide  s/S pageshow",
        Style::default().fg(theme.muted),
    )));

    let body = Rect {
        x: layout.anchor.x,
        y: layout.anchor.y,
        width: layout.anchor.width,
        height: layout.area.bottom().saturating_sub(layout.anchor.y + 1),
    };
    f.render_widget(Paragraph::new(lines), body);

    f.render_widget(
        Paragraph::new(CLOSE_BUTTON).style(
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        ),
        layout.close_button,
    );
}
