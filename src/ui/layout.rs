use crate::app::AppState;
use crate::constants::EVENT_LOG_PANEL_HEIGHT;
use crate::navigation::Location;
use crate::types::{FocusTarget, UiMode};
use crate::ui::widgets::event_log::EventLogPanel;
use crate::ui::widgets::links::LinksPanel;
use crate::ui::widgets::popups::{error, help, link_modal};
use crate::ui::widgets::settings::SettingsPanel;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render(f: &mut Frame, app: &AppState) {
    let mut constraints = vec![
        Constraint::Length(1), // Titlebar
        Constraint::Min(0),    // Content
    ];
    if app.event_log_visible {
        constraints.push(Constraint::Length(EVENT_LOG_PANEL_HEIGHT));
    }
    constraints.push(Constraint::Length(1)); // Statusbar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    render_titlebar(f, app, chunks[0]);
    render_content(f, app, chunks[1]);
    if app.event_log_visible {
        EventLogPanel::new(&app.event_log, &app.theme).render(f, chunks[2]);
    }
    render_statusbar(f, app, chunks[chunks.len() - 1]);

    // Dialog sits above the page, popups above everything
    if !app.tab.is_away()
        && let Some(dialog) = app.page.as_ref().and_then(|page| page.open_dialog())
    {
        link_modal::render_link_modal(f, dialog, &app.theme);
    }

    match &app.ui_mode {
        UiMode::Help => help::render_help_popup(f, &app.theme),
        UiMode::ErrorPopup(message) => error::render_error_popup(f, message, &app.theme),
        UiMode::Normal => {}
    }
}

fn render_titlebar(f: &mut Frame, app: &AppState, area: Rect) {
    let location = match app.tab.location() {
        Location::DemoPage => "demo page".to_string(),
        Location::Away { href, .. } => href.clone(),
    };
    let title_text = format!(
        "Modal anchor demo: {} | bfcache {} | {}",
        app.variant.label(),
        if app.tab.bfcache() { "on" } else { "off" },
        location
    );

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(app.theme.bar_fg).bg(app.theme.bar_bg))
        .alignment(Alignment::Center);

    f.render_widget(title, area);
}

fn render_content(f: &mut Frame, app: &AppState, area: Rect) {
    if let Location::Away { href, .. } = app.tab.location() {
        render_destination(f, app, href, area);
        return;
    }

    let Some(page) = &app.page else {
        let text = Paragraph::new("Page not loaded")
            .style(Style::default().fg(app.theme.muted))
            .alignment(Alignment::Center);
        f.render_widget(text, area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let dialog_open = page.has_open_dialog();
    LinksPanel::new(
        page.triggers(),
        page.selected_link_idx,
        !dialog_open && app.focus == FocusTarget::Links,
        &app.theme,
    )
    .render(f, columns[0]);

    SettingsPanel::new(
        page.close_actions(),
        page.variant(),
        page.selected_setting_idx,
        !dialog_open && app.focus == FocusTarget::Settings,
        &app.theme,
    )
    .render(f, columns[1]);
}

/// Stand-in for the page the link led to
fn render_destination(f: &mut Frame, app: &AppState, href: &str, area: Rect) {
    let cached = if app.page.is_some() {
        "The demo page is kept in the bfcache."
    } else {
        "The demo page was unloaded and will reload on return."
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            href.to_string(),
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::from(""),
        Line::from(Span::styled(cached, Style::default().fg(app.theme.text))),
        Line::from(""),
        Line::from(Span::styled(
            "Press Backspace to go back",
            Style::default().fg(app.theme.muted),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title("Destination")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.muted)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn render_statusbar(f: &mut Frame, app: &AppState, area: Rect) {
    let status_text = if let Some(message) = &app.status_message {
        message.clone()
    } else if app.tab.is_away() {
        "Backspace back | c bfcache | e log | ? help | q quit".to_string()
    } else if app.has_open_dialog() {
        "Enter follow | Esc close | h/H pagehide | s/S pageshow | ? help".to_string()
    } else {
        let actions = app
            .page
            .as_ref()
            .map(|page| page.close_actions().to_string())
            .unwrap_or_default();
        format!(
            "Close actions {} | Enter open | 1/2/3 toggle | v variant | ? help",
            actions
        )
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.bar_fg).bg(app.theme.bar_bg));

    f.render_widget(status, area);
}
