use crate::app::AppState;
use crate::error::Result;
use crate::page::PageSession;
use crate::types::{FocusTarget, ManualClose, PageTransitionEvent, TriggerKind, UiMode};
use crate::ui::widgets::popups::link_modal::{ModalHit, ModalLayout};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

pub struct InputHandler;

impl InputHandler {
    /// Handle common toggles and UI controls
    /// Returns true if the key was handled, false otherwise
    fn handle_common_controls(app: &mut AppState, key: KeyEvent) -> bool {
        match key.code {
            // Quit
            KeyCode::Char('q') => {
                app.should_quit = true;
                true
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true;
                true
            }
            // Close-action checkboxes
            KeyCode::Char('1') => {
                app.toggle_close_action(TriggerKind::Click);
                true
            }
            KeyCode::Char('2') => {
                app.toggle_close_action(TriggerKind::PageHide);
                true
            }
            KeyCode::Char('3') => {
                app.toggle_close_action(TriggerKind::PageShow);
                true
            }
            // Page and tab toggles
            KeyCode::Char('v') => {
                app.cycle_variant();
                true
            }
            KeyCode::Char('c') => {
                app.toggle_bfcache();
                true
            }
            KeyCode::Char('e') => {
                app.toggle_event_log();
                true
            }
            KeyCode::Tab => {
                app.cycle_focus();
                true
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                app.ui_mode = UiMode::Help;
                true
            }
            _ => false,
        }
    }

    pub fn handle_key(&mut self, app: &mut AppState, key: KeyEvent) -> Result<()> {
        // Any keypress dismisses the previous status message
        app.status_message = None;

        match &app.ui_mode {
            UiMode::Help => Self::handle_help(app, key),
            UiMode::ErrorPopup(_) => Self::handle_error_popup(app, key),
            UiMode::Normal if app.tab.is_away() => Self::handle_destination(app, key),
            UiMode::Normal if app.has_open_dialog() => Self::handle_dialog(app, key),
            UiMode::Normal => match app.focus {
                FocusTarget::Settings if app.variant.is_configurable() => {
                    Self::handle_settings(app, key)
                }
                _ => Self::handle_links(app, key),
            },
        }
    }

    /// Mouse clicks only matter while a dialog is on screen
    pub fn handle_mouse(&mut self, app: &mut AppState, mouse: MouseEvent, screen: Rect) -> Result<()> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || app.ui_mode != UiMode::Normal {
            return Ok(());
        }
        let Some(dialog) = app.page.as_ref().and_then(PageSession::open_dialog) else {
            return Ok(());
        };

        let layout = ModalLayout::new(screen, &dialog.link().anchor_text);
        match layout.hit_test(mouse.column, mouse.row) {
            ModalHit::CloseButton => app.close_dialog(ManualClose::CloseButton),
            ModalHit::Backdrop => app.close_dialog(ManualClose::Backdrop),
            ModalHit::Anchor => app.activate_anchor(),
            ModalHit::Inside => {}
        }
        Ok(())
    }

    fn handle_help(app: &mut AppState, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) | KeyCode::Char('q') => {
                app.ui_mode = UiMode::Normal;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_error_popup(app: &mut AppState, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                app.ui_mode = UiMode::Normal;
            }
            _ => {}
        }
        Ok(())
    }

    /// The tab is showing the link's destination
    fn handle_destination(app: &mut AppState, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('b') => {
                app.go_back();
            }
            KeyCode::Char('q') => {
                app.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true;
            }
            KeyCode::Char('c') => {
                app.toggle_bfcache();
            }
            KeyCode::Char('e') => {
                app.toggle_event_log();
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                app.ui_mode = UiMode::Help;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_dialog(app: &mut AppState, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('o') => {
                app.activate_anchor();
            }
            KeyCode::Esc | KeyCode::Char('x') => {
                app.close_dialog(ManualClose::CloseButton);
            }
            // Synthetic lifecycle events: lowercase is not persisted, uppercase is
            KeyCode::Char('h') => {
                app.inject_lifecycle(PageTransitionEvent::pagehide(false));
            }
            KeyCode::Char('H') => {
                app.inject_lifecycle(PageTransitionEvent::pagehide(true));
            }
            KeyCode::Char('s') => {
                app.inject_lifecycle(PageTransitionEvent::pageshow(false));
            }
            KeyCode::Char('S') => {
                app.inject_lifecycle(PageTransitionEvent::pageshow(true));
            }
            KeyCode::Char('q') => {
                app.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true;
            }
            KeyCode::Char('e') => {
                app.toggle_event_log();
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                app.ui_mode = UiMode::Help;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_links(app: &mut AppState, key: KeyEvent) -> Result<()> {
        if Self::handle_common_controls(app, key) {
            return Ok(());
        }

        let Some(page) = &mut app.page else {
            return Ok(());
        };
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                page.select_next_link();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                page.select_previous_link();
            }
            KeyCode::Enter | KeyCode::Char('o') => {
                app.open_selected_dialog();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_settings(app: &mut AppState, key: KeyEvent) -> Result<()> {
        if Self::handle_common_controls(app, key) {
            return Ok(());
        }

        let Some(page) = &mut app.page else {
            return Ok(());
        };
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                page.select_next_setting();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                page.select_previous_setting();
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                app.toggle_selected_setting();
            }
            _ => {}
        }
        Ok(())
    }
}
