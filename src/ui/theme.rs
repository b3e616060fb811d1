//! Light/dark palette picked from the terminal background

use crate::constants::THEME_DETECT_TIMEOUT_MS;
use ratatui::style::Color;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub bar_fg: Color,
    pub bar_bg: Color,
    pub backdrop: Color,
    pub highlight_bg: Color,
    pub success: Color,
    pub error: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            accent: Color::Rgb(129, 140, 248),
            text: Color::White,
            muted: Color::DarkGray,
            bar_fg: Color::White,
            bar_bg: Color::Rgb(79, 70, 229),
            backdrop: Color::Rgb(20, 20, 28),
            highlight_bg: Color::Rgb(55, 48, 107),
            success: Color::Green,
            error: Color::Red,
        }
    }

    pub fn light() -> Self {
        Theme {
            accent: Color::Rgb(79, 70, 229),
            text: Color::Black,
            muted: Color::Gray,
            bar_fg: Color::White,
            bar_bg: Color::Rgb(124, 58, 237),
            backdrop: Color::Rgb(200, 200, 210),
            highlight_bg: Color::Rgb(224, 231, 255),
            success: Color::Rgb(21, 128, 61),
            error: Color::Rgb(185, 28, 28),
        }
    }

    /// Ask the terminal for its background. Falls back to dark.
    pub fn detect() -> Self {
        use termbg::Theme as Background;

        match termbg::theme(Duration::from_millis(THEME_DETECT_TIMEOUT_MS)) {
            Ok(Background::Light) => {
                tracing::debug!("Detected light terminal background");
                Self::light()
            }
            Ok(Background::Dark) => {
                tracing::debug!("Detected dark terminal background");
                Self::dark()
            }
            Err(e) => {
                tracing::debug!("Terminal background detection failed: {}", e);
                Self::dark()
            }
        }
    }
}
