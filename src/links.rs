use crate::types::{DemoLink, LinkDestination};
use lazy_static::lazy_static;
use regex::Regex;

const MAX_ANCHOR_TEXT_LENGTH: usize = 120;
const MAX_LINKS: usize = 50;

lazy_static! {
    // Any URL scheme (a letter, then letters, digits, `+`, `.` or `-`, then `:`) or `//`.
    // A browser reads `C:\dir` as scheme `c`, so it counts as external too.
    static ref EXTERNAL_HREF: Regex = Regex::new(r"^(?i)([a-z][a-z0-9+.-]*:|//)").unwrap();
}

/// Utilities for validating and describing demo links
pub struct LinkManager;

impl LinkManager {
    /// Classify an href as external (has a scheme or is protocol-relative) or internal
    pub fn classify(href: &str) -> LinkDestination {
        if EXTERNAL_HREF.is_match(href.trim()) {
            LinkDestination::External
        } else {
            LinkDestination::Internal
        }
    }

    /// Check a single link entry
    ///
    /// # Returns
    /// * `Ok(())` - Link can be offered in a dialog
    /// * `Err(String)` - Empty href, empty or overlong anchor text, or whitespace in href
    pub fn validate(link: &DemoLink) -> Result<(), String> {
        let href = link.href.trim();
        if href.is_empty() {
            return Err("Link href cannot be empty".to_string());
        }
        if href.chars().any(char::is_whitespace) {
            return Err(format!("Link href contains whitespace: '{}'", href));
        }

        let text = link.anchor_text.trim();
        if text.is_empty() {
            return Err(format!("Anchor text for '{}' cannot be empty", href));
        }
        if text.chars().count() > MAX_ANCHOR_TEXT_LENGTH {
            return Err(format!(
                "Anchor text for '{}' too long (max {} characters)",
                href, MAX_ANCHOR_TEXT_LENGTH
            ));
        }

        Ok(())
    }

    /// Keep the valid links, logging and collecting a message for each rejected one
    pub fn sanitize(links: Vec<DemoLink>) -> (Vec<DemoLink>, Vec<String>) {
        let mut kept = Vec::new();
        let mut rejected = Vec::new();

        for link in links {
            if kept.len() >= MAX_LINKS {
                tracing::warn!("Link limit ({}) reached, ignoring {}", MAX_LINKS, link.href);
                rejected.push(format!("Too many links (max {})", MAX_LINKS));
                continue;
            }
            match Self::validate(&link) {
                Ok(()) => kept.push(DemoLink {
                    href: link.href.trim().to_string(),
                    anchor_text: link.anchor_text.trim().to_string(),
                    blank: link.blank,
                }),
                Err(e) => {
                    tracing::warn!("Ignoring invalid link: {}", e);
                    rejected.push(e);
                }
            }
        }

        (kept, rejected)
    }

    /// Dialog title for a link, based on where it opens
    pub fn modal_title(link: &DemoLink) -> &'static str {
        if link.blank {
            "Open in new tab"
        } else {
            "Open in same tab"
        }
    }

    /// Label of the button that opens the dialog
    pub fn trigger_label(link: &DemoLink) -> String {
        let destination = match Self::classify(&link.href) {
            LinkDestination::External => "external",
            LinkDestination::Internal => "internal",
        };
        format!("{} from a modal ({})", Self::modal_title(link), destination)
    }
}
