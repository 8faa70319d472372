// Accessibility and environment preference helpers

use crate::dom;

/// Live region that announces step changes and game results.
pub const STATUS_REGION_ID: &str = "quest-status";

/// Get CSS for visible focus indicators and screen reader utilities
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus-visible{outline:3px solid var(--accent,#ff6b9d);outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Update the live region status for screen readers
pub fn set_status(msg: &str) {
    if let Some(node) = dom::document().and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID)) {
        node.set_text_content(Some(msg));
    }
}

/// Whether the OS asks for a dark color scheme
#[must_use]
pub fn prefers_dark_mode() -> bool {
    dom::media_matches("(prefers-color-scheme: dark)")
}

/// Whether the OS asks for reduced motion
#[must_use]
pub fn prefers_reduced_motion() -> bool {
    dom::media_matches("(prefers-reduced-motion: reduce)")
}

/// Toggle the dark theme class on the root element
pub fn apply_theme(dark: bool) {
    let Some(html) = dom::root_element() else {
        return;
    };
    let classes = html.class_list();
    let result = if dark {
        classes.add_1("dark")
    } else {
        classes.remove_1("dark")
    };
    if let Err(err) = result {
        log::debug!("theme class not applied: {}", dom::js_error_message(&err));
    }
}

/// Session settings captured from the current environment
#[must_use]
pub fn current_settings() -> crate::game::Settings {
    crate::game::Settings {
        dark_mode: prefers_dark_mode(),
        reduced_motion: prefers_reduced_motion(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_default_off_outside_browser() {
        assert!(!prefers_dark_mode());
        assert!(!prefers_reduced_motion());
        assert_eq!(current_settings(), crate::game::Settings::default());
        set_status("ignored");
        apply_theme(true);
    }

    #[test]
    fn focus_css_includes_screen_reader_helper() {
        assert!(visible_focus_css().contains(".sr-only"));
    }
}
