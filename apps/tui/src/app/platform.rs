//! Terminal stand-ins for the browser's address bar and focused element.

use org_directory_core::{ActiveElement, FocusController, LocationController};
use reqwest::Url;
use tracing::debug;

/// The address the directory is "open at", with a back-stack of pushed entries.
#[derive(Debug, Clone)]
pub struct TerminalLocation {
    current: Url,
    history: Vec<Url>,
}

impl TerminalLocation {
    pub const fn new(url: Url) -> Self {
        Self {
            current: url,
            history: Vec::new(),
        }
    }

    pub const fn current(&self) -> &Url {
        &self.current
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl LocationController for TerminalLocation {
    fn query_param(&self, key: &str) -> Option<String> {
        self.current
            .query_pairs()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.into_owned())
    }

    fn push_query_param(&mut self, key: &str, value: &str) {
        let mut pairs: Vec<(String, String)> = self.current.query_pairs().into_owned().collect();

        let mut replaced = false;
        pairs.retain_mut(|(name, existing)| {
            if name.as_str() != key {
                return true;
            }
            if replaced {
                return false;
            }
            *existing = value.to_string();
            replaced = true;
            true
        });
        if !replaced {
            pairs.push((key.to_string(), value.to_string()));
        }

        let mut next = self.current.clone();
        next.query_pairs_mut().clear().extend_pairs(&pairs);
        debug!(url = %next, "location pushed");
        self.history.push(std::mem::replace(&mut self.current, next));
    }
}

/// Only the search box can hold focus in the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminalFocus {
    search_focused: bool,
}

impl TerminalFocus {
    pub fn focus_search(&mut self) {
        self.search_focused = true;
    }

    pub const fn search_focused(self) -> bool {
        self.search_focused
    }
}

impl FocusController for TerminalFocus {
    fn active_element(&self) -> ActiveElement {
        if self.search_focused {
            ActiveElement::Focusable
        } else {
            ActiveElement::None
        }
    }

    fn blur_active_element(&mut self) {
        self.search_focused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(url: &str) -> TerminalLocation {
        TerminalLocation::new(Url::parse(url).unwrap())
    }

    #[test]
    fn reads_query_parameters() {
        let loc = location("http://localhost:8000/?page=3&sort=name");
        assert_eq!(loc.query_param("page").as_deref(), Some("3"));
        assert_eq!(loc.query_param("missing"), None);
    }

    #[test]
    fn push_sets_the_parameter_and_keeps_the_rest() {
        let mut loc = location("http://localhost:8000/directory?sort=name&page=1&page=9");
        loc.push_query_param("page", "2");

        assert_eq!(
            loc.current().as_str(),
            "http://localhost:8000/directory?sort=name&page=2"
        );
        assert_eq!(loc.history_len(), 1);
    }

    #[test]
    fn push_appends_a_missing_parameter() {
        let mut loc = location("http://localhost:8000/");
        loc.push_query_param("page", "4");
        loc.push_query_param("page", "5");

        assert_eq!(loc.current().as_str(), "http://localhost:8000/?page=5");
        assert_eq!(loc.history_len(), 2);
    }

    #[test]
    fn blurring_ends_search_editing() {
        let mut focus = TerminalFocus::default();
        assert_eq!(focus.active_element(), ActiveElement::None);

        focus.focus_search();
        assert_eq!(focus.active_element(), ActiveElement::Focusable);

        focus.blur_active_element();
        assert!(!focus.search_focused());
    }
}
