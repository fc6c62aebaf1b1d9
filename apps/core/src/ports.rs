//! Capabilities the directory needs from its host environment.
//!
//! The browser client implements these on top of `document`/`window`, the
//! terminal client on top of its own input and address state.

/// What currently holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveElement {
    None,
    /// Something is active but cannot take or lose focus (e.g. a detached node).
    Inert,
    Focusable,
}

pub trait FocusController {
    fn active_element(&self) -> ActiveElement;

    fn blur_active_element(&mut self);
}

/// Drops focus from the active element if there is a focusable one.
pub fn clear_focus(focus: &mut impl FocusController) {
    if focus.active_element() == ActiveElement::Focusable {
        focus.blur_active_element();
    }
}

/// Read and rewrite the query string of the current address without navigating.
pub trait LocationController {
    fn query_param(&self, key: &str) -> Option<String>;

    /// Sets `key` (replacing any existing values) and records a new history entry.
    fn push_query_param(&mut self, key: &str, value: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Document-level keydown listener registration.
pub trait KeyboardHost {
    fn add_keydown_listener(&mut self) -> ListenerId;

    fn remove_keydown_listener(&mut self, id: ListenerId);
}

/// In-memory listener registry used by hosts without a real `document`.
#[derive(Debug, Default)]
pub struct ListenerSet {
    next_id: u64,
    active: Vec<ListenerId>,
    added: u64,
    removed: u64,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, id: ListenerId) -> bool {
        self.active.contains(&id)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub const fn added(&self) -> u64 {
        self.added
    }

    pub const fn removed(&self) -> u64 {
        self.removed
    }
}

impl KeyboardHost for ListenerSet {
    fn add_keydown_listener(&mut self) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.active.push(id);
        self.added += 1;
        id
    }

    fn remove_keydown_listener(&mut self, id: ListenerId) {
        if let Some(position) = self.active.iter().position(|active| *active == id) {
            self.active.remove(position);
            self.removed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        active: ActiveElement,
        blurred: usize,
    }

    impl FocusController for Probe {
        fn active_element(&self) -> ActiveElement {
            self.active
        }

        fn blur_active_element(&mut self) {
            self.blurred += 1;
            self.active = ActiveElement::None;
        }
    }

    #[test]
    fn only_focusable_elements_are_blurred() {
        let mut focusable = Probe {
            active: ActiveElement::Focusable,
            blurred: 0,
        };
        clear_focus(&mut focusable);
        assert_eq!(focusable.blurred, 1);

        let mut inert = Probe {
            active: ActiveElement::Inert,
            blurred: 0,
        };
        clear_focus(&mut inert);
        assert_eq!(inert.blurred, 0);

        let mut nothing = Probe {
            active: ActiveElement::None,
            blurred: 0,
        };
        clear_focus(&mut nothing);
        assert_eq!(nothing.blurred, 0);
    }

    #[test]
    fn listener_set_tracks_balance() {
        let mut listeners = ListenerSet::new();
        let first = listeners.add_keydown_listener();
        let second = listeners.add_keydown_listener();
        assert_ne!(first, second);
        assert_eq!(listeners.active_count(), 2);

        listeners.remove_keydown_listener(first);
        listeners.remove_keydown_listener(first);

        assert!(!listeners.is_active(first));
        assert!(listeners.is_active(second));
        assert_eq!(listeners.removed(), 1);
        assert_eq!(listeners.added(), 2);
    }
}
