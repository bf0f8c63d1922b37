//! Seam between the page components and the surrounding page.
//!
//! Alerts, sound cues, navigation and the navbar cart badge are owned by the
//! embedding page, not by this library; components drive them through
//! [`PageShell`]. Sound and asset loading stay out of scope - the shell only
//! learns which cue to play.

use std::sync::Mutex;

use crate::views::CartCountView;

/// Sound cues the components can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Played when a prediction result arrives.
    Prediction,
    /// Played when the smart price is applied.
    Checkout,
}

/// UI surface injected into every page component.
pub trait PageShell: Send + Sync {
    /// Show a blocking user-visible message.
    fn notify(&self, message: &str);

    /// Play a completion sound, if the page has one loaded.
    fn play_sound(&self, cue: SoundCue);

    /// Change the browser location.
    fn navigate(&self, url: &str);

    /// Refresh the navbar cart badge.
    fn set_cart_badge(&self, badge: CartCountView);
}

/// Everything a [`RecordingShell`] has been asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    Notified(String),
    Played(SoundCue),
    Navigated(String),
    BadgeSet(CartCountView),
}

/// In-memory shell that records every call. Used by tests and headless runs.
#[derive(Default)]
pub struct RecordingShell {
    events: Mutex<Vec<ShellEvent>>,
}

impl RecordingShell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<ShellEvent> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// All notification messages, in order.
    #[must_use]
    pub fn notifications(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ShellEvent::Notified(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// All navigation targets, in order.
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ShellEvent::Navigated(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    /// The most recent cart badge state, if any was pushed.
    #[must_use]
    pub fn last_badge(&self) -> Option<CartCountView> {
        self.events()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                ShellEvent::BadgeSet(badge) => Some(badge),
                _ => None,
            })
    }

    fn record(&self, event: ShellEvent) {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(event);
    }
}

impl PageShell for RecordingShell {
    fn notify(&self, message: &str) {
        self.record(ShellEvent::Notified(message.to_string()));
    }

    fn play_sound(&self, cue: SoundCue) {
        self.record(ShellEvent::Played(cue));
    }

    fn navigate(&self, url: &str) {
        self.record(ShellEvent::Navigated(url.to_string()));
    }

    fn set_cart_badge(&self, badge: CartCountView) {
        self.record(ShellEvent::BadgeSet(badge));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_shell_preserves_order() {
        let shell = RecordingShell::new();
        shell.notify("hello");
        shell.play_sound(SoundCue::Prediction);
        shell.navigate("/cart");

        assert_eq!(
            shell.events(),
            vec![
                ShellEvent::Notified("hello".to_string()),
                ShellEvent::Played(SoundCue::Prediction),
                ShellEvent::Navigated("/cart".to_string()),
            ]
        );
        assert_eq!(shell.notifications(), vec!["hello".to_string()]);
        assert_eq!(shell.last_badge(), None);
    }
}
