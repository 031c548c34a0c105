//! Startup state: the server wake probe and the one-shot location fix.

use crate::messages;
use crate::models::GeoPoint;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ServerAwake,
    ServerUnreachable(String),
    LocationAcquired(GeoPoint),
    LocationFailed(String),
}

/// What the app shows in place of (or as) the main UI.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionView {
    Fatal(String),
    WakingServer,
    LoadingMap,
    Ready(GeoPoint),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub server_awake: bool,
    pub location: Option<GeoPoint>,
    pub fatal: Option<String>,
}

impl SessionState {
    pub fn apply(&self, event: SessionEvent) -> SessionState {
        let mut next = self.clone();
        match event {
            SessionEvent::ServerAwake => next.server_awake = true,
            SessionEvent::LocationAcquired(point) => next.location = Some(point),
            // First fatal error wins; nothing clears it.
            SessionEvent::ServerUnreachable(message) | SessionEvent::LocationFailed(message) => {
                if next.fatal.is_none() {
                    next.fatal = Some(message);
                }
            }
        }
        next
    }

    pub fn view(&self) -> SessionView {
        if let Some(message) = &self.fatal {
            return SessionView::Fatal(message.clone());
        }
        if !self.server_awake {
            return SessionView::WakingServer;
        }
        match self.location {
            Some(point) => SessionView::Ready(point),
            None => SessionView::LoadingMap,
        }
    }

    /// Text for every non-ready view.
    pub fn status_text(&self) -> Option<String> {
        match self.view() {
            SessionView::Fatal(message) => Some(messages::fatal_error(&message)),
            SessionView::WakingServer => Some(messages::WAKING_SERVER.to_string()),
            SessionView::LoadingMap => Some(messages::LOADING_MAP.to_string()),
            SessionView::Ready(_) => None,
        }
    }
}
