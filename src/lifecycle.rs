use crate::assembler::MenuLayout;
use crate::events::MenuEvent;
use crate::menu::{ActionId, MenuBar};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

/// Mirrors the client connection onto the Disconnect and Take Screenshot actions.
///
/// Level triggered: every notification writes the enablement again, repeated notifications are
/// harmless.
#[derive(Debug, Clone)]
pub struct LifecycleRouter {
    state: ConnectionState,
    disconnect: ActionId,
    screenshot: ActionId,
}

impl LifecycleRouter {
    /// `None` unless the layout was built for the client role.
    pub fn for_layout(layout: &MenuLayout) -> Option<Self> {
        layout.disconnect.map(|disconnect| Self {
            state: ConnectionState::Disconnected,
            disconnect,
            screenshot: layout.screenshot,
        })
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn on_connected(&mut self, menu: &mut MenuBar) {
        self.apply(ConnectionState::Connected, menu);
    }

    pub fn on_disconnected(&mut self, menu: &mut MenuBar) {
        self.apply(ConnectionState::Disconnected, menu);
    }

    /// Returns true when `event` was a connection notification.
    pub fn handle(&mut self, event: &MenuEvent, menu: &mut MenuBar) -> bool {
        match event {
            MenuEvent::Connected => self.on_connected(menu),
            MenuEvent::Disconnected => self.on_disconnected(menu),
            _ => return false,
        }
        true
    }

    fn apply(&mut self, state: ConnectionState, menu: &mut MenuBar) {
        let enabled = state == ConnectionState::Connected;
        menu.set_enabled(self.disconnect, enabled);
        menu.set_enabled(self.screenshot, enabled);
        if self.state != state {
            debug!(target: "menubar::lifecycle", "{:?} -> {state:?}", self.state);
        }
        self.state = state;
    }
}
