use crate::menu::ActionId;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// The client session became connected.
    Connected,
    Disconnected,
    Triggered(ActionId),
    Toggled(ActionId, bool),
}

impl fmt::Display for MenuEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuEvent::Connected => write!(f, "Connected"),
            MenuEvent::Disconnected => write!(f, "Disconnected"),
            MenuEvent::Triggered(id) => write!(f, "Triggered action={id}"),
            MenuEvent::Toggled(id, checked) => write!(f, "Toggled action={id} checked={checked}"),
        }
    }
}

/// Queue between the UI/host callbacks and the menu bar controller.
#[derive(Debug, Default)]
pub struct MenuEventBus {
    events: Vec<MenuEvent>,
}

impl MenuEventBus {
    pub fn push(&mut self, event: MenuEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<MenuEvent> {
        self.events.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
