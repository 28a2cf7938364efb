use crate::actions::{ActionDispatcher, ActionOutcome, ToggleCommand};
use crate::assembler::{ConnectionRole, MenuAssembler};
use crate::capabilities::CapabilityRegistry;
use crate::config::MenuBarConfig;
use crate::events::{MenuEvent, MenuEventBus};
use crate::host::HostServices;
use crate::lifecycle::{ConnectionState, LifecycleRouter};
use crate::menu::{ActionBinding, ActionId, MenuBar};
use tracing::debug;

/// Owns the built menu bar and routes events to the connection mirror and the action handlers.
pub struct MenuBarController {
    menu: MenuBar,
    router: Option<LifecycleRouter>,
    dispatcher: ActionDispatcher,
}

impl MenuBarController {
    /// Builds the menu bar into `root`. Returns `None` in headless mode (no registry).
    pub fn build(
        config: &MenuBarConfig,
        mut root: MenuBar,
        registry: Option<&dyn CapabilityRegistry>,
        role: ConnectionRole,
        services: HostServices,
    ) -> Option<Self> {
        let assembled = MenuAssembler::new(config).build(&mut root, registry, role)?;
        let router = LifecycleRouter::for_layout(&assembled.layout);
        let dispatcher = ActionDispatcher::new(services, assembled.capabilities, config.scene_file_filter.clone());
        Some(Self { menu: root, router, dispatcher })
    }

    pub fn menu(&self) -> &MenuBar {
        &self.menu
    }

    /// `None` when the connection mirror is not wired (server role).
    pub fn connection_state(&self) -> Option<ConnectionState> {
        self.router.as_ref().map(LifecycleRouter::state)
    }

    /// Returns the outcome when the event ran an action.
    pub fn handle(&mut self, event: MenuEvent) -> Option<ActionOutcome> {
        match event {
            MenuEvent::Connected | MenuEvent::Disconnected => {
                if let Some(router) = self.router.as_mut() {
                    router.handle(&event, &mut self.menu);
                }
                None
            }
            MenuEvent::Triggered(id) => {
                let node = self.menu.action(id)?;
                if !node.enabled {
                    debug!(target: "menubar::actions", "Ignoring {event} on disabled action '{}'", node.label);
                    return None;
                }
                match node.action.clone()? {
                    ActionBinding::Trigger(command) => Some(self.dispatcher.trigger(&command)),
                    ActionBinding::Toggle(command) => {
                        let checked = !node.checked;
                        Some(self.apply_toggle(id, command, checked))
                    }
                }
            }
            MenuEvent::Toggled(id, checked) => {
                let node = self.menu.action(id)?;
                if !node.enabled {
                    debug!(target: "menubar::actions", "Ignoring {event} on disabled action '{}'", node.label);
                    return None;
                }
                let Some(ActionBinding::Toggle(command)) = node.action.clone() else {
                    return None;
                };
                Some(self.apply_toggle(id, command, checked))
            }
        }
    }

    /// The checkbox only follows the capability once it accepted the new value.
    fn apply_toggle(&mut self, id: ActionId, command: ToggleCommand, checked: bool) -> ActionOutcome {
        let outcome = self.dispatcher.toggle(command, checked);
        if outcome == ActionOutcome::Completed {
            self.menu.set_checked(id, checked);
        }
        outcome
    }

    /// Handles every queued event in order.
    pub fn pump(&mut self, bus: &mut MenuEventBus) -> Vec<ActionOutcome> {
        bus.drain().into_iter().filter_map(|event| self.handle(event)).collect()
    }
}
