//! Draws a [`MenuBar`] with egui. Clicks are queued on the event bus, never handled inline.

use crate::events::{MenuEvent, MenuEventBus};
use crate::menu::{MenuBar, MenuNode, MenuNodeKind};

pub fn show_menu_bar(ui: &mut egui::Ui, menu: &MenuBar, bus: &mut MenuEventBus) {
    ui.horizontal(|ui| {
        for section in menu.menus() {
            ui.menu_button(strip_mnemonic(&section.label), |ui| show_items(ui, &section.children, bus));
        }
    });
}

fn show_items(ui: &mut egui::Ui, items: &[MenuNode], bus: &mut MenuEventBus) {
    for item in items {
        match item.kind {
            MenuNodeKind::Separator => {
                ui.separator();
            }
            MenuNodeKind::Menu => {
                ui.menu_button(strip_mnemonic(&item.label), |ui| show_items(ui, &item.children, bus));
            }
            MenuNodeKind::Action => {
                let Some(id) = item.id else { continue };
                let label = strip_mnemonic(&item.label);
                if item.checkable {
                    let mut checked = item.checked;
                    if ui.add_enabled(item.enabled, egui::Checkbox::new(&mut checked, label)).changed() {
                        bus.push(MenuEvent::Toggled(id, checked));
                        ui.close();
                    }
                } else if ui.add_enabled(item.enabled, egui::Button::new(label)).clicked() {
                    bus.push(MenuEvent::Triggered(id));
                    ui.close();
                }
            }
        }
    }
}

/// `&File` -> `File`; `&&` stays a literal ampersand.
fn strip_mnemonic(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut chars = label.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '&' {
            if chars.peek() == Some(&'&') {
                out.push('&');
                chars.next();
            }
            continue;
        }
        out.push(ch);
    }
    out
}
