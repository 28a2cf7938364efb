mod common;

use common::{registry_with, registry_with_module, FakeModule};
use kestrel_menubar::actions::MenuCommand;
use kestrel_menubar::assembler::{SETTINGS_MENU_NAME, VIEW_MENU_NAME};
use kestrel_menubar::capabilities::{Capability, CapabilityFlags, CapabilityRegistry, ResolvedCapabilities};
use kestrel_menubar::config::MenuBarConfig;
use kestrel_menubar::menu::ActionBinding;
use kestrel_menubar::{ConnectionRole, MenuAssembler, MenuBar};
use std::rc::Rc;

fn all_subsets() -> impl Iterator<Item = CapabilityFlags> {
    (0..=CapabilityFlags::all().bits()).map(CapabilityFlags::from_bits_truncate)
}

fn build(flags: CapabilityFlags, role: ConnectionRole) -> MenuBar {
    let config = MenuBarConfig::default();
    let registry = registry_with(flags);
    let mut root = MenuBar::new();
    MenuAssembler::new(&config).build(&mut root, Some(&registry), role).expect("menu built");
    root
}

#[test]
fn settings_section_exists_iff_a_trigger_capability_is_present() {
    for flags in all_subsets() {
        let menu = build(flags, ConnectionRole::Client);
        let expected = flags.intersects(
            CapabilityFlags::MUMBLE_VOIP | CapabilityFlags::CAVE_STEREO | CapabilityFlags::EC_EDITOR,
        );
        assert_eq!(menu.find_menu(SETTINGS_MENU_NAME).is_some(), expected, "flags {flags:?}");
        assert_eq!(menu.menu_by_label("&Settings").is_some(), expected, "flags {flags:?}");
    }
}

#[test]
fn view_entries_follow_capabilities_in_declared_order() {
    for flags in all_subsets() {
        let menu = build(flags, ConnectionRole::Client);
        let view = menu.find_menu(VIEW_MENU_NAME).expect("view menu always present");

        let mut expected = Vec::new();
        if flags.contains(CapabilityFlags::SCENE_STRUCTURE) {
            expected.extend(["Assets", "Scene", "Key Bindings"]);
        }
        if flags.contains(CapabilityFlags::EC_EDITOR) {
            expected.push("EC Editor");
        }
        if flags.contains(CapabilityFlags::DEBUG_STATS) {
            expected.push("Profiler");
        }
        assert_eq!(view.child_labels(), expected, "flags {flags:?}");
    }
}

#[test]
fn assembling_twice_matches_assembling_once() {
    let config = MenuBarConfig::default();
    let registry = registry_with(CapabilityFlags::all());
    let assembler = MenuAssembler::new(&config);

    let mut once = MenuBar::new();
    assembler.build(&mut once, Some(&registry), ConnectionRole::Client).expect("first build");

    let mut twice = MenuBar::new();
    assembler.build(&mut twice, Some(&registry), ConnectionRole::Client).expect("first build");
    assembler.build(&mut twice, Some(&registry), ConnectionRole::Client).expect("second build");

    assert_eq!(once, twice);
    assert_eq!(twice.menu_labels(), vec!["&File", "&View", "&Settings", "&Help"]);
}

#[test]
fn rebuild_replaces_a_larger_previous_menu() {
    let config = MenuBarConfig::default();
    let assembler = MenuAssembler::new(&config);
    let mut root = MenuBar::new();
    let full = registry_with(CapabilityFlags::all());
    assembler.build(&mut root, Some(&full), ConnectionRole::Client).expect("full build");

    let empty = registry_with(CapabilityFlags::empty());
    assembler.build(&mut root, Some(&empty), ConnectionRole::Server).expect("empty build");
    assert_eq!(root, build(CapabilityFlags::empty(), ConnectionRole::Server));
}

#[test]
fn headless_mode_builds_nothing() {
    let config = MenuBarConfig::default();
    let mut root = MenuBar::new();
    let registry: Option<&dyn CapabilityRegistry> = None;
    assert!(MenuAssembler::new(&config).build(&mut root, registry, ConnectionRole::Client).is_none());
    assert!(root.is_empty());
}

#[test]
fn file_section_layout_depends_on_role() {
    let client = build(CapabilityFlags::empty(), ConnectionRole::Client);
    let file = client.menu_by_label("&File").expect("file menu");
    assert_eq!(
        file.child_labels(),
        vec![
            "New scene",
            "Open scene",
            "---",
            "Take Screenshot",
            "---",
            "Clear Asset Cache",
            "---",
            "Disconnect",
            "Quit"
        ]
    );
    assert!(!client.action_by_label("Take Screenshot").unwrap().enabled);
    assert!(!client.action_by_label("Disconnect").unwrap().enabled);
    assert!(client.action_by_label("Quit").unwrap().icon.is_some());

    let server = build(CapabilityFlags::empty(), ConnectionRole::Server);
    let file = server.menu_by_label("&File").expect("file menu");
    assert!(!file.child_labels().contains(&"Disconnect"));
    assert_eq!(file.child_labels().last(), Some(&"Quit"));
}

#[test]
fn editor_toggles_read_live_settings() {
    let config = MenuBarConfig::default();
    let editor = Rc::new(FakeModule::default());
    editor.gizmo.set(true);
    editor.highlighting.set(false);
    let registry = registry_with_module(Capability::EcEditor, editor.clone());

    let mut root = MenuBar::new();
    MenuAssembler::new(&config).build(&mut root, Some(&registry), ConnectionRole::Client).expect("built");
    let gizmo = root.action_by_label("Show editing gizmo").expect("gizmo toggle");
    let highlight = root.action_by_label("Highlight selected entities").expect("highlight toggle");
    assert!(gizmo.checkable && gizmo.checked);
    assert!(highlight.checkable && !highlight.checked);

    editor.highlighting.set(true);
    MenuAssembler::new(&config).build(&mut root, Some(&registry), ConnectionRole::Client).expect("rebuilt");
    assert!(root.action_by_label("Highlight selected entities").unwrap().checked);

    let settings = root.find_menu(SETTINGS_MENU_NAME).expect("settings menu");
    assert_eq!(
        settings.child_labels(),
        vec!["Open config folder", "Show editing gizmo", "Highlight selected entities"]
    );
}

#[test]
fn voice_settings_only_with_voip() {
    let menu = build(CapabilityFlags::MUMBLE_VOIP, ConnectionRole::Client);
    let settings = menu.find_menu(SETTINGS_MENU_NAME).expect("settings menu");
    assert_eq!(settings.child_labels(), vec!["Open config folder", "Voice settings"]);

    let menu = build(CapabilityFlags::CAVE_STEREO, ConnectionRole::Client);
    let settings = menu.find_menu(SETTINGS_MENU_NAME).expect("settings menu");
    assert_eq!(settings.child_labels(), vec!["Open config folder"]);
}

#[test]
fn help_section_has_three_links() {
    let menu = build(CapabilityFlags::empty(), ConnectionRole::Server);
    let help = menu.menu_by_label("&Help").expect("help menu");
    assert_eq!(help.child_labels(), vec!["Wiki", "Doxygen", "Mailing list"]);
    let wiki = &help.children[0];
    assert_eq!(
        wiki.action,
        Some(ActionBinding::Trigger(MenuCommand::OpenUrl("http://wiki.realxtend.org/".to_string())))
    );
    assert!(help.children.iter().all(|link| link.icon.is_some()));
}

#[test]
fn resolution_happens_once_per_build() {
    let registry = registry_with(CapabilityFlags::DEBUG_STATS);
    let resolved = ResolvedCapabilities::resolve(&registry);
    let config = MenuBarConfig::default();
    let mut root = MenuBar::new();
    MenuAssembler::new(&config).assemble(&mut root, &resolved, ConnectionRole::Client);
    assert_eq!(root.find_menu(VIEW_MENU_NAME).unwrap().child_labels(), vec!["Profiler"]);
}
