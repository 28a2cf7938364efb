use crate::actions::{MenuCommand, ToggleCommand};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ActionId(u32);

impl ActionId {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuNodeKind {
    Menu,
    Action,
    Separator,
}

/// Handler bound to an action when the menu is built. Never rebound afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionBinding {
    Trigger(MenuCommand),
    Toggle(ToggleCommand),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuNode {
    pub kind: MenuNodeKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ActionId>,
    pub enabled: bool,
    pub checkable: bool,
    pub checked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionBinding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    fn menu(label: impl Into<String>) -> Self {
        Self {
            kind: MenuNodeKind::Menu,
            label: label.into(),
            object_name: None,
            icon: None,
            id: None,
            enabled: true,
            checkable: false,
            checked: false,
            action: None,
            children: Vec::new(),
        }
    }

    fn action(id: ActionId, label: impl Into<String>, binding: ActionBinding) -> Self {
        Self { kind: MenuNodeKind::Action, id: Some(id), action: Some(binding), ..Self::menu(label) }
    }

    fn separator() -> Self {
        Self { kind: MenuNodeKind::Separator, ..Self::menu(String::new()) }
    }

    pub fn is_separator(&self) -> bool {
        self.kind == MenuNodeKind::Separator
    }

    pub fn with_icon(&mut self, icon: impl Into<PathBuf>) -> &mut Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn disabled(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    pub fn checkable(&mut self, checked: bool) -> &mut Self {
        self.checkable = true;
        self.checked = checked;
        self
    }

    /// Labels of the direct children, separators rendered as `---`.
    pub fn child_labels(&self) -> Vec<&str> {
        self.children.iter().map(|child| if child.is_separator() { "---" } else { child.label.as_str() }).collect()
    }

    fn find(&self, id: ActionId) -> Option<&MenuNode> {
        if self.id == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn find_mut(&mut self, id: ActionId) -> Option<&mut MenuNode> {
        if self.id == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    fn find_named(&self, object_name: &str) -> Option<&MenuNode> {
        if self.object_name.as_deref() == Some(object_name) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_named(object_name))
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self.kind {
            MenuNodeKind::Separator => writeln!(f, "{indent}----")?,
            MenuNodeKind::Menu => match &self.object_name {
                Some(name) => writeln!(f, "{indent}{} [{name}]", self.label)?,
                None => writeln!(f, "{indent}{}", self.label)?,
            },
            MenuNodeKind::Action => {
                let check = match (self.checkable, self.checked) {
                    (true, true) => "[x] ",
                    (true, false) => "[ ] ",
                    _ => "",
                };
                let state = if self.enabled { "" } else { " (disabled)" };
                writeln!(f, "{indent}{check}{}{state}", self.label)?;
            }
        }
        for child in &self.children {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Root of the menu bar. Owns every node and hands out action ids in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MenuBar {
    menus: Vec<MenuNode>,
    #[serde(skip)]
    next_action: u32,
}

impl MenuBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every section and restarts id allocation.
    pub fn clear(&mut self) {
        self.menus.clear();
        self.next_action = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    pub fn menus(&self) -> &[MenuNode] {
        &self.menus
    }

    pub fn menu_labels(&self) -> Vec<&str> {
        self.menus.iter().map(|menu| menu.label.as_str()).collect()
    }

    pub fn add_menu(&mut self, label: impl Into<String>) -> SectionBuilder<'_> {
        self.menus.push(MenuNode::menu(label));
        let last = self.menus.len() - 1;
        SectionBuilder { node: &mut self.menus[last], next_action: &mut self.next_action }
    }

    pub fn find_menu(&self, object_name: &str) -> Option<&MenuNode> {
        self.menus.iter().find_map(|menu| menu.find_named(object_name))
    }

    pub fn menu_by_label(&self, label: &str) -> Option<&MenuNode> {
        self.menus.iter().find(|menu| menu.label == label)
    }

    pub fn action(&self, id: ActionId) -> Option<&MenuNode> {
        self.menus.iter().find_map(|menu| menu.find(id))
    }

    pub fn action_mut(&mut self, id: ActionId) -> Option<&mut MenuNode> {
        self.menus.iter_mut().find_map(|menu| menu.find_mut(id))
    }

    /// Depth-first search for the first action with `label`.
    pub fn action_by_label(&self, label: &str) -> Option<&MenuNode> {
        fn walk<'a>(node: &'a MenuNode, label: &str) -> Option<&'a MenuNode> {
            if node.kind == MenuNodeKind::Action && node.label == label {
                return Some(node);
            }
            node.children.iter().find_map(|child| walk(child, label))
        }
        self.menus.iter().find_map(|menu| walk(menu, label))
    }

    pub fn binding(&self, id: ActionId) -> Option<&ActionBinding> {
        self.action(id).and_then(|node| node.action.as_ref())
    }

    /// Returns false when no action carries `id`.
    pub fn set_enabled(&mut self, id: ActionId, enabled: bool) -> bool {
        match self.action_mut(id) {
            Some(node) => {
                node.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn set_checked(&mut self, id: ActionId, checked: bool) -> bool {
        match self.action_mut(id) {
            Some(node) if node.checkable => {
                node.checked = checked;
                true
            }
            _ => false,
        }
    }
}

impl fmt::Display for MenuBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for menu in &self.menus {
            menu.write_tree(f, 0)?;
        }
        Ok(())
    }
}

/// Appends children to one section of a [`MenuBar`].
pub struct SectionBuilder<'a> {
    node: &'a mut MenuNode,
    next_action: &'a mut u32,
}

impl SectionBuilder<'_> {
    /// Sets the stable name other tooling uses to locate this section.
    pub fn set_object_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.node.object_name = Some(name.into());
        self
    }

    /// Id the next added action will receive.
    pub fn next_action_id(&self) -> ActionId {
        ActionId(*self.next_action)
    }

    pub fn add_action(&mut self, label: impl Into<String>, binding: ActionBinding) -> &mut MenuNode {
        let id = self.next_action_id();
        *self.next_action += 1;
        self.node.children.push(MenuNode::action(id, label, binding));
        let last = self.node.children.len() - 1;
        &mut self.node.children[last]
    }

    pub fn add_trigger(&mut self, label: impl Into<String>, command: MenuCommand) -> &mut MenuNode {
        self.add_action(label, ActionBinding::Trigger(command))
    }

    pub fn add_toggle(&mut self, label: impl Into<String>, command: ToggleCommand, checked: bool) -> &mut MenuNode {
        self.add_action(label, ActionBinding::Toggle(command)).checkable(checked)
    }

    pub fn add_separator(&mut self) {
        self.node.children.push(MenuNode::separator());
    }

    pub fn len(&self) -> usize {
        self.node.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node.children.is_empty()
    }
}
