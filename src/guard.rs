use crate::host::{Dialogs, SceneHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardPrompt {
    NewScene,
    OpenScene,
}

impl GuardPrompt {
    pub fn title(self) -> &'static str {
        match self {
            GuardPrompt::NewScene => "New scene",
            GuardPrompt::OpenScene => "Open scene",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            GuardPrompt::NewScene => {
                "Making a new scene will discard any changes you made to the current scene. Do you want to continue?"
            }
            GuardPrompt::OpenScene => {
                "Opening a new scene will discard any changes you made to the current scene. Do you want to continue?"
            }
        }
    }
}

/// Returns true when it is fine to replace the active scene.
///
/// Without an active scene this never prompts.
pub fn confirm_if_scene_exists(scenes: &dyn SceneHost, dialogs: &dyn Dialogs, prompt: GuardPrompt) -> bool {
    if !scenes.has_active_scene() {
        return true;
    }
    dialogs.confirm(prompt.title(), prompt.text())
}
