pub mod actions;
pub mod assembler;
pub mod cache;
pub mod capabilities;
pub mod cli;
pub mod config;
pub mod controller;
#[cfg(feature = "editor")]
pub mod egui_menu;
pub mod events;
pub mod guard;
pub mod host;
pub mod lifecycle;
pub mod menu;

pub use assembler::{ConnectionRole, MenuAssembler};
pub use controller::MenuBarController;
pub use menu::MenuBar;
