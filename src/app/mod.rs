// Application layer: command handlers behind the CLI.

pub mod format;
pub mod menu_app;

pub use menu_app::MenuApp;
