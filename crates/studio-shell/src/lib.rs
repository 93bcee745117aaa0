//! Design studio shell.
//!
//! Editor state ([`Shell`]) in front of the engine binding, plus the winit
//! window that feeds it pointer and keyboard input.

pub mod app;
pub mod canvas;
pub mod config;
pub mod input;
pub mod shapes;
pub mod shell;

pub use config::ShellConfig;
pub use shell::Shell;
