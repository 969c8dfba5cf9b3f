pub mod terminal;
pub mod window;

pub use terminal::TerminalMode;
pub use window::{WindowMode, window_conf};
