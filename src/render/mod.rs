pub mod renderer;
pub mod window;

pub use renderer::Renderer;
pub use window::{HUD_HEIGHT, WindowRenderer};
