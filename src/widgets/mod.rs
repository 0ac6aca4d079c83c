mod bouncing_button;
mod level_bar;

pub use bouncing_button::{BouncingButton, BOUNCE_SPEED};
pub use level_bar::LevelBar;
