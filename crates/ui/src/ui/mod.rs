mod controls;
mod progress;
pub mod theme;
mod title_bar;

pub use controls::*;
pub use progress::*;
pub use title_bar::*;
