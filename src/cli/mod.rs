//! Terminal presentation: prompts, banners and format listings

pub mod console;
pub mod display;

pub use console::{Console, StdConsole};
