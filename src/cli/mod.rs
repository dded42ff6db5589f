pub mod display;
pub mod interface;

pub use display::{display_error, display_result};
pub use interface::Console;
