// Application state and input handling

pub mod input;
pub mod platform;
pub mod state;

pub use input::{handle_input, handle_mouse};
pub use platform::{TerminalFocus, TerminalLocation};
pub use state::App;
