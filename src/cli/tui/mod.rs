/// Full-screen quick input for interactive commands
pub mod quick_input;
pub mod theme;

pub use quick_input::{InputState, PickerState, Step, TuiQuickInput};
