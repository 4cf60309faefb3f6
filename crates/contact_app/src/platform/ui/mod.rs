mod render;

pub use render::{html_to_text, TerminalPresenter};
