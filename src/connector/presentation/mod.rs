mod terminal_presenter;

pub use terminal_presenter::*;
