mod snake;

pub use snake::{render_field, render_game};
