pub mod game;
mod menu;

pub use menu::SnakeApp;
