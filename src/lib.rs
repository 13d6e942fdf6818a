pub mod app;
pub mod logic;
pub mod render;
pub mod scene;
mod utils;
