pub mod spin;

pub use spin::*;
