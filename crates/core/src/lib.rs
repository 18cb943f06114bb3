pub mod color;
pub mod config;
pub mod error;
pub mod grid;

pub use color::{normalize_color, RedSet};
pub use config::Config;
pub use error::*;
pub use grid::*;
