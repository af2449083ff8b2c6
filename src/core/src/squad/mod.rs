pub mod generator;
pub mod names;
pub mod player;

pub use generator::*;
pub use names::*;
pub use player::*;
