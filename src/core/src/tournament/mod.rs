pub mod simulator;
pub mod tournament;

pub use simulator::*;
pub use tournament::*;
