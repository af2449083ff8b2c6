pub mod mapper;
pub mod phase;

pub use mapper::*;
pub use phase::*;
