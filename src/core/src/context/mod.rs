pub mod clock;
pub mod context;

pub use clock::*;
pub use context::*;
