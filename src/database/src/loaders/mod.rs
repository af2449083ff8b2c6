pub mod names;
pub mod nation;

pub use names::*;
pub use nation::*;
