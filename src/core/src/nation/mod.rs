pub mod nation;

pub use nation::*;
