pub mod stage;
pub mod table;

pub use stage::*;
pub use table::*;
