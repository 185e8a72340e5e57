pub mod edit;
pub mod features;
pub mod unit;
pub mod verdict;

pub use edit::*;
pub use features::*;
pub use unit::*;
pub use verdict::*;
