pub mod aligner;
pub mod assembler;
pub mod classifier;
pub mod normalize;
pub mod temporal;

pub use aligner::*;
pub use assembler::*;
pub use classifier::*;
pub use normalize::*;
pub use temporal::*;
