pub mod check;
pub mod sum;

pub use check::*;
pub use sum::*;
