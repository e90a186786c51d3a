//! Kernel functions for the potential function method

pub mod gaussian;
pub mod kind;
pub mod reciprocal;
pub mod traits;

pub use self::gaussian::*;
pub use self::kind::*;
pub use self::reciprocal::*;
pub use self::traits::*;
