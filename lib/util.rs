mod assume;
mod bounded;
mod int;

pub use assume::*;
pub use bounded::*;
pub use int::*;
