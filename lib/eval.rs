mod evaluator;
mod material;
mod see;
mod value;

pub use evaluator::*;
pub use material::*;
pub use see::*;
pub use value::*;
