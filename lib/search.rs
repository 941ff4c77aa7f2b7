mod control;
mod depth;
mod engine;
mod history;
mod info;
mod killers;
mod limits;
mod line;
mod moves;
mod options;
mod orderer;
mod ply;
mod score;
mod statistics;
mod tables;
mod transposition;

pub use control::*;
pub use depth::*;
pub use engine::*;
pub use history::*;
pub use info::*;
pub use killers::*;
pub use limits::*;
pub use line::*;
pub use moves::*;
pub use options::*;
pub use orderer::*;
pub use ply::*;
pub use score::*;
pub use statistics::*;
pub use tables::*;
pub use transposition::*;
