mod bitboard;
mod board;
mod castles;
mod color;
mod file;
mod magic;
mod r#move;
mod movegen;
mod outcome;
mod piece;
mod position;
mod rank;
mod role;
mod square;
mod zobrist;

pub use bitboard::*;
pub use board::*;
pub use castles::*;
pub use color::*;
pub use file::*;
pub use magic::*;
pub use r#move::*;
pub use movegen::*;
pub use outcome::*;
pub use piece::*;
pub use position::*;
pub use rank::*;
pub use role::*;
pub use square::*;
pub use zobrist::*;
