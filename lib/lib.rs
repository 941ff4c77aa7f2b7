#![allow(clippy::collapsible_if)]
#![cfg_attr(test, recursion_limit = "1024")]

/// Chess domain types.
pub mod chess;
/// Static evaluation and exchange analysis.
pub mod eval;
/// Minimax searching algorithm.
pub mod search;
/// Assorted utilities.
pub mod util;
