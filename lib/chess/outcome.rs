use crate::chess::Color;
use derive_more::with_trait::Display;

/// One of the possible outcomes of a chess game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Outcome {
    #[display("{_0:?} wins by checkmate")]
    Checkmate(Color),
    #[display("draw by stalemate")]
    Stalemate,
    #[display("draw by threefold repetition")]
    DrawByThreefoldRepetition,
    #[display("draw by the 50-move rule")]
    DrawBy50MoveRule,
    #[display("draw by insufficient material")]
    DrawByInsufficientMaterial,
}

impl Outcome {
    /// Whether the outcome is a draw.
    #[inline(always)]
    pub fn is_draw(&self) -> bool {
        !self.is_decisive()
    }

    /// Whether the outcome is decisive.
    #[inline(always)]
    pub fn is_decisive(&self) -> bool {
        matches!(self, Outcome::Checkmate(_))
    }

    /// The winning side, if any.
    #[inline(always)]
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Checkmate(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_checkmate_is_decisive() {
        assert!(Outcome::Checkmate(Color::White).is_decisive());
        assert!(Outcome::Stalemate.is_draw());
        assert!(Outcome::DrawBy50MoveRule.is_draw());
        let mate = Outcome::Checkmate(Color::Black);
        assert_eq!(mate.winner(), Some(Color::Black));
        assert_eq!(Outcome::DrawByThreefoldRepetition.winner(), None);
    }

    #[test]
    fn checkmate_names_the_winner() {
        assert_eq!(
            Outcome::Checkmate(Color::White).to_string(),
            "White wins by checkmate"
        );
    }
}
