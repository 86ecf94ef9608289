//! Saving and restoring a game as one line of text
//!
//! The format is four space-separated fields, in the spirit of FEN:
//!
//! ```text
//! rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b d4 d3,d4
//! ^ piece placement                           ^ side to move
//!                                               ^ squares whose has-moved flag is set, or -
//!                                                  ^ last double move as single,double, or -
//! ```

use core::str::FromStr;

use board::{Board, Owner, PieceKind, Position};

use crate::{DoubleMove, Error, GameState, Result};

impl GameState {
    /// Describe the game as a single line of text.
    ///
    /// A held piece is written on the square it was lifted from, so restoring a snapshot
    /// always gives a game with no piece held.
    ///
    /// ```
    /// let game = game::GameState::reset();
    /// assert_eq!(game.snapshot(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - -");
    /// ```
    pub fn snapshot(&self) -> String {
        let mut board = self.board.clone();
        if let (Some(origin), Some(piece)) = (self.origin(), self.held_piece()) {
            board.place(origin, piece);
        }
        let turn = match self.turn {
            Owner::Black => "b",
            _ => "w",
        };
        let moved: Vec<String> = board.moved_squares().map(|pos| pos.to_string()).collect();
        let moved = if moved.is_empty() {
            "-".to_owned()
        } else {
            moved.join(",")
        };
        let double = match self.last_double_move {
            Some(DoubleMove { single, double }) => format!("{single},{double}"),
            None => "-".to_owned(),
        };
        format!("{} {turn} {moved} {double}", board.placement())
    }

    /// Restore a game written by [`GameState::snapshot`]
    pub fn from_snapshot(snapshot: &str) -> Result<Self> {
        let fields: Vec<&str> = snapshot.split_whitespace().collect();
        let &[placement, turn, moved, double] = &fields[..] else {
            return Err(Error::FieldCount(fields.len()));
        };
        let mut board = Board::from_placement(placement)?;
        let turn = match turn {
            "w" => Owner::White,
            "b" => Owner::Black,
            other => return Err(Error::SideToMove(other.to_owned())),
        };
        if moved != "-" {
            for square in moved.split(',') {
                board.set_moved(square.parse()?, true);
            }
        }
        let last_double_move = if double == "-" {
            None
        } else {
            let (single, double_sq) = double
                .split_once(',')
                .ok_or_else(|| Error::DoubleMove(double.to_owned()))?;
            let passed = DoubleMove {
                single: single.parse::<Position>()?,
                double: double_sq.parse::<Position>()?,
            };
            if !is_plausible_double_move(&board, turn.next(), passed) {
                return Err(Error::DoubleMove(double.to_owned()));
            }
            Some(passed)
        };
        Ok(Self::new(board, turn, last_double_move))
    }
}

/// Whether `mover` could have just advanced a pawn two squares as `passed` describes
fn is_plausible_double_move(board: &Board, mover: Owner, passed: DoubleMove) -> bool {
    let pawn = board.get(passed.double);
    pawn.kind == PieceKind::Pawn
        && pawn.owner == mover
        && board.is_empty(passed.single)
        && passed.single.offset(0, mover.direction()) == Some(passed.double)
}

impl FromStr for GameState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_snapshot(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_after_double_move() {
        let mut game = GameState::reset();
        game.release("d2".parse().unwrap());
        game.release("d4".parse().unwrap());
        let text = game.snapshot();
        assert_eq!(
            text,
            "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b d4 d3,d4"
        );
        assert_eq!(text.parse::<GameState>().unwrap(), game);
    }

    #[test]
    fn held_piece_is_saved_on_its_origin() {
        let mut game = GameState::reset();
        game.release("g1".parse().unwrap());
        let restored = GameState::from_snapshot(&game.snapshot()).unwrap();
        assert_eq!(restored, GameState::reset());
    }

    #[test]
    fn restored_double_move_allows_en_passant() {
        let mut game: GameState = "4k3/8/8/8/3Pp3/8/8/4K3 b d4 d3,d4".parse().unwrap();
        game.release("e4".parse().unwrap());
        assert_eq!(
            game.targets().unwrap().get("d3".parse().unwrap()),
            crate::SelectionKind::EnPassant
        );
        game.release("d3".parse().unwrap());
        assert!(game.board().is_empty("d4".parse().unwrap()));
        assert_eq!(game.turn(), Owner::White);
    }

    #[test]
    fn restored_game_keeps_castling_memory() {
        let game: GameState = "r3k2r/8/8/8/8/8/8/R3K2R w h1 -".parse().unwrap();
        assert!(game.board().has_moved("h1".parse().unwrap()));
        assert!(!game.board().has_moved("a1".parse().unwrap()));
        assert_eq!(game.turn(), Owner::White);
    }

    #[test]
    fn rejects_malformed_snapshots() {
        assert!(matches!(
            GameState::from_snapshot("8/8/8/8/8/8/8/8 w -"),
            Err(Error::FieldCount(3))
        ));
        assert!(matches!(
            GameState::from_snapshot("8/8/8/8/8/8/8 w - -"),
            Err(Error::Placement(_))
        ));
        assert!(matches!(
            GameState::from_snapshot("8/8/8/8/8/8/8/8 x - -"),
            Err(Error::SideToMove(side)) if side == "x"
        ));
        assert!(matches!(
            GameState::from_snapshot("8/8/8/8/8/8/8/8 w z9 -"),
            Err(Error::Square(_))
        ));
        assert!(matches!(
            GameState::from_snapshot("8/8/8/8/8/8/8/8 w - d3"),
            Err(Error::DoubleMove(_))
        ));
        // Nothing stands on d4
        assert!(matches!(
            GameState::from_snapshot("4k3/8/8/8/4p3/8/8/4K3 b - d3,d4"),
            Err(Error::DoubleMove(field)) if field == "d3,d4"
        ));
        // Black's own pawn can't be the one that just moved
        assert!(matches!(
            GameState::from_snapshot("4k3/8/8/8/3pp3/8/8/4K3 b - d3,d4"),
            Err(Error::DoubleMove(_))
        ));
        // Squares on different columns, or not next to each other
        assert!(matches!(
            GameState::from_snapshot("4k3/8/8/8/3Pp3/8/8/4K3 b - e3,d4"),
            Err(Error::DoubleMove(_))
        ));
        assert!(matches!(
            GameState::from_snapshot("4k3/8/8/8/3Pp3/8/8/4K3 b - d2,d4"),
            Err(Error::DoubleMove(_))
        ));
        // The square passed over must be empty
        assert!(matches!(
            GameState::from_snapshot("4k3/8/8/8/3Pp3/3N4/8/4K3 b - d3,d4"),
            Err(Error::DoubleMove(_))
        ));
    }
}
