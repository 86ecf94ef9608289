//! Side effects of a committed move
//!
//! By the time a resolver runs, the moved piece already stands on its target square. Each
//! resolver returns the state the machine moves to next.

use board::{PieceKind, Position};
use tracing::debug;
use utils::{fatal, ExpectInvariant};

use crate::{DoubleMove, GameState, SelectionKind, StateMachine};

impl GameState {
    pub(crate) fn resolve(&mut self, kind: SelectionKind, target: Position) -> StateMachine {
        match kind {
            SelectionKind::None => fatal!("resolving a move to {target}, which is not a target"),
            SelectionKind::Default => self.resolve_default(target),
            SelectionKind::DoubleMove(double) => self.resolve_double_move(target, double),
            SelectionKind::EnPassant => self.resolve_en_passant(target),
            SelectionKind::Castling {
                rook_col,
                direction,
            } => self.resolve_castling(target, rook_col, direction),
            SelectionKind::Promotion => self.resolve_promotion(target),
        }
    }

    fn resolve_default(&mut self, target: Position) -> StateMachine {
        self.last_double_move = None;
        self.board.set_moved(target, true);
        StateMachine::Premove
    }

    fn resolve_double_move(&mut self, target: Position, double: DoubleMove) -> StateMachine {
        let next = self.resolve_default(target);
        self.last_double_move = Some(double);
        debug!(single = %double.single, double = %double.double, "en passant now possible");
        next
    }

    fn resolve_en_passant(&mut self, target: Position) -> StateMachine {
        let passed = self
            .last_double_move
            .expect_invariant("en passant capture without a preceding double move");
        let next = self.resolve_default(target);
        let captured = self.board.take(passed.double);
        utils::impossible!(
            captured.kind != PieceKind::Pawn || captured.owner != self.turn.next(),
            "en passant captured {captured:?} on {}",
            passed.double
        );
        debug!(captured = %passed.double, "en passant");
        next
    }

    fn resolve_castling(&mut self, target: Position, rook_col: u8, direction: i8) -> StateMachine {
        let next = self.resolve_default(target);
        let rook_to = target
            .offset(-direction, 0)
            .expect_invariant("castling king landed on the edge of the board");
        self.board.set_moved(rook_to, true);
        let rook_from = Position::new(rook_col, target.y());
        let rook = self.board.take(rook_from);
        self.board.place(rook_to, rook);
        debug!(from = %rook_from, to = %rook_to, "castled rook");
        next
    }

    fn resolve_promotion(&mut self, target: Position) -> StateMachine {
        self.state = StateMachine::Promotion { pawn_pos: target };
        fatal!("pawn promotion on {target} is not supported")
    }
}
