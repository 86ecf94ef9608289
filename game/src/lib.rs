//! The selection state machine of an interactive chess board
//!
//! A host feeds [`InputEvent`]s (a board square and whether the pointer button was released
//! there) into [`GameState::handle`]. Releasing on one of the side to move's pieces lifts it and
//! computes where it may go; the next release either puts it back, is ignored, or commits a move
//! and hands the turn to the other side.
//!
//! Check is not detected, and a move is not refused for exposing the mover's own king. Pawn
//! promotion is not supported: moving a pawn onto its far row aborts.

use board::{Board, Owner, ParseSquareError, Piece, PlacementError, Position};
use tracing::{debug, instrument, trace};
use utils::fatal;

mod resolve;
mod snapshot;

pub use movegen::{DoubleMove, SelectionKind, SelectionMap};

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors from reading a saved game
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("snapshot must have 4 space-separated fields, found {0}")]
    FieldCount(usize),
    #[error("invalid piece placement: {0}")]
    Placement(#[from] PlacementError),
    #[error("invalid square: {0}")]
    Square(#[from] ParseSquareError),
    #[error("side to move must be 'w' or 'b', found {0:?}")]
    SideToMove(String),
    #[error("double move must be two squares joined by ',', found {0:?}")]
    DoubleMove(String),
}

/// One pointer event, already mapped onto the board by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    /// The square under the pointer
    pub square: Position,
    /// Whether the button was released on this frame
    pub released: bool,
}
impl InputEvent {
    /// The button was released over `square`
    pub const fn release(square: Position) -> Self {
        Self {
            square,
            released: true,
        }
    }

    /// The pointer is over `square` without a release
    pub const fn hover(square: Position) -> Self {
        Self {
            square,
            released: false,
        }
    }
}

/// Where the interaction currently stands
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StateMachine {
    /// No piece is held
    #[default]
    Premove,
    /// `piece` has been lifted off `origin`, which is empty until the piece is put down
    Selected {
        origin: Position,
        piece: Piece,
        targets: Box<SelectionMap>,
    },
    /// A pawn reached its far row and needs a replacement piece chosen
    ///
    /// Choosing is not supported, so entering this state aborts.
    Promotion { pawn_pos: Position },
}

/// What an event did to the game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed
    Ignored,
    /// A piece was lifted
    Picked { origin: Position },
    /// The held piece was put back where it came from
    Cancelled { origin: Position },
    /// A move was played and the turn passed to the other side
    Committed {
        origin: Position,
        target: Position,
        kind: SelectionKind,
    },
}

/// How a renderer should mark a square
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Highlight {
    None,
    /// The held piece came from here
    Origin,
    /// The held piece may be put down here
    Target(SelectionKind),
}

/// Everything about a game in progress
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    state: StateMachine,
    board: Board,
    /// Never [`Owner::None`]
    turn: Owner,
    /// The previous move, if it was a two-square pawn advance
    last_double_move: Option<DoubleMove>,
}

impl GameState {
    /// A new game, white to move
    pub fn reset() -> Self {
        Self::new(Board::reset(), Owner::White, None)
    }

    /// A game with no piece held, continuing from the given position
    #[track_caller]
    pub fn new(board: Board, turn: Owner, last_double_move: Option<DoubleMove>) -> Self {
        utils::impossible!(turn == Owner::None, "nobody's turn to move");
        Self {
            state: StateMachine::Premove,
            board,
            turn,
            last_double_move,
        }
    }

    /// The board as it stands; a held piece is not on it
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &StateMachine {
        &self.state
    }

    /// The side to move
    pub fn turn(&self) -> Owner {
        self.turn
    }

    pub fn last_double_move(&self) -> Option<DoubleMove> {
        self.last_double_move
    }

    /// Whether the previous move was a two-square pawn advance
    pub fn last_move_was_double(&self) -> bool {
        self.last_double_move.is_some()
    }

    /// The held piece, if any
    pub fn held_piece(&self) -> Option<Piece> {
        match &self.state {
            StateMachine::Selected { piece, .. } => Some(*piece),
            _ => None,
        }
    }

    /// Where the held piece was lifted from
    pub fn origin(&self) -> Option<Position> {
        match &self.state {
            StateMachine::Selected { origin, .. } => Some(*origin),
            _ => None,
        }
    }

    /// Where the held piece may go
    pub fn targets(&self) -> Option<&SelectionMap> {
        match &self.state {
            StateMachine::Selected { targets, .. } => Some(targets.as_ref()),
            _ => None,
        }
    }

    /// How a renderer should mark `pos`
    pub fn highlight(&self, pos: Position) -> Highlight {
        match &self.state {
            StateMachine::Selected { origin, .. } if *origin == pos => Highlight::Origin,
            StateMachine::Selected { targets, .. } if targets.is_target(pos) => {
                Highlight::Target(targets.get(pos))
            }
            _ => Highlight::None,
        }
    }

    /// Process one input event.
    ///
    /// Only releases change anything. Releases that don't mean anything in the current state
    /// (an empty square, the opponent's piece, a square the held piece can't reach) are
    /// [`Transition::Ignored`] and leave the game untouched.
    #[instrument(level = "trace", skip(self), fields(turn = ?self.turn))]
    pub fn handle(&mut self, event: InputEvent) -> Transition {
        if !event.released {
            return Transition::Ignored;
        }
        match core::mem::take(&mut self.state) {
            StateMachine::Premove => self.pick_up(event.square),
            StateMachine::Selected {
                origin,
                piece,
                targets,
            } => self.put_down(origin, piece, targets, event.square),
            StateMachine::Promotion { pawn_pos } => {
                fatal!("input received while promoting the pawn on {pawn_pos}")
            }
        }
    }

    /// Shorthand for handling a release over `square`
    pub fn release(&mut self, square: Position) -> Transition {
        self.handle(InputEvent::release(square))
    }

    fn pick_up(&mut self, origin: Position) -> Transition {
        let piece = self.board.get(origin);
        if piece.is_empty() || piece.owner != self.turn {
            trace!(%origin, ?piece, "nothing to pick up");
            return Transition::Ignored;
        }
        self.board.take(origin);
        let targets = movegen::selections(&self.board, piece, origin, self.last_double_move);
        debug!(%origin, ?piece, targets = targets.len(), "picked up piece");
        self.state = StateMachine::Selected {
            origin,
            piece,
            targets: Box::new(targets),
        };
        Transition::Picked { origin }
    }

    fn put_down(
        &mut self,
        origin: Position,
        piece: Piece,
        targets: Box<SelectionMap>,
        target: Position,
    ) -> Transition {
        if target == origin {
            self.board.place(origin, piece);
            debug!(%origin, "put piece back");
            return Transition::Cancelled { origin };
        }
        let kind = targets.get(target);
        if !kind.is_target() {
            trace!(%origin, %target, "not a legal destination");
            self.state = StateMachine::Selected {
                origin,
                piece,
                targets,
            };
            return Transition::Ignored;
        }
        self.board.place(target, piece);
        self.state = self.resolve(kind, target);
        self.turn = self.turn.next();
        debug!(%origin, %target, ?kind, turn = ?self.turn, "committed move");
        Transition::Committed {
            origin,
            target,
            kind,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use board::PieceKind;
    use quickcheck::quickcheck;

    fn sq(name: &str) -> Position {
        name.parse().unwrap()
    }

    /// Play a move by releasing on its origin and then its target
    #[track_caller]
    fn play(game: &mut GameState, from: &str, to: &str) -> SelectionKind {
        assert_eq!(game.release(sq(from)), Transition::Picked { origin: sq(from) });
        match game.release(sq(to)) {
            Transition::Committed { kind, .. } => kind,
            other => panic!("{from}-{to} was not played: {other:?}"),
        }
    }

    #[test]
    fn new_game() {
        let game = GameState::reset();
        assert_eq!(game.turn(), Owner::White);
        assert_eq!(game.state(), &StateMachine::Premove);
        assert_eq!(game.board(), &Board::reset());
        assert!(!game.last_move_was_double());
        assert_eq!(game.held_piece(), None);
    }

    #[test]
    fn ignores_empty_squares_and_opponent_pieces() {
        let mut game = GameState::reset();
        assert_eq!(game.release(sq("e4")), Transition::Ignored);
        assert_eq!(game.release(sq("e7")), Transition::Ignored);
        assert_eq!(game, GameState::reset());
    }

    #[test]
    fn only_releases_drive_the_machine() {
        let mut game = GameState::reset();
        assert_eq!(game.handle(InputEvent::hover(sq("e2"))), Transition::Ignored);
        assert_eq!(game.state(), &StateMachine::Premove);
        game.release(sq("e2"));
        assert_eq!(game.handle(InputEvent::hover(sq("e4"))), Transition::Ignored);
        assert_eq!(game.origin(), Some(sq("e2")));
    }

    #[test]
    fn picking_up_lifts_the_piece() {
        let mut game = GameState::reset();
        assert_eq!(game.release(sq("g1")), Transition::Picked { origin: sq("g1") });
        assert!(game.board().is_empty(sq("g1")));
        assert_eq!(
            game.held_piece(),
            Some(Piece::new(PieceKind::Knight, Owner::White))
        );
        assert_eq!(game.highlight(sq("g1")), Highlight::Origin);
        assert_eq!(
            game.highlight(sq("f3")),
            Highlight::Target(SelectionKind::Default)
        );
        assert_eq!(game.highlight(sq("g3")), Highlight::None);
        assert_eq!(game.targets().map(|t| t.len()), Some(2));
    }

    #[test]
    fn releasing_on_origin_cancels() {
        let mut game = GameState::reset();
        game.release(sq("b1"));
        assert_eq!(
            game.release(sq("b1")),
            Transition::Cancelled { origin: sq("b1") }
        );
        assert_eq!(game, GameState::reset());
    }

    #[test]
    fn illegal_destination_keeps_piece_held() {
        let mut game = GameState::reset();
        game.release(sq("b1"));
        let held = game.clone();
        assert_eq!(game.release(sq("b4")), Transition::Ignored);
        assert_eq!(game.release(sq("c2")), Transition::Ignored);
        assert_eq!(game.release(sq("e7")), Transition::Ignored);
        assert_eq!(game, held);
        assert_eq!(game.turn(), Owner::White);
    }

    #[test]
    fn double_move_from_start() {
        let mut game = GameState::reset();
        game.release(sq("d2"));
        let targets = game.targets().unwrap();
        assert_eq!(targets.get(sq("d3")), SelectionKind::Default);
        let double = DoubleMove {
            single: sq("d3"),
            double: sq("d4"),
        };
        assert_eq!(targets.get(sq("d4")), SelectionKind::DoubleMove(double));

        assert_eq!(
            game.release(sq("d4")),
            Transition::Committed {
                origin: sq("d2"),
                target: sq("d4"),
                kind: SelectionKind::DoubleMove(double),
            }
        );
        assert_eq!(
            game.board().get(sq("d4")),
            Piece::new(PieceKind::Pawn, Owner::White)
        );
        assert!(game.board().is_empty(sq("d2")));
        assert!(game.board().has_moved(sq("d4")));
        assert!(game.last_move_was_double());
        assert_eq!(game.last_double_move(), Some(double));
        assert_eq!(game.turn(), Owner::Black);
        assert_eq!(game.state(), &StateMachine::Premove);
    }

    #[test]
    fn capture_replaces_piece_and_clears_double_move() {
        let mut game = GameState::reset();
        play(&mut game, "e2", "e4");
        play(&mut game, "d7", "d5");
        assert_eq!(play(&mut game, "e4", "d5"), SelectionKind::Default);
        assert_eq!(
            game.board().get(sq("d5")),
            Piece::new(PieceKind::Pawn, Owner::White)
        );
        assert_eq!(game.board().pieces().count(), 31);
        assert!(!game.last_move_was_double());
        assert_eq!(game.turn(), Owner::Black);
    }

    #[test]
    fn en_passant_captures_the_passed_pawn() {
        let mut game = GameState::reset();
        play(&mut game, "e2", "e4");
        play(&mut game, "a7", "a6");
        play(&mut game, "e4", "e5");
        play(&mut game, "d7", "d5");

        game.release(sq("e5"));
        let targets = game.targets().unwrap();
        assert_eq!(targets.get(sq("d6")), SelectionKind::EnPassant);
        assert_eq!(targets.get(sq("f6")), SelectionKind::None);
        assert_eq!(game.release(sq("d6")), Transition::Committed {
            origin: sq("e5"),
            target: sq("d6"),
            kind: SelectionKind::EnPassant,
        });
        assert!(game.board().is_empty(sq("d5")));
        assert_eq!(
            game.board().get(sq("d6")),
            Piece::new(PieceKind::Pawn, Owner::White)
        );
        assert!(!game.last_move_was_double());
        assert_eq!(game.board().pieces().count(), 31);
    }

    #[test]
    fn en_passant_window_closes_after_one_move() {
        let mut game = GameState::reset();
        play(&mut game, "e2", "e4");
        play(&mut game, "a7", "a6");
        play(&mut game, "e4", "e5");
        play(&mut game, "d7", "d5");
        play(&mut game, "h2", "h3");
        play(&mut game, "h7", "h6");

        game.release(sq("e5"));
        assert!(!game
            .targets()
            .unwrap()
            .targets()
            .any(|(_, kind)| kind == SelectionKind::EnPassant));
    }

    #[test]
    fn cancelling_keeps_en_passant_available() {
        let mut game = GameState::reset();
        play(&mut game, "e2", "e4");
        play(&mut game, "a7", "a6");
        play(&mut game, "e4", "e5");
        play(&mut game, "f7", "f5");
        game.release(sq("a2"));
        game.release(sq("a2"));
        game.release(sq("e5"));
        assert_eq!(
            game.targets().unwrap().get(sq("f6")),
            SelectionKind::EnPassant
        );
    }

    #[test]
    fn castling_moves_the_rook() {
        let board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let mut game = GameState::new(board, Owner::White, None);
        assert_eq!(
            play(&mut game, "e1", "g1"),
            SelectionKind::Castling {
                rook_col: 7,
                direction: 1
            }
        );
        assert_eq!(game.board().placement(), "r3k2r/8/8/8/8/8/8/R4RK1");
        assert!(game.board().has_moved(sq("g1")));
        assert!(game.board().has_moved(sq("f1")));
        assert_eq!(game.turn(), Owner::Black);

        assert_eq!(
            play(&mut game, "e8", "c8"),
            SelectionKind::Castling {
                rook_col: 0,
                direction: -1
            }
        );
        assert_eq!(game.board().placement(), "2kr3r/8/8/8/8/8/8/R4RK1");
        assert!(game.board().has_moved(sq("d8")));
        assert_eq!(game.turn(), Owner::White);
    }

    #[test]
    fn castling_needs_unmoved_king_and_rook() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/R3K2R").unwrap();
        let mut game = GameState::new(board, Owner::White, None);
        // Rook steps away and back: it now counts as moved.
        play(&mut game, "h1", "h2");
        play(&mut game, "e8", "d8");
        play(&mut game, "h2", "h1");
        play(&mut game, "d8", "e8");
        game.release(sq("e1"));
        let targets = game.targets().unwrap();
        assert_eq!(targets.get(sq("g1")), SelectionKind::None);
        assert!(matches!(
            targets.get(sq("c1")),
            SelectionKind::Castling { rook_col: 0, .. }
        ));
        game.release(sq("e1"));

        // King steps away and back: no castling either way.
        play(&mut game, "e1", "e2");
        play(&mut game, "e8", "d8");
        play(&mut game, "e2", "e1");
        play(&mut game, "d8", "e8");
        game.release(sq("e1"));
        assert!(!game
            .targets()
            .unwrap()
            .targets()
            .any(|(_, kind)| matches!(kind, SelectionKind::Castling { .. })));
    }

    #[test]
    #[should_panic(expected = "promotion")]
    fn promotion_is_fatal() {
        let board = Board::from_placement("8/P7/8/8/8/8/8/k6K").unwrap();
        let mut game = GameState::new(board, Owner::White, None);
        game.release(sq("a7"));
        assert_eq!(
            game.targets().unwrap().get(sq("a8")),
            SelectionKind::Promotion
        );
        game.release(sq("a8"));
    }

    #[test]
    #[should_panic(expected = "en passant")]
    fn en_passant_without_double_move_is_fatal() {
        let mut game = GameState::reset();
        let mut targets = SelectionMap::new();
        targets.set(sq("d3"), SelectionKind::EnPassant);
        let piece = game.board.take(sq("e2"));
        game.state = StateMachine::Selected {
            origin: sq("e2"),
            piece,
            targets: Box::new(targets),
        };
        game.release(sq("d3"));
    }

    #[test]
    #[should_panic(expected = "nobody's turn")]
    fn turn_must_belong_to_a_side() {
        GameState::new(Board::reset(), Owner::None, None);
    }

    quickcheck! {
        fn test_random_releases_keep_invariants(releases: Vec<(u8, u8)>) -> bool {
            let mut game = GameState::reset();
            let mut pieces = 32;
            for (x, y) in releases {
                let square = Position::new(x % 8, y % 8);
                if game.targets().is_some_and(|t| t.get(square) == SelectionKind::Promotion) {
                    continue;
                }
                let turn = game.turn();
                let transition = game.release(square);
                let held = usize::from(game.held_piece().is_some());
                let now = game.board().pieces().count() + held;
                let flipped = game.turn() != turn;
                if game.turn() == Owner::None
                    || now > pieces
                    || flipped != matches!(transition, Transition::Committed { .. })
                    || (game.state() == &StateMachine::Premove) == (held == 1)
                {
                    return false;
                }
                pieces = now;
            }
            true
        }
    }
}
