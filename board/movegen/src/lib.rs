//! Legal destinations for a piece that has been picked up
//!
//! The rules here only look at the board: they do not know whose turn it is, and they do not
//! detect check. A destination's [`SelectionKind`] records which special rule, if any, produced
//! it.

use board::{Board, Piece, PieceKind, Position};

pub mod rules;
mod selection;

pub use crate::selection::{DoubleMove, SelectionKind, SelectionMap};

/// Compute where `piece`, lifted from `origin`, may be put down.
///
/// `last_double` is the previous move if it was a two-square pawn advance. The board is only
/// read: the caller is expected to have already emptied `origin`.
///
/// ```
/// # use board::{Board, Position};
/// # use movegen::{selections, SelectionKind};
/// let mut board = Board::reset();
/// let origin = "g1".parse().unwrap();
/// let knight = board.take(origin);
/// let map = selections(&board, knight, origin, None);
/// assert_eq!(map.get("f3".parse().unwrap()), SelectionKind::Default);
/// assert_eq!(map.len(), 2);
/// ```
pub fn selections(
    board: &Board,
    piece: Piece,
    origin: Position,
    last_double: Option<DoubleMove>,
) -> SelectionMap {
    let mut map = SelectionMap::new();
    let owner = piece.owner;
    match piece.kind {
        PieceKind::None => {}
        PieceKind::King => rules::king(board, owner, origin, &mut map),
        PieceKind::Queen => rules::queen(board, owner, origin, &mut map),
        PieceKind::Bishop => rules::bishop(board, owner, origin, &mut map),
        PieceKind::Knight => rules::knight(board, owner, origin, &mut map),
        PieceKind::Rook => rules::rook(board, owner, origin, &mut map),
        PieceKind::Pawn => rules::pawn(board, owner, origin, last_double, &mut map),
    }
    tracing::trace!(%origin, ?piece, targets = map.len(), "computed selections");
    map
}
