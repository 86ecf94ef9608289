//! How each kind of piece moves

use board::{Board, Owner, PieceKind, Position, COLS};

use crate::{DoubleMove, SelectionKind, SelectionMap};

/// The four directions a rook slides in
pub const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// The four directions a bishop slides in
pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The offsets corresponding to all possible knight moves
pub const KNIGHT_MOVES: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
];

/// The furthest any piece can slide
const MAX_DISTANCE: usize = COLS as usize - 1;

/// Whether `owner` may finish a move on `pos`: it is empty or holds an opposing piece
pub fn is_valid_target(board: &Board, owner: Owner, pos: Position) -> bool {
    let piece = board.get(pos);
    piece.is_empty() || piece.owner == owner.next()
}

/// Slide from `origin` in each direction for at most `distance` squares.
///
/// A slide stops before a square the mover may not land on, and stops after landing on a
/// capture.
pub fn slide(
    board: &Board,
    owner: Owner,
    origin: Position,
    directions: &[(i8, i8)],
    distance: usize,
    map: &mut SelectionMap,
) {
    for &(dx, dy) in directions {
        for pos in origin.ray(dx, dy).take(distance) {
            if !is_valid_target(board, owner, pos) {
                break;
            }
            map.set(pos, SelectionKind::Default);
            if !board.is_empty(pos) {
                break;
            }
        }
    }
}

pub fn bishop(board: &Board, owner: Owner, origin: Position, map: &mut SelectionMap) {
    slide(board, owner, origin, &DIAGONAL, MAX_DISTANCE, map);
}

pub fn rook(board: &Board, owner: Owner, origin: Position, map: &mut SelectionMap) {
    slide(board, owner, origin, &ORTHOGONAL, MAX_DISTANCE, map);
}

pub fn queen(board: &Board, owner: Owner, origin: Position, map: &mut SelectionMap) {
    slide(board, owner, origin, &ORTHOGONAL, MAX_DISTANCE, map);
    slide(board, owner, origin, &DIAGONAL, MAX_DISTANCE, map);
}

pub fn knight(board: &Board, owner: Owner, origin: Position, map: &mut SelectionMap) {
    for (dx, dy) in KNIGHT_MOVES {
        if let Some(pos) = origin.offset(dx, dy) {
            if is_valid_target(board, owner, pos) {
                map.set(pos, SelectionKind::Default);
            }
        }
    }
}

/// One step in any direction, plus castling if the king has never moved.
pub fn king(board: &Board, owner: Owner, origin: Position, map: &mut SelectionMap) {
    slide(board, owner, origin, &ORTHOGONAL, 1, map);
    slide(board, owner, origin, &DIAGONAL, 1, map);

    if board.has_moved(origin) {
        return;
    }
    for direction in [-1, 1] {
        // Only the first piece along the row matters: anything other than our own unmoved rook
        // rules out castling on that side.
        let Some(first) = origin.ray(direction, 0).find(|&pos| !board.is_empty(pos)) else {
            continue;
        };
        let piece = board.get(first);
        if piece.kind != PieceKind::Rook || piece.owner != owner || board.has_moved(first) {
            continue;
        }
        if let Some(target) = origin.offset(2 * direction, 0) {
            map.set(
                target,
                SelectionKind::Castling {
                    rook_col: first.x(),
                    direction,
                },
            );
        }
    }
}

/// Forward moves, diagonal captures and en passant.
///
/// `last_double` is the opponent's two-square pawn advance, if that was the last move played.
pub fn pawn(
    board: &Board,
    owner: Owner,
    origin: Position,
    last_double: Option<DoubleMove>,
    map: &mut SelectionMap,
) {
    let forward = owner.direction();
    let advance_kind = |pos: Position| {
        if owner.is_promotion_row(pos.y()) {
            SelectionKind::Promotion
        } else {
            SelectionKind::Default
        }
    };

    for dx in [-1, 1] {
        let Some(pos) = origin.offset(dx, forward) else {
            continue;
        };
        let piece = board.get(pos);
        if !piece.is_empty() && piece.owner == owner.next() {
            map.set(pos, advance_kind(pos));
        } else if last_double.is_some_and(|double| double.single == pos) {
            map.set(pos, SelectionKind::EnPassant);
        }
    }

    let Some(single) = origin.offset(0, forward) else {
        return;
    };
    if !board.is_empty(single) {
        return;
    }
    map.set(single, advance_kind(single));
    if board.has_moved(origin) {
        return;
    }
    if let Some(double) = origin.offset(0, 2 * forward) {
        if board.is_empty(double) {
            map.set(
                double,
                SelectionKind::DoubleMove(DoubleMove { single, double }),
            );
        }
    }
}
