
use board::{Position, COLS, ROWS};

/// The squares involved in a pawn's two-square advance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DoubleMove {
    /// The square the pawn skipped over, where an en passant capture lands
    pub single: Position,
    /// The square the pawn ended on, which holds the pawn to remove on en passant
    pub double: Position,
}

/// Why a square is a legal destination for the held piece
///
/// The tag decides which side effects a move to the square has.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    /// Not a legal destination
    #[default]
    None,
    /// A plain move or capture
    Default,
    /// The king castles toward the rook standing in column `rook_col`
    Castling {
        rook_col: u8,
        /// `-1` toward column 0, `1` toward the last column
        direction: i8,
    },
    /// A pawn reaches the far row
    Promotion,
    /// A pawn's first move advances two squares
    DoubleMove(DoubleMove),
    /// A pawn captures the pawn that just advanced two squares past it
    EnPassant,
}
impl SelectionKind {
    /// Whether this square may be moved to
    pub const fn is_target(self) -> bool {
        !matches!(self, SelectionKind::None)
    }
}

/// A [`SelectionKind`] for every square on the board
///
/// This is computed fresh whenever a piece is picked up and thrown away when it is put down.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SelectionMap {
    /// Indexed `[y][x]`
    kinds: [[SelectionKind; COLS as usize]; ROWS as usize],
}

impl SelectionMap {
    /// A map with no legal destinations
    pub const fn new() -> Self {
        Self {
            kinds: [[SelectionKind::None; COLS as usize]; ROWS as usize],
        }
    }

    /// The tag for the given square
    pub fn get(&self, pos: Position) -> SelectionKind {
        self.kinds[pos.y() as usize][pos.x() as usize]
    }

    /// Tag the given square, replacing any earlier tag
    pub fn set(&mut self, pos: Position, kind: SelectionKind) {
        self.kinds[pos.y() as usize][pos.x() as usize] = kind;
    }

    /// Whether the given square is a legal destination
    pub fn is_target(&self, pos: Position) -> bool {
        self.get(pos).is_target()
    }

    /// The legal destinations and their tags, row by row from the top
    pub fn targets(&self) -> impl Iterator<Item = (Position, SelectionKind)> + '_ {
        Position::all()
            .map(|pos| (pos, self.get(pos)))
            .filter(|(_, kind)| kind.is_target())
    }

    /// The number of legal destinations
    pub fn len(&self) -> usize {
        self.targets().count()
    }

    /// Whether there are no legal destinations at all
    pub fn is_empty(&self) -> bool {
        self.targets().next().is_none()
    }
}

impl Default for SelectionMap {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for SelectionMap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.targets().map(|(pos, kind)| (pos.to_string(), kind)))
            .finish()
    }
}
