use core::fmt;

mod position;

pub use crate::position::{ParseSquareError, Position, Ray, COLS, ROWS};

/// The sides a square can belong to
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Owner {
    /// Nobody: the square is empty
    #[default]
    None,
    White,
    Black,
}
impl Owner {
    /// The side that moves after this one
    ///
    /// `None` has no opponent and maps to itself.
    pub const fn next(self) -> Self {
        match self {
            Owner::None => Owner::None,
            Owner::White => Owner::Black,
            Owner::Black => Owner::White,
        }
    }

    /// Which way this side's pawns advance along `y`
    ///
    /// White moves toward row 0, black toward the last row.
    pub const fn direction(self) -> i8 {
        match self {
            Owner::None => 0,
            Owner::White => -1,
            Owner::Black => 1,
        }
    }

    /// Whether a pawn of this side promotes upon reaching row `y`
    pub const fn is_promotion_row(self, y: u8) -> bool {
        match self {
            Owner::None => false,
            Owner::White => y == 0,
            Owner::Black => y == ROWS - 1,
        }
    }
}

/// The types of pieces there are
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// No piece; only ever paired with [`Owner::None`]
    #[default]
    None,
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}
impl PieceKind {
    /// The capitalized version of the letter used for this piece in FEN
    pub const fn fen_letter(self) -> Option<char> {
        match self {
            Self::None => None,
            Self::King => Some('K'),
            Self::Queen => Some('Q'),
            Self::Bishop => Some('B'),
            Self::Knight => Some('N'),
            Self::Rook => Some('R'),
            Self::Pawn => Some('P'),
        }
    }

    /// The kind for a FEN letter, ignoring case
    pub const fn from_fen_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'K' => Some(Self::King),
            'Q' => Some(Self::Queen),
            'B' => Some(Self::Bishop),
            'N' => Some(Self::Knight),
            'R' => Some(Self::Rook),
            'P' => Some(Self::Pawn),
            _ => None,
        }
    }
}

/// The contents of a square
///
/// Both fields are `None` for an empty square. A piece with exactly one of them `None` is not a
/// valid value; [`Piece::new`] refuses to build one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Owner,
}
impl Piece {
    /// The contents of an empty square
    pub const EMPTY: Self = Self {
        kind: PieceKind::None,
        owner: Owner::None,
    };

    /// Build a piece, panicking if only one of `kind` and `owner` is `None`
    #[track_caller]
    pub fn new(kind: PieceKind, owner: Owner) -> Self {
        utils::impossible!(
            (kind == PieceKind::None) != (owner == Owner::None),
            "piece {kind:?} cannot belong to {owner:?}"
        );
        Self { kind, owner }
    }

    /// Whether this is the absence of a piece
    pub const fn is_empty(self) -> bool {
        matches!(self.owner, Owner::None) || matches!(self.kind, PieceKind::None)
    }

    /// The FEN letter for this piece: uppercase for white, lowercase for black
    pub fn fen_letter(self) -> Option<char> {
        let letter = self.kind.fen_letter()?;
        match self.owner {
            Owner::None => None,
            Owner::White => Some(letter),
            Owner::Black => Some(letter.to_ascii_lowercase()),
        }
    }

    /// The piece for a FEN letter, or `None` if the letter is not a piece
    pub fn from_fen_letter(letter: char) -> Option<Self> {
        let kind = PieceKind::from_fen_letter(letter)?;
        let owner = if letter.is_ascii_uppercase() {
            Owner::White
        } else {
            Owner::Black
        };
        Some(Self { kind, owner })
    }
}

/// The back rank, from column 0 to column 7
const BACK_RANK: [PieceKind; COLS as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The pieces on the board, and whether each square's piece has ever moved
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Indexed `[y][x]`
    pieces: [[Piece; COLS as usize]; ROWS as usize],
    /// Indexed `[y][x]`
    moved: [[bool; COLS as usize]; ROWS as usize],
}

impl Board {
    /// A board with no pieces on it
    pub const EMPTY: Self = Self {
        pieces: [[Piece::EMPTY; COLS as usize]; ROWS as usize],
        moved: [[false; COLS as usize]; ROWS as usize],
    };

    /// The board at the start of a chess game
    ///
    /// ```
    /// # use board::{Board, Owner, PieceKind, Position};
    /// let board = Board::reset();
    /// assert_eq!(board.get(Position::new(4, 0)).kind, PieceKind::King);
    /// assert_eq!(board.get(Position::new(4, 0)).owner, Owner::Black);
    /// assert!(board.is_empty(Position::new(4, 4)));
    /// ```
    pub fn reset() -> Self {
        let mut board = Self::EMPTY;
        for (x, kind) in (0..COLS).zip(BACK_RANK) {
            board.set(Position::new(x, 0), kind, Owner::Black);
            board.set(Position::new(x, 1), PieceKind::Pawn, Owner::Black);
            board.set(Position::new(x, ROWS - 2), PieceKind::Pawn, Owner::White);
            board.set(Position::new(x, ROWS - 1), kind, Owner::White);
        }
        board
    }

    /// Put a piece on the given square, replacing whatever was there
    #[track_caller]
    pub fn set(&mut self, pos: Position, kind: PieceKind, owner: Owner) {
        self.place(pos, Piece::new(kind, owner));
    }

    /// Put an existing piece on the given square, replacing whatever was there
    pub fn place(&mut self, pos: Position, piece: Piece) {
        self.pieces[pos.y() as usize][pos.x() as usize] = piece;
    }

    /// The contents of the given square
    pub fn get(&self, pos: Position) -> Piece {
        self.pieces[pos.y() as usize][pos.x() as usize]
    }

    /// Remove and return the piece on the given square, leaving it empty
    pub fn take(&mut self, pos: Position) -> Piece {
        core::mem::take(&mut self.pieces[pos.y() as usize][pos.x() as usize])
    }

    /// Whether the given square is empty
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    /// Whether the piece on this square has ever moved
    ///
    /// The flag belongs to the square: it is set when a piece moves onto the square and is never
    /// cleared by play.
    pub fn has_moved(&self, pos: Position) -> bool {
        self.moved[pos.y() as usize][pos.x() as usize]
    }

    /// Set the has-moved flag of a square
    pub fn set_moved(&mut self, pos: Position, moved: bool) {
        self.moved[pos.y() as usize][pos.x() as usize] = moved;
    }

    /// Iterate over the occupied squares, row by row from the top
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all()
            .map(|pos| (pos, self.get(pos)))
            .filter(|(_, piece)| !piece.is_empty())
    }

    /// Iterate over the squares whose has-moved flag is set
    pub fn moved_squares(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(|&pos| self.has_moved(pos))
    }

    /// Parse the piece placement field of a FEN string
    ///
    /// The first rank listed is row 0. All has-moved flags start cleared.
    ///
    /// ```
    /// # use board::Board;
    /// let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";
    /// assert_eq!(Board::from_placement(fen), Ok(Board::reset()));
    /// assert_eq!(Board::reset().placement(), fen);
    /// ```
    pub fn from_placement(fen: &str) -> Result<Self, PlacementError> {
        let rows: Vec<&str> = fen.split('/').collect();
        if rows.len() != ROWS as usize {
            return Err(PlacementError::RowCount(rows.len()));
        }
        let mut board = Self::EMPTY;
        for (y, row) in (0..ROWS).zip(rows) {
            let mut x = 0u8;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    x += skip as u8;
                } else {
                    let piece = Piece::from_fen_letter(c).ok_or(PlacementError::UnknownPiece(c))?;
                    let pos =
                        Position::try_new(x, y).ok_or(PlacementError::RowTooLong(y as usize))?;
                    board.place(pos, piece);
                    x += 1;
                }
                if x > COLS {
                    return Err(PlacementError::RowTooLong(y as usize));
                }
            }
            if x < COLS {
                return Err(PlacementError::RowTooShort(y as usize));
            }
        }
        Ok(board)
    }

    /// The piece placement field of a FEN string for this board
    pub fn placement(&self) -> String {
        let mut fen = String::new();
        for y in 0..ROWS {
            if y > 0 {
                fen.push('/');
            }
            let mut empty = 0;
            for x in 0..COLS {
                match self.get(Position::new(x, y)).fen_letter() {
                    Some(letter) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(letter);
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
        }
        fen
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::reset()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("placement", &self.placement())
            .field(
                "moved",
                &self.moved_squares().map(|p| p.to_string()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Errors from reading a piece placement
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PlacementError {
    #[error("expected 8 rows separated by '/', found {0}")]
    RowCount(usize),
    #[error("row {0} describes more than 8 squares")]
    RowTooLong(usize),
    #[error("row {0} describes fewer than 8 squares")]
    RowTooShort(usize),
    #[error("unknown piece letter {0:?}")]
    UnknownPiece(char),
}
