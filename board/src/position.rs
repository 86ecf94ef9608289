use core::{fmt, str::FromStr};

/// The number of columns on the board
pub const COLS: u8 = 8;
/// The number of rows on the board
pub const ROWS: u8 = 8;

/// A square on the board
///
/// `x` is the column, counted from the left; `y` is the row, counted from the top. Row 0 holds
/// black's back rank and row 7 holds white's.
///
/// A `Position` is always on the board: the constructors refuse to build anything else, so all
/// indexing through a `Position` is in bounds.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    x: u8,
    y: u8,
}
impl Position {
    /// Build a position from the given column and row.
    ///
    /// Panics if the coordinates are off the board. Use [`Self::try_new`] for coordinates that
    /// came from outside the program.
    ///
    /// ```
    /// # use board::Position;
    /// assert_eq!(Position::new(4, 6).to_string(), "e2");
    /// ```
    #[track_caller]
    pub fn new(x: u8, y: u8) -> Self {
        match Self::try_new(x, y) {
            Some(pos) => pos,
            None => utils::fatal!("position ({x}, {y}) is off the board"),
        }
    }

    /// Build a position, returning `None` if it is off the board
    pub const fn try_new(x: u8, y: u8) -> Option<Self> {
        if x < COLS && y < ROWS {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// The column
    pub const fn x(self) -> u8 {
        self.x
    }

    /// The row
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Offset by the given number of columns and rows, or `None` if that leaves the board.
    ///
    /// ```
    /// # use board::Position;
    /// let b2 = Position::new(1, 6);
    /// assert_eq!(b2.offset(1, -2), Some(Position::new(2, 4)));
    /// assert_eq!(b2.offset(-2, 0), None);
    /// assert_eq!(b2.offset(0, 2), None);
    /// ```
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = self.x as i16 + dx as i16;
        let y = self.y as i16 + dy as i16;
        if 0 <= x && x < COLS as i16 && 0 <= y && y < ROWS as i16 {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// Walk away from this square in the given direction.
    ///
    /// The iterator starts one step away from `self` and stops at the edge of the board.
    ///
    /// ```
    /// # use board::Position;
    /// let squares: Vec<_> = Position::new(5, 7).ray(1, 0).map(|p| p.to_string()).collect();
    /// assert_eq!(squares, ["g1", "h1"]);
    /// ```
    pub const fn ray(self, dx: i8, dy: i8) -> Ray {
        Ray {
            next: self.offset(dx, dy),
            dx,
            dy,
        }
    }

    /// An iterator over all squares on the board, row by row from the top
    ///
    /// ```
    /// assert_eq!(board::Position::all().count(), 64);
    /// ```
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ROWS).flat_map(|y| (0..COLS).map(move |x| Self { x, y }))
    }

    /// The algebraic name of the file (`a` to `h`)
    pub const fn file_char(self) -> char {
        (b'a' + self.x) as char
    }

    /// The algebraic name of the rank (`1` to `8`)
    pub const fn rank_char(self) -> char {
        (b'0' + ROWS - self.y) as char
    }
}
impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {} = {})", self.x, self.y, self)
    }
}
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseSquareError {
    #[error("square must be a file and a rank, got {0:?}")]
    Length(String),
    #[error("invalid file {0:?}, expected a to h")]
    File(char),
    #[error("invalid rank {0:?}, expected 1 to 8")]
    Rank(char),
}

impl FromStr for Position {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseSquareError::Length(s.to_owned()));
        };
        let x = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(ParseSquareError::File(file)),
        };
        let y = match rank {
            '1'..='8' => ROWS - (rank as u8 - b'0'),
            _ => return Err(ParseSquareError::Rank(rank)),
        };
        Ok(Self { x, y })
    }
}

/// Successive squares in one direction, produced by [`Position::ray`]
#[derive(Clone, Debug)]
pub struct Ray {
    next: Option<Position>,
    dx: i8,
    dy: i8,
}
impl Iterator for Ray {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let current = self.next?;
        self.next = current.offset(self.dx, self.dy);
        Some(current)
    }
}
impl core::iter::FusedIterator for Ray {}
