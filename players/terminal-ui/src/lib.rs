//! A player for a human at a terminal
//!
//! The board is drawn as text each time input is needed, and squares are typed in instead of
//! clicked on.

use std::io::{self, BufRead, Write};

use board::{Owner, ParseSquareError, Position, COLS, ROWS};
use game::{GameState, Highlight, Transition};

/// A line of input from the human
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Release the pointer over this square
    Release(Position),
    /// Stop playing
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error(transparent)]
    Square(#[from] ParseSquareError),
    #[error("column {0} and row {1} are off the board")]
    OffBoard(u8, u8),
    #[error("expected a square like e2, a column and row like 4 6, or quit")]
    Unrecognized,
}

/// Read a command: an algebraic square (`e2`), a column and row (`4 6`), or `quit`.
///
/// ```
/// # use terminal_ui::{parse_command, Command};
/// # use board::Position;
/// assert_eq!(parse_command("e2"), Ok(Command::Release(Position::new(4, 6))));
/// assert_eq!(parse_command(" 4 6 "), Ok(Command::Release(Position::new(4, 6))));
/// assert_eq!(parse_command("q"), Ok(Command::Quit));
/// ```
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let line = line.trim();
    match line {
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }
    let mut numbers = line.split_whitespace().map(str::parse::<u8>);
    match (numbers.next(), numbers.next(), numbers.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) => Position::try_new(x, y)
            .map(Command::Release)
            .ok_or(InputError::OffBoard(x, y)),
        (Some(_), Some(_), _) => Err(InputError::Unrecognized),
        _ => line
            .parse()
            .map(Command::Release)
            .map_err(|err| match err {
                ParseSquareError::Length(_) => InputError::Unrecognized,
                err => err.into(),
            }),
    }
}

/// Draw the board, marking the held piece's origin and destinations.
///
/// Empty squares are `.`, the square a piece was lifted from is `[ ]`, a destination is `*` if
/// empty and `(x)` if it holds a piece to capture.
pub fn render(game: &GameState) -> String {
    let files: String = (0..COLS)
        .map(|x| format!(" {} ", Position::new(x, 0).file_char()))
        .collect();
    let mut out = format!("   {files}\n");
    for y in 0..ROWS {
        let rank = Position::new(0, y).rank_char();
        out.push_str(&format!(" {rank} "));
        for x in 0..COLS {
            let pos = Position::new(x, y);
            let letter = game.board().get(pos).fen_letter();
            let cell = match (game.highlight(pos), letter) {
                (Highlight::Origin, _) => "[ ]".to_owned(),
                (Highlight::Target(_), Some(letter)) => format!("({letter})"),
                (Highlight::Target(_), None) => " * ".to_owned(),
                (Highlight::None, Some(letter)) => format!(" {letter} "),
                (Highlight::None, None) => " . ".to_owned(),
            };
            out.push_str(&cell);
        }
        out.push_str(&format!(" {rank}\n"));
    }
    out.push_str(&format!("   {files}\n"));
    let side = match game.turn() {
        Owner::Black => "Black",
        _ => "White",
    };
    match (game.held_piece(), game.origin()) {
        (Some(piece), Some(origin)) => {
            let letter = piece.fen_letter().unwrap_or('?');
            out.push_str(&format!("{side} to move, holding {letter} from {origin}\n"));
        }
        _ => out.push_str(&format!("{side} to move\n")),
    }
    out
}

/// An input for a human typing in the terminal
pub struct TerminalUIPlayer<R, W> {
    input: R,
    output: W,
}

impl TerminalUIPlayer<io::StdinLock<'static>, io::Stdout> {
    /// Create a new player reading from stdin and drawing to stdout
    pub fn new() -> Self {
        Self::with_io(io::stdin().lock(), io::stdout())
    }
}

impl Default for TerminalUIPlayer<io::StdinLock<'static>, io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead, W: Write> TerminalUIPlayer<R, W> {
    /// Create a new player over the given input and output
    pub fn with_io(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Get back the output, to inspect what was drawn
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, game: &GameState) -> io::Result<Option<Position>> {
        loop {
            write!(self.output, "{}Square (or quit): ", render(game))?;
            self.output.flush()?;
            let mut buffer = String::new();
            if self.input.read_line(&mut buffer)? == 0 {
                return Ok(None);
            }
            match parse_command(&buffer) {
                Ok(Command::Release(square)) => return Ok(Some(square)),
                Ok(Command::Quit) => return Ok(None),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> players::Player for TerminalUIPlayer<R, W> {
    fn next_release(&mut self, game: &GameState) -> Option<Position> {
        match self.prompt(game) {
            Ok(square) => square,
            Err(err) => {
                tracing::warn!(%err, "terminal input failed, leaving the game");
                None
            }
        }
    }

    fn react_to_move(&mut self, _game: &GameState, opponent_move: Transition) {
        if let Transition::Committed { origin, target, .. } = opponent_move {
            let _ = writeln!(self.output, "Opponent played {origin}-{target}");
        }
    }
}
