use board::{Owner, Position};
use game::{GameState, Transition};
use players::Player;

/// A backend which feeds the players' releases into the game until someone stops
pub struct Backend<White, Black> {
    /// The current state of the game
    gamestate: GameState,
    /// The white player
    white_player: White,
    /// The black player
    black_player: Black,
    /// How many moves have been committed
    half_moves: u32,
}

impl<White: Player, Black: Player> Backend<White, Black> {
    /// Create a new instance with the chess starting board
    pub fn new(white_player: White, black_player: Black) -> Self {
        Self::from_state(GameState::reset(), white_player, black_player)
    }

    /// Continue from an existing game
    pub fn from_state(gamestate: GameState, white_player: White, black_player: Black) -> Self {
        Self {
            gamestate,
            white_player,
            black_player,
            half_moves: 0,
        }
    }

    /// Ask whoever's turn it is for one release and apply it
    ///
    /// If a move gets committed, the other player is told about it. Returns `None` if the player
    /// stopped playing.
    pub fn play_release(&mut self) -> Option<Transition> {
        let square: Position = match self.gamestate.turn() {
            Owner::Black => self.black_player.next_release(&self.gamestate)?,
            _ => self.white_player.next_release(&self.gamestate)?,
        };
        let transition = self.gamestate.release(square);
        if let Transition::Committed { .. } = transition {
            self.half_moves += 1;
            // The turn has already passed to the player who should hear about it
            match self.gamestate.turn() {
                Owner::Black => self.black_player.react_to_move(&self.gamestate, transition),
                _ => self.white_player.react_to_move(&self.gamestate, transition),
            }
        }
        Some(transition)
    }

    /// Play until a player stops, or until `max_half_moves` moves have been committed
    pub fn play_game(&mut self, max_half_moves: Option<u32>) {
        while max_half_moves.map_or(true, |max| self.half_moves < max) {
            if self.play_release().is_none() {
                tracing::info!(half_moves = self.half_moves, "player stopped");
                return;
            }
        }
        tracing::info!(half_moves = self.half_moves, "move limit reached");
    }

    /// Get the state of the game right now
    pub fn game_state(&self) -> &GameState {
        &self.gamestate
    }

    /// The number of moves committed so far
    pub fn half_moves(&self) -> u32 {
        self.half_moves
    }
}
