//! Traits for an arbitrary player

use board::Position;
use game::{GameState, Transition};

/// A player in a game
///
/// A player plays by choosing squares to release the pointer on, exactly like a person clicking
/// on the board. This trait is generic over how the player decides, so interactive and automatic
/// players can both implement this.
pub trait Player {
    /// Choose the next square to release on.
    ///
    /// Returns `None` if the player wants to stop playing.
    fn next_release(&mut self, game: &GameState) -> Option<Position>;

    /// React to the opponent committing a move
    fn react_to_move(&mut self, game: &GameState, opponent_move: Transition) {
        let _ = (game, opponent_move);
    }
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn next_release(&mut self, game: &GameState) -> Option<Position> {
        (**self).next_release(game)
    }

    fn react_to_move(&mut self, game: &GameState, opponent_move: Transition) {
        (**self).react_to_move(game, opponent_move)
    }
}
