//! Seeded random playouts, for checking board invariants over reachable positions.

use crate::{Action, Game};
use rand::seq::IteratorRandom;
use rand::Rng;

/// Play one uniformly random legal action, passing when there is no move.
fn random_step<R: Rng + ?Sized>(game: Game, rng: &mut R) -> Game {
    let action = game.moves().choose(rng).map_or(Action::Pass, Action::Play);
    game.apply(action)
        .expect("a listed move or a forced pass is always legal")
}

/// Play random legal moves from the starting position until the game ends.
/// Returns every position visited, starting position first.
pub fn random_game<R: Rng + ?Sized>(rng: &mut R) -> Vec<Game> {
    let mut game = Game::default();
    let mut history = vec![game];

    while !game.is_finished() {
        game = random_step(game, rng);
        history.push(game);
    }

    history
}

/// Play `plies` random actions from the starting position, stopping early if the game ends.
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, plies: usize) -> Game {
    let mut game = Game::default();

    for _ in 0..plies {
        if game.is_finished() {
            break;
        }
        game = random_step(game, rng);
    }

    game
}
