//! Test-only game builders for domain unit tests.

use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::domain::game::Game;
use crate::domain::player::{ConnectionId, Player};
use crate::domain::roles::Role;
use crate::domain::rules::{GameRules, STARTING_CASH, STARTING_CREDIT_SCORE};

pub const PASSWORD: &str = "secret";

/// Empty game with a deterministic role pool.
pub fn new_game(max_players: usize) -> Game {
    backend_test_support::logging::init();
    let mut rng = StdRng::seed_from_u64(17);
    Game::new(
        "TEST01",
        PASSWORD,
        GameRules::default().with_max_players(max_players),
        &mut rng,
    )
}

/// Seat a student with a chosen role, bypassing the shuffled pool.
pub fn seat(game: &mut Game, name: &str, role: Role) -> ConnectionId {
    let id = Uuid::new_v4();
    game.players.insert(
        id,
        Player::student(name, role, STARTING_CASH, STARTING_CREDIT_SCORE),
    );
    game.join_order.push(id);
    game.waiting_for_actions.insert(id);
    id
}

/// Seat the moderator through the regular admission path.
pub fn seat_moderator(game: &mut Game) -> ConnectionId {
    let id = Uuid::new_v4();
    game.add_player(id, "TA", true)
        .expect("moderator admission should succeed");
    id
}
