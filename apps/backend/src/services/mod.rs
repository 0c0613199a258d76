pub mod game_flow;
pub mod sessions;
