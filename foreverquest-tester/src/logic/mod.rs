pub mod autoplay;
pub mod policy;
pub mod reports;
pub mod seeds;
pub mod tester;

pub use autoplay::{FileConfig, finish_game, play_through};
pub use policy::AnswerStrategy;
pub use seeds::resolve_seed_inputs;
pub use tester::*;
