//! Playing games and learning from them
//!
//! A [`Session`] drives games against an [`Environment`], one submission per
//! [`Session::step`], feeding every outcome back into the vocabulary and
//! persisting progress after each game.

mod environment;
mod play;
mod record;
mod session;

pub use environment::{Environment, SimulatedEnvironment};
pub use play::{Game, GameStatus, StepOutcome};
pub use record::{AttemptRecord, GameRecord, HistorySnapshot, LearningPoint, Statistics};
pub use session::{Session, SessionSnapshot, StepReport};
