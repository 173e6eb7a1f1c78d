//! Per-round game-state engine.
//!
//! The engine owns one round's mutable state and is advanced only by the
//! commands on [`QuizEngine`]. Question supply and per-tier budgets are
//! injected through [`QuestionProvider`] and [`DifficultyPolicy`]; timing is
//! driven from outside via `on_timer_tick` and `reveal_elapsed`.

pub mod error;
pub mod policy;
pub mod round;

pub use error::EngineError;
pub use policy::{DifficultyPolicy, DifficultyTier, Policy, StandardPolicy};
pub use round::{
    AnswerOutcome, Phase, QuestionProvider, QuizEngine, Reveal, RoundSnapshot, TerminationReason,
    BONUS_SECONDS, PENALTY_SECONDS,
};
