pub mod bank;
pub mod clock;
pub mod config;
pub mod engine;
pub mod logger;
pub mod models;
pub mod session;
pub mod ui;
pub mod utils;

mod ui_tests;

// Re-exports for convenience
pub use bank::{discover_banks, BankError, BankSource, QuestionBank, Shuffled};
pub use clock::{ClockEvent, RoundClock};
pub use config::AppConfig;
pub use engine::{
    DifficultyPolicy, DifficultyTier, EngineError, Phase, Policy, QuestionProvider, QuizEngine,
    RoundSnapshot, StandardPolicy, TerminationReason,
};
pub use models::{AppState, MenuState, Question, RoundSession};
pub use session::{
    apply_clock_event, handle_menu_input, handle_quiz_input, resume_round, start_round, MenuAction,
};
pub use ui::{draw_menu, draw_quit_confirmation, draw_quiz, draw_summary};
