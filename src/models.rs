use crate::bank::BankSource;
use crate::clock::RoundClock;
use crate::engine::{DifficultyTier, QuizEngine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A multiple-choice question as stored in a bank file.
///
/// `choices` keeps display order; `correct` is matched by membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(rename = "answers")]
    pub choices: Vec<String>,
    pub correct: BTreeSet<String>,
}

impl Question {
    pub fn new<I, S>(prompt: impl Into<String>, choices: Vec<String>, correct: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompt: prompt.into(),
            choices,
            correct: correct.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct.contains(choice)
    }
}

/// One round in progress, as seen by the terminal front end.
///
/// Dropping the session drops its clock, which cancels any pending tick or
/// reveal for the round.
#[derive(Debug)]
pub struct RoundSession {
    pub engine: QuizEngine,
    pub clock: RoundClock,
    pub bank_name: String,
    pub selected_choice: usize,
    pub started_at: chrono::DateTime<chrono::Local>,
}

impl RoundSession {
    pub fn new(engine: QuizEngine, clock: RoundClock, bank_name: impl Into<String>) -> Self {
        Self {
            engine,
            clock,
            bank_name: bank_name.into(),
            selected_choice: 0,
            started_at: chrono::Local::now(),
        }
    }

    pub fn tier(&self) -> DifficultyTier {
        self.engine.tier()
    }
}

pub const TIER_PANEL: usize = 0;
pub const BANK_PANEL: usize = 1;

/// Selection state of the main menu.
#[derive(Debug, Clone)]
pub struct MenuState {
    pub banks: Vec<BankSource>,
    pub selected_tier: usize,
    pub selected_bank: usize,
    pub focused_panel: usize,
    pub status: Option<String>,
}

impl MenuState {
    pub fn new(banks: Vec<BankSource>) -> Self {
        Self {
            banks,
            selected_tier: 0,
            selected_bank: 0,
            focused_panel: TIER_PANEL,
            status: None,
        }
    }

    pub fn tier(&self) -> DifficultyTier {
        DifficultyTier::ALL[self.selected_tier.min(DifficultyTier::ALL.len() - 1)]
    }

    pub fn bank(&self) -> Option<&BankSource> {
        self.banks.get(self.selected_bank)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Quiz,
    QuizQuitConfirm,
    Summary,
}
