use crate::logger;
use crate::models::Question;

use super::{DifficultyPolicy, DifficultyTier, EngineError, Policy};

/// Seconds added to the clock for a correct answer.
pub const BONUS_SECONDS: u32 = 10;
/// Seconds taken off the clock for an incorrect answer (floored at zero).
pub const PENALTY_SECONDS: u32 = 10;

/// Supplies the question list for a tier, optionally pre-shuffled.
pub trait QuestionProvider {
    fn questions_for(&self, tier: DifficultyTier) -> Vec<Question>;
}

impl<P: QuestionProvider + ?Sized> QuestionProvider for &P {
    fn questions_for(&self, tier: DifficultyTier) -> Vec<Question> {
        (**self).questions_for(tier)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    /// Answer submitted, result on screen; waits for `reveal_elapsed`.
    Transitioning,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    TimeExpired,
    ErrorLimitReached,
    SkipsExhausted,
    QuestionsExhausted,
}

impl TerminationReason {
    pub fn describe(self) -> &'static str {
        match self {
            TerminationReason::TimeExpired => "Time is up",
            TerminationReason::ErrorLimitReached => "Too many wrong answers",
            TerminationReason::SkipsExhausted => "No skips left",
            TerminationReason::QuestionsExhausted => "All questions done",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
}

/// The answer being shown while the round is `Transitioning`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub choice: String,
    pub outcome: AnswerOutcome,
}

#[derive(Debug, Clone)]
struct RoundState {
    questions: Vec<Question>,
    cursor: usize,
    score: u32,
    errors: u32,
    skips_remaining: u32,
    time_remaining_seconds: u32,
    phase: Phase,
    termination_reason: Option<TerminationReason>,
    reveal: Option<Reveal>,
}

/// Read-only view of a round, re-read by the front end after every event.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot<'a> {
    pub tier: DifficultyTier,
    pub policy: Policy,
    pub current_question: Option<&'a Question>,
    pub cursor: usize,
    pub total_questions: usize,
    pub score: u32,
    pub errors: u32,
    pub skips_remaining: u32,
    pub time_remaining_seconds: u32,
    pub phase: Phase,
    pub termination_reason: Option<TerminationReason>,
    pub reveal: Option<&'a Reveal>,
}

impl RoundSnapshot<'_> {
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn can_skip(&self) -> bool {
        self.phase == Phase::Active && self.skips_remaining > 0 && self.tier.allows_skips()
    }
}

/// Owns the state of a single round and applies the game rules to it.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    tier: DifficultyTier,
    policy: Policy,
    state: RoundState,
}

impl QuizEngine {
    /// Starts a round for `tier`, resolving its budgets through `policies`.
    pub fn start<P>(
        tier: DifficultyTier,
        questions: Vec<Question>,
        policies: &P,
    ) -> Result<Self, EngineError>
    where
        P: DifficultyPolicy + ?Sized,
    {
        let policy = policies
            .policy_for(tier)
            .ok_or_else(|| EngineError::InvalidTier(tier.to_string()))?;
        Ok(Self::with_policy(tier, policy, questions))
    }

    /// Parses `name` as a tier and starts a round with the provider's questions.
    pub fn start_named<Q, P>(name: &str, provider: &Q, policies: &P) -> Result<Self, EngineError>
    where
        Q: QuestionProvider + ?Sized,
        P: DifficultyPolicy + ?Sized,
    {
        let tier: DifficultyTier = name.parse()?;
        Self::start(tier, provider.questions_for(tier), policies)
    }

    pub fn with_policy(tier: DifficultyTier, policy: Policy, questions: Vec<Question>) -> Self {
        logger::log(&format!(
            "Round started: tier={} questions={} time={}s errors={} skips={}",
            tier,
            questions.len(),
            policy.max_time_seconds,
            policy.max_errors,
            policy.max_skips
        ));

        let mut engine = Self {
            tier,
            policy,
            state: RoundState {
                questions,
                cursor: 0,
                score: 0,
                errors: 0,
                skips_remaining: policy.max_skips,
                time_remaining_seconds: policy.max_time_seconds,
                phase: Phase::Active,
                termination_reason: None,
                reveal: None,
            },
        };
        if engine.state.questions.is_empty() {
            engine.finish(TerminationReason::QuestionsExhausted);
        }
        engine
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn state(&self) -> RoundSnapshot<'_> {
        let s = &self.state;
        RoundSnapshot {
            tier: self.tier,
            policy: self.policy,
            current_question: s.questions.get(s.cursor),
            cursor: s.cursor,
            total_questions: s.questions.len(),
            score: s.score,
            errors: s.errors,
            skips_remaining: s.skips_remaining,
            time_remaining_seconds: s.time_remaining_seconds,
            phase: s.phase,
            termination_reason: s.termination_reason,
            reveal: s.reveal.as_ref(),
        }
    }

    /// One elapsed wall-clock second. Ignored unless the round is `Active`;
    /// returns whether the tick was applied.
    pub fn on_timer_tick(&mut self) -> bool {
        if self.state.phase != Phase::Active {
            return false;
        }
        self.state.time_remaining_seconds = self.state.time_remaining_seconds.saturating_sub(1);
        if self.state.time_remaining_seconds == 0 {
            self.finish(TerminationReason::TimeExpired);
        }
        true
    }

    /// Scores `choice` against the current question and enters the reveal.
    ///
    /// A penalty that drains the clock does not end the round here; the
    /// round ends at the reveal boundary in [`QuizEngine::reveal_elapsed`].
    pub fn answer(&mut self, choice: &str) -> Result<AnswerOutcome, EngineError> {
        if self.state.phase != Phase::Active {
            return Err(EngineError::NotAcceptingInput);
        }
        let question = self
            .state
            .questions
            .get(self.state.cursor)
            .ok_or(EngineError::NotAcceptingInput)?;

        let outcome = if question.is_correct(choice) {
            self.state.score += 1;
            self.state.time_remaining_seconds += BONUS_SECONDS;
            AnswerOutcome::Correct
        } else {
            self.state.errors += 1;
            self.state.time_remaining_seconds =
                self.state.time_remaining_seconds.saturating_sub(PENALTY_SECONDS);
            AnswerOutcome::Incorrect
        };

        self.state.reveal = Some(Reveal {
            choice: choice.to_string(),
            outcome,
        });
        self.state.phase = Phase::Transitioning;
        Ok(outcome)
    }

    /// Ends the reveal pause and advances to the next question.
    pub fn reveal_elapsed(&mut self) -> Result<(), EngineError> {
        if self.state.phase != Phase::Transitioning {
            return Err(EngineError::NotAcceptingInput);
        }
        self.state.reveal = None;
        self.state.cursor += 1;
        match self.termination_check() {
            Some(reason) => self.finish(reason),
            None => self.state.phase = Phase::Active,
        }
        Ok(())
    }

    /// Spends a skip and moves straight to the next question.
    pub fn skip(&mut self) -> Result<(), EngineError> {
        if self.state.phase != Phase::Active
            || self.state.skips_remaining == 0
            || !self.tier.allows_skips()
        {
            return Err(EngineError::NotAcceptingInput);
        }

        self.state.skips_remaining -= 1;
        self.state.cursor += 1;

        let reason = self.termination_check().or_else(|| {
            (self.policy.skips_end_round && self.state.skips_remaining == 0)
                .then_some(TerminationReason::SkipsExhausted)
        });
        if let Some(reason) = reason {
            self.finish(reason);
        }
        Ok(())
    }

    // Error limit beats exhaustion, which beats a clock that hit zero.
    fn termination_check(&self) -> Option<TerminationReason> {
        let s = &self.state;
        if s.errors >= self.policy.max_errors {
            Some(TerminationReason::ErrorLimitReached)
        } else if s.cursor >= s.questions.len() {
            Some(TerminationReason::QuestionsExhausted)
        } else if s.time_remaining_seconds == 0 {
            Some(TerminationReason::TimeExpired)
        } else {
            None
        }
    }

    fn finish(&mut self, reason: TerminationReason) {
        self.state.phase = Phase::Over;
        self.state.termination_reason = Some(reason);
        self.state.reveal = None;
        logger::log(&format!(
            "Round over: tier={} reason={:?} score={} errors={} answered={}/{}",
            self.tier,
            reason,
            self.state.score,
            self.state.errors,
            self.state.cursor,
            self.state.questions.len()
        ));
    }
}
