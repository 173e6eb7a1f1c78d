use crate::bank::{Shuffled, QuestionBank};
use crate::clock::{ClockEvent, RoundClock};
use crate::config::AppConfig;
use crate::engine::{
    DifficultyPolicy, DifficultyTier, EngineError, QuestionProvider, QuizEngine,
};
use crate::logger;
use crate::models::{AppState, BANK_PANEL, MenuState, RoundSession, TIER_PANEL};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    Start,
    Quit,
}

pub fn handle_menu_input(menu: &mut MenuState, key: KeyEvent) -> MenuAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => MenuAction::Quit,
        KeyCode::Esc => MenuAction::Quit,
        KeyCode::Char('1') => {
            menu.focused_panel = TIER_PANEL;
            MenuAction::None
        }
        KeyCode::Char('2') => {
            menu.focused_panel = BANK_PANEL;
            MenuAction::None
        }
        KeyCode::Up => {
            if menu.focused_panel == TIER_PANEL {
                menu.selected_tier = menu.selected_tier.saturating_sub(1);
            } else {
                menu.selected_bank = menu.selected_bank.saturating_sub(1);
            }
            MenuAction::None
        }
        KeyCode::Down => {
            if menu.focused_panel == TIER_PANEL {
                if menu.selected_tier < DifficultyTier::ALL.len() - 1 {
                    menu.selected_tier += 1;
                }
            } else if menu.selected_bank < menu.banks.len().saturating_sub(1) {
                menu.selected_bank += 1;
            }
            MenuAction::None
        }
        KeyCode::Enter => {
            if menu.bank().is_some() {
                MenuAction::Start
            } else {
                MenuAction::None
            }
        }
        _ => MenuAction::None,
    }
}

/// Builds a fresh round: questions from `bank` (shuffled if configured) and
/// budgets from `policies`.
pub fn start_round<P>(
    tier: DifficultyTier,
    bank: &QuestionBank,
    bank_name: &str,
    policies: &P,
    config: &AppConfig,
    now: Instant,
) -> Result<RoundSession, EngineError>
where
    P: DifficultyPolicy + ?Sized,
{
    let questions = if config.shuffle {
        Shuffled(bank).questions_for(tier)
    } else {
        bank.questions_for(tier)
    };
    let engine = QuizEngine::start(tier, questions, policies)?;
    let clock = RoundClock::new(now, config.reveal_delay);
    Ok(RoundSession::new(engine, clock, bank_name))
}

pub fn handle_quiz_input(
    session: &mut RoundSession,
    key: KeyEvent,
    app_state: &mut AppState,
    now: Instant,
) -> Result<(), EngineError> {
    let result = match key.code {
        KeyCode::Esc => {
            *app_state = AppState::QuizQuitConfirm;
            Ok(())
        }
        KeyCode::Up => {
            session.selected_choice = session.selected_choice.saturating_sub(1);
            Ok(())
        }
        KeyCode::Down => {
            let choices = current_choice_count(session);
            if session.selected_choice < choices.saturating_sub(1) {
                session.selected_choice += 1;
            }
            Ok(())
        }
        KeyCode::Enter => answer_choice(session, session.selected_choice, now),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if index < current_choice_count(session) {
                let answered = answer_choice(session, index, now);
                if answered.is_ok() {
                    session.selected_choice = index;
                }
                answered
            } else {
                Ok(())
            }
        }
        KeyCode::Char('s') | KeyCode::Char('S') => {
            let skipped = session.engine.skip();
            if skipped.is_ok() {
                session.selected_choice = 0;
            }
            skipped
        }
        _ => Ok(()),
    };

    if session.engine.state().is_over() {
        *app_state = AppState::Summary;
    }
    result
}

/// Feeds one clock event to the engine.
pub fn apply_clock_event(session: &mut RoundSession, event: ClockEvent, app_state: &mut AppState) {
    match event {
        ClockEvent::Tick => {
            session.engine.on_timer_tick();
        }
        ClockEvent::RevealElapsed => {
            if session.engine.reveal_elapsed().is_ok() {
                session.selected_choice = 0;
            }
        }
    }

    if session.engine.state().is_over() && *app_state != AppState::QuizQuitConfirm {
        *app_state = AppState::Summary;
    }
}

/// Leaves the quiz-quit confirmation, landing on the summary if the round
/// ended while the dialog was open.
pub fn resume_round(session: &RoundSession, app_state: &mut AppState) {
    *app_state = if session.engine.state().is_over() {
        AppState::Summary
    } else {
        AppState::Quiz
    };
}

fn current_choice_count(session: &RoundSession) -> usize {
    session
        .engine
        .state()
        .current_question
        .map_or(0, |q| q.choices.len())
}

fn answer_choice(
    session: &mut RoundSession,
    index: usize,
    now: Instant,
) -> Result<(), EngineError> {
    let choice = session
        .engine
        .state()
        .current_question
        .and_then(|q| q.choices.get(index))
        .cloned()
        .ok_or(EngineError::NotAcceptingInput)?;

    let outcome = session.engine.answer(&choice)?;
    logger::log(&format!(
        "Answered question {} with {:?}: {:?}",
        session.engine.state().cursor + 1,
        choice,
        outcome
    ));
    session.clock.schedule_reveal(now);
    Ok(())
}
