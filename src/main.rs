use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use quizer::{
    apply_clock_event, discover_banks, draw_menu, draw_quit_confirmation, draw_quiz,
    draw_summary, handle_menu_input, handle_quiz_input, logger, resume_round, start_round,
    AppConfig, AppState, ClockEvent, DifficultyTier, MenuAction, MenuState, QuestionBank,
    RoundSession, StandardPolicy,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use tokio::time::Instant;

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = AppConfig::from_env();
    logger::init(&config.log_file);
    logger::log(&format!("Quizer starting with {:?}", config));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::log(&format!("Exited with error: {}", e));
    }
    result
}

/// The bank a round was started from, kept for "try again".
struct ActiveBank {
    bank: QuestionBank,
    name: String,
}

async fn run<B: Backend>(terminal: &mut Terminal<B>, config: &AppConfig) -> io::Result<()> {
    let policies = StandardPolicy::new().with_skips_end_round(config.skips_end_round);
    let mut app_state = AppState::Menu;
    let mut menu = MenuState::new(discover_banks(&config.bank_dir));
    let mut active_bank: Option<ActiveBank> = None;
    let mut round: Option<RoundSession> = None;
    let mut events = EventStream::new();

    loop {
        terminal.draw(|f| match app_state {
            AppState::Menu => draw_menu(f, &menu, &policies),
            AppState::Quiz => {
                if let Some(session) = &round {
                    draw_quiz(f, session);
                }
            }
            AppState::QuizQuitConfirm => draw_quit_confirmation(f),
            AppState::Summary => {
                if let Some(session) = &round {
                    draw_summary(f, session);
                }
            }
        })?;

        let clock_running = round
            .as_ref()
            .is_some_and(|session| !session.engine.state().is_over());

        tokio::select! {
            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    break;
                };
                let Event::Key(key) = event? else {
                    continue;
                };
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    break;
                }

                match app_state {
                    AppState::Menu => match handle_menu_input(&mut menu, key) {
                        MenuAction::Start => {
                            active_bank = load_selected_bank(&mut menu);
                            if let Some(active) = &active_bank {
                                round = begin_round(menu.tier(), active, &policies, config, &mut menu);
                            }
                            if let Some(session) = &round {
                                resume_round(session, &mut app_state);
                            }
                        }
                        MenuAction::Quit => break,
                        MenuAction::None => {}
                    },
                    AppState::Quiz => {
                        if let Some(session) = round.as_mut()
                            && let Err(e) = handle_quiz_input(session, key, &mut app_state, Instant::now())
                        {
                            logger::log(&format!("Ignored {:?}: {}", key.code, e));
                        }
                    }
                    AppState::QuizQuitConfirm => match key.code {
                        KeyCode::Char('y') => {
                            logger::log("Round abandoned");
                            round = None;
                            app_state = AppState::Menu;
                        }
                        KeyCode::Char('n') | KeyCode::Esc => {
                            if let Some(session) = &round {
                                resume_round(session, &mut app_state);
                            }
                        }
                        _ => {}
                    },
                    AppState::Summary => match key.code {
                        KeyCode::Char('r') => {
                            let tier = round.as_ref().map(RoundSession::tier);
                            round = None;
                            if let (Some(tier), Some(active)) = (tier, &active_bank) {
                                round = begin_round(tier, active, &policies, config, &mut menu);
                            }
                            match &round {
                                Some(session) => resume_round(session, &mut app_state),
                                None => app_state = AppState::Menu,
                            }
                        }
                        KeyCode::Char('m') => {
                            round = None;
                            app_state = AppState::Menu;
                        }
                        KeyCode::Esc => break,
                        _ => {}
                    },
                }
            }
            clock_event = next_clock_event(&mut round), if clock_running => {
                if let Some(session) = round.as_mut() {
                    apply_clock_event(session, clock_event, &mut app_state);
                }
            }
        }
    }

    Ok(())
}

async fn next_clock_event(round: &mut Option<RoundSession>) -> ClockEvent {
    match round {
        Some(session) => session.clock.wait().await,
        None => std::future::pending().await,
    }
}

fn load_selected_bank(menu: &mut MenuState) -> Option<ActiveBank> {
    let source = menu.bank()?.clone();
    match source.load() {
        Ok(bank) => {
            menu.status = None;
            Some(ActiveBank {
                bank,
                name: source.name(),
            })
        }
        Err(e) => {
            logger::log(&format!("Failed to load bank {}: {}", source.name(), e));
            menu.status = Some(format!("{}: {}", source.name(), e));
            None
        }
    }
}

fn begin_round(
    tier: DifficultyTier,
    active: &ActiveBank,
    policies: &StandardPolicy,
    config: &AppConfig,
    menu: &mut MenuState,
) -> Option<RoundSession> {
    match start_round(tier, &active.bank, &active.name, policies, config, Instant::now()) {
        Ok(session) => Some(session),
        Err(e) => {
            logger::log(&format!("Failed to start {} round: {}", tier, e));
            menu.status = Some(e.to_string());
            None
        }
    }
}
