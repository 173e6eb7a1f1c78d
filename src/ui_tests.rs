#[cfg(test)]
mod ui_render_tests {
    use crate::bank::{BankSource, QuestionBank};
    use crate::config::AppConfig;
    use crate::engine::{DifficultyTier, StandardPolicy};
    use crate::models::{MenuState, RoundSession};
    use crate::session::start_round;
    use crate::ui::{draw_menu, draw_quit_confirmation, draw_quiz, draw_summary};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::path::PathBuf;
    use tokio::time::Instant;

    const BANK: &str = r#"{
        "easy": [
            {"question": "Which planet is red?", "answers": ["Venus", "Mars"], "correct": ["Mars"]},
            {"question": "Second question", "answers": ["x", "y"], "correct": ["x"]}
        ],
        "hardcore": [
            {"question": "Only question", "answers": ["a", "b"], "correct": ["a"]}
        ]
    }"#;

    fn terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(100, 40)).unwrap()
    }

    /// Flattens the rendered buffer into one line of text per row.
    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn session(tier: DifficultyTier) -> RoundSession {
        let bank = QuestionBank::parse(BANK).unwrap();
        let config = AppConfig {
            shuffle: false,
            ..AppConfig::default()
        };
        start_round(tier, &bank, "Space", &StandardPolicy::new(), &config, Instant::now()).unwrap()
    }

    #[test]
    fn test_menu_lists_tiers_and_banks() {
        let mut terminal = terminal();
        let menu = MenuState::new(vec![
            BankSource::Builtin,
            BankSource::File(PathBuf::from("questions/space.json")),
        ]);

        terminal
            .draw(|f| draw_menu(f, &menu, &StandardPolicy::new()))
            .unwrap();
        let text = screen_text(&terminal);

        for label in ["Easy", "Normal", "Hard", "Hardcore"] {
            assert!(text.contains(label), "menu is missing {label}");
        }
        assert!(text.contains("9:00 - 8 errors - 8 skips"));
        assert!(text.contains("Built-in"));
        assert!(text.contains("space"));
        assert!(text.contains(DifficultyTier::Easy.description()));
    }

    #[test]
    fn test_menu_shows_status_message() {
        let mut terminal = terminal();
        let mut menu = MenuState::new(vec![BankSource::Builtin]);
        menu.status = Some("Invalid question bank".to_string());

        terminal
            .draw(|f| draw_menu(f, &menu, &StandardPolicy::new()))
            .unwrap();
        assert!(screen_text(&terminal).contains("Invalid question bank"));
    }

    #[test]
    fn test_quiz_screen_shows_question_and_counters() {
        let mut terminal = terminal();
        let session = session(DifficultyTier::Easy);

        terminal.draw(|f| draw_quiz(f, &session)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("1 / 2"));
        assert!(text.contains("Which planet is red?"));
        assert!(text.contains("[1] Venus"));
        assert!(text.contains("[2] Mars"));
        assert!(text.contains("9:00"));
        assert!(text.contains("Errors 0/8"));
        assert!(text.contains("Skips 8"));
        assert!(text.contains("Skip"));
    }

    #[test]
    fn test_quiz_screen_during_reveal() {
        let mut terminal = terminal();
        let mut session = session(DifficultyTier::Easy);
        session.engine.answer("Venus").unwrap();

        terminal.draw(|f| draw_quiz(f, &session)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Wrong! -10s"));
        assert!(text.contains("Errors 1/8"));
        assert!(text.contains("8:50"));
    }

    #[test]
    fn test_hardcore_screen_hides_skip() {
        let mut terminal = terminal();
        let session = session(DifficultyTier::Hardcore);

        terminal.draw(|f| draw_quiz(f, &session)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Skips -"));
        assert!(!text.contains(" Skip "));
    }

    #[test]
    fn test_summary_shows_result() {
        let mut terminal = terminal();
        let mut session = session(DifficultyTier::Hardcore);
        session.engine.answer("a").unwrap();
        session.engine.reveal_elapsed().unwrap();

        terminal.draw(|f| draw_summary(f, &session)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Game Over - Hardcore (Space)"));
        assert!(text.contains("All questions done"));
        assert!(text.contains("Your Score: 1"));
        assert!(text.contains("Time left: 2:10"));
        assert!(text.contains("Try Again"));
    }

    #[test]
    fn test_quit_confirmation_renders() {
        let mut terminal = terminal();
        terminal.draw(draw_quit_confirmation).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Quit to Menu"));
        assert!(text.contains("Continue Quiz"));
    }
}
