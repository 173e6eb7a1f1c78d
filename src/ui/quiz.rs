use crate::engine::{AnswerOutcome, BONUS_SECONDS, PENALTY_SECONDS, Phase, RoundSnapshot};
use crate::models::{Question, RoundSession};
use crate::ui::key_span;
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::{choice_key, format_clock};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const LOW_TIME_SECONDS: u32 = 30;

fn header_line(state: &RoundSnapshot<'_>, bank_name: &str) -> Line<'static> {
    let number = (state.cursor + 1).min(state.total_questions);
    let time_style = if state.time_remaining_seconds <= LOW_TIME_SECONDS {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let skips = if state.tier.allows_skips() {
        state.skips_remaining.to_string()
    } else {
        "-".to_string()
    };

    Line::from(vec![
        Span::styled(
            format!("{} / {}", number, state.total_questions),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(format!("  {} ({})  ", state.tier.label(), bank_name)),
        Span::from("Time "),
        Span::styled(format_clock(state.time_remaining_seconds), time_style),
        Span::from(format!(
            "  Score {}  Errors {}/{}  Skips {}",
            state.score, state.errors, state.policy.max_errors, skips
        )),
    ])
}

fn choice_style(state: &RoundSnapshot<'_>, question: &Question, choice: &str, highlighted: bool) -> Style {
    match state.reveal {
        Some(reveal) if question.is_correct(choice) => Style::default()
            .fg(Color::Green)
            .add_modifier(if reveal.choice == choice {
                Modifier::BOLD | Modifier::REVERSED
            } else {
                Modifier::BOLD
            }),
        Some(reveal) if reveal.choice == choice => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        Some(_) => Style::default().fg(Color::DarkGray),
        None if highlighted => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        None => Style::default(),
    }
}

fn choice_lines(state: &RoundSnapshot<'_>, question: &Question, selected: usize) -> Text<'static> {
    let mut text = Text::default();
    for (i, choice) in question.choices.iter().enumerate() {
        let highlighted = i == selected && state.phase == Phase::Active;
        let marker = if highlighted { ">" } else { " " };
        let key = choice_key(i).map_or_else(|| " ".to_string(), |k| k.to_string());
        text.push_line(Line::from(Span::styled(
            format!("{} [{}] {}", marker, key, choice),
            choice_style(state, question, choice, highlighted),
        )));
        text.push_line(Line::from(""));
    }
    text
}

pub fn draw_quiz(f: &mut Frame, session: &RoundSession) {
    let layout = calculate_quiz_chunks(f.area());
    let state = session.engine.state();

    let header = Paragraph::new(header_line(&state, &session.bank_name))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let Some(question) = state.current_question else {
        return;
    };

    let prompt = Paragraph::new(question.prompt.as_str())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(prompt, layout.question_area);

    let choices_title = match state.reveal {
        Some(reveal) if reveal.outcome == AnswerOutcome::Correct => {
            format!("Correct! +{}s", BONUS_SECONDS)
        }
        Some(_) => format!("Wrong! -{}s", PENALTY_SECONDS),
        None => "Answers".to_string(),
    };
    let choices = Paragraph::new(choice_lines(&state, question, session.selected_choice))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(choices_title));
    f.render_widget(choices, layout.choices_area);

    let mut basic_spans = vec![
        key_span("1-9"),
        Span::from(" Answer  "),
        key_span("↑/↓"),
        Span::from(" Select  "),
        key_span("Enter"),
        Span::from(" Confirm  "),
    ];
    if state.can_skip() {
        basic_spans.extend([key_span("s"), Span::from(" Skip  ")]);
    }
    basic_spans.extend([key_span("Esc"), Span::from(" Quit to Menu")]);

    let help_text = vec![
        Line::from(basic_spans),
        Line::from(vec![key_span("Ctrl+C"), Span::from(" Exit App")]),
    ];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quit to Menu")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Abandon this round and return to the menu? The clock keeps running.")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Return to Menu)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)  "),
        key_span("Ctrl+C"),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
