use crate::models::RoundSession;
use crate::ui::key_span;
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::format_clock;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const STARTED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn draw_summary(f: &mut Frame, session: &RoundSession) {
    let layout = calculate_summary_chunks(f.area());
    let state = session.engine.state();

    let title_text = format!("Game Over - {} ({})", state.tier.label(), session.bank_name);
    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let reason = state
        .termination_reason
        .map_or("Round abandoned", |reason| reason.describe());

    let mut summary_text = Text::default();
    summary_text.push_line(Line::from(Span::styled(
        reason,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    summary_text.push_line(Line::from(""));
    summary_text.push_line(Line::from(vec![
        Span::from("Your Score: "),
        Span::styled(
            state.score.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    summary_text.push_line(Line::from(format!(
        "Errors: {} / {}",
        state.errors, state.policy.max_errors
    )));
    summary_text.push_line(Line::from(format!(
        "Questions seen: {} / {}",
        state.cursor, state.total_questions
    )));
    if state.tier.allows_skips() {
        summary_text.push_line(Line::from(format!(
            "Skips left: {} / {}",
            state.skips_remaining, state.policy.max_skips
        )));
    }
    summary_text.push_line(Line::from(format!(
        "Time left: {}",
        format_clock(state.time_remaining_seconds)
    )));
    summary_text.push_line(Line::from(""));
    summary_text.push_line(Line::from(Span::styled(
        format!("Started {}", session.started_at.format(STARTED_AT_FORMAT)),
        Style::default().fg(Color::DarkGray),
    )));

    let summary = Paragraph::new(summary_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, layout.content_area);

    let help_text = vec![Line::from(vec![
        key_span("r"),
        Span::from(" Try Again  "),
        key_span("m"),
        Span::from(" Main Menu  "),
        key_span("Esc"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
