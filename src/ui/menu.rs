use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::key_span;
use crate::engine::{DifficultyPolicy, DifficultyTier, Policy};
use crate::models::{BANK_PANEL, MenuState, TIER_PANEL};
use crate::ui::layout::calculate_menu_chunks;
use crate::utils::{format_clock, truncate_string};

fn format_policy(policy: &Policy) -> String {
    let skips = if policy.max_skips == 0 {
        "no skips".to_string()
    } else {
        format!("{} skips", policy.max_skips)
    };
    format!(
        "{} - {} errors - {}",
        format_clock(policy.max_time_seconds),
        policy.max_errors,
        skips
    )
}

fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let (title_style, border_style) = if focused {
        (
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Cyan),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(title, title_style))
}

fn selected_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub fn draw_menu(f: &mut Frame, menu: &MenuState, policies: &dyn DifficultyPolicy) {
    let layout = calculate_menu_chunks(f.area());

    let title = Paragraph::new("Quizer")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.title_area);

    let tier_focused = menu.focused_panel == TIER_PANEL;
    let tier_items: Vec<ListItem> = DifficultyTier::ALL
        .iter()
        .enumerate()
        .map(|(i, tier)| {
            let budget = policies
                .policy_for(*tier)
                .map(|policy| format_policy(&policy))
                .unwrap_or_else(|| "unavailable".to_string());
            let style = selected_style(i == menu.selected_tier && tier_focused);
            ListItem::new(vec![
                Line::from(Span::styled(tier.label(), style)),
                Line::from(Span::styled(
                    format!("  {}", budget),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    let tier_list = List::new(tier_items).block(panel_block("[1] Difficulty", tier_focused));
    f.render_widget(tier_list, layout.tier_area);

    let bank_focused = menu.focused_panel == BANK_PANEL;
    let name_width = layout.bank_area.width.saturating_sub(2) as usize;
    let bank_items: Vec<ListItem> = if menu.banks.is_empty() {
        vec![ListItem::new("No question banks found").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        menu.banks
            .iter()
            .enumerate()
            .map(|(i, bank)| {
                ListItem::new(truncate_string(&bank.name(), name_width))
                    .style(selected_style(i == menu.selected_bank && bank_focused))
            })
            .collect()
    };
    let bank_list = List::new(bank_items).block(panel_block("[2] Question Banks", bank_focused));
    f.render_widget(bank_list, layout.bank_area);

    let status_line = match &menu.status {
        Some(status) => Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(menu.tier().description()),
    };
    let status = Paragraph::new(status_line)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, layout.status_area);

    let help_text = vec![Line::from(vec![
        key_span("1/2"),
        Span::from(" Focus Panel  "),
        key_span("↑/↓"),
        Span::from(" Navigate  "),
        key_span("Enter"),
        Span::from(" Start  "),
        key_span("Esc/Ctrl+C"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
