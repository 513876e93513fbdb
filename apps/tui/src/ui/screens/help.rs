use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use canon_core::MAX_SELECTION;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_help_popup(f: &mut Frame<'_>) {
    let popup_area = centered_rect(80, 80, f.area());
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });
    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(TextLine::from(Span::styled(
        "Press F1 or Esc to close",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    f.render_widget(hint, hint_area);
}

fn key_line(key: &'static str, description: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            format!("  {key:<12}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(description),
    ])
}

fn heading(text: &'static str) -> TextLine<'static> {
    TextLine::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Films by Country of Origin",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Where the films named in the Sight & Sound critics' polls were made, by poll and rank range.",
        ),
        TextLine::from(""),
        heading("Dashboard:"),
        key_line("Tab", "Move focus between Poll, Rank Range and the chart"),
        key_line("Up/Down", "Change the focused filter or move through the chart"),
        key_line("p / P", "Next / previous poll"),
        key_line("r / R", "Next / previous rank range"),
        key_line("t", "Show the top 10 countries"),
        key_line("1-4", "Show the top 10, 15, 20 or 30 countries"),
        key_line("s / Enter", "Choose countries"),
        key_line("F5", "Reload the country data"),
        key_line("F1", "Toggle this help"),
        key_line("q", "Quit"),
        TextLine::from(""),
        heading("Country selector:"),
        key_line("typing", "Search countries and continents"),
        key_line("Up/Down", "Move"),
        key_line("Space", "Toggle a country, or every country of a continent"),
        key_line("Left/Right", "Collapse / expand a continent"),
        key_line("Ctrl-A", "Apply the selection"),
        key_line("Ctrl-X", "Clear all"),
        key_line("Esc", "Cancel"),
        TextLine::from(""),
        TextLine::from(format!(
            "At most {MAX_SELECTION} countries can be shown. Counts marked estimated are derived from poll totals."
        )),
        TextLine::from(""),
        heading("CLI Options:"),
    ];

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}
