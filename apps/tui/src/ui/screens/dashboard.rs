use crate::app::{App, Focus};
use crate::ui::widgets::charts::{
    continent_color, render_continent_breakdown, render_country_chart,
};
use canon_core::{Continent, CountMethod, PollSelector, RankRange};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Banner
            Constraint::Min(12),   // Sidebar and charts
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_banner(app, f, main_layout[0]);
    render_content(app, f, main_layout[1]);
    render_status_section(app, f, main_layout[2]);
    render_shortcuts(f, main_layout[3]);
}

fn render_banner(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("== Films by Country of Origin ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let summary = app.dashboard.summary();
    let headline = if app.dashboard.is_loading() && app.dashboard.store().is_none() {
        Span::styled("Loading country data...", Style::default().fg(Color::Gray))
    } else {
        Span::styled(
            summary.headline(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    };

    let mut filter_line = vec![
        Span::styled("Filters: ", Style::default().fg(Color::Gray)),
        Span::styled(summary.filters.clone(), Style::default().fg(Color::Yellow)),
    ];
    if summary.method == CountMethod::Estimated {
        filter_line.push(Span::styled(
            "  (estimated from poll totals)",
            Style::default().fg(Color::Magenta),
        ));
    }

    let paragraph = Paragraph::new(Text::from(vec![
        TextLine::from(headline),
        TextLine::from(filter_line),
    ]))
    .block(block)
    .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

#[allow(clippy::cast_possible_truncation)]
fn render_content(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(30)])
        .split(area);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(PollSelector::OPTIONS.len() as u16 + 2),
            Constraint::Length(RankRange::OPTIONS.len() as u16 + 2),
            Constraint::Min(0),
        ])
        .split(columns[0]);

    let poll_labels: Vec<String> = PollSelector::OPTIONS.iter().map(|p| p.label()).collect();
    render_option_list(
        f,
        sidebar[0],
        " Poll ",
        &poll_labels,
        app.dashboard.filters().poll.index(),
        app.focus == Focus::Poll,
    );

    let rank_labels: Vec<String> = RankRange::OPTIONS
        .iter()
        .map(|r| r.label().to_string())
        .collect();
    render_option_list(
        f,
        sidebar[1],
        " Rank Range ",
        &rank_labels,
        app.dashboard.filters().rank.index(),
        app.focus == Focus::Rank,
    );

    render_legend(f, sidebar[2]);

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(5)])
        .split(columns[1]);

    render_country_chart(app, f, charts[0]);
    render_continent_breakdown(app, f, charts[1]);
}

fn render_option_list(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    labels: &[String],
    active: usize,
    focused: bool,
) {
    let border = if focused { Color::Yellow } else { Color::Cyan };
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let lines: Vec<TextLine<'_>> = labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            if index == active {
                TextLine::from(Span::styled(
                    format!("> {label}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                TextLine::from(Span::styled(
                    format!("  {label}"),
                    Style::default().fg(Color::Gray),
                ))
            }
        })
        .collect();

    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn render_legend(f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Continents ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines: Vec<TextLine<'_>> = Continent::ALL
        .iter()
        .map(|continent| {
            TextLine::from(vec![
                Span::styled("■ ", Style::default().fg(continent_color(*continent))),
                Span::styled(continent.label(), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status_paragraph = Paragraph::new(Text::from(Span::styled(
        app.status_message.as_str(),
        style,
    )))
    .block(status_block)
    .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::Gray);

    let shortcuts = TextLine::from(vec![
        Span::styled("Tab", key),
        Span::styled(": Focus | ", text),
        Span::styled("p/r", key),
        Span::styled(": Poll/Rank | ", text),
        Span::styled("s", key),
        Span::styled(": Select countries | ", text),
        Span::styled("t", key),
        Span::styled(": Top 10 | ", text),
        Span::styled("F5", key),
        Span::styled(": Reload | ", text),
        Span::styled("F1", key),
        Span::styled(": Help | ", text),
        Span::styled("q", key),
        Span::styled(": Quit", text),
    ]);

    f.render_widget(
        Paragraph::new(shortcuts).alignment(Alignment::Center),
        area,
    );
}
