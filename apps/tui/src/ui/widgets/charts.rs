use crate::app::{App, Focus};
use crate::ui::widgets::tables::scroll_offset;
use canon_core::{Continent, ContinentShare, CountMethod, Rgb};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

pub const fn continent_color(continent: Continent) -> Color {
    let Rgb(r, g, b) = continent.color();
    Color::Rgb(r, g, b)
}

fn panel(title: String, focused: bool) -> Block<'static> {
    let border = if focused { Color::Yellow } else { Color::Cyan };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn centered_message(f: &mut Frame<'_>, area: Rect, block: Block<'_>, message: Text<'_>) {
    let paragraph = Paragraph::new(message)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// "Top Countries" horizontal bar chart, one bar per rendered country,
/// colored by continent
pub fn render_country_chart(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = app.dashboard.chart_rows();
    let title = match app.dashboard.derived().method {
        CountMethod::Exact => format!(" Top Countries ({}) ", rows.len()),
        CountMethod::Estimated => format!(" Top Countries ({}, estimated) ", rows.len()),
    };
    let block = panel(title, app.focus == Focus::Chart);

    if app.dashboard.is_loading() && app.dashboard.store().is_none() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        let throbber = Throbber::default()
            .label("Loading country data...")
            .style(Style::default().fg(Color::Cyan))
            .throbber_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        let mut state = app.throbber.clone();
        let line_area = Rect {
            x: inner.x + 1,
            y: inner.y + inner.height / 2,
            width: inner.width.saturating_sub(2),
            height: 1.min(inner.height),
        };
        f.render_stateful_widget(throbber, line_area, &mut state);
        return;
    }

    if let Some(reason) = app.dashboard.unavailable_reason() {
        let message = Text::from(vec![
            TextLine::from(Span::styled(
                "Country data unavailable",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            TextLine::from(Span::styled(reason.to_string(), Style::default().fg(Color::Gray))),
            TextLine::from(""),
            TextLine::from("Press F5 to retry"),
        ]);
        centered_message(f, area, block, message);
        return;
    }

    if rows.is_empty() {
        let message = Text::from(vec![
            TextLine::from("No selected country has films under these filters."),
            TextLine::from(Span::styled(
                "Press s to choose countries or t for the top 10",
                Style::default().fg(Color::Gray),
            )),
        ]);
        centered_message(f, area, block, message);
        return;
    }

    let visible = block.inner(area).height as usize;
    let offset = scroll_offset(rows.len(), visible, app.chart_index);
    let show_cursor = app.focus == Focus::Chart;

    let bars: Vec<Bar<'_>> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(index, entry)| {
            let selected = show_cursor && index == app.chart_index;
            let label_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if selected { "> " } else { "  " };

            Bar::default()
                .value(entry.film_count)
                .label(TextLine::from(Span::styled(
                    format!("{marker}{}", entry.name),
                    label_style,
                )))
                .text_value(format!("{} ({:.1}%)", entry.film_count, entry.percent_of_total))
                .style(Style::default().fg(continent_color(entry.continent)))
                .value_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(continent_color(entry.continent))
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let max_value = rows
        .iter()
        .map(|entry| entry.film_count)
        .max()
        .unwrap_or(0)
        .max(1);

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(0)
        .bar_width(1);

    f.render_widget(chart, area);
}

/// Proportional strip of continent shares plus a legend
pub fn render_continent_breakdown(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = panel(" Continental Breakdown ".to_string(), false);
    let shares = app.dashboard.continent_shares();

    if shares.is_empty() {
        let message = Text::from(Span::styled(
            "No films under these filters",
            Style::default().fg(Color::Gray),
        ));
        centered_message(f, area, block, message);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    f.render_widget(Paragraph::new(share_strip(&shares, inner.width)), layout[0]);

    let legend: Vec<Span<'_>> = shares
        .iter()
        .flat_map(|share| {
            [
                Span::styled("■ ", Style::default().fg(continent_color(share.continent))),
                Span::styled(
                    share.continent.label(),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!(" {} ({:.1}%)   ", share.total_films, share.percent_of_total),
                    Style::default().fg(Color::Gray),
                ),
            ]
        })
        .collect();

    let legend = Paragraph::new(TextLine::from(legend)).wrap(Wrap { trim: true });
    f.render_widget(legend, layout[2]);
}

/// One colored run per continent, widths proportional to its share
fn share_strip(shares: &[ContinentShare], width: u16) -> TextLine<'static> {
    let widths = strip_widths(shares, usize::from(width));
    let spans: Vec<Span<'static>> = shares
        .iter()
        .zip(widths)
        .filter(|(_, cells)| *cells > 0)
        .map(|(share, cells)| {
            let label = share.continent.abbreviation();
            let text = if cells >= label.len() + 2 {
                format!("{label:^cells$}")
            } else {
                " ".repeat(cells)
            };
            Span::styled(
                text,
                Style::default()
                    .fg(Color::Black)
                    .bg(continent_color(share.continent))
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    TextLine::from(spans)
}

/// Splits `width` cells by share. Rounding leftovers go to the last run so
/// the strip always fills the line.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn strip_widths(shares: &[ContinentShare], width: usize) -> Vec<usize> {
    let total: u64 = shares.iter().map(|share| share.total_films).sum();
    if total == 0 || width == 0 {
        return vec![0; shares.len()];
    }

    let mut widths: Vec<usize> = shares
        .iter()
        .map(|share| (share.total_films as f64 / total as f64 * width as f64).floor() as usize)
        .collect();
    let used: usize = widths.iter().sum();
    if let Some(last) = widths.last_mut() {
        *last += width.saturating_sub(used);
    }
    widths
}
