use canon_core::{Continent, ContinentShare, CountMethod, Dashboard, Rgb};
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};

const fn continent_color(continent: Continent) -> Color {
    let Rgb(r, g, b) = continent.color();
    Color::Rgb(r, g, b)
}

pub fn render(dashboard: &Dashboard, f: &mut Frame<'_>) {
    let area = f.area();
    let block = Block::default()
        .title("Films by Country of Origin")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area).inner(Margin::new(1, 1));
    f.render_widget(block, area);

    if dashboard.is_loading() && dashboard.store().is_none() {
        let paragraph = Paragraph::new(Text::from(TextLine::from("Loading countries.json...")))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, inner);
        return;
    }

    if let Some(reason) = dashboard.unavailable_reason() {
        let paragraph = Paragraph::new(Text::from(vec![
            TextLine::from(Span::styled(
                "Country data unavailable",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            TextLine::from(Span::styled(reason.to_string(), Style::default().fg(Color::Gray))),
        ]))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(paragraph, inner);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(9),
            Constraint::Length(1),
        ])
        .split(inner);

    render_header(dashboard, f, main_layout[0]);
    render_country_chart(dashboard, f, main_layout[1]);
    render_breakdown(dashboard, f, main_layout[2]);
    render_footer(f, main_layout[3]);
}

fn render_header(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let summary = dashboard.summary();
    let mut filters = vec![Span::styled(
        summary.filters.clone(),
        Style::default().fg(Color::Yellow),
    )];
    if summary.method == CountMethod::Estimated {
        filters.push(Span::styled(
            "  (estimated from poll totals)",
            Style::default().fg(Color::Magenta),
        ));
    }

    let block = Block::default()
        .title("Overview")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(Text::from(vec![
        TextLine::from(Span::styled(
            summary.headline(),
            Style::default().fg(Color::White),
        )),
        TextLine::from(filters),
    ]))
    .block(block)
    .alignment(Alignment::Left)
    .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn render_country_chart(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let rows = dashboard.chart_rows();
    let block = Block::default()
        .title(format!("Top Countries ({})", rows.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    if rows.is_empty() {
        let paragraph = Paragraph::new("No selected country has films under these filters")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let bars: Vec<Bar<'_>> = rows
        .iter()
        .map(|entry| {
            Bar::default()
                .value(entry.film_count)
                .label(TextLine::from(entry.name.clone()))
                .text_value(format!("{} ({:.1}%)", entry.film_count, entry.percent_of_total))
                .style(Style::default().fg(continent_color(entry.continent)))
                .value_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(continent_color(entry.continent)),
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

fn render_breakdown(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Continental Breakdown")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let shares = dashboard.continent_shares();
    if shares.is_empty() {
        let paragraph = Paragraph::new("No films under these filters")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, inner);
        return;
    }

    let label_width = 16;
    let width = usize::from(inner.width).saturating_sub(label_width + 18).max(1);
    let lines: Vec<TextLine<'_>> = shares
        .iter()
        .map(|share| {
            let color = continent_color(share.continent);
            TextLine::from(vec![
                Span::styled(
                    format!("{:<label_width$}", share.continent.label()),
                    Style::default().fg(color),
                ),
                Span::styled(share_bar(share, width), Style::default().fg(color)),
                Span::raw(format!(
                    "  {} ({:.1}%)",
                    share.total_films, share.percent_of_total
                )),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(Text::from(lines)), inner);
}

/// Filled and empty cells in proportion to the continent's share
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn share_bar(share: &ContinentShare, width: usize) -> String {
    let fill = ((share.percent_of_total / 100.0) * width as f64)
        .round()
        .clamp(0.0, width as f64) as usize;
    format!("{}{}", "█".repeat(fill), "░".repeat(width - fill))
}

fn render_footer(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default().fg(Color::Gray);
    let info = TextLine::from(vec![
        Span::styled("Left/Right", key),
        Span::raw(" poll  "),
        Span::styled("Up/Down", key),
        Span::raw(" rank range  "),
        Span::styled("t", key),
        Span::raw(" top 10  "),
        Span::styled("1-4", key),
        Span::raw(" top 10/15/20/30"),
    ]);
    f.render_widget(
        Paragraph::new(Text::from(info)).alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(percent_of_total: f64) -> ContinentShare {
        ContinentShare {
            continent: Continent::Europe,
            total_films: 1,
            percent_of_total,
        }
    }

    #[test]
    fn share_bar_is_proportional() {
        let bar = share_bar(&share(50.0), 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(bar.chars().count(), 10);
    }

    #[test]
    fn share_bar_never_overflows() {
        assert_eq!(share_bar(&share(100.0), 4), "████");
        assert_eq!(share_bar(&share(0.0), 3), "░░░");
    }
}
