use crate::app::selector::SelectorRow;
use crate::app::App;
use crate::ui::widgets::charts::continent_color;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use crate::ui::widgets::tables::scroll_offset;
use canon_core::MAX_SELECTION;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_selector(app: &App, f: &mut Frame<'_>) {
    let Some(dialog) = app.dashboard.selection().dialog() else {
        return;
    };

    let popup_area = centered_rect(70, 85, f.area());
    f.render_widget(ClearWidget, popup_area);

    let count = dialog.pending_count();
    let block = Block::default()
        .title(format!(" Select Countries ({count}/{MAX_SELECTION}) "))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Min(3),    // Tree
            Constraint::Length(2), // Footer
        ])
        .split(inner);

    let search = Paragraph::new(TextLine::from(vec![
        Span::styled(dialog.search_query().to_string(), Style::default().fg(Color::White)),
        Span::styled("█", Style::default().fg(Color::Gray)),
    ]))
    .block(
        Block::default()
            .title(" Search countries or continents ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(search, layout[0]);

    render_tree(app, f, layout[1]);
    render_footer(count, dialog.is_full(), f, layout[2]);
}

fn render_tree(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = app.selector_rows();
    if rows.is_empty() {
        let paragraph = Paragraph::new("No countries match your search")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let visible = area.height as usize;
    let offset = scroll_offset(rows.len(), visible, app.selector_index);

    let lines: Vec<TextLine<'_>> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(index, row)| tree_line(row, index == app.selector_index))
        .collect();

    f.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn tree_line(row: &SelectorRow, is_cursor: bool) -> TextLine<'static> {
    let marker = if is_cursor { "> " } else { "  " };
    let cursor_style = if is_cursor {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    match row {
        SelectorRow::Continent {
            continent,
            countries,
            selected,
            total_films,
            expanded,
        } => {
            let arrow = if *expanded { "▼" } else { "▶" };
            let check = if selected == countries {
                "[x]"
            } else if *selected > 0 {
                "[-]"
            } else {
                "[ ]"
            };
            TextLine::from(vec![
                Span::styled(format!("{marker}{arrow} {check} "), cursor_style),
                Span::styled(
                    continent.label(),
                    Style::default()
                        .fg(continent_color(*continent))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({selected}/{countries} selected, {total_films} films)"),
                    Style::default().fg(Color::Gray),
                ),
            ])
        }
        SelectorRow::Country {
            name,
            film_count,
            pending,
            ..
        } => {
            let check = if *pending { "[x]" } else { "[ ]" };
            TextLine::from(vec![
                Span::styled(format!("{marker}      {check} "), cursor_style),
                Span::styled(name.clone(), cursor_style),
                Span::styled(format!("  {film_count}"), Style::default().fg(Color::Gray)),
            ])
        }
    }
}

fn render_footer(count: usize, full: bool, f: &mut Frame<'_>, area: Rect) {
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::Gray);

    let state = if full {
        Span::styled(
            format!("Maximum reached ({count}/{MAX_SELECTION})"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else if count == 0 {
        Span::styled("Select at least one country", Style::default().fg(Color::Red))
    } else {
        Span::styled(format!("{count} selected"), Style::default().fg(Color::Green))
    };

    let keys = TextLine::from(vec![
        Span::styled("Space", key),
        Span::styled(": Toggle | ", text),
        Span::styled("Left/Right", key),
        Span::styled(": Collapse/Expand | ", text),
        Span::styled("Ctrl-A", key),
        Span::styled(": Apply | ", text),
        Span::styled("Ctrl-X", key),
        Span::styled(": Clear All | ", text),
        Span::styled("Esc", key),
        Span::styled(": Cancel", text),
    ]);

    let paragraph = Paragraph::new(Text::from(vec![TextLine::from(state), keys]))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
