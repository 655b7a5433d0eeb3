//! UI rendering

use super::app::App;
use crate::style::category_style;
use prompts_catalog::Template;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

const PREVIEW_CHARS: usize = 150;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(1), // Search input
            Constraint::Length(1), // Category bar
            Constraint::Length(1), // Stats
            Constraint::Min(5),    // Results (+ detail drawer)
            Constraint::Length(1), // Toast line
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_search_input(frame, app, chunks[1]);
    render_category_bar(frame, app, chunks[2]);
    render_stats(frame, app, chunks[3]);

    if app.detail_open {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[4]);
        render_results(frame, app, body[0]);
        render_detail(frame, app, body[1]);
    } else {
        render_results(frame, app, chunks[4]);
    }

    render_toast_line(frame, app, chunks[5]);
    render_status_bar(frame, app, chunks[6]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            " Prompt Engineering Templates",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " Production-tested prompts. Copy, customize, deploy.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Search input with a block cursor and a placeholder when empty
fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let text_style = Style::default().fg(Color::White);
    let cursor_style = Style::default().fg(Color::White).bg(Color::DarkGray);

    let input = &app.search_input;
    let (before, after) = input.text.split_at(input.cursor);
    let cursor_char = after.chars().next();
    let after_cursor = cursor_char.map_or("", |c| &after[c.len_utf8()..]);

    let mut spans = vec![Span::styled(" ▌ ", Style::default().fg(Color::Yellow))];
    if !before.is_empty() {
        spans.push(Span::styled(before, text_style));
    }
    match cursor_char {
        Some(c) => spans.push(Span::styled(c.to_string(), cursor_style)),
        None => spans.push(Span::styled("█", text_style)),
    }
    if !after_cursor.is_empty() {
        spans.push(Span::styled(after_cursor, text_style));
    }
    if input.text.is_empty() {
        spans.push(Span::styled(
            "Search prompts...",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_category_bar(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.active_category.as_deref();
    let inactive = Style::default().fg(Color::Gray);

    let mut spans = vec![Span::raw(" ")];
    let all_style = if active.is_none() {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        inactive
    };
    spans.push(Span::styled(" All ", all_style));

    for category in &app.categories {
        let style = category_style(category);
        let span_style = if active == Some(*category) {
            Style::default()
                .fg(Color::Black)
                .bg(style.color)
                .add_modifier(Modifier::BOLD)
        } else {
            inactive
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {category} "), span_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let line = Line::from(vec![
        Span::styled(" Showing ", dim),
        Span::styled(
            app.results.len().to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" of {} templates", app.catalog().len()), dim),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Gray).add_modifier(Modifier::DIM))
        .title(" Templates ");

    if app.results.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let empty = Paragraph::new("No templates found. Try a different search.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = app.results.iter().copied().map(result_item).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 48)))
        .highlight_symbol("▌");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn result_item(template: &Template) -> ListItem<'static> {
    let style = category_style(&template.category);
    let dim = Style::default().fg(Color::DarkGray);

    let title = Line::from(vec![
        Span::styled(format!("{:<3} ", style.glyph), Style::default().fg(style.color)),
        Span::styled(
            template.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", template.category),
            Style::default().fg(style.color).add_modifier(Modifier::DIM),
        ),
    ]);
    let description = Line::from(Span::styled(
        format!("    {}", template.description),
        Style::default().fg(Color::Gray),
    ));
    let preview = Line::from(Span::styled(
        format!("    {}", prompt_preview(&template.prompt, PREVIEW_CHARS)),
        dim,
    ));

    ListItem::new(vec![title, description, preview])
}

/// First `max_chars` characters of the prompt on one line
pub(crate) fn prompt_preview(prompt: &str, max_chars: usize) -> String {
    let flat = prompt.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut preview: String = flat.chars().take(max_chars).collect();
    preview.push_str("...");
    preview
}

fn render_detail(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(template) = app.selected_template() else {
        return;
    };
    let style = category_style(&template.category);
    let dim = Style::default().fg(Color::DarkGray);
    let rule = |label: String| Line::from(Span::styled(format!("─── {label} ───"), dim));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(style.color))
        .title(format!(" {} ", template.title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!("{} {}", style.glyph, template.category),
            Style::default().fg(style.color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            template.description.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        rule(format!("{}.txt", template.id)),
    ];
    lines.extend(
        template
            .prompt
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::White)))),
    );

    if !template.tips.is_empty() {
        lines.push(Line::from(""));
        lines.push(rule("Usage Tips".to_string()));
        lines.extend(template.tips.iter().map(|tip| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(style.color)),
                Span::styled(tip.clone(), Style::default().fg(Color::Gray)),
            ])
        }));
    }

    if !template.tags.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("tags: {}", template.tags.join(", ")),
            dim,
        )));
    }

    let padded = Rect {
        x: inner.x + 1,
        y: inner.y,
        width: inner.width.saturating_sub(2),
        height: inner.height,
    };
    let para = Paragraph::new(lines).wrap(Wrap { trim: false });

    // Keep the last line reachable but never scroll past it
    let content_height = u16::try_from(para.line_count(padded.width)).unwrap_or(u16::MAX);
    app.detail_max_scroll = content_height.saturating_sub(padded.height);
    app.detail_scroll = app.detail_scroll.min(app.detail_max_scroll);

    frame.render_widget(para.scroll((app.detail_scroll, 0)), padded);
}

/// Render the toast notification line
fn render_toast_line(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(ref toast) = app.toast {
        let bracket = Style::default().fg(Color::DarkGray);
        let (icon, toast_style) = if toast.is_error {
            ("✗ ", Style::default().fg(Color::Red))
        } else {
            ("✓ ", Style::default().fg(Color::Green))
        };

        let spans = vec![
            Span::styled("  [", bracket),
            Span::styled(icon, toast_style),
            Span::styled(toast.message.as_str(), toast_style),
            Span::styled("]", bracket),
        ];
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Keyboard shortcuts for the current mode
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let hints: &[&str] = if app.detail_open {
        &["↑↓ scroll", "Enter copy", "Esc close"]
    } else {
        &["↑↓ select", "Tab category", "Enter open", "^y copy", "Esc quit"]
    };

    let mut spans = vec![Span::raw(" ")];
    for hint in hints {
        spans.push(Span::styled(" [", dim));
        spans.push(Span::styled(*hint, dim));
        spans.push(Span::styled("]", dim));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
