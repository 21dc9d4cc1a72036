use crate::api::ApiClient;
use crate::app::{App, InputMode, TaskTab, View};
use crate::filter;
use crate::i18n::{tr, Msg};
use crate::models::{Board, HistoryEntry, Priority, Task};
use crate::settings::SettingsTab;
use ansi_parser::{AnsiParser, Output};
use crossterm::event::{self, Event as CEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

fn centered_rect_absolute(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length((r.height.saturating_sub(height)) / 2),
                Constraint::Length(height),
                Constraint::Length((r.height.saturating_sub(height) + 1) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Length((r.width.saturating_sub(width)) / 2),
                Constraint::Length(width),
                Constraint::Length((r.width.saturating_sub(width) + 1) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}

pub fn ansi_to_text(ansi_str: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for ansi_line in ansi_str.lines() {
        let mut spans = Vec::new();
        let parsed = ansi_line.ansi_parse();
        for item in parsed {
            match item {
                Output::TextBlock(text) => {
                    spans.push(Span::raw(text.to_string()));
                }
                Output::Escape(_escape) => {}
            }
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn priority_style(priority: Priority) -> Style {
    let color = match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Blue,
        Priority::None => Color::DarkGray,
    };
    Style::default().fg(color)
}

fn key_hint(key: &'static str, label: &'static str) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!(" {} ", key), Style::default().fg(Color::Red)),
        Span::raw(format!(": {} ", label)),
    ]
}

fn get_legend(app: &App) -> Text<'static> {
    let t = |msg| app.t(msg);
    let hints: Vec<(&'static str, &'static str)> = if app.confirm.is_some() {
        vec![("y", t(Msg::Confirm)), ("n", t(Msg::Cancel))]
    } else if let InputMode::Editing(_) = app.input_mode {
        vec![("Enter", t(Msg::Submit)), ("Esc", t(Msg::Cancel))]
    } else {
        match app.view {
            View::Boards => vec![
                ("q", t(Msg::Quit)),
                ("j/k", t(Msg::Move)),
                ("Enter", t(Msg::Open)),
                ("a", t(Msg::Add)),
                ("x", t(Msg::Delete)),
                ("r", t(Msg::Refresh)),
            ],
            View::Board if app.grouped => vec![
                ("q", t(Msg::Quit)),
                ("G", t(Msg::Back)),
            ],
            View::Board => vec![
                ("q", t(Msg::Quit)),
                ("Esc", t(Msg::Back)),
                ("Enter", t(Msg::Open)),
                ("a", t(Msg::Add)),
                ("HJKL", t(Msg::Move)),
                ("x", t(Msg::Delete)),
                ("p/s/t", t(Msg::Edit)),
                ("/", t(Msg::Filter)),
                ("o", t(Msg::Sort)),
                ("T", t(Msg::Templates)),
                ("G", t(Msg::GroupByStatus)),
                ("M", t(Msg::Settings)),
                ("r", t(Msg::Refresh)),
            ],
            View::Task => {
                let mut hints = vec![("Esc", t(Msg::Back)), ("Tab", t(Msg::TaskDetails))];
                match app.tab {
                    TaskTab::Subtasks => {
                        hints.push(("a", t(Msg::Add)));
                        hints.push(("Space", t(Msg::Toggle)));
                        hints.push(("J/K", t(Msg::Move)));
                    }
                    TaskTab::Comments => {
                        hints.push(("a", t(Msg::Add)));
                        hints.push(("E", t(Msg::Edit)));
                    }
                    TaskTab::Attachments => {
                        hints.push(("a", t(Msg::Upload)));
                        hints.push(("w", t(Msg::Download)));
                    }
                    TaskTab::History => {}
                }
                if app.tab != TaskTab::History {
                    hints.push(("x", t(Msg::Delete)));
                }
                hints.push(("e", t(Msg::EditTitle)));
                hints.push(("g", t(Msg::Tags)));
                hints.push(("S", t(Msg::SaveTemplate)));
                hints
            }
            View::Templates => vec![
                ("Esc", t(Msg::Back)),
                ("Enter", t(Msg::Add)),
                ("e", t(Msg::Rename)),
                ("x", t(Msg::Delete)),
            ],
            View::Settings => {
                let mut hints = vec![
                    ("Esc", t(Msg::Back)),
                    ("Tab", t(Msg::Settings)),
                    ("a", t(Msg::Add)),
                ];
                match app.settings.as_ref().map(|s| s.tab) {
                    Some(SettingsTab::Members) => hints.push(("r", t(Msg::Role))),
                    Some(_) => hints.push(("e", t(Msg::Rename))),
                    None => {}
                }
                hints.push(("x", t(Msg::Delete)));
                hints.push(("B", t(Msg::RenameBoard)));
                hints
            }
        }
    };
    let spans: Vec<Span<'static>> = hints
        .into_iter()
        .flat_map(|(key, label)| key_hint(key, label))
        .collect();
    Text::from(Line::from(spans))
}

fn task_card(task: &Task, board: &Board) -> ListItem<'static> {
    let mut meta: Vec<Span<'static>> = Vec::new();
    if task.priority != Priority::None {
        meta.push(Span::styled(
            format!("{} ", task.priority),
            priority_style(task.priority),
        ));
    }
    if let Some(status) = task.status_id.and_then(|id| board.status(id)) {
        meta.push(Span::styled(
            format!("[{}] ", status.name),
            Style::default().fg(Color::Cyan),
        ));
    }
    if let Some(task_type) = task.type_id.and_then(|id| board.task_type(id)) {
        meta.push(Span::styled(
            format!("{} ", task_type.name),
            Style::default().fg(Color::Magenta),
        ));
    }
    for tag in &task.tags {
        meta.push(Span::styled(
            format!("#{} ", tag),
            Style::default().fg(Color::Yellow),
        ));
    }
    if !task.subtasks.is_empty() {
        meta.push(Span::raw(format!(
            "{}/{} ",
            task.completed_subtasks(),
            task.subtasks.len()
        )));
    }
    if let Some(end) = task.end_date {
        meta.push(Span::styled(
            end.format("%Y-%m-%d").to_string(),
            Style::default().fg(Color::Gray),
        ));
    }

    let mut lines = vec![Line::from(Span::raw(task.title.clone()))];
    if !meta.is_empty() {
        lines.push(Line::from(meta));
    }
    ListItem::new(Text::from(lines))
}

fn draw_boards(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.t(Msg::Boards));
    if app.boards.is_empty() {
        let empty = Paragraph::new(app.t(Msg::NoBoards)).block(block);
        f.render_widget(empty, area);
        return;
    }
    let items: Vec<ListItem> = app
        .boards
        .iter()
        .map(|board| {
            let mut spans = vec![Span::raw(board.name.clone())];
            if let Some(description) = &board.description {
                spans.push(Span::styled(
                    format!("  {}", description),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, area, &mut app.board_list);
}

fn draw_grouped(f: &mut Frame, app: &App, board: &Board, area: Rect) {
    let groups = filter::group_by_status(board);
    let count = groups.len() as u32;
    let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count)).collect();
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, (status, tasks)) in groups.iter().enumerate() {
        let name = status
            .map(|s| s.name.clone())
            .unwrap_or_else(|| app.t(Msg::NoStatus).to_string());
        let visible: Vec<&Task> = tasks.iter().copied().filter(|t| app.filter.matches(t)).collect();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({})", name, visible.len()));
        let items: Vec<ListItem> = visible.iter().map(|t| task_card(t, board)).collect();
        f.render_widget(List::new(items).block(block), areas[i]);
    }
}

fn draw_board(f: &mut Frame, app: &App, area: Rect) {
    let Some(state) = &app.board else {
        return;
    };
    let board = &state.board;
    if app.grouped {
        draw_grouped(f, app, board, area);
        return;
    }
    if board.columns.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(board.name.clone());
        f.render_widget(Paragraph::new(app.t(Msg::NoTasks)).block(block), area);
        return;
    }

    let count = board.columns.len() as u32;
    let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count)).collect();
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (ci, column) in board.columns.iter().enumerate() {
        let selected = ci == app.selected_column;
        let tasks = app.visible_tasks(ci);
        let title = format!("{} ({})", column.name, tasks.len());
        let border_style = if selected {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        if tasks.is_empty() {
            let empty = Paragraph::new(Span::styled(
                app.t(Msg::NoTasks),
                Style::default().fg(Color::DarkGray),
            ))
            .block(block);
            f.render_widget(empty, areas[ci]);
            continue;
        }

        let items: Vec<ListItem> = tasks.iter().map(|t| task_card(t, board)).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");
        let mut list_state = ListState::default();
        if selected {
            list_state.select(Some(app.selected_task));
        }
        f.render_stateful_widget(list, areas[ci], &mut list_state);
    }
}

fn label(text: &'static str) -> Span<'static> {
    Span::styled(
        format!("{}: ", text),
        Style::default().add_modifier(Modifier::BOLD),
    )
}

fn history_line(entry: &HistoryEntry) -> Line<'static> {
    let old = entry.old_value.clone().unwrap_or_else(|| "-".to_string());
    let new = entry.new_value.clone().unwrap_or_else(|| "-".to_string());
    let mut spans = vec![
        Span::styled(entry.field.clone(), Style::default().fg(Color::Cyan)),
        Span::raw(format!(": {} -> {}", old, new)),
    ];
    let who = entry.user.clone().unwrap_or_default();
    let when = entry
        .created_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    if !who.is_empty() || !when.is_empty() {
        spans.push(Span::styled(
            format!("  {} {}", who, when),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn draw_task(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(task) = app.task.clone() else {
        return;
    };
    let board = app.board.as_ref().map(|s| &s.board);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)].as_ref())
        .split(area);

    // Left panel: fields and description
    let mut lines: Vec<Line<'static>> = vec![Line::from(Span::styled(
        task.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    lines.push(Line::from(vec![
        label(app.t(Msg::Priority)),
        Span::styled(task.priority.to_string(), priority_style(task.priority)),
    ]));
    let status = task
        .status_id
        .and_then(|id| board.and_then(|b| b.status(id)))
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "-".to_string());
    lines.push(Line::from(vec![label(app.t(Msg::Status)), Span::raw(status)]));
    let task_type = task
        .type_id
        .and_then(|id| board.and_then(|b| b.task_type(id)))
        .map(|t| t.name.clone())
        .unwrap_or_else(|| "-".to_string());
    lines.push(Line::from(vec![label(app.t(Msg::Type)), Span::raw(task_type)]));

    let date = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    lines.push(Line::from(vec![
        label(app.t(Msg::Dates)),
        Span::raw(format!("{} .. {}", date(task.start_date), date(task.end_date))),
    ]));
    lines.push(Line::from(vec![
        label(app.t(Msg::Assignee)),
        Span::raw(
            task.assignee
                .clone()
                .unwrap_or_else(|| app.t(Msg::Unassigned).to_string()),
        ),
    ]));

    if let Some(updated) = task.updated_at.or(task.created_at) {
        lines.push(Line::from(Span::styled(
            updated.format("%Y-%m-%d %H:%M").to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let mut tag_spans = vec![label(app.t(Msg::Tags))];
    if task.tags.is_empty() {
        tag_spans.push(Span::raw(app.t(Msg::NoTags)));
    } else {
        for (i, tag) in task.tags.iter().enumerate() {
            if i > 0 {
                tag_spans.push(Span::raw(" "));
            }
            tag_spans.push(Span::styled(
                format!(" {} ", tag),
                Style::default().bg(Color::Yellow).fg(Color::Black),
            ));
        }
    }
    lines.push(Line::from(tag_spans));

    lines.push(Line::from(label(app.t(Msg::Description))));
    match task.description.as_deref().map(str::trim) {
        Some(desc) if !desc.is_empty() && desc != "<p></p>" => {
            let width = chunks[0].width.saturating_sub(2).max(10) as usize;
            let ansi_text = html2text::from_read(desc.as_bytes(), width);
            lines.append(&mut ansi_to_text(&ansi_text));
        }
        _ => lines.push(Line::from(Span::raw(app.t(Msg::NoDescription)))),
    }

    let details = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.t(Msg::TaskDetails)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(details, chunks[0]);

    // Right panel: tabs
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(chunks[1]);

    let titles: Vec<Line> = TaskTab::ALL
        .iter()
        .map(|tab| {
            let count = match tab {
                TaskTab::Subtasks => format!(
                    " {}/{}",
                    task.completed_subtasks(),
                    task.subtasks.len()
                ),
                TaskTab::Comments => format!(" {}", task.comments.len()),
                TaskTab::History => String::new(),
                TaskTab::Attachments => format!(" {}", task.attachments.len()),
            };
            Line::from(format!("{}{}", app.t(tab.label()), count))
        })
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(app.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, right[0]);

    let items: Vec<ListItem> = match app.tab {
        TaskTab::Subtasks => task
            .subtasks
            .iter()
            .map(|s| {
                let mark = if s.completed { "[x] " } else { "[ ] " };
                let style = if s.completed {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                let mut spans = vec![Span::raw(mark), Span::styled(s.title.clone(), style)];
                let mut extra = Vec::new();
                if let Some(due) = s.due_date {
                    extra.push(due.format("%Y-%m-%d").to_string());
                }
                if let Some(estimate) = s.estimate {
                    extra.push(format!("{}h", estimate));
                }
                if let Some(assignee) = &s.assignee {
                    extra.push(format!("@{}", assignee));
                }
                if !extra.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", extra.join(" ")),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect(),
        TaskTab::Comments => task
            .comments
            .iter()
            .map(|c| {
                let mut when = c
                    .created_at
                    .map(|t| t.format(" %Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                if c.updated_at.is_some() && c.updated_at != c.created_at {
                    when.push(' ');
                    when.push_str(app.t(Msg::Edited));
                }
                ListItem::new(Text::from(vec![
                    Line::from(vec![
                        Span::styled(c.author.clone(), Style::default().fg(Color::Cyan)),
                        Span::styled(when, Style::default().fg(Color::DarkGray)),
                    ]),
                    Line::from(Span::raw(c.content.clone())),
                ]))
            })
            .collect(),
        TaskTab::History => task.history.iter().map(|h| ListItem::new(history_line(h))).collect(),
        TaskTab::Attachments => task
            .attachments
            .iter()
            .map(|a| {
                ListItem::new(Line::from(vec![
                    Span::raw(a.file_name.clone()),
                    Span::styled(
                        format!(
                            "  {:.1} KB {}",
                            a.size as f64 / 1024.0,
                            a.content_type.as_deref().unwrap_or_default()
                        ),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect(),
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, right[1], &mut app.tab_list);
}

fn draw_templates(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.t(Msg::Templates));
    if app.templates.is_empty() {
        f.render_widget(Paragraph::new(app.t(Msg::NoTemplates)).block(block), area);
        return;
    }
    let items: Vec<ListItem> = app
        .templates
        .iter()
        .map(|template| {
            ListItem::new(Line::from(vec![
                Span::raw(template.name.clone()),
                Span::styled(
                    format!("  {}", template.title),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("  {}", template.priority),
                    priority_style(template.priority),
                ),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, area, &mut app.template_list);
}

fn draw_settings(f: &mut Frame, app: &mut App, area: Rect) {
    let locale = app.locale;
    let Some(settings) = app.settings.as_mut() else {
        return;
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let titles: Vec<Line> = SettingsTab::ALL
        .iter()
        .map(|tab| Line::from(tr(locale, tab.label())))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(tr(locale, Msg::Settings)),
        )
        .select(settings.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[0]);

    let items: Vec<ListItem> = match settings.tab {
        SettingsTab::Members => settings
            .members
            .iter()
            .map(|m| {
                ListItem::new(Line::from(vec![
                    Span::raw(m.username.clone()),
                    Span::styled(format!("  {}", m.role), Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect(),
        SettingsTab::Statuses | SettingsTab::Types => {
            let entries = if settings.tab == SettingsTab::Statuses {
                &settings.statuses
            } else {
                &settings.types
            };
            entries
                .iter()
                .map(|e| {
                    let mut spans = vec![Span::raw(e.name.clone())];
                    if e.is_default {
                        spans.push(Span::styled(
                            format!("  {}", tr(locale, Msg::IsDefault)),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    if e.is_custom {
                        spans.push(Span::styled(
                            format!("  {}", tr(locale, Msg::IsCustom)),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    if let Some(color) = &e.color {
                        spans.push(Span::styled(
                            format!("  {}", color),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    ListItem::new(Line::from(spans))
                })
                .collect()
        }
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, chunks[1], &mut settings.list);
}

fn status_line(app: &App) -> Line<'static> {
    if let Some(status) = &app.status {
        return Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }
    let mut parts = vec![app.user.label().to_string()];
    if let Some(state) = &app.board {
        parts.push(format!("{} ({})", state.board.name, state.board.task_count()));
        if let Some(role) = app.role.as_ref().and_then(|r| r.role) {
            parts.push(role.to_string());
        }
        parts.push(format!("{}: {}", app.t(Msg::Sort), app.t(app.sort.label())));
        if app.filter.is_active() {
            parts.push(format!("{}: {}", app.t(Msg::Filter), app.t(Msg::Active)));
        }
    }
    Line::from(Span::styled(
        parts.join(" | "),
        Style::default().fg(Color::DarkGray),
    ))
}

fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    // Split the main layout into body, status line and footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints(
            [
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(size);
    let body_chunk = chunks[0];

    match app.view {
        View::Boards => draw_boards(f, app, body_chunk),
        View::Board => draw_board(f, app, body_chunk),
        View::Task => draw_task(f, app, body_chunk),
        View::Templates => draw_templates(f, app, body_chunk),
        View::Settings => draw_settings(f, app, body_chunk),
    }

    if let InputMode::Editing(prompt) = &app.input_mode {
        let popup_width_percentage = 60;
        let popup_width = (u32::from(size.width) * popup_width_percentage / 100) as u16;
        let popup_width = popup_width.saturating_sub(2);

        let lines_required = calculate_wrapped_lines(&app.input, popup_width);
        let required_height = u16::try_from(lines_required).unwrap_or(u16::MAX).max(1);
        let popup_height = std::cmp::min(
            required_height.saturating_add(2),
            size.height.saturating_sub(2),
        );

        let popup_area =
            centered_rect_absolute(popup_width.saturating_add(2), popup_height, body_chunk);

        let popup_block = Block::default()
            .title(app.t(prompt.label()))
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Green));

        let input = Paragraph::new(app.input.as_str())
            .style(Style::default().fg(Color::White))
            .block(popup_block)
            .wrap(Wrap { trim: false });

        f.render_widget(Clear, popup_area);
        f.render_widget(input, popup_area);
    }

    if let Some(dialog) = &app.confirm {
        let width = u16::try_from(dialog.message.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(size.width);
        let popup_area = centered_rect_absolute(width, 3, body_chunk);
        let popup = Paragraph::new(dialog.message.as_str())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(app.t(Msg::Confirm))
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Red)),
            );
        f.render_widget(Clear, popup_area);
        f.render_widget(popup, popup_area);
    }

    f.render_widget(Paragraph::new(status_line(app)), chunks[1]);

    // Render the legend in the footer
    let legend = Paragraph::new(get_legend(app))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    f.render_widget(legend, chunks[2]);
}

pub async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    api: &ApiClient,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, &mut app))?;

        // Handle input
        if event::poll(Duration::from_millis(100))? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_input(key, api).await {
                    return Ok(());
                }
            }
        }
    }
}

fn calculate_wrapped_lines(text: &str, max_width: u16) -> usize {
    let max_width = max_width.max(1) as usize;
    let mut line_count = 0;
    for line in text.lines() {
        let line_width = line.chars().count();
        line_count += line_width.div_ceil(max_width).max(1);
    }
    line_count
}
