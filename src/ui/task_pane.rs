use crate::app::AppState;
use crate::domain::Task;
use crate::ui::styles::{
    border_style, check_style, default_style, done_style, hint_style, selected_style, title_style,
};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the task checklist pane
pub fn render_task_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let tasks = app.session.tasks();
    let title = format!(" Tasks ({}/{}) ", tasks.completed_count(), tasks.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if tasks.is_empty() {
        let placeholder = Paragraph::new(vec![
            Line::raw(""),
            Line::raw("No tasks yet."),
            Line::raw("What do you want to get done today?"),
        ])
        .style(hint_style())
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(create_task_line(task, app.use_emoji)).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Create a single line for a task
/// Format: [✓] Write proposal  · 14:05
fn create_task_line(task: &Task, use_emoji: bool) -> Line<'static> {
    let check = match (task.completed, use_emoji) {
        (true, true) => "[✓] ",
        (true, false) => "[x] ",
        (false, _) => "[ ] ",
    };

    let mut spans = Vec::new();
    if task.completed {
        spans.push(Span::styled(check, check_style()));
        spans.push(Span::styled(task.text.clone(), done_style()));
    } else {
        spans.push(Span::raw(check));
        spans.push(Span::raw(task.text.clone()));
    }

    let stamp = task.completed_at.unwrap_or(task.created_at);
    spans.push(Span::styled(
        format!("  · {}", stamp.format("%H:%M")),
        hint_style(),
    ));

    Line::from(spans)
}
