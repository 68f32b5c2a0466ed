use crate::app::AppState;
use crate::domain::{format_clock, Mode, TimerEngine};
use crate::session::SessionStats;
use crate::ui::layout::split_timer_area;
use crate::ui::styles::{
    active_tab_style, banner_style, border_style, clock_style, default_style, gauge_style,
    idle_style, inactive_tab_style, paused_style, running_style, title_style,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Badge text and style for the clock state
fn status_badge(timer: &TimerEngine) -> (&'static str, Style) {
    if timer.is_running() {
        ("(RUNNING)", running_style())
    } else if timer.remaining() == 0 {
        ("(DONE)", idle_style())
    } else if timer.remaining() < timer.mode().full_duration() {
        ("(PAUSED)", paused_style())
    } else {
        ("(READY)", idle_style())
    }
}

/// Fraction of the current interval already counted down
fn progress_ratio(timer: &TimerEngine) -> f64 {
    let full = timer.mode().full_duration();
    if full == 0 {
        return 1.0;
    }
    f64::from(full - timer.remaining()) / f64::from(full)
}

fn mode_tabs(current: Mode) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, mode) in Mode::all().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        let style = if *mode == current {
            active_tab_style(*mode)
        } else {
            inactive_tab_style()
        };
        spans.push(Span::styled(format!(" {} ", mode.name()), style));
    }
    Line::from(spans)
}

fn stats_lines(stats: SessionStats) -> Vec<Line<'static>> {
    vec![
        Line::raw(format!(" Focused this session: {} min", stats.focus_seconds / 60)),
        Line::raw(format!(
            " Sessions done: {}   Breaks taken: {}",
            stats.completed_focus, stats.completed_breaks
        )),
    ]
}

/// Render the timer pane: mode tabs, clock, status, progress and stats
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let timer = app.session.timer();
    let mode = timer.mode();

    let title = if app.use_emoji {
        " FocusFlow ⚡ "
    } else {
        " FocusFlow "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (clock_area, gauge_area, stats_area) = split_timer_area(inner);

    let (badge, badge_style) = status_badge(timer);
    let phrase = if app.use_emoji {
        format!("{} {}", mode.symbol(), mode.phrase())
    } else {
        mode.phrase().to_string()
    };

    let mut lines = vec![
        Line::raw(""),
        mode_tabs(mode),
        Line::raw(""),
        Line::styled(format_clock(timer.remaining()), clock_style(mode)),
        Line::styled(badge, badge_style),
        Line::raw(""),
        Line::styled(phrase, default_style()),
    ];
    if let Some(banner) = app.banner {
        lines.push(Line::raw(""));
        lines.push(Line::styled(banner, banner_style()));
    }

    let clock = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(clock, clock_area);

    let gauge = Gauge::default()
        .gauge_style(gauge_style(mode))
        .ratio(progress_ratio(timer));
    f.render_widget(gauge, gauge_area);

    let stats = Paragraph::new(stats_lines(app.session.stats())).style(idle_style());
    f.render_widget(stats, stats_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_badge() {
        let mut timer = TimerEngine::default();
        assert_eq!(status_badge(&timer).0, "(READY)");

        timer.start();
        assert_eq!(status_badge(&timer).0, "(RUNNING)");

        timer.tick();
        timer.pause();
        assert_eq!(status_badge(&timer).0, "(PAUSED)");
    }

    #[test]
    fn test_progress_ratio() {
        let mut timer = TimerEngine::new(Mode::Break);
        assert_eq!(progress_ratio(&timer), 0.0);

        timer.start();
        for _ in 0..150 {
            timer.tick();
        }
        assert!((progress_ratio(&timer) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mode_tabs_lists_both_modes() {
        let line = format!("{:?}", mode_tabs(Mode::Break));
        assert!(line.contains("Focus"));
        assert!(line.contains("Break"));
    }
}
