use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" Space start/pause   "),
        Span::raw("r reset   "),
        Span::raw("f focus   "),
        Span::raw("b break   "),
        Span::raw("a add   "),
        Span::raw("↑/↓ select   "),
        Span::raw("Enter/x done   "),
        Span::raw("d delete   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
