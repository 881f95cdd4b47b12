//! UI module: View components for the TUI.

pub mod form;
pub mod menu;
pub mod result;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "DISCLAIMER: Predictions are indicative only and do not replace professional medical evaluation.",
        MedicalTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// One-line key hint footer: `[key] description` pairs.
pub(crate) fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    Line::from(
        hints
            .iter()
            .flat_map(|(key, desc)| {
                [
                    Span::styled(format!("[{key}] "), MedicalTheme::key_hint()),
                    Span::styled(format!("{desc} "), MedicalTheme::key_desc()),
                ]
            })
            .collect::<Vec<_>>(),
    )
}
