//! Output region: the verdict of the last evaluation.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::Dispatcher;
use crate::tui::styles::MedicalTheme;

pub fn render_result(f: &mut Frame, area: Rect, dispatcher: &Dispatcher) {
    let block = Block::default()
        .title(Span::styled(" Result ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let content = match dispatcher.result() {
        Some(diagnosis) => vec![
            Line::from(Span::styled(
                diagnosis.label.clone(),
                MedicalTheme::prediction(diagnosis.prediction),
            )),
            Line::from(Span::styled(
                format!(
                    "Evaluated at {}",
                    diagnosis.created_at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
                MedicalTheme::text_muted(),
            )),
        ],
        None => vec![Line::from(Span::styled(
            "Fill in every field, then press Enter",
            MedicalTheme::text_muted(),
        ))],
    };

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(paragraph, area);
}
