//! Disease selection menu.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::DiseaseId;
use crate::tui::styles::MedicalTheme;

use super::key_hints;

/// Menu state: which entry is highlighted.
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuState {
    pub highlighted: usize,
}

impl MenuState {
    pub fn next(&mut self) {
        self.highlighted = (self.highlighted + 1) % DiseaseId::ALL.len();
    }

    pub fn prev(&mut self) {
        if self.highlighted == 0 {
            self.highlighted = DiseaseId::ALL.len() - 1;
        } else {
            self.highlighted -= 1;
        }
    }

    #[must_use]
    pub fn current(&self) -> DiseaseId {
        DiseaseId::ALL[self.highlighted % DiseaseId::ALL.len()]
    }
}

/// Render the disease selection menu.
pub fn render_menu(f: &mut Frame, area: Rect, state: &MenuState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Menu
            Constraint::Length(2), // Footer
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Disease Prediction", MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled("Select a Disease to Predict", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = DiseaseId::ALL
        .iter()
        .map(|id| {
            let spec = id.spec();
            ListItem::new(Line::from(vec![
                Span::styled(spec.menu_label, MedicalTheme::text()),
                Span::styled(
                    format!("  ({} fields)", spec.width()),
                    MedicalTheme::text_muted(),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(" Diseases ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border_focused()),
        )
        .highlight_style(MedicalTheme::selected())
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default().with_selected(Some(state.highlighted));
    let list_area = Layout::default()
        .margin(1)
        .constraints([Constraint::Min(0)])
        .split(chunks[1])[0];
    f.render_stateful_widget(list, list_area, &mut list_state);

    let footer = Paragraph::new(key_hints(&[
        ("↑↓", "Navigate"),
        ("Enter", "Select"),
        ("Q", "Quit"),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(footer, chunks[2]);
}
