//! Per-disease input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::application::Dispatcher;
use crate::domain::{DiseaseId, DiseaseSpec, FieldInput};
use crate::tui::styles::MedicalTheme;

use super::key_hints;
use super::result::render_result;

/// Form cursor state.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormState {
    pub selected_field: usize,
}

impl FormState {
    /// Move to the next field
    pub fn next_field(&mut self, len: usize) {
        if len > 0 {
            self.selected_field = (self.selected_field + 1) % len;
        }
    }

    /// Move to the previous field
    pub fn prev_field(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        if self.selected_field == 0 {
            self.selected_field = len - 1;
        } else {
            self.selected_field -= 1;
        }
    }
}

/// First visible row so that `selected` stays inside a window of `height` rows.
fn scroll_offset(selected: usize, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    selected.saturating_sub(height - 1)
}

/// Render the form for the dispatcher's selected disease.
pub fn render_form(f: &mut Frame, area: Rect, dispatcher: &Dispatcher, state: &FormState) {
    let Some(spec) = dispatcher.selected() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Disease tabs
            Constraint::Min(5),    // Fields
            Constraint::Length(4), // Output
            Constraint::Length(2), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0], spec);
    render_disease_tabs(f, chunks[1], spec.id);
    render_fields(f, chunks[2], dispatcher.inputs(), state.selected_field, spec);
    render_result(f, chunks[3], dispatcher);
    render_form_footer(f, chunks[4], dispatcher);
}

fn render_form_header(f: &mut Frame, area: Rect, spec: &DiseaseSpec) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(spec.title, MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled(spec.prompt, MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_disease_tabs(f: &mut Frame, area: Rect, current: DiseaseId) {
    let titles: Vec<Line> = DiseaseId::ALL
        .iter()
        .map(|id| Line::from(id.spec().title))
        .collect();

    let tabs = Tabs::new(titles)
        .select(current.index())
        .style(MedicalTheme::text_secondary())
        .highlight_style(MedicalTheme::selected())
        .divider(Span::styled("│", MedicalTheme::text_muted()))
        .block(
            Block::default()
                .title(Span::styled(" ←→ Disease ", MedicalTheme::text_muted()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(tabs, area);
}

fn render_fields(
    f: &mut Frame,
    area: Rect,
    inputs: &[FieldInput],
    selected: usize,
    spec: &DiseaseSpec,
) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ({} fields) ", spec.trigger_label, inputs.len()),
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let label_width = inputs
        .iter()
        .map(|i| i.spec.label.chars().count())
        .max()
        .unwrap_or(0);

    let lines: Vec<Line> = inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let is_selected = i == selected;
            let marker = if is_selected { "▶ " } else { "  " };
            let label_style = if is_selected {
                MedicalTheme::focused()
            } else {
                MedicalTheme::text_secondary()
            };

            let value = if input.is_empty() {
                Span::styled(input.spec.help, MedicalTheme::text_muted())
            } else {
                Span::styled(input.value().to_string(), MedicalTheme::text())
            };

            let mut spans = vec![
                Span::styled(marker, MedicalTheme::focused()),
                Span::styled(
                    format!("{:<width$}  ", input.spec.label, width = label_width),
                    label_style,
                ),
                value,
            ];
            if is_selected {
                spans.push(Span::styled("▌", MedicalTheme::focused()));
            }
            Line::from(spans)
        })
        .collect();

    let offset = scroll_offset(selected, inner.height as usize);
    let paragraph = Paragraph::new(lines).scroll((offset as u16, 0));
    f.render_widget(paragraph, inner);
}

fn render_form_footer(f: &mut Frame, area: Rect, dispatcher: &Dispatcher) {
    let content = if let Some(err) = dispatcher.last_error() {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.user_message(), MedicalTheme::danger()),
        ])
    } else {
        key_hints(&[
            ("↑↓", "Field"),
            ("←→", "Disease"),
            ("Enter", "Evaluate"),
            ("S", "Sample"),
            ("Del", "Clear"),
            ("R", "Reset"),
            ("Esc", "Menu"),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_navigation_wraps() {
        let mut state = FormState::default();
        state.prev_field(7);
        assert_eq!(state.selected_field, 6);
        state.next_field(7);
        assert_eq!(state.selected_field, 0);
        state.next_field(0);
        assert_eq!(state.selected_field, 0);
    }

    #[test]
    fn test_scroll_keeps_selection_visible() {
        assert_eq!(scroll_offset(0, 10), 0);
        assert_eq!(scroll_offset(9, 10), 0);
        assert_eq!(scroll_offset(21, 10), 12);
        assert_eq!(scroll_offset(5, 0), 0);
    }
}
