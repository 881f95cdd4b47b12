//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation (menu ↔ form)
//! - Input event handling
//! - Driving the dispatcher

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::linear::LinearModelLoader;
use crate::application::{DispatchState, Dispatcher, ModelRegistry};
use crate::config::Config;
use crate::domain::DiseaseId;
use crate::Result;

use super::ui::{
    form::{render_form, FormState},
    menu::{render_menu, MenuState},
    render_disclaimer,
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Form,
}

/// Main application state
pub struct App {
    screen: Screen,
    should_quit: bool,
    dispatcher: Dispatcher,
    menu_state: MenuState,
    form_state: FormState,
}

impl App {
    /// Create the application, loading all models from the configured directory.
    ///
    /// # Errors
    /// Returns `MedscreenError::StartupLoad` if any model artifact cannot be
    /// loaded; the UI never starts without a complete registry.
    pub fn new(config: &Config) -> Result<Self> {
        let registry = ModelRegistry::load(
            &LinearModelLoader::new(),
            &config.model_dir,
            config.require_manifest,
        )?;

        Ok(Self::with_registry(Arc::new(registry)))
    }

    /// Create the application around an already-loaded registry.
    #[must_use]
    pub fn with_registry(registry: Arc<ModelRegistry>) -> Self {
        Self {
            screen: Screen::Menu,
            should_quit: false,
            dispatcher: Dispatcher::new(registry),
            menu_state: MenuState::default(),
            form_state: FormState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }
        }
        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(f.area());

        match self.screen {
            Screen::Menu => render_menu(f, chunks[0], &self.menu_state),
            Screen::Form => render_form(f, chunks[0], &self.dispatcher, &self.form_state),
        }
        render_disclaimer(f, chunks[1]);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Form => self.handle_form_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.menu_state.prev(),
            KeyCode::Down | KeyCode::Tab => self.menu_state.next(),
            KeyCode::Enter => {
                let id = self.menu_state.current();
                // Re-entering the form for the current disease keeps its values.
                let same = self.dispatcher.selected().map(|s| s.id) == Some(id)
                    && self.dispatcher.state() != DispatchState::Idle;
                if !same {
                    self.open_form(id);
                }
                self.screen = Screen::Form;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        let len = self.dispatcher.inputs().len();
        match key {
            KeyCode::Esc => {
                if let Some(spec) = self.dispatcher.selected() {
                    self.menu_state.highlighted = spec.id.index();
                }
                self.screen = Screen::Menu;
            }
            KeyCode::Up | KeyCode::BackTab => self.form_state.prev_field(len),
            KeyCode::Down | KeyCode::Tab => self.form_state.next_field(len),
            KeyCode::Left => self.switch_disease(DiseaseId::prev),
            KeyCode::Right => self.switch_disease(DiseaseId::next),
            KeyCode::Char('s') | KeyCode::Char('S') => self.dispatcher.load_sample(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.dispatcher.clear_inputs();
                self.form_state = FormState::default();
            }
            KeyCode::Char(c) => {
                let selected = self.form_state.selected_field;
                if let Some(input) = self.dispatcher.inputs_mut().get_mut(selected) {
                    input.push_char(c);
                }
            }
            KeyCode::Backspace => {
                let selected = self.form_state.selected_field;
                if let Some(input) = self.dispatcher.inputs_mut().get_mut(selected) {
                    input.pop_char();
                }
            }
            KeyCode::Delete => {
                let selected = self.form_state.selected_field;
                if let Some(input) = self.dispatcher.inputs_mut().get_mut(selected) {
                    input.clear();
                }
            }
            KeyCode::Enter => {
                // Errors are kept by the dispatcher and shown in the footer.
                let _ = self.dispatcher.evaluate();
            }
            _ => {}
        }
    }

    fn switch_disease(&mut self, step: fn(&DiseaseId) -> DiseaseId) {
        let current = self
            .dispatcher
            .selected()
            .map_or(DiseaseId::Diabetes, |s| s.id);
        self.open_form(step(&current));
    }

    fn open_form(&mut self, id: DiseaseId) {
        self.dispatcher.select_disease(id);
        if let Err(e) = self.dispatcher.render_fields() {
            tracing::error!("Failed to render fields for {}: {}", id, e);
        }
        self.form_state = FormState::default();
        self.menu_state.highlighted = id.index();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::StubClassifier;
    use crate::domain::Prediction;
    use crate::ports::StartupLoadError;
    use ratatui::backend::TestBackend;

    fn app(answer: Prediction) -> App {
        let registry = ModelRegistry::from_classifiers(StubClassifier::full_set(answer))
            .expect("registry");
        App::with_registry(Arc::new(registry))
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).expect("terminal");
        terminal.draw(|f| app.draw(f)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_menu_to_form_and_evaluate() {
        let mut app = app(Prediction::Positive);
        assert_eq!(app.screen, Screen::Menu);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Form);
        assert_eq!(app.dispatcher.selected().map(|s| s.id), Some(DiseaseId::Diabetes));
        assert_eq!(app.dispatcher.inputs().len(), 8);

        for value in ["2", "120", "70", "30", "80", "28.5", "0.5", "33"] {
            type_str(&mut app, value);
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.dispatcher.state(), DispatchState::ResultShown);
        assert!(screen_text(&app).contains("The person is diabetic"));
    }

    #[test]
    fn test_validation_message_shown() {
        let mut app = app(Prediction::Negative);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.dispatcher.selected().map(|s| s.id), Some(DiseaseId::HeartDisease));

        press(&mut app, KeyCode::Enter);
        assert!(app.dispatcher.result().is_none());
        assert!(screen_text(&app).contains("Age: a value is required"));
    }

    #[test]
    fn test_switching_disease_resets_form() {
        let mut app = app(Prediction::Negative);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Down);
        assert!(app.dispatcher.inputs().iter().all(|i| !i.is_empty()));

        press(&mut app, KeyCode::Left);
        assert_eq!(app.dispatcher.selected().map(|s| s.id), Some(DiseaseId::Thyroid));
        assert_eq!(app.dispatcher.inputs().len(), 7);
        assert!(app.dispatcher.inputs().iter().all(|i| i.is_empty()));
        assert_eq!(app.form_state.selected_field, 0);
    }

    #[test]
    fn test_non_numeric_keys_ignored_and_editing() {
        let mut app = app(Prediction::Negative);
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "4x2");
        assert_eq!(app.dispatcher.inputs()[0].value(), "42");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.dispatcher.inputs()[0].value(), "4");
        press(&mut app, KeyCode::Delete);
        assert!(app.dispatcher.inputs()[0].is_empty());
    }

    #[test]
    fn test_escape_returns_to_menu_and_keeps_values() {
        let mut app = app(Prediction::Negative);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "119.9");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Menu);
        assert_eq!(app.menu_state.current(), DiseaseId::Parkinsons);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.dispatcher.inputs()[0].value(), "119.9");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_reset_clears_all_fields() {
        let mut app = app(Prediction::Negative);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('R'));

        assert!(app.dispatcher.inputs().iter().all(|i| i.is_empty()));
        assert_eq!(app.dispatcher.inputs().len(), 8);
        assert_eq!(app.form_state.selected_field, 0);
        assert_eq!(app.dispatcher.selected().map(|s| s.id), Some(DiseaseId::Diabetes));
    }

    #[test]
    fn test_startup_error_stays_typed() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = Config {
            model_dir: temp.path().join("absent"),
            ..Config::default()
        };

        match App::new(&config) {
            Err(crate::MedscreenError::StartupLoad(StartupLoadError::Missing { disease, .. })) => {
                assert_eq!(disease, DiseaseId::Diabetes);
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("startup should fail without models"),
        }
    }

    #[test]
    fn test_ctrl_q_quits_from_form() {
        let mut app = app(Prediction::Negative);
        press(&mut app, KeyCode::Enter);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_menu_lists_all_diseases() {
        let app = app(Prediction::Negative);
        let text = screen_text(&app);
        for id in DiseaseId::ALL {
            assert!(text.contains(id.spec().menu_label), "{id} missing from menu");
        }
    }
}
