//! Application state and actions.
//!
//! Everything runs on the event-loop thread: a key press that means
//! "update" calls straight into the generator and the figure is replaced
//! before the next frame is drawn.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lissajous::{CurveGenerator, Figure, PlotSettings};
use ratatui_image::{picker::Picker, protocol::StatefulProtocol};

use super::dialog::SaveDialog;
use super::form::{FieldId, Form};
use crate::config::AppConfig;
use crate::export::{self, ExportFormat};
use crate::render;

/// One line of feedback under the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

impl Status {
    pub fn text(&self) -> &str {
        match self {
            Status::Info(s) | Status::Error(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }
}

pub struct App {
    /// Color table and defaults, fixed for the session
    config: AppConfig,
    /// Editable parameters
    form: Form,
    generator: CurveGenerator,
    /// Settings the current figure was drawn with
    settings: PlotSettings,
    /// Last successfully generated figure
    figure: Option<Figure>,
    /// Open save prompt, if any
    dialog: Option<SaveDialog>,
    status: Option<Status>,
    /// Terminal image protocol detection (absent when there is no terminal)
    picker: Option<Picker>,
    /// Current rendered image protocol state
    image_state: Option<Box<dyn StatefulProtocol>>,
    /// Flag to indicate image needs re-rendering
    needs_image_update: bool,
    should_quit: bool,
}

impl App {
    /// Build the app and plot the default figure.
    pub fn new(config: AppConfig, picker: Option<Picker>) -> Self {
        let form = Form::new(&config.defaults, &config.colors);
        let settings = config.defaults.clone();

        let mut app = App {
            config,
            form,
            generator: CurveGenerator::default(),
            settings: settings.clone(),
            figure: None,
            dialog: None,
            status: None,
            picker,
            image_state: None,
            needs_image_update: true,
            should_quit: false,
        };

        app.plot(settings);
        app
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn settings(&self) -> &PlotSettings {
        &self.settings
    }

    pub fn figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    pub fn dialog(&self) -> Option<&SaveDialog> {
        self.dialog.as_ref()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn image_state_mut(&mut self) -> Option<&mut Box<dyn StatefulProtocol>> {
        self.image_state.as_mut()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.dialog.is_some() {
            self.handle_dialog_key(key, ctrl);
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('s') if ctrl => self.open_save_dialog(),
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Left => self.form.cycle(-1, &self.config.colors),
            KeyCode::Right => self.form.cycle(1, &self.config.colors),
            KeyCode::Enter => match self.form.focused() {
                FieldId::SaveButton => self.open_save_dialog(),
                _ => self.update_figure(),
            },
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) if !ctrl => {
                self.form.type_char(c);
            }
            _ => {}
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent, ctrl: bool) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.dialog = None;
            }
            KeyCode::Enter => self.confirm_save(),
            KeyCode::Tab | KeyCode::BackTab => dialog.toggle_filter(),
            KeyCode::Backspace => dialog.backspace(),
            KeyCode::Char('u') if ctrl => dialog.clear(),
            KeyCode::Char(c) if !ctrl => dialog.type_char(c),
            _ => {}
        }
    }

    /// "Update figure": parse the form and plot it.
    pub fn update_figure(&mut self) {
        match self.form.to_settings(&self.config.colors) {
            Ok(settings) => self.plot(settings),
            Err(e) => {
                log::warn!("update rejected: {}", e);
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }

    /// Generate and show a figure. On failure the previous figure stays.
    pub fn plot(&mut self, settings: PlotSettings) {
        if let Err(e) = settings.validate() {
            log::warn!("settings rejected: {}", e);
            self.status = Some(Status::Error(e.to_string()));
            return;
        }
        match self.generator.generate_with(&settings.params) {
            Ok(figure) => {
                log::debug!(
                    "plotted {} points, freq {}:{}, phase {}",
                    figure.len(),
                    settings.params.freq_x,
                    settings.params.freq_y,
                    settings.params.phase_shift
                );
                self.status = Some(Status::Info(format!("Plotted {} points", figure.len())));
                self.figure = Some(figure);
                self.settings = settings;
                self.needs_image_update = true;
            }
            Err(e) => {
                log::warn!("generator rejected settings: {}", e);
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }

    pub fn open_save_dialog(&mut self) {
        let format = ExportFormat::Png;
        let name = export::default_file_name(format, Local::now());
        self.dialog = Some(SaveDialog::new(name, format));
    }

    /// Close the prompt and write the image it names, if it names one.
    pub fn confirm_save(&mut self) {
        let Some(dialog) = self.dialog.take() else {
            return;
        };

        let Some((path, format)) = dialog.resolve() else {
            log::info!("save skipped for {:?}", dialog.file_name());
            self.status = Some(Status::Info("Nothing saved".to_string()));
            return;
        };

        let Some(figure) = self.figure.as_ref() else {
            self.status = Some(Status::Error("No figure to save".to_string()));
            return;
        };

        let result = render::render_figure(figure, &self.settings, render::CANVAS)
            .map_err(|e| e.to_string())
            .and_then(|img| export::save_image(&img, &path, format).map_err(|e| e.to_string()));

        self.status = Some(match result {
            Ok(()) => Status::Info(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("save failed: {}", e);
                Status::Error(e)
            }
        });
    }

    /// Re-render the preview if the figure changed since the last frame.
    pub fn update_image(&mut self) {
        if !self.needs_image_update {
            return;
        }
        self.needs_image_update = false;

        let (Some(picker), Some(figure)) = (self.picker.as_mut(), self.figure.as_ref()) else {
            return;
        };

        match render::render_figure(figure, &self.settings, render::CANVAS) {
            Ok(img) => self.image_state = Some(picker.new_resize_protocol(img)),
            Err(e) => {
                log::error!("preview render failed: {}", e);
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }
}
