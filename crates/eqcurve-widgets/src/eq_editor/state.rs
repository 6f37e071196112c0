//! State of the EQ curve editor widget

use std::path::PathBuf;

use eqcurve_core::config::{default_config_path, load_config, save_config};
use eqcurve_core::{BandCollection, EditSession, EditorConfig, EditorEvent};
use iced::Task;

use super::message::EqEditorMessage;

/// UI state for one EQ curve editor
///
/// Wraps the core [`EditSession`]; bands stay with the host and are passed
/// into [`EqEditorState::handle_message`].
#[derive(Debug, Clone)]
pub struct EqEditorState {
    pub session: EditSession,
    pub config: EditorConfig,
    /// Where height and quality changes are saved
    pub config_path: PathBuf,
}

impl EqEditorState {
    /// Create the editor with the given preferences, saving changes to the
    /// default config path
    pub fn new(config: EditorConfig) -> Self {
        Self::with_config_path(config, default_config_path())
    }

    pub fn with_config_path(config: EditorConfig, config_path: PathBuf) -> Self {
        Self {
            session: EditSession::new(&config),
            config,
            config_path,
        }
    }

    /// Create the editor with preferences loaded from `config_path`
    ///
    /// A missing or unreadable file gives the default preferences.
    pub fn load(config_path: PathBuf) -> Self {
        let config: EditorConfig = load_config(&config_path);
        Self::with_config_path(config, config_path)
    }

    /// Start editing a host collection
    pub fn attach(&mut self, bands: &mut BandCollection) {
        self.session.attach(bands);
    }

    /// Canvas height from the config (clamped)
    pub fn editor_height(&self) -> f32 {
        self.config.validated_editor_height() as f32
    }

    /// Apply a message to the session
    ///
    /// Returns a task that delivers [`EqEditorMessage::FlushDeferred`] when the
    /// session queued a deferred refresh, so it runs on the next update.
    pub fn handle_message(
        &mut self,
        message: EqEditorMessage,
        bands: &mut BandCollection,
    ) -> Task<EqEditorMessage> {
        // Pick up changes the host made since the last message
        self.session.sync(bands);

        let result = match message {
            EqEditorMessage::DragStarted(id) => self.session.drag_start(bands, id),
            EqEditorMessage::DragMoved { dx, dy } => self.session.drag_delta(bands, dx, dy),
            EqEditorMessage::DragReleased => self.session.drag_complete(bands),
            EqEditorMessage::AddPoint { x, y } => self.session.add_band_at(bands, x, y).map(|_| ()),
            EqEditorMessage::DeletePoint(id) => self.session.remove_band(bands, id).map(|_| ()),
            EqEditorMessage::Resized { width, height } => {
                self.session.resize(bands, width, height);
                Ok(())
            }
            EqEditorMessage::SetTime(time) => {
                self.session.set_time(bands, time);
                Ok(())
            }
            EqEditorMessage::SetZoom(range) => {
                self.session.set_zoom(bands, range);
                Ok(())
            }
            EqEditorMessage::ResizeStarted => self.session.resize_start(),
            EqEditorMessage::ResizeMoved { dy } => self
                .session
                .resize_delta(bands, dy)
                .map(|height| self.config.editor_height = height),
            EqEditorMessage::ResizeReleased => match self.session.resize_complete() {
                Ok(height) => {
                    self.config.editor_height = height;
                    self.persist_config();
                    Ok(())
                }
                Err(e) => Err(e),
            },
            EqEditorMessage::SetHighQuality(enabled) => {
                self.config.high_quality = enabled;
                self.persist_config();
                Ok(())
            }
            EqEditorMessage::FlushDeferred => {
                self.session.flush_deferred(bands);
                Ok(())
            }
        };

        if let Err(e) = result {
            log::warn!("handle_message: {}", e);
        }

        if self.session.has_deferred() {
            Task::done(EqEditorMessage::FlushDeferred)
        } else {
            Task::none()
        }
    }

    /// Drain the session's notifications for the host
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        self.session.take_events()
    }

    fn persist_config(&self) {
        if let Err(e) = save_config(&self.config, &self.config_path) {
            log::warn!("persist_config: Failed to save editor config: {:#}", e);
        }
    }
}
