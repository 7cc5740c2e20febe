use crate::view_model::AppViewModel;
use crate::DownloadFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Waiting,
    Injected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedDownload {
    pub format: DownloadFormat,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    buttons: ButtonState,
    observing: bool,
    in_flight: Option<DownloadFormat>,
    completed: Vec<CompletedDownload>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            buttons: ButtonState::Waiting,
            observing: true,
            in_flight: None,
            completed: Vec::new(),
            dirty: false,
        }
    }
}

impl AppState {
    /// Fresh page: observer connected, no buttons yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            buttons: self.buttons,
            observing: self.observing,
            in_flight: self.in_flight,
            completed: self.completed.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn buttons(&self) -> ButtonState {
        self.buttons
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    pub fn in_flight(&self) -> Option<DownloadFormat> {
        self.in_flight
    }

    pub(crate) fn mark_injected(&mut self) {
        self.buttons = ButtonState::Injected;
        self.dirty = true;
    }

    pub(crate) fn stop_observing(&mut self) {
        self.observing = false;
        self.dirty = true;
    }

    pub(crate) fn begin_download(&mut self, format: DownloadFormat) {
        self.in_flight = Some(format);
        self.dirty = true;
    }

    pub(crate) fn finish_download(&mut self) {
        self.in_flight = None;
        self.dirty = true;
    }

    pub(crate) fn record_download(&mut self, format: DownloadFormat, filename: String) {
        self.completed.push(CompletedDownload { format, filename });
        self.dirty = true;
    }
}
