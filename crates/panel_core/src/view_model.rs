use crate::{ButtonState, CompletedDownload, DownloadFormat};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub buttons: ButtonState,
    pub observing: bool,
    pub in_flight: Option<DownloadFormat>,
    pub completed: Vec<CompletedDownload>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn last_filename(&self) -> Option<&str> {
        self.completed.last().map(|d| d.filename.as_str())
    }
}
