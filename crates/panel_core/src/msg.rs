#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownloadFormat {
    Markdown,
    PlainText,
}

impl DownloadFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DownloadFormat::Markdown => "md",
            DownloadFormat::PlainText => "txt",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            DownloadFormat::Markdown => "Download as MD",
            DownloadFormat::PlainText => "Download as TXT",
        }
    }

    /// `data-test-id` of the injected button.
    pub fn test_id(self) -> &'static str {
        match self {
            DownloadFormat::Markdown => "md-download-button",
            DownloadFormat::PlainText => "txt-download-button",
        }
    }
}

/// What the observer saw on the page after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSnapshot {
    pub has_action_container: bool,
    pub has_download_button: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved { filename: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The page changed while the observer was connected.
    PageChanged(PageSnapshot),
    /// User clicked one of the injected buttons.
    DownloadClicked(DownloadFormat),
    /// The host finished (or aborted) an export.
    DownloadFinished {
        format: DownloadFormat,
        outcome: DownloadOutcome,
    },
    /// The page is going away.
    Unload,
}
