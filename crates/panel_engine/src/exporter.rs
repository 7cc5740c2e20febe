use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use panel_logging::Logger;
use serde_json::json;

use crate::convert::{ContentExtractor, OutputFormat};
use crate::extract::{ContentLocator, Document};
use crate::filename::download_filename;
use crate::persist::{DirectorySink, FileSink};
use crate::types::{ExportError, SavedFile};

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub locator: ContentLocator,
    /// Source of the filename timestamp.
    pub clock: Clock,
}

impl ExportConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            locator: ContentLocator::default(),
            clock: Arc::new(Utc::now),
        }
    }
}

impl std::fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportConfig")
            .field("output_dir", &self.output_dir)
            .field("locator", &self.locator)
            .finish_non_exhaustive()
    }
}

/// Locates the content pane of a page, converts it and saves the result.
pub struct PanelExporter {
    config: ExportConfig,
    extractor: ContentExtractor,
    sink: Box<dyn FileSink>,
    logger: Logger,
}

impl PanelExporter {
    pub fn new(config: ExportConfig, logger: Logger) -> Self {
        let sink = Box::new(DirectorySink::new(config.output_dir.clone()));
        Self::with_sink(config, logger, sink)
    }

    pub fn with_sink(config: ExportConfig, logger: Logger, sink: Box<dyn FileSink>) -> Self {
        let extractor = ContentExtractor::new(logger.for_target("panel_engine::convert"));
        Self {
            config,
            extractor,
            sink,
            logger,
        }
    }

    /// Converted content of the page, without saving it.
    pub fn render(
        &self,
        document: &Document,
        format: OutputFormat,
    ) -> Result<String, ExportError> {
        let pane = match self.config.locator.locate(document) {
            Ok(pane) => pane,
            Err(err) => {
                self.logger.error(&err.to_string());
                return Err(err.into());
            }
        };
        Ok(self.extractor.extract(&pane, format))
    }

    pub fn export(
        &self,
        document: &Document,
        format: OutputFormat,
    ) -> Result<SavedFile, ExportError> {
        let content = self.render(document, format)?;
        let filename = download_filename(&document.title(), (self.config.clock)(), format);
        let saved = self.sink.save(&filename, &content, format.mime_type())?;
        self.logger.info_with(
            &format!("content downloaded as {}", format.extension().to_uppercase()),
            &json!({ "filename": saved.filename, "bytes": saved.bytes }),
        );
        Ok(saved)
    }
}
