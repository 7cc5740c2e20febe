use std::io::{self, Write};

use panel_core::{DownloadFormat, DownloadOutcome, Effect, Msg};
use panel_engine::{Document, OutputFormat, PanelExporter};
use panel_logging::Logger;
use serde_json::json;

/// Where converted content goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Saved into the exporter's output directory; the path is printed.
    File,
    /// Written to stdout.
    Stdout,
}

/// Carries out the effects returned by `update` against the loaded page.
pub struct EffectRunner {
    exporter: PanelExporter,
    delivery: Delivery,
    logger: Logger,
    alerts: Vec<String>,
}

impl EffectRunner {
    pub fn new(exporter: PanelExporter, delivery: Delivery, logger: Logger) -> Self {
        Self {
            exporter,
            delivery,
            logger,
            alerts: Vec::new(),
        }
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Runs one effect. An export answers with the message that reports its outcome.
    pub fn run(&mut self, effect: Effect, document: Option<&Document>) -> Option<Msg> {
        match effect {
            Effect::InjectButtons { buttons } => {
                for format in buttons {
                    self.logger.info_with(
                        "download button added",
                        &json!({ "label": format.button_label(), "testId": format.test_id() }),
                    );
                }
                None
            }
            Effect::StopObserving => {
                self.logger.debug("page observer disconnected");
                None
            }
            Effect::Export { format } => {
                let outcome = match document {
                    Some(document) => self.export(document, format),
                    None => DownloadOutcome::Failed {
                        message: "Page is not loaded yet.".to_string(),
                    },
                };
                Some(Msg::DownloadFinished { format, outcome })
            }
            Effect::Alert { message } => {
                eprintln!("{message}");
                self.alerts.push(message);
                None
            }
        }
    }

    fn export(&self, document: &Document, format: DownloadFormat) -> DownloadOutcome {
        let output = map_format(format);
        match self.delivery {
            Delivery::Stdout => match self.exporter.render(document, output) {
                Ok(content) => {
                    let mut stdout = io::stdout().lock();
                    match stdout.write_all(content.as_bytes()).and_then(|_| stdout.flush()) {
                        Ok(()) => DownloadOutcome::Saved {
                            filename: "-".to_string(),
                        },
                        Err(err) => DownloadOutcome::Failed {
                            message: err.to_string(),
                        },
                    }
                }
                Err(err) => DownloadOutcome::Failed {
                    message: err.alert_message(),
                },
            },
            Delivery::File => match self.exporter.export(document, output) {
                Ok(saved) => {
                    println!("{}", saved.path.display());
                    DownloadOutcome::Saved {
                        filename: saved.filename,
                    }
                }
                Err(err) => DownloadOutcome::Failed {
                    message: err.alert_message(),
                },
            },
        }
    }
}

fn map_format(format: DownloadFormat) -> OutputFormat {
    match format {
        DownloadFormat::Markdown => OutputFormat::Markdown,
        DownloadFormat::PlainText => OutputFormat::PlainText,
    }
}
