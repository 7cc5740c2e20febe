use panel_logging::{Logger, LoggerConfigPatch};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{ExtensionSettings, Message, MessageAction, PageInfo, Response};

/// Answers messages sent by the page host.
///
/// Settings updates reconfigure this handler's own logger; nothing global is
/// touched.
#[derive(Debug, Clone)]
pub struct BackgroundHandler {
    logger: Logger,
}

impl BackgroundHandler {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn handle(&mut self, message: Message) -> Response {
        self.logger.debug_with(
            "message received",
            &json!({ "action": String::from(message.action.clone()) }),
        );

        match message.action {
            MessageAction::PageInfo => self.handle_page_info(message.data),
            MessageAction::UpdateSettings => self.handle_update_settings(message.data),
            MessageAction::ReportError => self.handle_report_error(message.data),
            MessageAction::Unknown(action) => {
                self.logger
                    .warn_with("unknown message action", &json!({ "action": action }));
                Response::error("unknown action")
            }
        }
    }

    fn handle_page_info(&self, data: Option<Value>) -> Response {
        match parse_payload::<PageInfo>(data) {
            Ok(info) => {
                self.logger.info_with(
                    "page info received",
                    &json!({
                        "url": info.url,
                        "title": info.title,
                        "timestamp": info.timestamp,
                    }),
                );
                Response::success("page info processed").with_data(json!({ "received": true }))
            }
            Err(err) => {
                self.logger.warn(&format!("invalid page info: {err}"));
                Response::error(format!("invalid page info: {err}"))
            }
        }
    }

    fn handle_update_settings(&mut self, data: Option<Value>) -> Response {
        match parse_payload::<ExtensionSettings>(data) {
            Ok(settings) => {
                self.logger.reconfigure(LoggerConfigPatch {
                    min_level: Some(settings.log_level),
                    debug_mode: Some(settings.debug_mode),
                    show_timestamp: None,
                });
                self.logger.info("settings updated");
                Response::success("settings updated")
            }
            Err(err) => {
                self.logger.warn(&format!("invalid settings: {err}"));
                Response::error(format!("invalid settings: {err}"))
            }
        }
    }

    fn handle_report_error(&self, data: Option<Value>) -> Response {
        self.logger.error_with("error reported", &data.unwrap_or(Value::Null));
        Response::success("error recorded")
    }
}

fn parse_payload<T: DeserializeOwned>(data: Option<Value>) -> Result<T, String> {
    let data = data.ok_or_else(|| "missing data".to_string())?;
    serde_json::from_value(data).map_err(|e| e.to_string())
}
