use panel_core::{
    BackgroundHandler, ExtensionSettings, Message, MessageAction, PageInfo, Response,
    ResponseStatus,
};
use panel_logging::{LogLevel, Logger, LoggerConfig};
use pretty_assertions::assert_eq;
use serde_json::json;

fn handler() -> BackgroundHandler {
    panel_logging::initialize_for_tests();
    BackgroundHandler::new(Logger::new(LoggerConfig::default(), "background"))
}

#[test]
fn actions_use_camel_case_on_the_wire() {
    let message = Message::new(MessageAction::UpdateSettings);
    assert_eq!(
        serde_json::to_value(&message).unwrap(),
        json!({ "action": "updateSettings" })
    );

    let parsed: Message = serde_json::from_value(json!({ "action": "pageInfo" })).unwrap();
    assert_eq!(parsed.action, MessageAction::PageInfo);
    assert_eq!(parsed.data, None);
}

#[test]
fn unrecognised_action_is_kept() {
    let parsed: Message = serde_json::from_value(json!({ "action": "reboot" })).unwrap();
    assert_eq!(parsed.action, MessageAction::Unknown("reboot".to_string()));
}

#[test]
fn page_info_is_acknowledged() {
    let info = PageInfo {
        url: "https://example.com/app".to_string(),
        title: "Chat".to_string(),
        timestamp: "2024-05-01T12:34:56.000Z".to_string(),
    };
    let message = Message::with_data(MessageAction::PageInfo, &info).unwrap();

    let response = handler().handle(message);

    assert_eq!(
        response,
        Response::success("page info processed").with_data(json!({ "received": true }))
    );
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "status": "success",
            "message": "page info processed",
            "data": { "received": true }
        })
    );
}

#[test]
fn page_info_without_payload_is_rejected() {
    let response = handler().handle(Message::new(MessageAction::PageInfo));
    assert_eq!(response.status, ResponseStatus::Error);
    assert!(response.message.contains("missing data"));
}

#[test]
fn settings_update_reconfigures_only_the_handler() {
    let mut handler = handler();
    let settings = ExtensionSettings {
        log_level: LogLevel::Debug,
        debug_mode: true,
    };
    let message = Message::with_data(MessageAction::UpdateSettings, &settings).unwrap();

    let response = handler.handle(message);

    assert!(response.is_success());
    assert_eq!(handler.logger().config().min_level, LogLevel::Debug);
    assert!(handler.logger().is_debug_mode());
}

#[test]
fn settings_payload_uses_numeric_level() {
    let parsed: ExtensionSettings =
        serde_json::from_value(json!({ "logLevel": 3, "debugMode": false })).unwrap();
    assert_eq!(parsed.log_level, LogLevel::Error);

    let mut handler = handler();
    let response = handler.handle(Message {
        action: MessageAction::UpdateSettings,
        data: Some(json!({ "logLevel": 9, "debugMode": false })),
    });
    assert_eq!(response.status, ResponseStatus::Error);
    assert_eq!(handler.logger().config().min_level, LogLevel::Info);
}

#[test]
fn error_reports_are_recorded() {
    let response = handler().handle(Message {
        action: MessageAction::ReportError,
        data: Some(json!({ "reason": "boom" })),
    });
    assert_eq!(response, Response::success("error recorded"));
}

#[test]
fn unknown_action_is_an_error() {
    let response = handler().handle(Message::new(MessageAction::Unknown("reboot".to_string())));
    assert_eq!(response, Response::error("unknown action"));
}
