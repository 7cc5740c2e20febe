use std::collections::VecDeque;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use anyhow::{bail, Context};
use chrono::{SecondsFormat, Utc};
use log::LevelFilter;
use panel_core::{
    update, AppState, AppViewModel, BackgroundHandler, Message, MessageAction, Msg,
    OneShotObserver, PageInfo, PageSnapshot,
};
use panel_engine::{decode_page, Document, ExportConfig, PanelExporter};
use panel_logging::{LogLevel, Logger};
use serde_json::json;

use super::effects::{Delivery, EffectRunner};
use super::logging::{self, LogDestination};
use super::settings::{self, AppSettings};
use crate::cli::{Cli, Commands, ExportArgs, MessageArgs, WatchArgs};

const TARGET: &str = "panel_app";

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(LogDestination::from_option(cli.log_file.as_deref()), level);

    let mut settings = settings::load_settings(
        cli.config.as_deref(),
        &Logger::new(Default::default(), TARGET),
    );
    if cli.verbose {
        settings.logger.min_level = LogLevel::Debug;
    }
    let logger = Logger::new(settings.logger, TARGET);

    match cli.command {
        Commands::Export(args) => export(&settings, &logger, &args),
        Commands::Watch(args) => watch(&settings, &logger, &args),
        Commands::Message(args) => message(&logger, args),
    }
}

/// Owns the UI state and feeds messages through `update` until no more follow.
struct Session {
    state: AppState,
    runner: EffectRunner,
    document: Option<Document>,
}

impl Session {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            document: None,
        }
    }

    fn load(&mut self, document: Document) {
        self.document = Some(document);
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let (next, effects) = update(std::mem::take(&mut self.state), msg);
            self.state = next;
            for effect in effects {
                if let Some(follow_up) = self.runner.run(effect, self.document.as_ref()) {
                    queue.push_back(follow_up);
                }
            }
        }
    }

    fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Unloads the page and turns any alert raised along the way into an error.
    fn finish(mut self) -> anyhow::Result<AppViewModel> {
        self.dispatch(Msg::Unload);
        let alerts = self.runner.alerts();
        if !alerts.is_empty() {
            bail!("{} download(s) failed: {}", alerts.len(), alerts.join("; "));
        }
        Ok(self.view())
    }
}

fn build_session(settings: &AppSettings, logger: &Logger, args: &ExportArgs) -> Session {
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| settings.output_dir.clone());
    let mut config = ExportConfig::default_with_output(output_dir);
    config.locator = settings.locator();
    let exporter = PanelExporter::new(config, logger.for_target("panel_engine"));
    let delivery = if args.stdout {
        Delivery::Stdout
    } else {
        Delivery::File
    };
    Session::new(EffectRunner::new(exporter, delivery, logger.clone()))
}

fn export(settings: &AppSettings, logger: &Logger, args: &ExportArgs) -> anyhow::Result<()> {
    let document = read_document(&args.input)?;
    let snapshot = page_snapshot(&document, settings)?;
    report_page_info(&document, &args.input, logger)?;

    let mut session = build_session(settings, logger, args);
    session.load(document);
    session.dispatch(Msg::PageChanged(snapshot));
    click_all(&mut session, args);
    session.finish().map(|_| ())
}

fn watch(settings: &AppSettings, logger: &Logger, args: &WatchArgs) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel::<PageSnapshot>();
    let mut observer = OneShotObserver::new(
        |snapshot: &PageSnapshot| snapshot.has_action_container || snapshot.has_download_button,
        move |snapshot: &PageSnapshot| {
            let _ = tx.send(*snapshot);
        },
    );

    let input = &args.export.input;
    let deadline = Instant::now() + Duration::from_secs(args.timeout_secs);
    let interval = Duration::from_millis(args.interval_ms);
    let mut session = build_session(settings, logger, &args.export);
    let mut last_seen = None;

    logger.info_with(
        "waiting for action container",
        &json!({ "path": input.display().to_string(), "selector": settings.action_container_selector }),
    );
    while observer.is_connected() {
        if Instant::now() >= deadline {
            observer.disconnect();
            session.dispatch(Msg::Unload);
            bail!(
                "timed out after {}s waiting for {}",
                args.timeout_secs,
                settings.action_container_selector
            );
        }
        if let Some(modified) = changed_since(input, last_seen) {
            last_seen = Some(modified);
            let document = read_document(input)?;
            let snapshot = page_snapshot(&document, settings)?;
            trace_page_change(logger, &snapshot);
            session.load(document);
            observer.notify(&snapshot);
        }
        if let Ok(snapshot) = rx.try_recv() {
            session.dispatch(Msg::PageChanged(snapshot));
            break;
        }
        thread::sleep(interval);
    }

    if let Some(document) = session.document.as_ref() {
        report_page_info(document, input, logger)?;
    }
    click_all(&mut session, &args.export);
    session.finish().map(|_| ())
}

fn message(logger: &Logger, args: MessageArgs) -> anyhow::Result<()> {
    let raw = match args.json {
        Some(json) => json,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read message from stdin")?;
            buffer
        }
    };
    let message: Message =
        serde_json::from_str(raw.trim()).context("message is not a valid JSON envelope")?;
    let mut handler = BackgroundHandler::new(logger.for_target("panel_core::background"));
    let response = handler.handle(message);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn click_all(session: &mut Session, args: &ExportArgs) {
    for format in args.download_formats() {
        session.dispatch(Msg::DownloadClicked(format));
    }
}

fn read_document(path: &Path) -> anyhow::Result<Document> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let page = decode_page(&bytes).with_context(|| format!("failed to decode {}", path.display()))?;
    Ok(Document::parse(&page.html))
}

fn page_snapshot(document: &Document, settings: &AppSettings) -> anyhow::Result<PageSnapshot> {
    Ok(PageSnapshot {
        has_action_container: document.contains(&settings.action_container_selector)?,
        has_download_button: document.contains(&settings.download_button_selector)?,
    })
}

/// Logs every observed change while debug mode is on. Returns whether a line was written.
fn trace_page_change(logger: &Logger, snapshot: &PageSnapshot) -> bool {
    if !logger.is_debug_mode() {
        return false;
    }
    logger.debug_with(
        "page changed",
        &json!({
            "actionContainer": snapshot.has_action_container,
            "downloadButton": snapshot.has_download_button,
        }),
    );
    true
}

fn changed_since(path: &Path, last_seen: Option<SystemTime>) -> Option<SystemTime> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .filter(|modified| Some(*modified) != last_seen)
}

/// Tells the background handler which page is being exported.
fn report_page_info(document: &Document, input: &Path, logger: &Logger) -> anyhow::Result<()> {
    let info = PageInfo {
        url: page_url(input),
        title: document.title(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    let mut handler = BackgroundHandler::new(logger.for_target("panel_core::background"));
    let response = handler.handle(Message::with_data(MessageAction::PageInfo, &info)?);
    if response.is_success() {
        logger.debug_with("page info sent", &serde_json::to_value(&info)?);
    } else {
        logger.warn_with("page info rejected", &serde_json::to_value(&response)?);
    }
    Ok(())
}

fn page_url(input: &Path) -> String {
    let absolute = fs::canonicalize(input).unwrap_or_else(|_| PathBuf::from(input));
    format!("file://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use panel_core::{ButtonState, DownloadFormat};
    use panel_logging::LoggerConfig;
    use tempfile::TempDir;

    use super::*;
    use crate::cli::FormatArg;

    const PAGE: &str = r#"<html><head><title>Chat</title></head><body>
<div cdkscrollable data-test-id="scroll-container" class="container">
  <div class="markdown markdown-main-panel stronger enable-updated-hr-color"><h1>Hi</h1><p>there</p></div>
</div>
<div class="action-buttons"></div>
</body></html>"#;

    fn logger() -> Logger {
        panel_logging::initialize_for_tests();
        Logger::new(LoggerConfig::default(), "app-test")
    }

    fn args(input: PathBuf, output: PathBuf, formats: Vec<FormatArg>) -> ExportArgs {
        ExportArgs {
            input,
            formats,
            output: Some(output),
            stdout: false,
        }
    }

    fn saved_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn export_writes_every_requested_format() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("page.html");
        let out = temp.path().join("out");
        fs::write(&input, PAGE).unwrap();

        export(
            &AppSettings::default(),
            &logger(),
            &args(input, out.clone(), vec![FormatArg::Md, FormatArg::Txt]),
        )
        .unwrap();

        let names = saved_files(&out);
        assert_eq!(names.len(), 2);
        assert!(names[0].starts_with("Chat_") && names[0].ends_with(".md"));
        assert!(names[1].starts_with("Chat_") && names[1].ends_with(".txt"));
        let markdown = fs::read_to_string(out.join(&names[0])).unwrap();
        assert_eq!(markdown, "# Hi\n\nthere\n\n");
    }

    #[test]
    fn export_without_content_fails_and_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("page.html");
        let out = temp.path().join("out");
        fs::write(&input, "<html><body><p>empty</p></body></html>").unwrap();

        let err = export(
            &AppSettings::default(),
            &logger(),
            &args(input, out.clone(), Vec::new()),
        )
        .unwrap_err();

        assert!(err.to_string().contains("Content container was not found."));
        assert!(!out.exists());
    }

    #[test]
    fn missing_input_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = export(
            &AppSettings::default(),
            &logger(),
            &args(temp.path().join("nope.html"), temp.path().join("out"), Vec::new()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn session_injects_once_and_records_download() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let export_args = args(temp.path().join("page.html"), out.clone(), Vec::new());
        let mut session = build_session(&AppSettings::default(), &logger(), &export_args);
        session.load(Document::parse(PAGE));

        let snapshot = PageSnapshot {
            has_action_container: true,
            has_download_button: false,
        };
        session.dispatch(Msg::PageChanged(snapshot));
        session.dispatch(Msg::PageChanged(snapshot));
        session.dispatch(Msg::DownloadClicked(DownloadFormat::PlainText));

        let view = session.finish().unwrap();
        assert_eq!(view.buttons, ButtonState::Injected);
        assert!(!view.observing);
        assert_eq!(view.in_flight, None);
        assert_eq!(view.completed.len(), 1);
        assert!(view.last_filename().unwrap().ends_with(".txt"));
    }

    #[test]
    fn watch_exports_once_container_is_present() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("page.html");
        let out = temp.path().join("out");
        fs::write(&input, PAGE).unwrap();

        let watch_args = WatchArgs {
            export: args(input, out.clone(), vec![FormatArg::Md]),
            interval_ms: 10,
            timeout_secs: 5,
        };
        watch(&AppSettings::default(), &logger(), &watch_args).unwrap();

        assert_eq!(saved_files(&out).len(), 1);
    }

    #[test]
    fn watch_times_out_without_container() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("page.html");
        fs::write(&input, "<html><body>loading</body></html>").unwrap();

        let watch_args = WatchArgs {
            export: args(input, temp.path().join("out"), Vec::new()),
            interval_ms: 10,
            timeout_secs: 0,
        };
        let err = watch(&AppSettings::default(), &logger(), &watch_args).unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn page_changes_are_traced_only_in_debug_mode() {
        panel_logging::initialize_for_tests();
        let snapshot = PageSnapshot {
            has_action_container: true,
            has_download_button: false,
        };
        let quiet = Logger::new(
            LoggerConfig {
                min_level: LogLevel::Debug,
                debug_mode: false,
                ..LoggerConfig::default()
            },
            "app-test",
        );
        let tracing = Logger::new(
            LoggerConfig {
                min_level: LogLevel::Debug,
                debug_mode: true,
                ..LoggerConfig::default()
            },
            "app-test",
        );

        assert!(!trace_page_change(&quiet, &snapshot));
        assert!(trace_page_change(&tracing, &snapshot));
    }

    #[test]
    fn page_url_is_a_file_url() {
        assert!(page_url(Path::new("relative.html")).starts_with("file://"));
    }
}
