//! Panel core: pure trigger state machine, one-shot observer and message envelope.
mod background;
mod effect;
mod message;
mod msg;
mod observer;
mod state;
mod update;
mod view_model;

pub use background::BackgroundHandler;
pub use effect::Effect;
pub use message::{ExtensionSettings, Message, MessageAction, PageInfo, Response, ResponseStatus};
pub use msg::{DownloadFormat, DownloadOutcome, Msg, PageSnapshot};
pub use observer::OneShotObserver;
pub use state::{AppState, ButtonState, CompletedDownload};
pub use update::update;
pub use view_model::AppViewModel;
