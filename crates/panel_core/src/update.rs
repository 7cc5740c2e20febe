use crate::{AppState, ButtonState, DownloadFormat, DownloadOutcome, Effect, Msg};

/// Button order as it appears in the action container.
const BUTTONS: [DownloadFormat; 2] = [DownloadFormat::Markdown, DownloadFormat::PlainText];

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageChanged(snapshot) => {
            if !state.is_observing() || state.buttons() == ButtonState::Injected {
                return (state, Vec::new());
            }
            if snapshot.has_download_button {
                // Someone else already put the buttons there.
                state.mark_injected();
                state.stop_observing();
                vec![Effect::StopObserving]
            } else if snapshot.has_action_container {
                state.mark_injected();
                state.stop_observing();
                vec![
                    Effect::InjectButtons {
                        buttons: BUTTONS.to_vec(),
                    },
                    Effect::StopObserving,
                ]
            } else {
                Vec::new()
            }
        }
        Msg::DownloadClicked(format) => {
            if state.in_flight().is_some() {
                Vec::new()
            } else {
                state.begin_download(format);
                vec![Effect::Export { format }]
            }
        }
        Msg::DownloadFinished { format, outcome } => {
            if state.in_flight() != Some(format) {
                return (state, Vec::new());
            }
            state.finish_download();
            match outcome {
                DownloadOutcome::Saved { filename } => {
                    state.record_download(format, filename);
                    Vec::new()
                }
                DownloadOutcome::Failed { message } => vec![Effect::Alert { message }],
            }
        }
        Msg::Unload => {
            if state.is_observing() {
                state.stop_observing();
                vec![Effect::StopObserving]
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}
