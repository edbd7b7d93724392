use std::sync::mpsc;

use common::Notifier;
use llm::SuggestionClient;
use storage::LocalStore;
use tokio::runtime::Handle;
use tracing::debug;

use crate::events::{SuggestionSlot, UiEvent};

/// Everything the page modules share: the storage medium, the toast
/// queue and the AI bridge. Handed mutably into every lifecycle and
/// input call, never held across frames by a page.
pub struct AppContext {
    pub store: LocalStore,
    pub notifier: Notifier,
    pub suggester: Suggester,
}

impl AppContext {
    pub fn new(store: LocalStore, suggester: Suggester) -> Self {
        Self {
            store,
            notifier: Notifier::new(),
            suggester,
        }
    }
}

/// Fire-and-forget side of the AI bridge. Requests run on the tokio
/// runtime; completions come back through the event channel so pages
/// only ever see results inside the main loop.
pub struct Suggester {
    client: Option<SuggestionClient>,
    runtime: Handle,
    events: mpsc::Sender<UiEvent>,
}

impl Suggester {
    pub fn new(client: Option<SuggestionClient>, runtime: Handle, events: mpsc::Sender<UiEvent>) -> Self {
        Self {
            client,
            runtime,
            events,
        }
    }

    /// Whether suggestion controls should render enabled at all.
    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// Starts one request. Returns `false` when the bridge is not
    /// configured; the caller keeps its trigger disabled in that
    /// case. While a request is in flight the page disables the
    /// triggering control, which is the only concurrency guard.
    pub fn request(&self, page: &str, slot: SuggestionSlot, prompt: &str) -> bool {
        let Some(client) = self.client.clone() else {
            return false;
        };
        let page = page.to_string();
        let prompt = prompt.to_string();
        let events = self.events.clone();
        debug!(%page, ?slot, "suggestion requested");
        self.runtime.spawn(async move {
            let result = client
                .suggest(&prompt)
                .await
                .map_err(|e| e.to_string());
            let _ = events.send(UiEvent::Suggestion { page, slot, result });
        });
        true
    }
}
