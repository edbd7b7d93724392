//! Terminal frontend: the application shell, the event pump, page
//! implementations and shared widgets.

pub mod app;
pub mod context;
pub mod events;
pub mod input;
pub mod pages;
pub mod widgets;

pub use app::{event_pump, DashboardApp};
pub use context::{AppContext, Suggester};
pub use events::{EventPump, SuggestionSlot, UiEvent};
