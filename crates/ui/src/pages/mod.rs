//! Page modules. Each implements the router lifecycle plus the
//! drawing/input surface the terminal frontend needs.

pub mod daily_plan;
pub mod espiritual;
pub mod fisica;
pub mod goals;
pub mod preventiva;
pub mod statics;
pub mod tarefas;

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;
use router::Page;

use crate::context::AppContext;
use crate::events::SuggestionSlot;

/// What a page did with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    /// Key consumed; nothing further.
    Consumed,
    /// Key not meaningful to the page; global bindings may apply.
    Pass,
    /// Jump to another page.
    Navigate(String),
}

/// A navigable page as the terminal frontend sees it: the router
/// lifecycle plus per-frame drawing and key handling.
pub trait PageView: Page<AppContext> {
    fn draw(&mut self, f: &mut Frame, area: Rect, ctx: &mut AppContext);

    fn handle_key(&mut self, key: &KeyEvent, ctx: &mut AppContext) -> PageAction;

    /// Completed AI request for this page. Default: ignore.
    fn on_suggestion(
        &mut self,
        _slot: SuggestionSlot,
        _result: Result<String, String>,
        _ctx: &mut AppContext,
    ) {
    }
}
