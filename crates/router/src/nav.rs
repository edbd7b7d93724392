use std::collections::HashMap;

use domain::keys;
use storage::LocalStore;
use tracing::{debug, warn};

use crate::sitemap::{self, HOME};

/// Navigation state. The active key is always derived from the last
/// requested target, with unknown targets falling back to home rather
/// than erroring.
pub struct NavState {
    active: String,
    history: Vec<String>,
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavState {
    pub fn new() -> Self {
        Self {
            active: HOME.to_string(),
            history: Vec::new(),
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    /// Resolves `target` against the site map and activates it.
    /// Returns the key that actually became active.
    pub fn navigate(&mut self, target: &str) -> &str {
        let resolved = if sitemap::find(target).is_some() {
            target
        } else {
            debug!(target, "unknown navigation target, falling back to home");
            HOME
        };
        if resolved != self.active {
            self.history.push(std::mem::replace(&mut self.active, resolved.to_string()));
        }
        &self.active
    }

    /// Pops the previous page, staying put at the start of history.
    pub fn back(&mut self) -> &str {
        if let Some(prev) = self.history.pop() {
            self.active = prev;
        }
        &self.active
    }

    pub fn breadcrumbs(&self) -> Vec<&'static sitemap::SiteNode> {
        sitemap::breadcrumbs(&self.active)
    }
}

/// Sidebar presentation state. The collapsed flag and per-section
/// open flags persist across runs under their own storage keys.
pub struct SidebarState {
    collapsed: bool,
    open_sections: HashMap<String, bool>,
}

impl SidebarState {
    /// Restores persisted state; absent flags mean expanded.
    pub fn load(store: &LocalStore) -> Self {
        let collapsed = store
            .load::<bool>(keys::SIDEBAR_COLLAPSED)
            .unwrap_or_default()
            .unwrap_or(false);
        let mut open_sections = HashMap::new();
        for section in [sitemap::SECTION_AREAS, sitemap::SECTION_PLANEJAMENTO] {
            let open = store
                .load::<bool>(&keys::sidebar_section(section))
                .unwrap_or_default()
                .unwrap_or(true);
            open_sections.insert(section.to_string(), open);
        }
        Self {
            collapsed,
            open_sections,
        }
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle_collapsed(&mut self, store: &LocalStore) {
        self.collapsed = !self.collapsed;
        if let Err(err) = store.save(keys::SIDEBAR_COLLAPSED, &self.collapsed) {
            warn!(%err, "failed to persist sidebar state");
        }
    }

    pub fn is_open(&self, section: &str) -> bool {
        self.open_sections.get(section).copied().unwrap_or(true)
    }

    pub fn toggle_section(&mut self, store: &LocalStore, section: &str) {
        let open = !self.is_open(section);
        self.open_sections.insert(section.to_string(), open);
        if let Err(err) = store.save(&keys::sidebar_section(section), &open) {
            warn!(%err, section, "failed to persist sidebar section state");
        }
    }

    /// Opens the section when closed. Activating a nested page calls
    /// this for the page's ancestor section; other sections keep
    /// whatever state the user gave them.
    pub fn ensure_open(&mut self, store: &LocalStore, section: &str) {
        if self.is_open(section) {
            return;
        }
        self.open_sections.insert(section.to_string(), true);
        if let Err(err) = store.save(&keys::sidebar_section(section), &true) {
            warn!(%err, section, "failed to persist sidebar section state");
        }
    }
}

/// One full navigation transition: resolve the target, force the
/// destination's sidebar section open and report the key whose `show`
/// must now run.
pub fn transition<'a>(
    nav: &'a mut NavState,
    sidebar: &mut SidebarState,
    store: &LocalStore,
    target: &str,
) -> &'a str {
    let key = nav.navigate(target).to_string();
    if let Some(section) = sitemap::find(&key).and_then(|n| n.section) {
        sidebar.ensure_open(store, section);
    }
    nav.active()
}
