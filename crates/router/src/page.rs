use std::collections::HashMap;
use std::marker::PhantomData;

use anyhow::Result;

/// Lifecycle of one navigable page.
///
/// `setup` runs exactly once, before the first activation of any
/// page, and allocates whatever state the page keeps between shows.
/// A failed setup aborts boot; pages never limp along half-wired.
/// `show` runs on every activation and is where collections reload
/// from storage, so navigating away and back always reflects what was
/// persisted in between.
pub trait Page<Ctx> {
    fn setup(&mut self, _ctx: &mut Ctx) -> Result<()> {
        Ok(())
    }

    fn show(&mut self, ctx: &mut Ctx);
}

/// Fixed mapping from page key to its lifecycle object. `P` defaults
/// to the bare lifecycle trait; frontends that need a richer page
/// trait (drawing, key handling) instantiate the registry with their
/// own `P: Page<Ctx> + ?Sized`.
pub struct PageRegistry<Ctx, P: Page<Ctx> + ?Sized = dyn Page<Ctx>> {
    pages: HashMap<String, Box<P>>,
    _ctx: PhantomData<fn(&mut Ctx)>,
}

impl<Ctx, P: Page<Ctx> + ?Sized> Default for PageRegistry<Ctx, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx, P: Page<Ctx> + ?Sized> PageRegistry<Ctx, P> {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            _ctx: PhantomData,
        }
    }

    pub fn register(&mut self, key: impl Into<String>, page: Box<P>) {
        self.pages.insert(key.into(), page);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pages.contains_key(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut P> {
        self.pages.get_mut(key).map(|b| b.as_mut())
    }

    /// Runs every page's `setup` once. Stops at the first failure.
    pub fn setup_all(&mut self, ctx: &mut Ctx) -> Result<()> {
        for (key, page) in self.pages.iter_mut() {
            page.setup(ctx)
                .map_err(|err| err.context(format!("setup of page '{key}' failed")))?;
        }
        Ok(())
    }

    pub fn show(&mut self, key: &str, ctx: &mut Ctx) -> bool {
        match self.pages.get_mut(key) {
            Some(page) => {
                page.show(ctx);
                true
            }
            None => false,
        }
    }
}
