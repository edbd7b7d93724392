use anyhow::Result;
use domain::keys;
use router::{
    breadcrumbs, sitemap, transition, NavState, Page, PageRegistry, SidebarState, HOME,
    SECTION_AREAS, SECTION_PLANEJAMENTO,
};
use storage::LocalStore;

#[derive(Default)]
struct Trace {
    setups: Vec<&'static str>,
    shows: Vec<&'static str>,
}

struct TracingPage(&'static str);

impl Page<Trace> for TracingPage {
    fn setup(&mut self, ctx: &mut Trace) -> Result<()> {
        ctx.setups.push(self.0);
        Ok(())
    }

    fn show(&mut self, ctx: &mut Trace) {
        ctx.shows.push(self.0);
    }
}

#[test]
fn all_setups_run_before_any_show() -> Result<()> {
    let mut ctx = Trace::default();
    let mut registry: PageRegistry<Trace> = PageRegistry::new();
    registry.register("inicio", Box::new(TracingPage("inicio")));
    registry.register("fisica", Box::new(TracingPage("fisica")));

    registry.setup_all(&mut ctx)?;
    assert_eq!(ctx.setups.len(), 2);
    assert!(ctx.shows.is_empty());

    assert!(registry.show("fisica", &mut ctx));
    assert_eq!(ctx.shows, ["fisica"]);
    Ok(())
}

#[test]
fn setup_failure_aborts_with_page_name() {
    struct Broken;
    impl Page<Trace> for Broken {
        fn setup(&mut self, _ctx: &mut Trace) -> Result<()> {
            anyhow::bail!("no terminal")
        }
        fn show(&mut self, _ctx: &mut Trace) {}
    }

    let mut ctx = Trace::default();
    let mut registry: PageRegistry<Trace> = PageRegistry::new();
    registry.register("fisica", Box::new(Broken));
    let err = registry.setup_all(&mut ctx).unwrap_err();
    assert!(format!("{err:#}").contains("fisica"));
}

#[test]
fn show_of_unknown_key_is_reported() {
    let mut ctx = Trace::default();
    let mut registry: PageRegistry<Trace> = PageRegistry::new();
    registry.register("inicio", Box::new(TracingPage("inicio")));
    assert!(!registry.show("does-not-exist", &mut ctx));
    assert!(ctx.shows.is_empty());
}

#[test]
fn unknown_target_falls_back_to_home() {
    let mut nav = NavState::new();
    assert_eq!(nav.navigate("does-not-exist"), HOME);
    assert_eq!(nav.active(), HOME);
    assert!(nav.breadcrumbs().is_empty());
}

#[test]
fn breadcrumbs_walk_parent_links_without_home() {
    assert!(breadcrumbs(HOME).is_empty());
    assert!(breadcrumbs("nope").is_empty());

    let trail = breadcrumbs("fisica");
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].title, "Saúde Física");

    let nested: Vec<&str> = breadcrumbs("alongamento").iter().map(|n| n.key).collect();
    assert_eq!(nested, ["fisica", "alongamento"]);
}

#[test]
fn back_returns_to_previous_page() {
    let mut nav = NavState::new();
    nav.navigate("fisica");
    nav.navigate("tarefas");
    assert_eq!(nav.back(), "fisica");
    assert_eq!(nav.back(), HOME);
    // Nothing left to pop.
    assert_eq!(nav.back(), HOME);
}

#[test]
fn sidebar_flags_persist_across_loads() -> Result<()> {
    let store = LocalStore::open_in_memory()?;

    let mut sidebar = SidebarState::load(&store);
    assert!(!sidebar.collapsed());
    assert!(sidebar.is_open(SECTION_AREAS));

    sidebar.toggle_collapsed(&store);
    sidebar.toggle_section(&store, SECTION_AREAS);

    let reloaded = SidebarState::load(&store);
    assert!(reloaded.collapsed());
    assert!(!reloaded.is_open(SECTION_AREAS));
    assert!(reloaded.is_open(SECTION_PLANEJAMENTO));
    Ok(())
}

#[test]
fn transition_forces_destination_section_open_only() -> Result<()> {
    let store = LocalStore::open_in_memory()?;
    let mut nav = NavState::new();
    let mut sidebar = SidebarState::load(&store);
    sidebar.toggle_section(&store, SECTION_AREAS);
    sidebar.toggle_section(&store, SECTION_PLANEJAMENTO);
    assert!(!sidebar.is_open(SECTION_AREAS));

    let key = transition(&mut nav, &mut sidebar, &store, "fisica").to_string();
    assert_eq!(key, "fisica");
    assert!(sidebar.is_open(SECTION_AREAS));
    // The other section stays as the user left it.
    assert!(!sidebar.is_open(SECTION_PLANEJAMENTO));
    assert_eq!(
        store.load::<bool>(&keys::sidebar_section(SECTION_AREAS))?,
        Some(true)
    );
    Ok(())
}

#[test]
fn transition_with_unknown_target_lands_on_home() -> Result<()> {
    let store = LocalStore::open_in_memory()?;
    let mut nav = NavState::new();
    let mut sidebar = SidebarState::load(&store);
    let key = transition(&mut nav, &mut sidebar, &store, "#garbage").to_string();
    assert_eq!(key, HOME);
    assert!(nav.breadcrumbs().is_empty());
    Ok(())
}

#[test]
fn site_map_parents_exist() {
    for node in sitemap::SITE_MAP {
        if let Some(parent) = node.parent {
            assert!(sitemap::find(parent).is_some(), "{} orphaned", node.key);
        }
    }
    assert_eq!(sitemap::title(HOME), "Início");
}
