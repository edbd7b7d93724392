//! Navigation layer: page lifecycle registry, static site map with
//! breadcrumb derivation and the sidebar/active-page state machine.

pub mod nav;
pub mod page;
pub mod sitemap;

pub use nav::{transition, NavState, SidebarState};
pub use page::{Page, PageRegistry};
pub use sitemap::{breadcrumbs, SiteNode, HOME, SECTION_AREAS, SECTION_PLANEJAMENTO, SITE_MAP};
