/// Static description of the navigable site: titles, parent links for
/// breadcrumbs and the sidebar section each page belongs to.

pub const HOME: &str = "inicio";

#[derive(Debug, Clone, Copy)]
pub struct SiteNode {
    pub key: &'static str,
    pub title: &'static str,
    pub parent: Option<&'static str>,
    /// Collapsible sidebar section this page lives in, if any.
    pub section: Option<&'static str>,
}

const fn node(
    key: &'static str,
    title: &'static str,
    parent: Option<&'static str>,
    section: Option<&'static str>,
) -> SiteNode {
    SiteNode {
        key,
        title,
        parent,
        section,
    }
}

pub const SECTION_AREAS: &str = "areas";
pub const SECTION_PLANEJAMENTO: &str = "planejamento";

pub const SITE_MAP: &[SiteNode] = &[
    node(HOME, "Início", None, None),
    node("mapa-mental", "Mapa Mental", Some(HOME), None),
    node("planejamento-diario", "Planejamento Diário", Some(HOME), Some(SECTION_PLANEJAMENTO)),
    node("tarefas", "Tarefas", Some(HOME), Some(SECTION_PLANEJAMENTO)),
    node("fisica", "Saúde Física", Some(HOME), Some(SECTION_AREAS)),
    node("mental", "Saúde Mental", Some(HOME), Some(SECTION_AREAS)),
    node("financeira", "Saúde Financeira", Some(HOME), Some(SECTION_AREAS)),
    node("familiar", "Saúde Familiar", Some(HOME), Some(SECTION_AREAS)),
    node("profissional", "Saúde Profissional", Some(HOME), Some(SECTION_AREAS)),
    node("social", "Saúde Social", Some(HOME), Some(SECTION_AREAS)),
    node("espiritual", "Saúde Espiritual", Some(HOME), Some(SECTION_AREAS)),
    node("preventiva", "Saúde Preventiva", Some(HOME), Some(SECTION_AREAS)),
    node("alongamento", "Alongamento e Mobilidade", Some("fisica"), Some(SECTION_AREAS)),
];

pub fn find(key: &str) -> Option<&'static SiteNode> {
    SITE_MAP.iter().find(|n| n.key == key)
}

pub fn title(key: &str) -> &'static str {
    find(key).map(|n| n.title).unwrap_or("")
}

/// Breadcrumb trail for `key`: ancestors root-first, ending at the
/// page itself, with the home root omitted. Home and unknown keys get
/// an empty trail.
pub fn breadcrumbs(key: &str) -> Vec<&'static SiteNode> {
    let mut trail = Vec::new();
    let mut cursor = find(key);
    while let Some(node) = cursor {
        if node.key == HOME {
            break;
        }
        trail.push(node);
        cursor = node.parent.and_then(find);
    }
    trail.reverse();
    trail
}
