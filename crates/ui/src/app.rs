use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};
use router::{transition, NavState, PageRegistry, SidebarState, HOME, SITE_MAP};
use tracing::info;

use crate::context::AppContext;
use crate::events::{is_quit, EventPump, UiEvent};
use crate::pages::{
    daily_plan::DailyPlanPage, espiritual::EspiritualPage, fisica::FisicaPage, goals,
    preventiva::PreventivaPage, statics::StaticPage, tarefas::TasksPage, PageAction, PageView,
};
use crate::widgets::{breadcrumb_line, render_toasts};

type Backend = CrosstermBackend<Stdout>;

const SIDEBAR_WIDTH: u16 = 26;

/// The terminal frontend: owns the terminal, the event pump, the page
/// registry and the navigation state. One instance per run.
pub struct DashboardApp {
    terminal: Terminal<Backend>,
    events: EventPump,
    ctx: AppContext,
    registry: PageRegistry<AppContext, dyn PageView>,
    nav: NavState,
    sidebar: SidebarState,
    should_quit: bool,
}

impl DashboardApp {
    /// Sets up the terminal and registers every page. `events` must
    /// be the pump whose sender the context's suggester reports to.
    pub fn new(events: EventPump, ctx: AppContext) -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .context("failed to initialize terminal")?;

        let sidebar = SidebarState::load(&ctx.store);
        let mut registry: PageRegistry<AppContext, dyn PageView> = PageRegistry::new();
        registry.register(HOME, Box::new(StaticPage::inicio()));
        registry.register("mapa-mental", Box::new(StaticPage::mapa_mental()));
        registry.register("alongamento", Box::new(StaticPage::alongamento()));
        registry.register("planejamento-diario", Box::new(DailyPlanPage::new()));
        registry.register("tarefas", Box::new(TasksPage::new()));
        registry.register("fisica", Box::new(FisicaPage::new()));
        registry.register("mental", Box::new(goals::mental()));
        registry.register("financeira", Box::new(goals::financeira()));
        registry.register("familiar", Box::new(goals::familiar()));
        registry.register("profissional", Box::new(goals::profissional()));
        registry.register("social", Box::new(goals::social()));
        registry.register("espiritual", Box::new(EspiritualPage::new()));
        registry.register("preventiva", Box::new(PreventivaPage::new()));

        Ok(Self {
            terminal,
            events,
            ctx,
            registry,
            nav: NavState::new(),
            sidebar,
            should_quit: false,
        })
    }

    /// Main loop. `start` is the requested initial page; unknown
    /// targets land on home exactly like any other navigation.
    pub fn run(&mut self, start: &str) -> Result<()> {
        self.registry.setup_all(&mut self.ctx)?;
        self.navigate(start.to_string());

        while !self.should_quit {
            let Self {
                terminal,
                registry,
                nav,
                sidebar,
                ctx,
                ..
            } = self;
            terminal.draw(|f| Self::render(f, registry, nav, sidebar, ctx))?;

            match self.events.next() {
                Ok(UiEvent::Key(key)) => {
                    if is_quit(&key) {
                        self.should_quit = true;
                        continue;
                    }
                    self.handle_key(key);
                }
                Ok(UiEvent::Tick) | Ok(UiEvent::Resize(_, _)) => {}
                Ok(UiEvent::Suggestion { page, slot, result }) => {
                    if let Some(view) = self.registry.get_mut(&page) {
                        view.on_suggestion(slot, result, &mut self.ctx);
                    }
                }
                Err(_) => break,
            }
        }
        info!("dashboard exiting");
        Ok(())
    }

    fn navigate(&mut self, target: String) {
        let key = transition(&mut self.nav, &mut self.sidebar, &self.ctx.store, &target).to_string();
        self.registry.show(&key, &mut self.ctx);
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        let active = self.nav.active().to_string();
        let action = match self.registry.get_mut(&active) {
            Some(page) => page.handle_key(&key, &mut self.ctx),
            None => PageAction::Pass,
        };
        match action {
            PageAction::Consumed => {}
            PageAction::Navigate(target) => self.navigate(target),
            PageAction::Pass => match key.code {
                KeyCode::F(n) => {
                    if let Some(node) = SITE_MAP.get((n as usize).saturating_sub(1)) {
                        self.navigate(node.key.to_string());
                    }
                }
                KeyCode::Esc => {
                    let previous = self.nav.back().to_string();
                    self.registry.show(&previous, &mut self.ctx);
                }
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('b') => self.sidebar.toggle_collapsed(&self.ctx.store),
                _ => {}
            },
        }
    }

    fn render(
        f: &mut Frame,
        registry: &mut PageRegistry<AppContext, dyn PageView>,
        nav: &NavState,
        sidebar: &SidebarState,
        ctx: &mut AppContext,
    ) {
        let area = f.area();
        let columns = if sidebar.collapsed() {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(0), Constraint::Min(10)])
                .split(area)
        } else {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
                .split(area)
        };

        if !sidebar.collapsed() {
            Self::render_sidebar(f, columns[0], nav, sidebar);
        }

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(columns[1]);
        f.render_widget(Paragraph::new(breadcrumb_line(&nav.breadcrumbs())), main[0]);

        let active = nav.active().to_string();
        if let Some(page) = registry.get_mut(&active) {
            page.draw(f, main[1], ctx);
        }

        render_toasts(f, area, &mut ctx.notifier);
    }

    fn render_sidebar(f: &mut Frame, area: Rect, nav: &NavState, sidebar: &SidebarState) {
        let mut lines: Vec<Line> = Vec::new();
        let mut last_section: Option<&str> = None;
        for (i, node) in SITE_MAP.iter().enumerate() {
            if let Some(section) = node.section {
                if last_section != Some(section) {
                    let marker = if sidebar.is_open(section) { "▾" } else { "▸" };
                    lines.push(Line::from(Span::styled(
                        format!("{marker} {}", section_title(section)),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )));
                }
            }
            last_section = node.section;
            if let Some(section) = node.section {
                if !sidebar.is_open(section) {
                    continue;
                }
            }
            let active = nav.active() == node.key;
            let style = if active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let indent = if node.section.is_some() { "  " } else { "" };
            // F1..F12 only; deeper entries are reached from their area.
            let label = if i < 12 {
                format!("{indent}F{:<2} {}", i + 1, node.title)
            } else {
                format!("{indent}    {}", node.title)
            };
            lines.push(Line::from(Span::styled(label, style)));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "b barra · Esc voltar · q sair",
            Style::default().fg(Color::DarkGray),
        )));
        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Pequenos Passos"),
            ),
            area,
        );
    }
}

fn section_title(section: &str) -> &'static str {
    match section {
        router::SECTION_AREAS => "Áreas da vida",
        router::SECTION_PLANEJAMENTO => "Planejamento",
        _ => "",
    }
}

impl Drop for DashboardApp {
    fn drop(&mut self) {
        // Best effort; the shell must get its terminal back even on
        // a panic unwind.
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}

/// Builds the event pump with the standard tick rate.
pub fn event_pump() -> EventPump {
    EventPump::new(Duration::from_millis(100))
}
