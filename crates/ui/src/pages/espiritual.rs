use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use domain::{keys, Goal, InsertPosition, ListController};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use router::Page;
use tracing::warn;

use crate::context::AppContext;
use crate::events::SuggestionSlot;
use crate::input::InputField;
use crate::pages::{PageAction, PageView};
use crate::widgets::check_line;

const GOAL_PROMPT: &str = "Sugira um objetivo de saúde espiritual, como 'Meditar 10 minutos \
     por dia' ou 'Escrever três coisas pelas quais sou grato todas as noites'.";

/// Fixed daily practices; completion is tracked per calendar date.
const PRACTICES: &[(&str, &str)] = &[
    ("gratidao", "Praticar a gratidão (Epicurismo)"),
    ("meditacao", "Atenção Plena (Mindfulness)"),
    ("proposito", "Reflexão sobre Valores Pessoais"),
    ("natureza", "Busca pela Admiração (Awe) na natureza ou na arte"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Practices,
    Journal,
    Goals,
}

/// Spiritual-health page: daily practice checklist, the gratitude
/// journal (one entry per day, past entries browsable) and goals.
pub struct EspiritualPage {
    section: Section,
    checklist: HashMap<String, bool>,
    journal: InputField,
    show_past: bool,
    goals: ListController<Goal>,
    goal_input: InputField,
    selected: usize,
    ai_busy: bool,
    pending_delete: Option<String>,
}

impl EspiritualPage {
    pub fn new() -> Self {
        Self {
            section: Section::Practices,
            checklist: HashMap::new(),
            journal: InputField::new(),
            show_past: false,
            goals: ListController::new(keys::ESPIRITUAL_GOALS, InsertPosition::Head),
            goal_input: InputField::new(),
            selected: 0,
            ai_busy: false,
            pending_delete: None,
        }
    }

    fn checklist_key() -> String {
        keys::spiritual_checklist(&common::dates::today_iso())
    }

    fn journal_key() -> String {
        keys::gratitude_journal(&common::dates::today_iso())
    }

    fn persist_checklist(&self, ctx: &mut AppContext) {
        if let Err(err) = ctx.store.save(&Self::checklist_key(), &self.checklist) {
            warn!(%err, "failed to save practice checklist");
            ctx.notifier.error("Não foi possível salvar os dados.");
        }
    }

    fn save_journal(&mut self, ctx: &mut AppContext) {
        let content = common::sanitize(self.journal.value()).trim().to_string();
        if let Err(err) = ctx.store.save(&Self::journal_key(), &content) {
            warn!(%err, "failed to save gratitude entry");
            ctx.notifier.error("Não foi possível salvar os dados.");
            return;
        }
        self.journal.set(content);
        ctx.notifier.success("Entrada de gratidão salva!");
    }

    /// Past entries newest first, skipping today.
    fn past_entries(&self, ctx: &mut AppContext) -> Vec<(String, String)> {
        let today_key = Self::journal_key();
        let journal_keys = match ctx.store.keys_with_prefix(keys::JOURNAL_PREFIX) {
            Ok(found) => found,
            Err(err) => {
                warn!(%err, "failed to list journal entries");
                ctx.notifier.error("Não foi possível carregar os dados.");
                return Vec::new();
            }
        };
        let mut entries: Vec<(String, String)> = journal_keys
            .into_iter()
            .filter(|k| *k != today_key)
            .filter_map(|k| {
                let content = ctx.store.load::<String>(&k).ok().flatten()?;
                let date = k.trim_start_matches(keys::JOURNAL_PREFIX).to_string();
                Some((date, content))
            })
            .collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        entries
    }

    fn clamp_selection(&mut self) {
        let len = match self.section {
            Section::Practices => PRACTICES.len(),
            Section::Goals => self.goals.len(),
            Section::Journal => 0,
        };
        if len == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(len - 1);
        }
    }
}

impl Default for EspiritualPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page<AppContext> for EspiritualPage {
    fn show(&mut self, ctx: &mut AppContext) {
        self.goals.load(&ctx.store, &mut ctx.notifier);
        self.checklist = match ctx
            .store
            .load::<HashMap<String, bool>>(&Self::checklist_key())
        {
            Ok(Some(map)) => map,
            Ok(None) => HashMap::new(),
            Err(err) => {
                warn!(%err, "failed to load practice checklist");
                ctx.notifier.error("Não foi possível carregar os dados.");
                HashMap::new()
            }
        };
        let entry = ctx
            .store
            .load::<String>(&Self::journal_key())
            .unwrap_or_default()
            .unwrap_or_default();
        self.journal.set(entry);
        self.show_past = false;
        self.pending_delete = None;
        self.clamp_selection();
    }
}

impl PageView for EspiritualPage {
    fn draw(&mut self, f: &mut Frame, area: Rect, ctx: &mut AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(PRACTICES.len() as u16 + 2),
                Constraint::Min(4),
            ])
            .split(chunks[0]);

        let focus = |section: Section, title: String| -> Block<'static> {
            let mut block = Block::default().borders(Borders::ALL).title(title);
            if self.section == section {
                block = block.border_style(Style::default().fg(Color::Cyan));
            }
            block
        };

        let practice_lines: Vec<Line> = PRACTICES
            .iter()
            .enumerate()
            .map(|(i, (id, text))| {
                let done = self.checklist.get(*id).copied().unwrap_or(false);
                let selected = self.section == Section::Practices && i == self.selected;
                check_line(done, text, selected)
            })
            .collect();
        f.render_widget(
            Paragraph::new(practice_lines)
                .block(focus(Section::Practices, "Práticas de hoje".into())),
            left[0],
        );

        let done = self.goals.completed_count();
        let goal_lines: Vec<Line> = if self.goals.is_empty() {
            vec![Line::from(Span::styled(
                "Nenhum objetivo ainda.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.goals
                .items()
                .iter()
                .enumerate()
                .map(|(i, g)| {
                    let selected = self.section == Section::Goals && i == self.selected;
                    check_line(g.completed, &g.text, selected)
                })
                .collect()
        };
        let mut goal_text = vec![Line::from(self.goal_input.display())];
        goal_text.push(Line::default());
        goal_text.extend(goal_lines);
        f.render_widget(
            Paragraph::new(goal_text).block(focus(
                Section::Goals,
                format!("Metas — {}/{} concluídas", done, self.goals.len()),
            )),
            left[1],
        );

        if self.show_past {
            let entries = self.past_entries(ctx);
            let mut lines: Vec<Line> = Vec::new();
            if entries.is_empty() {
                lines.push(Line::from(Span::styled(
                    "Nenhuma entrada anterior.",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            for (date, content) in entries {
                lines.push(Line::from(Span::styled(
                    common::dates::format_br(&date),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(content));
                lines.push(Line::default());
            }
            f.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .block(focus(Section::Journal, "Entradas anteriores".into())),
                chunks[1],
            );
        } else {
            let journal_text = if self.section == Section::Journal {
                self.journal.display()
            } else if self.journal.value().is_empty() {
                "Pelo que você é grato hoje?".to_string()
            } else {
                self.journal.value().to_string()
            };
            f.render_widget(
                Paragraph::new(journal_text)
                    .wrap(Wrap { trim: false })
                    .block(focus(Section::Journal, "Diário de gratidão".into())),
                chunks[1],
            );
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, ctx: &mut AppContext) -> PageAction {
        if let Some(id) = self.pending_delete.take() {
            if key.code == KeyCode::Char('y') {
                self.goals.remove(&ctx.store, &mut ctx.notifier, &id);
                self.clamp_selection();
                ctx.notifier.info("Objetivo excluído.");
            }
            return PageAction::Consumed;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Tab, _) => {
                self.section = match self.section {
                    Section::Practices => Section::Journal,
                    Section::Journal => Section::Goals,
                    Section::Goals => Section::Practices,
                };
                self.selected = 0;
                PageAction::Consumed
            }
            (KeyCode::Char('h'), KeyModifiers::CONTROL) => {
                self.show_past = !self.show_past;
                PageAction::Consumed
            }
            _ => match self.section {
                Section::Practices => match key.code {
                    KeyCode::Up => {
                        self.selected = self.selected.saturating_sub(1);
                        PageAction::Consumed
                    }
                    KeyCode::Down => {
                        self.selected = (self.selected + 1).min(PRACTICES.len() - 1);
                        PageAction::Consumed
                    }
                    KeyCode::Char(' ') | KeyCode::Enter => {
                        let (id, _) = PRACTICES[self.selected];
                        let done = self.checklist.get(id).copied().unwrap_or(false);
                        self.checklist.insert(id.to_string(), !done);
                        self.persist_checklist(ctx);
                        PageAction::Consumed
                    }
                    _ => PageAction::Pass,
                },
                Section::Journal => match key.code {
                    KeyCode::Enter => {
                        self.save_journal(ctx);
                        PageAction::Consumed
                    }
                    _ => {
                        if self.journal.handle_key(key) {
                            PageAction::Consumed
                        } else {
                            PageAction::Pass
                        }
                    }
                },
                Section::Goals => match (key.code, key.modifiers) {
                    (KeyCode::Enter, _) if !self.goal_input.is_empty() => {
                        let text = self.goal_input.take();
                        match self.goals.add(&ctx.store, &mut ctx.notifier, Goal::new(text)) {
                            Ok(_) => {
                                self.selected = 0;
                                ctx.notifier.success("Objetivo adicionado.");
                            }
                            Err(err) => ctx.notifier.warning(err.to_string()),
                        }
                        PageAction::Consumed
                    }
                    (KeyCode::Up, _) => {
                        self.selected = self.selected.saturating_sub(1);
                        PageAction::Consumed
                    }
                    (KeyCode::Down, _) => {
                        self.selected += 1;
                        self.clamp_selection();
                        PageAction::Consumed
                    }
                    (KeyCode::Char(' '), KeyModifiers::NONE) if self.goal_input.is_empty() => {
                        if let Some(goal) = self.goals.items().get(self.selected) {
                            let id = goal.id.clone();
                            self.goals.toggle_completed(&ctx.store, &mut ctx.notifier, &id);
                        }
                        PageAction::Consumed
                    }
                    (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                        self.pending_delete = self
                            .goals
                            .items()
                            .get(self.selected)
                            .map(|g| g.id.clone());
                        PageAction::Consumed
                    }
                    (KeyCode::Char('g'), KeyModifiers::CONTROL) => {
                        if self.ai_busy {
                            return PageAction::Consumed;
                        }
                        if ctx
                            .suggester
                            .request("espiritual", SuggestionSlot::Input, GOAL_PROMPT)
                        {
                            self.ai_busy = true;
                        } else {
                            ctx.notifier
                                .warning("Serviço de sugestões não configurado.");
                        }
                        PageAction::Consumed
                    }
                    _ => {
                        if self.goal_input.handle_key(key) {
                            PageAction::Consumed
                        } else {
                            PageAction::Pass
                        }
                    }
                },
            },
        }
    }

    fn on_suggestion(
        &mut self,
        slot: SuggestionSlot,
        result: Result<String, String>,
        ctx: &mut AppContext,
    ) {
        if slot != SuggestionSlot::Input {
            return;
        }
        self.ai_busy = false;
        match result {
            Ok(text) => self.goal_input.set(common::sanitize_line(&text)),
            Err(msg) => ctx.notifier.error(msg),
        }
    }
}
