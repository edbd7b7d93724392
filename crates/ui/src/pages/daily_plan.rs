use chrono::{Duration, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use domain::{keys, next_id, DailyPlan, DailyTask};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;
use router::Page;
use tracing::warn;

use crate::context::AppContext;
use crate::events::SuggestionSlot;
use crate::input::InputField;
use crate::pages::{PageAction, PageView};
use crate::widgets::check_line;

const TASK_PROMPT: &str = "Sugira uma tarefa diária produtiva e acionável, como '08:00 - \
     Planejar as 3 tarefas mais importantes do dia' ou '14:00 - Responder e-mails importantes \
     por 30 minutos'.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Tasks,
    Reflection,
    Intention,
}

/// Day-scoped planner: one plan per calendar date, the viewed date
/// persisted so reopening the app lands on the day last worked on.
pub struct DailyPlanPage {
    date: String,
    plan: DailyPlan,
    input: InputField,
    reflection: InputField,
    intention: InputField,
    selected: usize,
    mode: Mode,
    show_completed: bool,
    ai_busy: bool,
    pending_delete: Option<String>,
}

impl DailyPlanPage {
    pub fn new() -> Self {
        Self {
            date: common::dates::today_iso(),
            plan: DailyPlan::default(),
            input: InputField::new(),
            reflection: InputField::new(),
            intention: InputField::new(),
            selected: 0,
            mode: Mode::Tasks,
            show_completed: true,
            ai_busy: false,
            pending_delete: None,
        }
    }

    fn load_plan(&mut self, ctx: &mut AppContext) {
        self.plan = match ctx.store.load::<DailyPlan>(&keys::daily_plan(&self.date)) {
            Ok(Some(plan)) => plan,
            Ok(None) => DailyPlan::default(),
            Err(err) => {
                warn!(%err, date = %self.date, "failed to load daily plan");
                ctx.notifier.error("Não foi possível carregar os dados.");
                DailyPlan::default()
            }
        };
        self.reflection.set(self.plan.reflection.clone());
        self.selected = 0;
        self.pending_delete = None;
    }

    fn persist(&mut self, ctx: &mut AppContext) {
        if let Err(err) = ctx.store.save(&keys::daily_plan(&self.date), &self.plan) {
            warn!(%err, date = %self.date, "failed to save daily plan");
            ctx.notifier.error("Não foi possível salvar os dados.");
        }
        if let Err(err) = ctx.store.save(keys::DAILY_PLAN_LAST_DATE, &self.date) {
            warn!(%err, "failed to save last plan date");
        }
    }

    fn shift_date(&mut self, ctx: &mut AppContext, days: i64) {
        if let Ok(date) = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            self.date = (date + Duration::days(days)).format("%Y-%m-%d").to_string();
            if let Err(err) = ctx.store.save(keys::DAILY_PLAN_LAST_DATE, &self.date) {
                warn!(%err, "failed to save last plan date");
            }
            self.load_plan(ctx);
        }
    }

    fn add_task(&mut self, ctx: &mut AppContext) {
        let description = self.input.take();
        if description.is_empty() {
            ctx.notifier.warning("Descreva a tarefa antes de adicionar.");
            return;
        }
        let mut task = DailyTask::new(description);
        task.id = next_id();
        self.plan.tasks.push(task);
        self.persist(ctx);
    }

    /// Indices into the plan of the tasks currently listed; hiding
    /// completed tasks shrinks this without touching the plan.
    fn visible(&self) -> Vec<usize> {
        self.plan
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| self.show_completed || !t.completed)
            .map(|(i, _)| i)
            .collect()
    }

    fn selected_id(&self) -> Option<String> {
        self.visible()
            .get(self.selected)
            .map(|&i| self.plan.tasks[i].id.clone())
    }
}

impl Default for DailyPlanPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page<AppContext> for DailyPlanPage {
    fn show(&mut self, ctx: &mut AppContext) {
        // Resume where the user left off, today on first use.
        self.date = match ctx.store.load::<String>(keys::DAILY_PLAN_LAST_DATE) {
            Ok(Some(date)) if common::dates::is_valid_iso(&date) => date,
            _ => common::dates::today_iso(),
        };
        self.mode = Mode::Tasks;
        self.show_completed = true;
        self.load_plan(ctx);
    }
}

impl PageView for DailyPlanPage {
    fn draw(&mut self, f: &mut Frame, area: Rect, ctx: &mut AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        let input_title = if self.ai_busy {
            format!("Plano de {} (sugerindo...)", common::dates::format_br(&self.date))
        } else {
            format!("Plano de {}", common::dates::format_br(&self.date))
        };
        f.render_widget(
            Paragraph::new(self.input.display())
                .block(Block::default().borders(Borders::ALL).title(input_title)),
            chunks[0],
        );

        let progress = self.plan.progress_percent();
        f.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(Color::Green))
                .percent(progress as u16)
                .label(format!("{progress}% concluído · {} MIT", self.plan.mit_count())),
            chunks[1],
        );

        let visible = self.visible();
        let lines: Vec<Line> = if visible.is_empty() {
            vec![Line::from(Span::styled(
                if self.plan.tasks.is_empty() {
                    "Nenhuma tarefa para este dia."
                } else {
                    "Todas as tarefas foram concluídas!"
                },
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            visible
                .iter()
                .enumerate()
                .map(|(pos, &i)| {
                    let t = &self.plan.tasks[i];
                    let selected = self.mode != Mode::Reflection && pos == self.selected;
                    let mut line = check_line(t.completed, &t.description, selected);
                    if t.mit {
                        line.spans.push(Span::styled(
                            "  ★ MIT",
                            Style::default().fg(Color::Yellow),
                        ));
                    }
                    if self.mode == Mode::Intention && pos == self.selected {
                        line.spans.push(Span::styled(
                            format!("  intenção: {}", self.intention.display()),
                            Style::default().fg(Color::Yellow),
                        ));
                    } else if !t.intention.is_empty() {
                        line.spans.push(Span::styled(
                            format!("  ({})", t.intention),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    line
                })
                .collect()
        };
        let list_title = if self.show_completed {
            "Tarefas do dia"
        } else {
            "Tarefas do dia (pendentes)"
        };
        f.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title(list_title)),
            chunks[2],
        );

        let reflection_block = Block::default().borders(Borders::ALL).title(
            if self.mode == Mode::Reflection {
                "Reflexão (Enter salva)"
            } else {
                "Reflexão"
            },
        );
        let reflection_text = if self.mode == Mode::Reflection {
            self.reflection.display()
        } else if self.plan.reflection.is_empty() {
            "Sem reflexão registrada.".to_string()
        } else {
            self.plan.reflection.clone()
        };
        f.render_widget(
            Paragraph::new(reflection_text)
                .wrap(Wrap { trim: false })
                .block(reflection_block),
            chunks[3],
        );

        let hint = if self.pending_delete.is_some() {
            "Excluir tarefa selecionada? y = sim, outra tecla = não".to_string()
        } else {
            let mut h = String::from(
                "Enter adicionar · Espaço concluir · Ctrl+T MIT · Ctrl+E intenção · \
                 Ctrl+O concluídas · Ctrl+R reflexão · Ctrl+←/→ dia · Ctrl+D excluir",
            );
            if ctx.suggester.is_available() {
                h.push_str(" · Ctrl+G sugerir");
            }
            h
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))),
            chunks[4],
        );
    }

    fn handle_key(&mut self, key: &KeyEvent, ctx: &mut AppContext) -> PageAction {
        if let Some(id) = self.pending_delete.take() {
            if key.code == KeyCode::Char('y') {
                self.plan.tasks.retain(|t| t.id != id);
                self.selected = 0;
                self.persist(ctx);
                ctx.notifier.info("Tarefa excluída.");
            }
            return PageAction::Consumed;
        }

        if self.mode == Mode::Reflection {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc => {
                    self.plan.reflection = common::sanitize(self.reflection.value()).trim().to_string();
                    self.reflection.set(self.plan.reflection.clone());
                    self.persist(ctx);
                    self.mode = Mode::Tasks;
                    PageAction::Consumed
                }
                _ => {
                    self.reflection.handle_key(key);
                    PageAction::Consumed
                }
            };
        }

        if self.mode == Mode::Intention {
            return match key.code {
                KeyCode::Esc => {
                    self.mode = Mode::Tasks;
                    PageAction::Consumed
                }
                KeyCode::Enter => {
                    let intention = self.intention.take();
                    if let Some(id) = self.selected_id() {
                        if let Some(task) = self.plan.tasks.iter_mut().find(|t| t.id == id) {
                            task.intention = intention;
                            self.persist(ctx);
                        }
                    }
                    self.mode = Mode::Tasks;
                    PageAction::Consumed
                }
                _ => {
                    self.intention.handle_key(key);
                    PageAction::Consumed
                }
            };
        }

        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) if !self.input.is_empty() => {
                self.add_task(ctx);
                PageAction::Consumed
            }
            (KeyCode::Up, _) => {
                self.selected = self.selected.saturating_sub(1);
                PageAction::Consumed
            }
            (KeyCode::Down, _) => {
                let len = self.visible().len();
                if len > 0 {
                    self.selected = (self.selected + 1).min(len - 1);
                }
                PageAction::Consumed
            }
            (KeyCode::Char(' '), KeyModifiers::NONE) if self.input.is_empty() => {
                if let Some(id) = self.selected_id() {
                    if let Some(task) = self.plan.tasks.iter_mut().find(|t| t.id == id) {
                        task.completed = !task.completed;
                        self.persist(ctx);
                    }
                }
                PageAction::Consumed
            }
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                if let Some(id) = self.selected_id() {
                    if let Some(task) = self.plan.tasks.iter_mut().find(|t| t.id == id) {
                        task.mit = !task.mit;
                        self.persist(ctx);
                    }
                }
                PageAction::Consumed
            }
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                if let Some(id) = self.selected_id() {
                    if let Some(task) = self.plan.tasks.iter().find(|t| t.id == id) {
                        self.intention.set(task.intention.clone());
                        self.mode = Mode::Intention;
                    }
                }
                PageAction::Consumed
            }
            (KeyCode::Char('o'), KeyModifiers::CONTROL) => {
                self.show_completed = !self.show_completed;
                self.selected = 0;
                PageAction::Consumed
            }
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                self.mode = Mode::Reflection;
                PageAction::Consumed
            }
            (KeyCode::Left, KeyModifiers::CONTROL) => {
                self.shift_date(ctx, -1);
                PageAction::Consumed
            }
            (KeyCode::Right, KeyModifiers::CONTROL) => {
                self.shift_date(ctx, 1);
                PageAction::Consumed
            }
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                self.pending_delete = self.selected_id();
                PageAction::Consumed
            }
            (KeyCode::Char('g'), KeyModifiers::CONTROL) => {
                if self.ai_busy {
                    return PageAction::Consumed;
                }
                if ctx
                    .suggester
                    .request("planejamento-diario", SuggestionSlot::Input, TASK_PROMPT)
                {
                    self.ai_busy = true;
                } else {
                    ctx.notifier
                        .warning("Serviço de sugestões não configurado.");
                }
                PageAction::Consumed
            }
            _ => {
                if self.input.handle_key(key) {
                    PageAction::Consumed
                } else {
                    PageAction::Pass
                }
            }
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
            Ok(text) => self.input.set(common::sanitize_line(&text)),
            Err(msg) => ctx.notifier.error(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Suggester;
    use storage::LocalStore;

    fn context(rt: &tokio::runtime::Runtime) -> AppContext {
        let (tx, _rx) = std::sync::mpsc::channel();
        AppContext::new(
            LocalStore::open_in_memory().unwrap(),
            Suggester::new(None, rt.handle().clone(), tx),
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(page: &mut DailyPlanPage, ctx: &mut AppContext, text: &str) {
        for c in text.chars() {
            page.handle_key(&press(KeyCode::Char(c)), ctx);
        }
    }

    #[test]
    fn intention_edit_saves_and_persists() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut ctx = context(&rt);
        let mut page = DailyPlanPage::new();
        page.show(&mut ctx);

        type_text(&mut page, &mut ctx, "Estudar");
        page.handle_key(&press(KeyCode::Enter), &mut ctx);
        page.handle_key(&ctrl('e'), &mut ctx);
        type_text(&mut page, &mut ctx, "foco total");
        page.handle_key(&press(KeyCode::Enter), &mut ctx);

        assert_eq!(page.plan.tasks[0].intention, "foco total");
        let stored: DailyPlan = ctx
            .store
            .load(&keys::daily_plan(&page.date))
            .unwrap()
            .unwrap();
        assert_eq!(stored.tasks[0].intention, "foco total");
    }

    #[test]
    fn esc_abandons_the_intention_edit() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut ctx = context(&rt);
        let mut page = DailyPlanPage::new();
        page.show(&mut ctx);

        type_text(&mut page, &mut ctx, "Caminhar");
        page.handle_key(&press(KeyCode::Enter), &mut ctx);
        page.handle_key(&ctrl('e'), &mut ctx);
        type_text(&mut page, &mut ctx, "descartada");
        page.handle_key(&press(KeyCode::Esc), &mut ctx);

        assert_eq!(page.plan.tasks[0].intention, "");
        assert_eq!(page.mode, Mode::Tasks);
    }
}
