use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use domain::{
    by_due_date, category_distribution, default_categories, group_by_category, keys, paginate,
    FilterSpec, InsertPosition, ListController, PageSlice, Priority, StatusFilter, Task,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use router::Page;

use crate::context::AppContext;
use crate::events::SuggestionSlot;
use crate::input::InputField;
use crate::pages::{PageAction, PageView};
use crate::widgets::check_line;

const TASKS_PER_PAGE: usize = 10;

const TITLE_PROMPT: &str = "Sugira um título de tarefa conciso e acionável. Por exemplo: \
     'Revisar o orçamento mensal' ou 'Agendar consulta médica'.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Checklist,
    Table,
    Chart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Search,
    EditTitle,
    EditDescription,
    EditDate,
    AddCategory,
}

/// The tasks page: quick add, search, status and category filters,
/// fixed-size pagination and two render styles of the same filtered
/// view.
pub struct TasksPage {
    tasks: ListController<Task>,
    categories: Vec<String>,
    filter: FilterSpec,
    page: usize,
    view: View,
    mode: Mode,
    input: InputField,
    selected: usize,
    ai_busy: bool,
    pending_delete: Option<String>,
    pending_category: Option<String>,
}

impl TasksPage {
    pub fn new() -> Self {
        Self {
            tasks: ListController::new(keys::TASKS, InsertPosition::Tail).with_sort(by_due_date),
            categories: Vec::new(),
            filter: FilterSpec::default(),
            page: 1,
            view: View::Checklist,
            mode: Mode::Normal,
            input: InputField::new(),
            selected: 0,
            ai_busy: false,
            pending_delete: None,
            pending_category: None,
        }
    }

    fn slice(&self, today: &str) -> PageSlice<Task> {
        let view = self.tasks.filter(&self.filter, today);
        paginate(&view, TASKS_PER_PAGE, self.page)
    }

    fn selected_id(&self, today: &str) -> Option<String> {
        self.slice(today).items.get(self.selected).map(|t| t.id.clone())
    }

    fn today() -> String {
        common::dates::today_iso()
    }

    fn quick_add(&mut self, ctx: &mut AppContext) {
        let title = self.input.take();
        let category = self.filter.category.clone().unwrap_or_default();
        match self
            .tasks
            .add(&ctx.store, &mut ctx.notifier, Task::quick(title, category))
        {
            Ok(_) => ctx.notifier.success("Tarefa adicionada."),
            Err(err) => ctx.notifier.warning(err.to_string()),
        }
    }

    fn save_categories(&self, ctx: &mut AppContext) {
        if let Err(err) = ctx.store.save(keys::TASK_CATEGORIES, &self.categories) {
            tracing::warn!(%err, "failed to save categories");
            ctx.notifier.error("Não foi possível salvar os dados.");
        }
    }

    fn add_category(&mut self, ctx: &mut AppContext) {
        let name = self.input.take();
        if name.is_empty() {
            return;
        }
        if self.categories.iter().any(|c| *c == name) {
            ctx.notifier.warning("Essa categoria já existe.");
            return;
        }
        self.categories.push(name);
        self.save_categories(ctx);
        ctx.notifier.success("Categoria adicionada!");
    }

    /// Removes the category from the list only; tasks keep the label
    /// as a historical tag.
    fn remove_category(&mut self, ctx: &mut AppContext, name: &str) {
        self.categories.retain(|c| c != name);
        self.save_categories(ctx);
        if self.filter.category.as_deref() == Some(name) {
            self.filter.category = None;
            self.page = 1;
            self.selected = 0;
        }
        ctx.notifier.info("Categoria excluída.");
    }

    fn cycle_status(&mut self) {
        self.filter.status = match self.filter.status {
            StatusFilter::All => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::Overdue,
            StatusFilter::Overdue => StatusFilter::Priority(Priority::High),
            StatusFilter::Priority(_) => StatusFilter::All,
        };
        self.page = 1;
        self.selected = 0;
    }

    fn cycle_category(&mut self) {
        let next = match &self.filter.category {
            None => self.categories.first().cloned(),
            Some(current) => {
                let idx = self.categories.iter().position(|c| c == current);
                match idx {
                    Some(i) if i + 1 < self.categories.len() => {
                        Some(self.categories[i + 1].clone())
                    }
                    _ => None,
                }
            }
        };
        self.filter.category = next;
        self.page = 1;
        self.selected = 0;
    }

    fn status_label(&self) -> String {
        match self.filter.status {
            StatusFilter::All => "todas".into(),
            StatusFilter::Pending => "pendentes".into(),
            StatusFilter::Completed => "concluídas".into(),
            StatusFilter::Overdue => "atrasadas".into(),
            StatusFilter::Priority(p) => format!("prioridade {}", p.label()),
        }
    }

    fn counters(&self, today: &str) -> (usize, usize, usize, usize) {
        let total = self.tasks.len();
        let done = self.tasks.completed_count();
        let overdue = self
            .tasks
            .items()
            .iter()
            .filter(|t| t.is_overdue(today))
            .count();
        (total, total - done, done, overdue)
    }

    fn draw_checklist(&self, f: &mut Frame, area: Rect, slice: &PageSlice<Task>, today: &str) {
        let mut lines: Vec<Line> = Vec::new();
        for (category, tasks) in group_by_category(&slice.items, &self.categories) {
            lines.push(Line::from(Span::styled(
                category,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            for task in tasks {
                let flat = self.slice_position(&slice.items, &task.id);
                let selected = flat == Some(self.selected);
                let mut line = check_line(task.completed, &task.title, selected);
                if task.is_overdue(today) {
                    line.spans.push(Span::styled(
                        "  atrasada",
                        Style::default().fg(Color::Red),
                    ));
                }
                line.spans.push(Span::styled(
                    format!("  {}", task.priority.label()),
                    Style::default().fg(Color::DarkGray),
                ));
                lines.push(line);
            }
        }
        if slice.items.is_empty() {
            lines.push(Line::from(Span::styled(
                "Nenhuma tarefa encontrada.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        f.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Tarefas")),
            area,
        );
    }

    fn slice_position(&self, items: &[Task], id: &str) -> Option<usize> {
        items.iter().position(|t| t.id == id)
    }

    fn draw_table(&self, f: &mut Frame, area: Rect, slice: &PageSlice<Task>, today: &str) {
        let header = Row::new(vec!["", "Título", "Prazo", "Prioridade", "Categoria"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let rows: Vec<Row> = slice
            .items
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let due = if t.due_date.is_empty() {
                    "—".to_string()
                } else {
                    common::dates::format_br(&t.due_date)
                };
                let mut style = Style::default();
                if t.completed {
                    style = style.fg(Color::DarkGray);
                } else if t.is_overdue(today) {
                    style = style.fg(Color::Red);
                }
                if i == self.selected {
                    style = style.bg(Color::Indexed(237));
                }
                Row::new(vec![
                    Cell::from(if t.completed { "x" } else { " " }),
                    Cell::from(t.title.clone()),
                    Cell::from(due),
                    Cell::from(t.priority.label()),
                    Cell::from(t.category.clone()),
                ])
                .style(style)
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Percentage(45),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Tarefas"));
        f.render_widget(table, area);
    }

    /// Distribution over the whole collection, not the current slice,
    /// mirroring the counters line.
    fn draw_chart(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Tarefas por categoria");
        let (labels, series) = category_distribution(self.tasks.items(), &self.categories);
        if series.iter().all(|&v| v == 0) {
            f.render_widget(
                Paragraph::new(Span::styled(
                    "Sem dados para exibir no gráfico.",
                    Style::default().fg(Color::DarkGray),
                ))
                .block(block),
                area,
            );
            return;
        }
        let palette = [
            Color::Blue,
            Color::Green,
            Color::Cyan,
            Color::Yellow,
            Color::Red,
            Color::Magenta,
        ];
        let bars: Vec<Bar> = labels
            .iter()
            .zip(&series)
            .enumerate()
            .map(|(i, (label, &value))| {
                Bar::default()
                    .value(value)
                    .label(Line::from(label.clone()))
                    .style(Style::default().fg(palette[i % palette.len()]))
            })
            .collect();
        let chart = BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(14)
            .bar_gap(2)
            .block(block);
        f.render_widget(chart, area);
    }
}

impl Default for TasksPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page<AppContext> for TasksPage {
    fn show(&mut self, ctx: &mut AppContext) {
        self.tasks.load(&ctx.store, &mut ctx.notifier);
        match ctx.store.load::<Vec<String>>(keys::TASK_CATEGORIES) {
            Ok(Some(cats)) => self.categories = cats,
            Ok(None) => {
                // First use: seed and persist the default set.
                self.categories = default_categories();
                if let Err(err) = ctx.store.save(keys::TASK_CATEGORIES, &self.categories) {
                    tracing::warn!(%err, "failed to seed categories");
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to load categories");
                ctx.notifier.error("Não foi possível carregar os dados.");
                self.categories = default_categories();
            }
        }
        self.pending_delete = None;
        self.pending_category = None;
        self.page = 1;
        self.selected = 0;
    }
}

impl PageView for TasksPage {
    fn draw(&mut self, f: &mut Frame, area: Rect, ctx: &mut AppContext) {
        let today = Self::today();
        let slice = self.slice(&today);
        let (total, pending, done, overdue) = self.counters(&today);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let input_title = match self.mode {
            Mode::Search => "Buscar",
            Mode::EditTitle => "Editar título",
            Mode::EditDescription => "Editar descrição",
            Mode::EditDate => "Editar prazo (AAAA-MM-DD)",
            Mode::AddCategory => "Nova categoria",
            Mode::Normal if self.ai_busy => "Nova tarefa (sugerindo...)",
            Mode::Normal => "Nova tarefa",
        };
        f.render_widget(
            Paragraph::new(self.input.display())
                .block(Block::default().borders(Borders::ALL).title(input_title)),
            chunks[0],
        );

        let filter_line = format!(
            "{total} tarefas · {pending} pendentes · {done} concluídas · {overdue} atrasadas   \
             filtro: {} · categoria: {}",
            self.status_label(),
            self.filter.category.as_deref().unwrap_or("todas"),
        );
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                filter_line,
                Style::default().fg(Color::DarkGray),
            ))),
            chunks[1],
        );

        match self.view {
            View::Checklist => self.draw_checklist(f, chunks[2], &slice, &today),
            View::Table => self.draw_table(f, chunks[2], &slice, &today),
            View::Chart => self.draw_chart(f, chunks[2]),
        }

        let footer = if self.pending_delete.is_some() {
            "Excluir tarefa selecionada? y = sim, outra tecla = não".to_string()
        } else if let Some(cat) = &self.pending_category {
            format!("Excluir a categoria '{cat}'? As tarefas mantêm o rótulo. y = sim, outra tecla = não")
        } else {
            let from = ((slice.page - 1) * TASKS_PER_PAGE + 1).min(slice.total);
            let to = (slice.page * TASKS_PER_PAGE).min(slice.total);
            let mut hint = format!(
                "Mostrando {from}-{to} de {} · ←/→ página {}/{} · / buscar · Tab visão · \
                 Ctrl+F filtro · Ctrl+K categoria · Ctrl+N/X nova/excluir categoria · \
                 Ctrl+E/W/U/P/Y editar",
                slice.total, slice.page, slice.total_pages
            );
            if ctx.suggester.is_available() {
                hint.push_str(" · Ctrl+G sugerir");
            }
            hint
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                footer,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))),
            chunks[3],
        );
    }

    fn handle_key(&mut self, key: &KeyEvent, ctx: &mut AppContext) -> PageAction {
        let today = Self::today();

        if let Some(id) = self.pending_delete.take() {
            if key.code == KeyCode::Char('y') {
                self.tasks.remove(&ctx.store, &mut ctx.notifier, &id);
                self.selected = 0;
                ctx.notifier.info("Tarefa excluída.");
            }
            return PageAction::Consumed;
        }
        if let Some(cat) = self.pending_category.take() {
            if key.code == KeyCode::Char('y') {
                self.remove_category(ctx, &cat);
            }
            return PageAction::Consumed;
        }

        match self.mode {
            Mode::Search => match key.code {
                KeyCode::Enter | KeyCode::Esc => {
                    self.mode = Mode::Normal;
                    self.filter.search = self.input.take();
                    self.page = 1;
                    self.selected = 0;
                    PageAction::Consumed
                }
                _ => {
                    self.input.handle_key(key);
                    PageAction::Consumed
                }
            },
            Mode::EditTitle => match key.code {
                KeyCode::Esc => {
                    self.input.clear();
                    self.mode = Mode::Normal;
                    PageAction::Consumed
                }
                KeyCode::Enter => {
                    let title = self.input.take();
                    self.mode = Mode::Normal;
                    if title.is_empty() {
                        ctx.notifier.warning("O título não pode ficar vazio.");
                        return PageAction::Consumed;
                    }
                    if let Some(id) = self.selected_id(&today) {
                        self.tasks
                            .update(&ctx.store, &mut ctx.notifier, &id, |t| t.title = title);
                    }
                    PageAction::Consumed
                }
                _ => {
                    self.input.handle_key(key);
                    PageAction::Consumed
                }
            },
            Mode::EditDescription => match key.code {
                KeyCode::Esc => {
                    self.input.clear();
                    self.mode = Mode::Normal;
                    PageAction::Consumed
                }
                KeyCode::Enter => {
                    let description = self.input.take();
                    self.mode = Mode::Normal;
                    if let Some(id) = self.selected_id(&today) {
                        self.tasks.update(&ctx.store, &mut ctx.notifier, &id, |t| {
                            t.description = description;
                        });
                    }
                    PageAction::Consumed
                }
                _ => {
                    self.input.handle_key(key);
                    PageAction::Consumed
                }
            },
            Mode::AddCategory => match key.code {
                KeyCode::Esc => {
                    self.input.clear();
                    self.mode = Mode::Normal;
                    PageAction::Consumed
                }
                KeyCode::Enter => {
                    self.mode = Mode::Normal;
                    self.add_category(ctx);
                    PageAction::Consumed
                }
                _ => {
                    self.input.handle_key(key);
                    PageAction::Consumed
                }
            },
            Mode::EditDate => match key.code {
                KeyCode::Esc => {
                    self.input.clear();
                    self.mode = Mode::Normal;
                    PageAction::Consumed
                }
                KeyCode::Enter => {
                    let date = self.input.take();
                    self.mode = Mode::Normal;
                    if !date.is_empty() && !common::dates::is_valid_iso(&date) {
                        ctx.notifier.warning("Data inválida, use AAAA-MM-DD.");
                        return PageAction::Consumed;
                    }
                    if let Some(id) = self.selected_id(&today) {
                        self.tasks
                            .update(&ctx.store, &mut ctx.notifier, &id, |t| t.due_date = date);
                    }
                    PageAction::Consumed
                }
                _ => {
                    self.input.handle_key(key);
                    PageAction::Consumed
                }
            },
            Mode::Normal => match (key.code, key.modifiers) {
                (KeyCode::Enter, _) if !self.input.is_empty() => {
                    self.quick_add(ctx);
                    PageAction::Consumed
                }
                (KeyCode::Char('/'), KeyModifiers::NONE) if self.input.is_empty() => {
                    self.mode = Mode::Search;
                    self.input.set(self.filter.search.clone());
                    PageAction::Consumed
                }
                (KeyCode::Tab, _) => {
                    self.view = match self.view {
                        View::Checklist => View::Table,
                        View::Table => View::Chart,
                        View::Chart => View::Checklist,
                    };
                    PageAction::Consumed
                }
                (KeyCode::Char('f'), KeyModifiers::CONTROL) => {
                    self.cycle_status();
                    PageAction::Consumed
                }
                (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
                    self.cycle_category();
                    PageAction::Consumed
                }
                (KeyCode::Left, _) => {
                    self.page = self.page.saturating_sub(1).max(1);
                    self.selected = 0;
                    PageAction::Consumed
                }
                (KeyCode::Right, _) => {
                    self.page += 1; // paginate clamps
                    self.selected = 0;
                    PageAction::Consumed
                }
                (KeyCode::Up, _) => {
                    self.selected = self.selected.saturating_sub(1);
                    PageAction::Consumed
                }
                (KeyCode::Down, _) => {
                    let len = self.slice(&today).items.len();
                    if len > 0 {
                        self.selected = (self.selected + 1).min(len - 1);
                    }
                    PageAction::Consumed
                }
                (KeyCode::Char(' '), KeyModifiers::NONE) if self.input.is_empty() => {
                    if let Some(id) = self.selected_id(&today) {
                        self.tasks.toggle_completed(&ctx.store, &mut ctx.notifier, &id);
                    }
                    PageAction::Consumed
                }
                (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                    if let Some(id) = self.selected_id(&today) {
                        if let Some(task) = self.tasks.get(&id) {
                            self.input.set(task.title.clone());
                            self.mode = Mode::EditTitle;
                        }
                    }
                    PageAction::Consumed
                }
                (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                    if let Some(id) = self.selected_id(&today) {
                        if let Some(task) = self.tasks.get(&id) {
                            self.input.set(task.description.clone());
                            self.mode = Mode::EditDescription;
                        }
                    }
                    PageAction::Consumed
                }
                (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                    if let Some(id) = self.selected_id(&today) {
                        if let Some(task) = self.tasks.get(&id) {
                            self.input.set(task.due_date.clone());
                            self.mode = Mode::EditDate;
                        }
                    }
                    PageAction::Consumed
                }
                (KeyCode::Char('p'), KeyModifiers::CONTROL) => {
                    if let Some(id) = self.selected_id(&today) {
                        self.tasks.update(&ctx.store, &mut ctx.notifier, &id, |t| {
                            t.priority = match t.priority {
                                Priority::Low => Priority::Medium,
                                Priority::Medium => Priority::High,
                                Priority::High => Priority::Low,
                            };
                        });
                    }
                    PageAction::Consumed
                }
                (KeyCode::Char('y'), KeyModifiers::CONTROL) => {
                    if let Some(id) = self.selected_id(&today) {
                        let cats = self.categories.clone();
                        self.tasks.update(&ctx.store, &mut ctx.notifier, &id, |t| {
                            // Cycle through the catalog, ending at
                            // "no category" before wrapping around.
                            t.category = match cats.iter().position(|c| *c == t.category) {
                                Some(i) if i + 1 < cats.len() => cats[i + 1].clone(),
                                Some(_) => String::new(),
                                None => cats.first().cloned().unwrap_or_default(),
                            };
                        });
                    }
                    PageAction::Consumed
                }
                (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
                    self.input.clear();
                    self.mode = Mode::AddCategory;
                    PageAction::Consumed
                }
                (KeyCode::Char('x'), KeyModifiers::CONTROL) => {
                    match self.filter.category.clone() {
                        Some(cat) => self.pending_category = Some(cat),
                        None => ctx
                            .notifier
                            .info("Selecione uma categoria com Ctrl+K antes de excluir."),
                    }
                    PageAction::Consumed
                }
                (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                    self.pending_delete = self.selected_id(&today);
                    PageAction::Consumed
                }
                (KeyCode::Char('g'), KeyModifiers::CONTROL) => {
                    if self.ai_busy {
                        return PageAction::Consumed;
                    }
                    if ctx
                        .suggester
                        .request("tarefas", SuggestionSlot::Input, TITLE_PROMPT)
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

    fn type_text(page: &mut TasksPage, ctx: &mut AppContext, text: &str) {
        for c in text.chars() {
            page.handle_key(&press(KeyCode::Char(c)), ctx);
        }
    }

    #[test]
    fn new_category_is_added_and_persisted() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut ctx = context(&rt);
        let mut page = TasksPage::new();
        page.show(&mut ctx);

        page.handle_key(&ctrl('n'), &mut ctx);
        type_text(&mut page, &mut ctx, "Lazer");
        page.handle_key(&press(KeyCode::Enter), &mut ctx);

        assert!(page.categories.iter().any(|c| c == "Lazer"));
        let stored: Vec<String> = ctx.store.load(keys::TASK_CATEGORIES).unwrap().unwrap();
        assert!(stored.iter().any(|c| c == "Lazer"));

        // The same name again is rejected.
        page.handle_key(&ctrl('n'), &mut ctx);
        type_text(&mut page, &mut ctx, "Lazer");
        page.handle_key(&press(KeyCode::Enter), &mut ctx);
        assert_eq!(page.categories.iter().filter(|c| c.as_str() == "Lazer").count(), 1);
    }

    #[test]
    fn deleting_a_category_keeps_task_labels() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut ctx = context(&rt);
        let mut page = TasksPage::new();
        page.show(&mut ctx);

        page.filter.category = Some("Física".to_string());
        type_text(&mut page, &mut ctx, "Alongar");
        page.handle_key(&press(KeyCode::Enter), &mut ctx);

        page.handle_key(&ctrl('x'), &mut ctx);
        page.handle_key(&press(KeyCode::Char('y')), &mut ctx);

        assert!(!page.categories.iter().any(|c| c == "Física"));
        assert_eq!(page.filter.category, None);
        let stored: Vec<String> = ctx.store.load(keys::TASK_CATEGORIES).unwrap().unwrap();
        assert!(!stored.iter().any(|c| c == "Física"));
        // Orphaned label survives on the task.
        assert_eq!(page.tasks.items()[0].category, "Física");
    }

    #[test]
    fn description_edit_updates_the_stored_task() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut ctx = context(&rt);
        let mut page = TasksPage::new();
        page.show(&mut ctx);

        type_text(&mut page, &mut ctx, "Ler");
        page.handle_key(&press(KeyCode::Enter), &mut ctx);
        page.handle_key(&ctrl('w'), &mut ctx);
        type_text(&mut page, &mut ctx, "30 páginas por dia");
        page.handle_key(&press(KeyCode::Enter), &mut ctx);

        assert_eq!(page.tasks.items()[0].description, "30 páginas por dia");
        let stored: Vec<Task> = ctx.store.load(keys::TASKS).unwrap().unwrap();
        assert_eq!(stored[0].description, "30 páginas por dia");
    }

    #[test]
    fn category_cycle_walks_catalog_then_clears() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut ctx = context(&rt);
        let mut page = TasksPage::new();
        page.show(&mut ctx);

        type_text(&mut page, &mut ctx, "Treinar");
        page.handle_key(&press(KeyCode::Enter), &mut ctx);
        assert_eq!(page.tasks.items()[0].category, "");

        let n = page.categories.len();
        for _ in 0..n {
            page.handle_key(&ctrl('y'), &mut ctx);
        }
        assert_eq!(
            page.tasks.items()[0].category,
            *page.categories.last().unwrap()
        );
        // One more step clears back to "no category".
        page.handle_key(&ctrl('y'), &mut ctx);
        assert_eq!(page.tasks.items()[0].category, "");
    }
}
