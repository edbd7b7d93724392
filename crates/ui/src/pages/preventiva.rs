use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use domain::indicators::{interpret, marker_percent, IndicatorSpec, CATALOG};
use domain::{keys, Goal, IndicatorReading, InsertPosition, ListController};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table,
};
use ratatui::Frame;
use router::Page;
use tracing::warn;

use crate::context::AppContext;
use crate::events::SuggestionSlot;
use crate::input::InputField;
use crate::pages::{PageAction, PageView};
use crate::widgets::{check_line, zone_color};

const GOAL_PROMPT: &str = "Sugira um objetivo de saúde preventiva, como 'Agendar check-up \
     anual com clínico geral' ou 'Realizar autoexame da pele mensalmente'.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Indicators,
    Goals,
}

/// Preventive-health page: the indicator panel (latest reading,
/// interpreted zone, history) and the area's goal checklist.
pub struct PreventivaPage {
    section: Section,
    readings: Vec<Option<IndicatorReading>>,
    selected: usize,
    value_input: InputField,
    show_history: bool,
    show_table: bool,
    goals: ListController<Goal>,
    goal_input: InputField,
    goal_selected: usize,
    ai_busy: bool,
    pending_delete: Option<String>,
}

impl PreventivaPage {
    pub fn new() -> Self {
        Self {
            section: Section::Indicators,
            readings: vec![None; CATALOG.len()],
            selected: 0,
            value_input: InputField::new(),
            show_history: false,
            show_table: false,
            goals: ListController::new(keys::PREVENTIVA_GOALS, InsertPosition::Head),
            goal_input: InputField::new(),
            goal_selected: 0,
            ai_busy: false,
            pending_delete: None,
        }
    }

    fn spec(&self) -> &'static IndicatorSpec {
        &CATALOG[self.selected]
    }

    fn load_readings(&mut self, ctx: &mut AppContext) {
        self.readings = CATALOG
            .iter()
            .map(|spec| {
                match ctx.store.load::<IndicatorReading>(&keys::indicator(spec.id)) {
                    Ok(reading) => reading,
                    Err(err) => {
                        warn!(%err, indicator = spec.id, "failed to load reading");
                        None
                    }
                }
            })
            .collect();
    }

    fn record_value(&mut self, ctx: &mut AppContext) {
        let raw = self.value_input.take().replace(',', ".");
        let Ok(value) = raw.parse::<f64>() else {
            ctx.notifier.warning("Informe um valor numérico.");
            return;
        };
        if !value.is_finite() {
            ctx.notifier.warning("Informe um valor numérico.");
            return;
        }
        let spec = self.spec();
        let reading = IndicatorReading {
            value,
            date: common::dates::today_iso(),
        };
        if let Err(err) = ctx.store.save(&keys::indicator(spec.id), &reading) {
            warn!(%err, indicator = spec.id, "failed to save reading");
            ctx.notifier.error("Não foi possível salvar os dados.");
            return;
        }
        // History keeps every sample, date ascending.
        let history_key = keys::indicator_history(spec.id);
        let mut history = match ctx.store.load::<Vec<IndicatorReading>>(&history_key) {
            Ok(Some(h)) => h,
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(%err, indicator = spec.id, "failed to load history");
                Vec::new()
            }
        };
        history.push(reading.clone());
        history.sort_by(|a, b| a.date.cmp(&b.date));
        if let Err(err) = ctx.store.save(&history_key, &history) {
            warn!(%err, indicator = spec.id, "failed to save history");
            ctx.notifier.error("Não foi possível salvar os dados.");
        }
        self.readings[self.selected] = Some(reading);
        ctx.notifier.success("Valor registrado.");
    }

    fn history(&self, ctx: &mut AppContext) -> Vec<IndicatorReading> {
        match ctx
            .store
            .load::<Vec<IndicatorReading>>(&keys::indicator_history(self.spec().id))
        {
            Ok(Some(h)) => h,
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(%err, "failed to load history");
                Vec::new()
            }
        }
    }

    /// Every indicator's samples merged, newest first, capped at 50
    /// rows.
    fn all_history(&self, ctx: &mut AppContext) -> Vec<(&'static IndicatorSpec, IndicatorReading)> {
        let mut rows = Vec::new();
        for spec in CATALOG {
            let history = match ctx
                .store
                .load::<Vec<IndicatorReading>>(&keys::indicator_history(spec.id))
            {
                Ok(Some(h)) => h,
                Ok(None) => continue,
                Err(err) => {
                    warn!(%err, indicator = spec.id, "failed to load history");
                    continue;
                }
            };
            rows.extend(history.into_iter().map(|entry| (spec, entry)));
        }
        rows.sort_by(|a, b| b.1.date.cmp(&a.1.date));
        rows.truncate(50);
        rows
    }

    fn draw_history_table(&self, f: &mut Frame, area: Rect, ctx: &mut AppContext) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Histórico de indicadores");
        let rows = self.all_history(ctx);
        if rows.is_empty() {
            f.render_widget(
                Paragraph::new(Span::styled(
                    "Nenhum histórico de biomarcadores encontrado.",
                    Style::default().fg(Color::DarkGray),
                ))
                .block(block),
                area,
            );
            return;
        }
        let header = Row::new(vec!["Indicador", "Data", "Valor", "Situação"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let body: Vec<Row> = rows
            .iter()
            .map(|(spec, entry)| {
                let interp = interpret(Some(entry.value), spec.zones, spec.reversed);
                Row::new(vec![
                    Cell::from(spec.name),
                    Cell::from(common::dates::format_br(&entry.date)),
                    Cell::from(format!("{} {}", entry.value, spec.unit)),
                    Cell::from(interp.status().to_string())
                        .style(Style::default().fg(zone_color(interp.color()))),
                ])
            })
            .collect();
        let table = Table::new(
            body,
            [
                Constraint::Percentage(40),
                Constraint::Length(12),
                Constraint::Length(16),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(block);
        f.render_widget(table, area);
    }

    /// Samples plotted oldest to newest; the y range widens from the
    /// indicator's reference band when a sample falls outside it.
    fn draw_history_chart(&self, f: &mut Frame, area: Rect, history: &[IndicatorReading]) {
        let block = Block::default().borders(Borders::ALL).title("Evolução");
        if history.len() < 2 {
            f.render_widget(
                Paragraph::new(Span::styled(
                    "Registre mais valores para ver a evolução.",
                    Style::default().fg(Color::DarkGray),
                ))
                .block(block),
                area,
            );
            return;
        }
        let spec = self.spec();
        let points: Vec<(f64, f64)> = history
            .iter()
            .enumerate()
            .map(|(i, r)| (i as f64, r.value))
            .collect();
        let mut lo = spec.min;
        let mut hi = spec.max;
        for r in history {
            lo = lo.min(r.value);
            hi = hi.max(r.value);
        }
        let dataset = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points);
        let first = common::dates::format_br(&history[0].date);
        let last = common::dates::format_br(&history[history.len() - 1].date);
        let chart = Chart::new(vec![dataset])
            .x_axis(
                Axis::default()
                    .bounds([0.0, (history.len() - 1) as f64])
                    .labels([Line::from(first), Line::from(last)]),
            )
            .y_axis(
                Axis::default()
                    .bounds([lo, hi])
                    .labels([Line::from(format!("{lo}")), Line::from(format!("{hi}"))]),
            )
            .block(block);
        f.render_widget(chart, area);
    }

    fn clamp_goal_selection(&mut self) {
        if self.goals.is_empty() {
            self.goal_selected = 0;
        } else {
            self.goal_selected = self.goal_selected.min(self.goals.len() - 1);
        }
    }
}

impl Default for PreventivaPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page<AppContext> for PreventivaPage {
    fn show(&mut self, ctx: &mut AppContext) {
        self.load_readings(ctx);
        self.goals.load(&ctx.store, &mut ctx.notifier);
        self.show_history = false;
        self.show_table = false;
        self.pending_delete = None;
        self.clamp_goal_selection();
    }
}

impl PageView for PreventivaPage {
    fn draw(&mut self, f: &mut Frame, area: Rect, ctx: &mut AppContext) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let focus = |active: bool, title: String| -> Block<'static> {
            let mut block = Block::default().borders(Borders::ALL).title(title);
            if active {
                block = block.border_style(Style::default().fg(Color::Cyan));
            }
            block
        };

        if self.show_table {
            self.draw_history_table(f, columns[0], ctx);
        } else {
            let indicator_lines: Vec<Line> = CATALOG
                .iter()
                .enumerate()
                .map(|(i, spec)| {
                    let reading = self.readings[i].as_ref();
                    let value = reading.map(|r| r.value);
                    let interp = interpret(value, spec.zones, spec.reversed);
                    let value_text = reading
                        .map(|r| format!("{} {}", r.value, spec.unit))
                        .unwrap_or_else(|| "—".into());
                    let mut style = Style::default();
                    if self.section == Section::Indicators && i == self.selected {
                        style = style.bg(Color::Indexed(237)).add_modifier(Modifier::BOLD);
                    }
                    Line::from(vec![
                        Span::styled(format!("{:<22}", spec.name), style),
                        Span::styled(format!("{value_text:<16}"), style),
                        Span::styled(
                            interp.status().to_string(),
                            style.fg(zone_color(interp.color())),
                        ),
                    ])
                })
                .collect();
            f.render_widget(
                Paragraph::new(indicator_lines).block(focus(
                    self.section == Section::Indicators,
                    "Indicadores".into(),
                )),
                columns[0],
            );
        }

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        let spec = self.spec();
        let reading = self.readings[self.selected].as_ref();
        let value = reading.map(|r| r.value);
        let interp = interpret(value, spec.zones, spec.reversed);
        let mut detail: Vec<Line> = vec![
            Line::from(Span::styled(
                format!("{} ({})", spec.name, spec.unit),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(match reading {
                Some(r) => format!(
                    "Último valor: {} em {}",
                    r.value,
                    common::dates::format_br(&r.date)
                ),
                None => "Nenhum valor registrado.".to_string(),
            }),
            Line::from(vec![
                Span::raw("Situação: "),
                Span::styled(
                    format!("{} — {}", interp.status(), interp.tip()),
                    Style::default().fg(zone_color(interp.color())),
                ),
            ]),
        ];
        if let Some(percent) = marker_percent(value, spec) {
            detail.push(Line::from(format!(
                "Posição na faixa {}–{}: {:.0}%",
                spec.min, spec.max, percent
            )));
        }
        detail.push(Line::default());
        detail.push(Line::from(Span::styled(
            format!("Novo valor: {}", self.value_input.display()),
            Style::default(),
        )));
        detail.push(Line::from(Span::styled(
            "Ctrl+H histórico · Ctrl+T tabela",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
        if self.show_history {
            detail.push(Line::default());
            detail.push(Line::from(Span::styled(
                "Histórico:",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            let history = self.history(ctx);
            if history.is_empty() {
                detail.push(Line::from(Span::styled(
                    "Sem registros anteriores.",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            for entry in history.iter().rev().take(8) {
                let interp = interpret(Some(entry.value), spec.zones, spec.reversed);
                detail.push(Line::from(vec![
                    Span::raw(format!(
                        "{}  {} {}  ",
                        common::dates::format_br(&entry.date),
                        entry.value,
                        spec.unit
                    )),
                    Span::styled(
                        interp.status().to_string(),
                        Style::default().fg(zone_color(interp.color())),
                    ),
                ]));
            }
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(6), Constraint::Length(8)])
                .split(right[0]);
            f.render_widget(
                Paragraph::new(detail).block(focus(false, "Detalhe".into())),
                parts[0],
            );
            self.draw_history_chart(f, parts[1], &history);
        } else {
            f.render_widget(
                Paragraph::new(detail).block(focus(false, "Detalhe".into())),
                right[0],
            );
        }

        let done = self.goals.completed_count();
        let mut goal_lines = vec![Line::from(self.goal_input.display()), Line::default()];
        if self.goals.is_empty() {
            goal_lines.push(Line::from(Span::styled(
                "Nenhum objetivo ainda.",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            goal_lines.extend(self.goals.items().iter().enumerate().map(|(i, g)| {
                let selected = self.section == Section::Goals && i == self.goal_selected;
                check_line(g.completed, &g.text, selected)
            }));
        }
        f.render_widget(
            Paragraph::new(goal_lines).block(focus(
                self.section == Section::Goals,
                format!("Metas — {}/{} concluídas", done, self.goals.len()),
            )),
            right[1],
        );
    }

    fn handle_key(&mut self, key: &KeyEvent, ctx: &mut AppContext) -> PageAction {
        if let Some(id) = self.pending_delete.take() {
            if key.code == KeyCode::Char('y') {
                self.goals.remove(&ctx.store, &mut ctx.notifier, &id);
                self.clamp_goal_selection();
                ctx.notifier.info("Objetivo excluído.");
            }
            return PageAction::Consumed;
        }

        if key.code == KeyCode::Tab {
            self.section = match self.section {
                Section::Indicators => Section::Goals,
                Section::Goals => Section::Indicators,
            };
            return PageAction::Consumed;
        }

        match self.section {
            Section::Indicators => match (key.code, key.modifiers) {
                (KeyCode::Up, _) => {
                    self.selected = self.selected.saturating_sub(1);
                    self.show_history = false;
                    PageAction::Consumed
                }
                (KeyCode::Down, _) => {
                    self.selected = (self.selected + 1).min(CATALOG.len() - 1);
                    self.show_history = false;
                    PageAction::Consumed
                }
                (KeyCode::Enter, _) if !self.value_input.is_empty() => {
                    self.record_value(ctx);
                    PageAction::Consumed
                }
                (KeyCode::Char('h'), KeyModifiers::CONTROL) => {
                    self.show_history = !self.show_history;
                    PageAction::Consumed
                }
                (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                    self.show_table = !self.show_table;
                    PageAction::Consumed
                }
                _ => {
                    if self.value_input.handle_key(key) {
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
                            self.goal_selected = 0;
                            ctx.notifier.success("Objetivo adicionado.");
                        }
                        Err(err) => ctx.notifier.warning(err.to_string()),
                    }
                    PageAction::Consumed
                }
                (KeyCode::Up, _) => {
                    self.goal_selected = self.goal_selected.saturating_sub(1);
                    PageAction::Consumed
                }
                (KeyCode::Down, _) => {
                    self.goal_selected += 1;
                    self.clamp_goal_selection();
                    PageAction::Consumed
                }
                (KeyCode::Char(' '), KeyModifiers::NONE) if self.goal_input.is_empty() => {
                    if let Some(goal) = self.goals.items().get(self.goal_selected) {
                        let id = goal.id.clone();
                        self.goals.toggle_completed(&ctx.store, &mut ctx.notifier, &id);
                    }
                    PageAction::Consumed
                }
                (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                    self.pending_delete = self
                        .goals
                        .items()
                        .get(self.goal_selected)
                        .map(|g| g.id.clone());
                    PageAction::Consumed
                }
                (KeyCode::Char('g'), KeyModifiers::CONTROL) => {
                    if self.ai_busy {
                        return PageAction::Consumed;
                    }
                    if ctx
                        .suggester
                        .request("preventiva", SuggestionSlot::Input, GOAL_PROMPT)
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
