use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use domain::{
    keys, BiomarkerSample, DailyLog, Exercise, InsertPosition, ListController, SleepLog,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use router::Page;
use tracing::warn;

use crate::context::AppContext;
use crate::events::SuggestionSlot;
use crate::input::InputField;
use crate::pages::{PageAction, PageView};
use crate::widgets::check_line;

const EXERCISE_PROMPT: &str = "Sugira um nome de exercício físico comum, como 'Caminhada \
     Rápida', 'Agachamento com Peso Corporal' ou 'Flexão de Braços'.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Exercises,
    Sleep,
    Biomarkers,
    Hydration,
}

/// Physical-health page: the exercise protocol with a per-day
/// completion map, the sleep diary and performance biomarkers.
pub struct FisicaPage {
    section: Section,
    exercises: ListController<Exercise>,
    status: HashMap<String, bool>,
    sleep: DailyLog<SleepLog>,
    biomarkers: DailyLog<BiomarkerSample>,
    input: InputField,
    selected: usize,
    hydration: Option<f64>,
    ai_busy: bool,
    pending_delete: Option<String>,
}

impl FisicaPage {
    pub fn new() -> Self {
        Self {
            section: Section::Exercises,
            exercises: ListController::new(keys::EXERCISES, InsertPosition::Tail),
            status: HashMap::new(),
            sleep: DailyLog::new(keys::SLEEP_LOGS),
            biomarkers: DailyLog::new(keys::BIOMARKERS),
            input: InputField::new(),
            selected: 0,
            hydration: None,
            ai_busy: false,
            pending_delete: None,
        }
    }

    fn status_key() -> String {
        keys::exercise_status(&common::dates::today_iso())
    }

    fn persist_status(&self, ctx: &mut AppContext) {
        if let Err(err) = ctx.store.save(&Self::status_key(), &self.status) {
            warn!(%err, "failed to save exercise status");
            ctx.notifier.error("Não foi possível salvar os dados.");
        }
    }

    fn submit(&mut self, ctx: &mut AppContext) {
        let raw = self.input.take();
        match self.section {
            // "nome / tipo / duração"
            Section::Exercises => {
                let mut parts = raw.splitn(3, '/').map(|p| p.trim().to_string());
                let exercise = Exercise {
                    id: String::new(),
                    name: parts.next().unwrap_or_default(),
                    kind: parts.next().unwrap_or_default(),
                    duration: parts.next().unwrap_or_default(),
                };
                match self.exercises.add(&ctx.store, &mut ctx.notifier, exercise) {
                    Ok(_) => ctx.notifier.success("Exercício adicionado."),
                    Err(err) => ctx.notifier.warning(err.to_string()),
                }
            }
            // "horas / qualidade 1-4 / notas"
            Section::Sleep => {
                let mut parts = raw.splitn(3, '/').map(|p| p.trim().to_string());
                let hours = parts.next().unwrap_or_default().replace(',', ".");
                let Ok(hours) = hours.parse::<f64>() else {
                    ctx.notifier.warning("Informe as horas de sono, ex.: 7.5 / 3");
                    return;
                };
                let quality = parts
                    .next()
                    .and_then(|q| q.parse::<u8>().ok())
                    .unwrap_or(3)
                    .clamp(1, 4);
                let notes = parts.next().unwrap_or_default();
                self.sleep.upsert(
                    &ctx.store,
                    &mut ctx.notifier,
                    SleepLog {
                        date: common::dates::today_iso(),
                        hours,
                        quality,
                        notes,
                    },
                );
                ctx.notifier.success("Registro de sono salvo.");
            }
            // "vo2max / preensão / FC em repouso", blanks allowed
            Section::Biomarkers => {
                let mut parts = raw.splitn(3, '/').map(|p| p.trim().replace(',', "."));
                let vo2max = parts.next().and_then(|v| v.parse::<f64>().ok());
                let grip_strength = parts.next().and_then(|v| v.parse::<f64>().ok());
                let resting_hr = parts.next().and_then(|v| v.parse::<u32>().ok());
                if vo2max.is_none() && grip_strength.is_none() && resting_hr.is_none() {
                    ctx.notifier
                        .warning("Informe ao menos um valor: vo2 / preensão / FC.");
                    return;
                }
                self.biomarkers.upsert(
                    &ctx.store,
                    &mut ctx.notifier,
                    BiomarkerSample {
                        date: common::dates::today_iso(),
                        vo2max,
                        grip_strength,
                        resting_hr,
                    },
                );
                ctx.notifier.success("Biomarcadores salvos.");
            }
            // weight in kg, 35 ml per kg per day
            Section::Hydration => {
                let weight = raw.replace(',', ".").parse::<f64>().unwrap_or(0.0);
                if weight > 0.0 {
                    self.hydration = Some(weight * 35.0 / 1000.0);
                } else {
                    self.hydration = None;
                    ctx.notifier.warning("Informe o peso em kg, ex.: 72.5");
                }
            }
        }
    }

    fn clamp_selection(&mut self) {
        if self.exercises.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.exercises.len() - 1);
        }
    }

    fn input_title(&self) -> &'static str {
        match self.section {
            Section::Exercises => "Novo exercício: nome / tipo / duração",
            Section::Sleep => "Sono de hoje: horas / qualidade 1-4 / notas",
            Section::Biomarkers => "Biomarcadores de hoje: vo2 / preensão / FC",
            Section::Hydration => "Hidratação: peso em kg",
        }
    }
}

impl Default for FisicaPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page<AppContext> for FisicaPage {
    fn show(&mut self, ctx: &mut AppContext) {
        self.exercises.load(&ctx.store, &mut ctx.notifier);
        self.sleep.load(&ctx.store, &mut ctx.notifier);
        self.biomarkers.load(&ctx.store, &mut ctx.notifier);
        self.status = match ctx.store.load::<HashMap<String, bool>>(&Self::status_key()) {
            Ok(Some(map)) => map,
            Ok(None) => HashMap::new(),
            Err(err) => {
                warn!(%err, "failed to load exercise status");
                ctx.notifier.error("Não foi possível carregar os dados.");
                HashMap::new()
            }
        };
        self.pending_delete = None;
        self.clamp_selection();
    }
}

impl PageView for FisicaPage {
    fn draw(&mut self, f: &mut Frame, area: Rect, ctx: &mut AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(area);

        f.render_widget(
            Paragraph::new(self.input.display()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.input_title()),
            ),
            chunks[0],
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
            ])
            .split(chunks[1]);

        let focus = |section: Section, title: &str| -> Block<'static> {
            let mut block = Block::default()
                .borders(Borders::ALL)
                .title(title.to_string());
            if self.section == section {
                block = block.border_style(Style::default().fg(Color::Cyan));
            }
            block
        };

        let exercise_lines: Vec<Line> = if self.exercises.is_empty() {
            vec![Line::from(Span::styled(
                "Nenhum exercício no protocolo.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.exercises
                .items()
                .iter()
                .enumerate()
                .map(|(i, e)| {
                    let done = self.status.get(&e.id).copied().unwrap_or(false);
                    let selected = self.section == Section::Exercises && i == self.selected;
                    let mut line = check_line(done, &e.name, selected);
                    line.spans.push(Span::styled(
                        format!("  {} · {}", e.kind, e.duration),
                        Style::default().fg(Color::DarkGray),
                    ));
                    line
                })
                .collect()
        };
        f.render_widget(
            Paragraph::new(exercise_lines)
                .block(focus(Section::Exercises, "Protocolo de hoje")),
            columns[0],
        );

        let mut sleep_lines: Vec<Line> = Vec::new();
        if let Some(latest) = self.sleep.latest() {
            sleep_lines.push(Line::from(format!(
                "Última noite ({}): {:.1}h · {}",
                common::dates::format_br(&latest.date),
                latest.hours,
                latest.quality_label()
            )));
            let recent: Vec<&SleepLog> = self.sleep.entries().iter().rev().take(7).collect();
            let avg = recent.iter().map(|l| l.hours).sum::<f64>() / recent.len() as f64;
            sleep_lines.push(Line::from(format!(
                "Média ({} noites): {:.1}h",
                recent.len(),
                avg
            )));
            for log in recent {
                sleep_lines.push(Line::from(Span::styled(
                    format!(
                        "{}  {:.1}h  {}",
                        common::dates::format_br(&log.date),
                        log.hours,
                        log.quality_label()
                    ),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        } else {
            sleep_lines.push(Line::from(Span::styled(
                "Nenhuma noite registrada.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        f.render_widget(
            Paragraph::new(sleep_lines).block(focus(Section::Sleep, "Diário de sono")),
            columns[1],
        );

        let mut bio_lines: Vec<Line> = Vec::new();
        if let Some(latest) = self.biomarkers.latest() {
            bio_lines.push(Line::from(format!(
                "Última medição: {}",
                common::dates::format_br(&latest.date)
            )));
            let fmt = |v: Option<f64>| v.map(|v| format!("{v:.1}")).unwrap_or_else(|| "—".into());
            bio_lines.push(Line::from(format!("VO2max: {}", fmt(latest.vo2max))));
            bio_lines.push(Line::from(format!(
                "Preensão: {} kg",
                fmt(latest.grip_strength)
            )));
            bio_lines.push(Line::from(format!(
                "FC repouso: {}",
                latest
                    .resting_hr
                    .map(|v| format!("{v} bpm"))
                    .unwrap_or_else(|| "—".into())
            )));
        } else {
            bio_lines.push(Line::from(Span::styled(
                "Nenhuma medição registrada.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        bio_lines.push(Line::default());
        let hydration_style = if self.section == Section::Hydration {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        bio_lines.push(Line::from(Span::styled(
            match self.hydration {
                Some(liters) => format!("Hidratação: {liters:.2} litros/dia"),
                None => "Hidratação: informe o peso para calcular.".to_string(),
            },
            hydration_style,
        )));
        f.render_widget(
            Paragraph::new(bio_lines).block(focus(Section::Biomarkers, "Biomarcadores")),
            columns[2],
        );

        let hint = if self.pending_delete.is_some() {
            "Excluir exercício selecionado? y = sim, outra tecla = não".to_string()
        } else {
            let mut h = String::from(
                "Tab seção · Enter salvar · Espaço concluir exercício · Ctrl+D excluir · \
                 Ctrl+A alongamento",
            );
            if ctx.suggester.is_available() {
                h.push_str(" · Ctrl+G sugerir exercício");
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
            chunks[2],
        );
    }

    fn handle_key(&mut self, key: &KeyEvent, ctx: &mut AppContext) -> PageAction {
        if let Some(id) = self.pending_delete.take() {
            if key.code == KeyCode::Char('y') {
                self.exercises.remove(&ctx.store, &mut ctx.notifier, &id);
                self.status.remove(&id);
                self.persist_status(ctx);
                self.clamp_selection();
                ctx.notifier.info("Exercício excluído.");
            }
            return PageAction::Consumed;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Tab, _) => {
                self.section = match self.section {
                    Section::Exercises => Section::Sleep,
                    Section::Sleep => Section::Biomarkers,
                    Section::Biomarkers => Section::Hydration,
                    Section::Hydration => Section::Exercises,
                };
                PageAction::Consumed
            }
            (KeyCode::Enter, _) if !self.input.is_empty() => {
                self.submit(ctx);
                PageAction::Consumed
            }
            (KeyCode::Up, _) if self.section == Section::Exercises => {
                self.selected = self.selected.saturating_sub(1);
                PageAction::Consumed
            }
            (KeyCode::Down, _) if self.section == Section::Exercises => {
                self.selected += 1;
                self.clamp_selection();
                PageAction::Consumed
            }
            (KeyCode::Char(' '), KeyModifiers::NONE)
                if self.section == Section::Exercises && self.input.is_empty() =>
            {
                if let Some(exercise) = self.exercises.items().get(self.selected) {
                    let id = exercise.id.clone();
                    let done = self.status.get(&id).copied().unwrap_or(false);
                    self.status.insert(id, !done);
                    self.persist_status(ctx);
                }
                PageAction::Consumed
            }
            (KeyCode::Char('d'), KeyModifiers::CONTROL)
                if self.section == Section::Exercises =>
            {
                self.pending_delete = self
                    .exercises
                    .items()
                    .get(self.selected)
                    .map(|e| e.id.clone());
                PageAction::Consumed
            }
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                PageAction::Navigate("alongamento".to_string())
            }
            (KeyCode::Char('g'), KeyModifiers::CONTROL) => {
                if self.ai_busy {
                    return PageAction::Consumed;
                }
                if ctx
                    .suggester
                    .request("fisica", SuggestionSlot::Input, EXERCISE_PROMPT)
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
