use crossterm::event::{KeyCode, KeyEvent};
use domain::{Goal, InsertPosition, ListController};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use router::Page;

use crate::context::AppContext;
use crate::events::SuggestionSlot;
use crate::input::InputField;
use crate::pages::{PageAction, PageView};
use crate::widgets::check_line;

/// Auxiliary AI panel some areas carry (financeira: orçamento,
/// social: recursos de comunicação).
pub struct ResourcePanel {
    pub title: &'static str,
    pub prompt: &'static str,
    pub content: Option<String>,
    pub busy: bool,
}

impl ResourcePanel {
    pub fn new(title: &'static str, prompt: &'static str) -> Self {
        Self {
            title,
            prompt,
            content: None,
            busy: false,
        }
    }
}

/// Checklist-of-goals page, one instance per life area. All of them
/// share the engine; only the storage key, title and AI prompts
/// differ.
pub struct GoalPage {
    key: &'static str,
    title: &'static str,
    goals: ListController<Goal>,
    input: InputField,
    selected: usize,
    ai_prompt: &'static str,
    ai_busy: bool,
    pending_delete: Option<String>,
    resources: Option<ResourcePanel>,
}

impl GoalPage {
    pub fn new(
        key: &'static str,
        title: &'static str,
        storage_key: &'static str,
        ai_prompt: &'static str,
    ) -> Self {
        Self {
            key,
            title,
            goals: ListController::new(storage_key, InsertPosition::Head),
            input: InputField::new(),
            selected: 0,
            ai_prompt,
            ai_busy: false,
            pending_delete: None,
            resources: None,
        }
    }

    pub fn with_resources(mut self, panel: ResourcePanel) -> Self {
        self.resources = Some(panel);
        self
    }

    fn clamp_selection(&mut self) {
        if self.goals.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.goals.len() - 1);
        }
    }

    fn selected_id(&self) -> Option<String> {
        self.goals.items().get(self.selected).map(|g| g.id.clone())
    }

    fn submit(&mut self, ctx: &mut AppContext) {
        let text = self.input.take();
        match self.goals.add(&ctx.store, &mut ctx.notifier, Goal::new(text)) {
            Ok(_) => {
                self.selected = 0;
                ctx.notifier.success("Objetivo adicionado.");
            }
            Err(err) => ctx.notifier.warning(err.to_string()),
        }
    }
}

impl Page<AppContext> for GoalPage {
    fn show(&mut self, ctx: &mut AppContext) {
        self.goals.load(&ctx.store, &mut ctx.notifier);
        self.pending_delete = None;
        self.clamp_selection();
    }
}

impl PageView for GoalPage {
    fn draw(&mut self, f: &mut Frame, area: Rect, ctx: &mut AppContext) {
        let has_resources = self
            .resources
            .as_ref()
            .map(|r| r.busy || r.content.is_some())
            .unwrap_or(false);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                if has_resources {
                    Constraint::Percentage(40)
                } else {
                    Constraint::Length(0)
                },
                Constraint::Length(1),
            ])
            .split(area);

        let input_title = if self.ai_busy {
            "Novo objetivo (sugerindo...)".to_string()
        } else {
            "Novo objetivo".to_string()
        };
        f.render_widget(
            Paragraph::new(self.input.display()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(input_title),
            ),
            chunks[0],
        );

        let done = self.goals.completed_count();
        let list_title = format!("{} — {}/{} concluídos", self.title, done, self.goals.len());
        let lines: Vec<Line> = if self.goals.is_empty() {
            vec![Line::from(Span::styled(
                "Nenhum objetivo ainda. Digite acima e pressione Enter.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.goals
                .items()
                .iter()
                .enumerate()
                .map(|(i, g)| check_line(g.completed, &g.text, i == self.selected))
                .collect()
        };
        f.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title(list_title)),
            chunks[1],
        );

        if has_resources {
            if let Some(panel) = &self.resources {
                let body = if panel.busy {
                    "Gerando...".to_string()
                } else {
                    panel.content.clone().unwrap_or_default()
                };
                f.render_widget(
                    Paragraph::new(common::sanitize(&body))
                        .wrap(Wrap { trim: false })
                        .block(Block::default().borders(Borders::ALL).title(panel.title)),
                    chunks[2],
                );
            }
        }

        let hint = if self.pending_delete.is_some() {
            "Excluir objetivo selecionado? y = sim, outra tecla = não".to_string()
        } else {
            let mut h = String::from("Enter adicionar · ↑/↓ selecionar · Espaço concluir · Ctrl+D excluir");
            if ctx.suggester.is_available() {
                h.push_str(" · Ctrl+G sugerir");
                if self.resources.is_some() {
                    h.push_str(" · Ctrl+R recursos");
                }
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
            chunks[3],
        );
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

        use crossterm::event::KeyModifiers;
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) if !self.input.is_empty() => {
                self.submit(ctx);
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
            (KeyCode::Char(' '), KeyModifiers::NONE) if self.input.is_empty() => {
                if let Some(id) = self.selected_id() {
                    self.goals.toggle_completed(&ctx.store, &mut ctx.notifier, &id);
                }
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
                    .request(self.key, SuggestionSlot::Input, self.ai_prompt)
                {
                    self.ai_busy = true;
                } else {
                    ctx.notifier
                        .warning("Serviço de sugestões não configurado.");
                }
                PageAction::Consumed
            }
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                let Some(panel) = self.resources.as_mut() else {
                    return PageAction::Pass;
                };
                if panel.busy {
                    return PageAction::Consumed;
                }
                if ctx
                    .suggester
                    .request(self.key, SuggestionSlot::Resources, panel.prompt)
                {
                    panel.busy = true;
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
        match slot {
            SuggestionSlot::Input => {
                self.ai_busy = false;
                match result {
                    Ok(text) => self.input.set(common::sanitize_line(&text)),
                    Err(msg) => ctx.notifier.error(msg),
                }
            }
            SuggestionSlot::Resources => {
                if let Some(panel) = self.resources.as_mut() {
                    panel.busy = false;
                    match result {
                        Ok(text) => panel.content = Some(text),
                        Err(msg) => ctx.notifier.error(msg),
                    }
                }
            }
        }
    }
}

/// The per-area instances, prompts matching the shipped app.
pub fn mental() -> GoalPage {
    GoalPage::new(
        "mental",
        "Metas de Saúde Mental",
        domain::keys::MENTAL_GOALS,
        "Sugira um objetivo de saúde mental prático e positivo. Por exemplo, 'Praticar 5 minutos \
         de respiração consciente diariamente' ou 'Desconectar de telas 1 hora antes de dormir'.",
    )
}

pub fn familiar() -> GoalPage {
    GoalPage::new(
        "familiar",
        "Metas de Saúde Familiar",
        domain::keys::FAMILIAR_GOALS,
        "Sugira um objetivo para melhorar a saúde familiar, como 'Fazer uma noite de jogos em \
         família por semana' ou 'Ligar para os pais duas vezes por semana'.",
    )
}

pub fn profissional() -> GoalPage {
    GoalPage::new(
        "profissional",
        "Metas de Saúde Profissional",
        domain::keys::PROFISSIONAL_GOALS,
        "Sugira uma meta profissional SMART e concisa. Exemplo: 'Concluir o curso de \
         especialização em Gestão de Projetos até dezembro' ou 'Atualizar meu portfólio com 3 \
         novos projetos até o final do trimestre'.",
    )
}

pub fn financeira() -> GoalPage {
    GoalPage::new(
        "financeira",
        "Metas de Saúde Financeira",
        domain::keys::FINANCEIRA_GOALS,
        "Sugira um objetivo financeiro SMART (Específico, Mensurável, Atingível, Relevante, \
         Temporal). Por exemplo, 'Economizar R$ 3.000 para a reserva de emergência nos próximos \
         6 meses' ou 'Quitar a fatura do cartão de crédito de R$ 1.500 em 3 meses'.",
    )
    .with_resources(ResourcePanel::new(
        "Sugestão de Orçamento",
        "Crie uma sugestão de orçamento mensal usando a regra 50/30/20, dividida em \
         'Necessidades (50%)', 'Desejos (30%)' e 'Metas Financeiras (20%)', com exemplos de \
         categorias de gastos em texto simples.",
    ))
}

pub fn social() -> GoalPage {
    GoalPage::new(
        "social",
        "Metas de Saúde Social",
        domain::keys::SOCIAL_GOALS,
        "Sugira um objetivo para melhorar a saúde social, como 'Entrar em contato com um amigo \
         que não vejo há tempos esta semana' ou 'Participar de um evento comunitário este mês'.",
    )
    .with_resources(ResourcePanel::new(
        "Recursos de Comunicação",
        "Sugira artigos, vídeos e cursos online sobre como desenvolver habilidades sociais e \
         comunicação interpessoal. Forneça um resumo dos tipos de recursos encontrados.",
    ))
}
