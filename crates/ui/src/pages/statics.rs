use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use router::Page;

use crate::context::AppContext;
use crate::pages::{PageAction, PageView};

/// Informational page with fixed content: the home hub, the mind map
/// and the stretching guide. Only scroll state survives between
/// frames, and activation resets it to the top.
pub struct StaticPage {
    title: &'static str,
    lines: Vec<&'static str>,
    scroll: u16,
}

impl StaticPage {
    pub fn new(title: &'static str, lines: Vec<&'static str>) -> Self {
        Self {
            title,
            lines,
            scroll: 0,
        }
    }

    pub fn inicio() -> Self {
        Self::new(
            "Pequenos Passos",
            vec![
                "Bem-vindo ao seu painel de bem-estar.",
                "",
                "Cada área da vida tem a sua própria página: física, mental,",
                "financeira, familiar, profissional, social, espiritual e",
                "preventiva. Comece pelo planejamento diário ou escolha uma",
                "área na barra lateral.",
                "",
                "Pequenos passos, todos os dias.",
            ],
        )
    }

    pub fn mapa_mental() -> Self {
        Self::new(
            "Mapa Mental",
            vec![
                "Uma vida equilibrada, vista de cima:",
                "",
                "Saúde Plena",
                "├─ Física: sono, exercício, biomarcadores",
                "│  └─ Alongamento e mobilidade",
                "├─ Mental: foco, descanso, terapia",
                "├─ Financeira: orçamento, reservas, metas",
                "├─ Familiar: presença, rituais, cuidado",
                "├─ Profissional: ofício, aprendizado, limites",
                "├─ Social: vínculos, comunidade, escuta",
                "├─ Espiritual: gratidão, propósito, silêncio",
                "└─ Preventiva: exames, indicadores, check-ups",
                "",
                "Cada ramo tem a sua própria página; navegue com as",
                "teclas de função listadas na barra lateral.",
            ],
        )
    }

    pub fn alongamento() -> Self {
        Self::new(
            "Alongamento e Mobilidade",
            vec![
                "Rotina sugerida (10 a 15 minutos):",
                "",
                "1. Pescoço: incline a cabeça para cada lado, 20 segundos.",
                "2. Ombros: círculos para frente e para trás, 10 repetições.",
                "3. Coluna: gato-vaca em quatro apoios, 10 ciclos lentos.",
                "4. Posteriores: flexão à frente em pé, joelhos levemente",
                "   dobrados, 30 segundos.",
                "5. Quadril: afundo com o joelho no chão, 30 segundos por lado.",
                "6. Panturrilhas: apoio na parede, 30 segundos por lado.",
                "",
                "Respire devagar e nunca force até sentir dor.",
            ],
        )
    }
}

impl Page<AppContext> for StaticPage {
    fn show(&mut self, _ctx: &mut AppContext) {
        self.scroll = 0;
    }
}

impl PageView for StaticPage {
    fn draw(&mut self, f: &mut Frame, area: Rect, _ctx: &mut AppContext) {
        let text: Vec<Line> = std::iter::once(Line::from(Span::styled(
            self.title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .chain(std::iter::once(Line::default()))
        .chain(self.lines.iter().map(|l| Line::from(*l)))
        .collect();
        let body = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        f.render_widget(body, area);
    }

    fn handle_key(&mut self, key: &KeyEvent, _ctx: &mut AppContext) -> PageAction {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                PageAction::Consumed
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1).min(self.lines.len() as u16);
                PageAction::Consumed
            }
            _ => PageAction::Pass,
        }
    }
}
