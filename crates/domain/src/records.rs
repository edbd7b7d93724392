use common::ValidationFailure;
use serde::{Deserialize, Serialize};

use crate::list::Record;

/// Task priority, persisted lowercase exactly as the stored JSON of
/// the original app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// User-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Baixa",
            Priority::Medium => "Média",
            Priority::High => "Alta",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// One checklist goal. Every life-area page (mental, financeira,
/// familiar, social, espiritual, preventiva) persists a list of these
/// under its own storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl Goal {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            text: text.into(),
            completed: false,
        }
    }
}

impl Record for Goal {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, value: bool) {
        self.completed = value;
    }

    fn search_haystack(&self) -> String {
        self.text.to_lowercase()
    }

    fn validate(&self) -> Result<(), ValidationFailure> {
        if self.text.trim().is_empty() {
            return Err(ValidationFailure::missing("texto do objetivo"));
        }
        Ok(())
    }
}

/// Full task record of the tasks module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "dueDate")]
    pub due_date: String,
    pub priority: Priority,
    pub category: String,
    pub completed: bool,
}

impl Task {
    pub fn quick(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            description: String::new(),
            due_date: String::new(),
            priority: Priority::Medium,
            category: category.into(),
            completed: false,
        }
    }

    /// Overdue means pending, with a due date, strictly before today.
    /// ISO date strings compare correctly as plain strings.
    pub fn is_overdue(&self, today: &str) -> bool {
        !self.completed && !self.due_date.is_empty() && self.due_date.as_str() < today
    }
}

impl Record for Task {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, value: bool) {
        self.completed = value;
    }

    fn search_haystack(&self) -> String {
        format!(
            "{} {}",
            self.title.to_lowercase(),
            self.description.to_lowercase()
        )
    }

    fn category(&self) -> Option<&str> {
        if self.category.is_empty() {
            None
        } else {
            Some(&self.category)
        }
    }

    fn due_date(&self) -> Option<&str> {
        if self.due_date.is_empty() {
            None
        } else {
            Some(&self.due_date)
        }
    }

    fn priority(&self) -> Option<Priority> {
        Some(self.priority)
    }

    fn validate(&self) -> Result<(), ValidationFailure> {
        if self.title.trim().is_empty() {
            return Err(ValidationFailure::missing("título da tarefa"));
        }
        Ok(())
    }
}

/// Entry of the physical-health exercise protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: String,
}

impl Record for Exercise {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn search_haystack(&self) -> String {
        self.name.to_lowercase()
    }

    fn validate(&self) -> Result<(), ValidationFailure> {
        if self.name.trim().is_empty() {
            return Err(ValidationFailure::missing("nome do exercício"));
        }
        if self.duration.trim().is_empty() {
            return Err(ValidationFailure::missing("duração do exercício"));
        }
        Ok(())
    }
}

/// One night of sleep; at most one entry per calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepLog {
    pub date: String,
    pub hours: f64,
    /// 1 = ruim .. 4 = excelente.
    pub quality: u8,
    #[serde(default)]
    pub notes: String,
}

impl SleepLog {
    pub fn quality_label(&self) -> &'static str {
        match self.quality {
            4 => "Excelente",
            3 => "Bom",
            2 => "Razoável",
            _ => "Ruim",
        }
    }
}

/// Physical-performance biomarkers; at most one sample per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerSample {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vo2max: Option<f64>,
    #[serde(rename = "gripStrength", skip_serializing_if = "Option::is_none")]
    pub grip_strength: Option<f64>,
    #[serde(rename = "restingHR", skip_serializing_if = "Option::is_none")]
    pub resting_hr: Option<u32>,
}

/// One item of a day's plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTask {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub intention: String,
    pub completed: bool,
    /// Most Important Task flag.
    pub mit: bool,
}

impl DailyTask {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            description: description.into(),
            intention: String::new(),
            completed: false,
            mit: false,
        }
    }
}

impl Record for DailyTask {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, value: bool) {
        self.completed = value;
    }

    fn search_haystack(&self) -> String {
        format!(
            "{} {}",
            self.description.to_lowercase(),
            self.intention.to_lowercase()
        )
    }

    fn validate(&self) -> Result<(), ValidationFailure> {
        if self.description.trim().is_empty() {
            return Err(ValidationFailure::missing("descrição da tarefa"));
        }
        Ok(())
    }
}

/// The plan persisted under `daily-plan-<date>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub tasks: Vec<DailyTask>,
    #[serde(default)]
    pub reflection: String,
}

impl DailyPlan {
    pub fn progress_percent(&self) -> u32 {
        if self.tasks.is_empty() {
            return 0;
        }
        let done = self.tasks.iter().filter(|t| t.completed).count();
        ((done as f64 / self.tasks.len() as f64) * 100.0).round() as u32
    }

    pub fn mit_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.mit).count()
    }
}

/// Latest reading of a preventive-health indicator
/// (`preventiva-indicator-<id>`); history entries share the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReading {
    pub value: f64,
    pub date: String,
}

/// Category list seeded on first use of the tasks page.
pub fn default_categories() -> Vec<String> {
    [
        "Física",
        "Mental",
        "Financeira",
        "Familiar",
        "Profissional",
        "Social",
        "Espiritual",
        "Preventiva",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
