//! Storage keys. These match the keys the data has always been saved
//! under, so existing snapshots keep loading.

pub const TASKS: &str = "tasksData";
pub const TASK_CATEGORIES: &str = "tasksCategories";

pub const MENTAL_GOALS: &str = "mentalGoals";
pub const FINANCEIRA_GOALS: &str = "financeiraGoals";
pub const FAMILIAR_GOALS: &str = "familiarGoals";
pub const PROFISSIONAL_GOALS: &str = "profissionalGoals";
pub const SOCIAL_GOALS: &str = "socialGoals";
pub const ESPIRITUAL_GOALS: &str = "espiritualGoals";
pub const PREVENTIVA_GOALS: &str = "preventivaGoals";

pub const EXERCISES: &str = "fisicaExercises";
pub const SLEEP_LOGS: &str = "fisicaSleepLogs";
pub const BIOMARKERS: &str = "fisicaBiomarkers";

pub const DAILY_PLAN_LAST_DATE: &str = "daily-plan-last-date";
pub const SIDEBAR_COLLAPSED: &str = "sidebarCollapsed";

pub const JOURNAL_PREFIX: &str = "gratitudeJournal-";

pub fn daily_plan(date: &str) -> String {
    format!("daily-plan-{date}")
}

/// Per-day exercise completion map (exercise id -> done).
pub fn exercise_status(date: &str) -> String {
    format!("fisicaExerciseStatus-{date}")
}

/// Per-day spiritual practice checklist (practice id -> done).
pub fn spiritual_checklist(date: &str) -> String {
    format!("espiritual-checklist-{date}")
}

pub fn gratitude_journal(date: &str) -> String {
    format!("{JOURNAL_PREFIX}{date}")
}

/// Latest reading of one preventive-health indicator.
pub fn indicator(id: &str) -> String {
    format!("preventiva-indicator-{id}")
}

/// Full reading history of one preventive-health indicator.
pub fn indicator_history(id: &str) -> String {
    format!("preventiva-indicator-history-{id}")
}

/// Persisted open/closed flag of one sidebar section.
pub fn sidebar_section(id: &str) -> String {
    format!("sidebarSection-{id}")
}
