use crate::metrics::BodyMetrics;
use crate::stats::Tier;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A tracked habit. The id is assigned once at creation and never reused,
/// so completion marks survive deletion or reordering of other habits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub role: ChatRole,
}

/// Everything stored for one account. Created at signup, mutated by every
/// habit/mark/metrics/chat operation, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserAccount {
    pub password: String,
    pub habits: Vec<Habit>,
    pub next_habit_id: u64,
    /// Completion marks keyed by "YYYY-MM-DD-<habit id>". Only true marks
    /// are kept; unchecking removes the key.
    pub marks: BTreeMap<String, bool>,
    pub metrics: Option<BodyMetrics>,
    pub profile_img: Option<String>,
    pub chat: Vec<ChatMessage>,
}

impl UserAccount {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn habit(&self, id: u64) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    pub fn is_marked(&self, date: NaiveDate, habit_id: u64) -> bool {
        self.marks
            .get(&mark_key(date, habit_id))
            .copied()
            .unwrap_or(false)
    }
}

pub fn mark_key(date: NaiveDate, habit_id: u64) -> String {
    format!("{}-{habit_id}", date.format("%Y-%m-%d"))
}

/// The whole persisted document: all accounts plus the session marker and
/// the read-aloud opt-in.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub users: BTreeMap<String, UserAccount>,
    pub auth_user: Option<String>,
    pub voice_enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub username: String,
    pub new_password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct AddHabitRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitSummary {
    pub id: u64,
    pub name: String,
    pub streak: u32,
}

#[derive(Debug, Deserialize)]
pub struct SetMarkRequest {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub habit_id: u64,
    pub done: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetMarkResponse {
    /// Streak ending at the toggled day.
    pub streak: u32,
    /// True when the toggle landed the streak on a multiple of seven days;
    /// the UI fires its celebration on this.
    pub celebrate: bool,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitRow {
    pub id: u64,
    pub name: String,
    /// One entry per day of the month, index 0 = day 1.
    pub marks: Vec<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeeklyEfficiencyPoint {
    /// 1-based week-of-month.
    pub week: u32,
    pub start_day: u32,
    pub end_day: u32,
    pub percent: f64,
    pub tier: Tier,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitRank {
    pub id: u64,
    pub name: String,
    pub percent: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodaySummary {
    pub done: u32,
    pub total: u32,
    pub percent: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthViewResponse {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    /// Single-letter weekday label per day of the month.
    pub weekdays: Vec<String>,
    pub rows: Vec<HabitRow>,
    pub daily_percent: Vec<f64>,
    pub weekly: Vec<WeeklyEfficiencyPoint>,
    pub top_habits: Vec<HabitRank>,
    pub today: TodaySummary,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceSetting {
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct PhotoRequest {
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    pub image: Option<String>,
}
