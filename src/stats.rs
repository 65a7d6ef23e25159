use crate::errors::AppError;
use crate::models::{
    mark_key, Habit, HabitRank, HabitRow, MonthViewResponse, SetMarkResponse, TodaySummary,
    UserAccount, WeeklyEfficiencyPoint,
};
use chrono::{Datelike, NaiveDate};

const WEEKDAY_LETTERS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];
const TOP_HABITS_LIMIT: usize = 10;

/// Weekly efficiency band. Lower bound of each band is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Red,
    Yellow,
    Green,
}

impl Tier {
    pub fn for_percent(percent: f64) -> Self {
        if percent >= 80.0 {
            Self::Green
        } else if percent >= 50.0 {
            Self::Yellow
        } else {
            Self::Red
        }
    }
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

/// Consecutive completed days ending at `anchor`, walking backward until the
/// first missing mark. Deliberately crosses month boundaries so an ongoing
/// streak is not cut off by flipping the displayed month.
pub fn streak(user: &UserAccount, habit_id: u64, anchor: NaiveDate) -> u32 {
    let mut count = 0;
    let mut date = anchor;
    while user.is_marked(date, habit_id) {
        count += 1;
        match date.pred_opt() {
            Some(prev) => date = prev,
            None => break,
        }
    }
    count
}

/// Share of habits completed on `date`, in [0, 100]. Zero when the habit
/// list is empty.
pub fn daily_completion_percent(user: &UserAccount, date: NaiveDate) -> f64 {
    if user.habits.is_empty() {
        return 0.0;
    }
    let done = user
        .habits
        .iter()
        .filter(|habit| user.is_marked(date, habit.id))
        .count();
    done as f64 / user.habits.len() as f64 * 100.0
}

/// Average daily completion over days 1..=today of the current month.
pub fn month_to_date_consistency(user: &UserAccount, today: NaiveDate) -> f64 {
    if user.habits.is_empty() {
        return 0.0;
    }
    let mut total = 0.0;
    for day in 1..=today.day() {
        if let Some(date) = NaiveDate::from_ymd_opt(today.year(), today.month(), day) {
            total += daily_completion_percent(user, date);
        }
    }
    total / f64::from(today.day())
}

/// Efficiency per 7-day window of a month (days 1-7, 8-14, ... clipped to
/// the month length): completed marks over `habit count x window length`.
pub fn weekly_efficiency(user: &UserAccount, year: i32, month: u32) -> Vec<WeeklyEfficiencyPoint> {
    let Some(days) = days_in_month(year, month) else {
        return Vec::new();
    };
    let weeks = days.div_ceil(7);
    let mut points = Vec::with_capacity(weeks as usize);

    for week in 0..weeks {
        let start_day = week * 7 + 1;
        let end_day = days.min((week + 1) * 7);
        let window_len = end_day - start_day + 1;

        let mut done = 0u32;
        for day in start_day..=end_day {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                done += user
                    .habits
                    .iter()
                    .filter(|habit| user.is_marked(date, habit.id))
                    .count() as u32;
            }
        }

        let total = user.habits.len() as u32 * window_len;
        let percent = if total == 0 {
            0.0
        } else {
            f64::from(done) / f64::from(total) * 100.0
        };

        points.push(WeeklyEfficiencyPoint {
            week: week + 1,
            start_day,
            end_day,
            percent,
            tier: Tier::for_percent(percent),
        });
    }

    points
}

/// Habits ranked by monthly completion percentage, descending. The sort is
/// stable, so ties keep insertion order. Truncated to the top ten.
pub fn top_habits(user: &UserAccount, year: i32, month: u32) -> Vec<HabitRank> {
    let Some(days) = days_in_month(year, month) else {
        return Vec::new();
    };

    let mut rankings: Vec<HabitRank> = user
        .habits
        .iter()
        .map(|habit| {
            let completed = (1..=days)
                .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
                .filter(|date| user.is_marked(*date, habit.id))
                .count();
            HabitRank {
                id: habit.id,
                name: habit.name.clone(),
                percent: completed as f64 / f64::from(days) * 100.0,
            }
        })
        .collect();

    rankings.sort_by(|a, b| b.percent.total_cmp(&a.percent));
    rankings.truncate(TOP_HABITS_LIMIT);
    rankings
}

/// Full grid and analytics for one displayed month. `today` anchors streaks
/// and the today-summary regardless of which month is selected.
pub fn build_month_view(
    user: &UserAccount,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<MonthViewResponse, AppError> {
    let days =
        days_in_month(year, month).ok_or_else(|| AppError::bad_request("invalid year or month"))?;

    let mut weekdays = Vec::with_capacity(days as usize);
    for day in 1..=days {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| AppError::bad_request("invalid year or month"))?;
        weekdays.push(WEEKDAY_LETTERS[date.weekday().num_days_from_sunday() as usize].to_string());
    }

    let rows = user
        .habits
        .iter()
        .map(|habit| HabitRow {
            id: habit.id,
            name: habit.name.clone(),
            marks: (1..=days)
                .map(|day| {
                    NaiveDate::from_ymd_opt(year, month, day)
                        .is_some_and(|date| user.is_marked(date, habit.id))
                })
                .collect(),
        })
        .collect();

    let daily_percent = (1..=days)
        .map(|day| {
            NaiveDate::from_ymd_opt(year, month, day)
                .map_or(0.0, |date| daily_completion_percent(user, date))
        })
        .collect();

    let today_in_view = today.year() == year && today.month() == month;
    let done_today = if today_in_view {
        user.habits
            .iter()
            .filter(|habit| user.is_marked(today, habit.id))
            .count() as u32
    } else {
        0
    };
    let total = user.habits.len() as u32;
    let today_summary = TodaySummary {
        done: done_today,
        total,
        percent: if today_in_view && total > 0 {
            f64::from(done_today) / f64::from(total) * 100.0
        } else {
            0.0
        },
    };

    Ok(MonthViewResponse {
        year,
        month,
        days_in_month: days,
        weekdays,
        rows,
        daily_percent,
        weekly: weekly_efficiency(user, year, month),
        top_habits: top_habits(user, year, month),
        today: today_summary,
    })
}

/// Appends a habit with a fresh id. Empty names (after trimming) and exact
/// duplicates are rejected without touching the list.
pub fn add_habit(user: &mut UserAccount, name: &str) -> Result<Habit, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("habit name cannot be empty"));
    }
    if user.habits.iter().any(|habit| habit.name == name) {
        return Err(AppError::conflict("habit already exists"));
    }

    let habit = Habit {
        id: user.next_habit_id,
        name: name.to_string(),
    };
    user.next_habit_id += 1;
    user.habits.push(habit.clone());
    Ok(habit)
}

/// Removes a habit and exactly its own marks. Marks of every other habit
/// stay attached to their stable ids.
pub fn delete_habit(user: &mut UserAccount, habit_id: u64) -> Result<(), AppError> {
    let position = user
        .habits
        .iter()
        .position(|habit| habit.id == habit_id)
        .ok_or_else(|| AppError::not_found("habit not found"))?;
    user.habits.remove(position);

    let suffix = format!("-{habit_id}");
    user.marks.retain(|key, _| !key.ends_with(&suffix));
    Ok(())
}

/// Sets or clears one completion mark. Unchecking removes the key rather
/// than storing false.
pub fn set_mark(
    user: &mut UserAccount,
    date: NaiveDate,
    habit_id: u64,
    done: bool,
) -> Result<SetMarkResponse, AppError> {
    if user.habit(habit_id).is_none() {
        return Err(AppError::not_found("habit not found"));
    }

    let key = mark_key(date, habit_id);
    if done {
        user.marks.insert(key, true);
    } else {
        user.marks.remove(&key);
    }

    let streak = streak(user, habit_id, date);
    Ok(SetMarkResponse {
        streak,
        celebrate: done && streak > 0 && streak % 7 == 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_habits(names: &[&str]) -> UserAccount {
        let mut user = UserAccount::new("pw");
        for name in names {
            add_habit(&mut user, name).unwrap();
        }
        user
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn add_habit_trims_and_rejects_empty_and_duplicate() {
        let mut user = UserAccount::new("pw");
        let habit = add_habit(&mut user, "  Water ").unwrap();
        assert_eq!(habit.name, "Water");

        assert!(add_habit(&mut user, "   ").is_err());
        assert!(add_habit(&mut user, "Water").is_err());
        // Case-sensitive exact match only.
        assert!(add_habit(&mut user, "water").is_ok());
    }

    #[test]
    fn habit_ids_are_not_reused_after_deletion() {
        let mut user = user_with_habits(&["a", "b"]);
        delete_habit(&mut user, 0).unwrap();
        let habit = add_habit(&mut user, "c").unwrap();
        assert_eq!(habit.id, 2);
    }

    #[test]
    fn delete_habit_keeps_other_habits_marks() {
        let mut user = user_with_habits(&["Water", "Gym", "Read"]);
        let day = date(2026, 8, 10);
        set_mark(&mut user, day, 0, true).unwrap();
        set_mark(&mut user, day, 1, true).unwrap();
        set_mark(&mut user, day, 2, true).unwrap();

        delete_habit(&mut user, 1).unwrap();

        assert!(user.is_marked(day, 0));
        assert!(!user.is_marked(day, 1));
        assert!(user.is_marked(day, 2));
        assert_eq!(user.habits.len(), 2);
    }

    #[test]
    fn delete_habit_suffix_does_not_collide_across_ids() {
        let mut user = UserAccount::new("pw");
        for i in 0..13 {
            add_habit(&mut user, &format!("habit {i}")).unwrap();
        }
        let day = date(2026, 8, 10);
        set_mark(&mut user, day, 1, true).unwrap();
        set_mark(&mut user, day, 12, true).unwrap();

        // Deleting id 2 must not touch marks for id 12.
        delete_habit(&mut user, 2).unwrap();
        assert!(user.is_marked(day, 1));
        assert!(user.is_marked(day, 12));
    }

    #[test]
    fn streak_counts_consecutive_days_and_stops_at_gap() {
        let mut user = user_with_habits(&["Gym"]);
        let today = date(2026, 8, 20);
        for day in [18, 19, 20] {
            set_mark(&mut user, date(2026, 8, day), 0, true).unwrap();
        }
        assert_eq!(streak(&user, 0, today), 3);

        // Day 17 missing: streak restarts after the gap.
        set_mark(&mut user, date(2026, 8, 16), 0, true).unwrap();
        assert_eq!(streak(&user, 0, today), 3);

        // Unchecking today drops the streak to zero.
        set_mark(&mut user, today, 0, false).unwrap();
        assert_eq!(streak(&user, 0, today), 0);
    }

    #[test]
    fn streak_crosses_month_boundary() {
        let mut user = user_with_habits(&["Gym"]);
        set_mark(&mut user, date(2026, 7, 30), 0, true).unwrap();
        set_mark(&mut user, date(2026, 7, 31), 0, true).unwrap();
        set_mark(&mut user, date(2026, 8, 1), 0, true).unwrap();
        assert_eq!(streak(&user, 0, date(2026, 8, 1)), 3);
    }

    #[test]
    fn set_mark_celebrates_full_weeks() {
        let mut user = user_with_habits(&["Gym"]);
        for day in 1..=6 {
            let response = set_mark(&mut user, date(2026, 8, day), 0, true).unwrap();
            assert!(!response.celebrate);
        }
        let response = set_mark(&mut user, date(2026, 8, 7), 0, true).unwrap();
        assert_eq!(response.streak, 7);
        assert!(response.celebrate);
    }

    #[test]
    fn daily_percent_is_zero_without_habits_and_bounded() {
        let empty = UserAccount::new("pw");
        assert_eq!(daily_completion_percent(&empty, date(2026, 8, 1)), 0.0);

        let mut user = user_with_habits(&["a", "b", "c", "d"]);
        let day = date(2026, 8, 5);
        set_mark(&mut user, day, 0, true).unwrap();
        assert_eq!(daily_completion_percent(&user, day), 25.0);

        for id in 1..4 {
            set_mark(&mut user, day, id, true).unwrap();
        }
        assert_eq!(daily_completion_percent(&user, day), 100.0);
    }

    #[test]
    fn tier_boundaries_are_inclusive_on_the_lower_bound() {
        assert_eq!(Tier::for_percent(0.0), Tier::Red);
        assert_eq!(Tier::for_percent(49.999), Tier::Red);
        assert_eq!(Tier::for_percent(50.0), Tier::Yellow);
        assert_eq!(Tier::for_percent(79.999), Tier::Yellow);
        assert_eq!(Tier::for_percent(80.0), Tier::Green);
        assert_eq!(Tier::for_percent(100.0), Tier::Green);
    }

    #[test]
    fn weekly_efficiency_windows_clip_to_month_length() {
        let user = user_with_habits(&["a"]);
        let points = weekly_efficiency(&user, 2026, 2);
        assert_eq!(points.len(), 4);
        assert_eq!(points[3].start_day, 22);
        assert_eq!(points[3].end_day, 28);

        let points = weekly_efficiency(&user, 2026, 8);
        assert_eq!(points.len(), 5);
        assert_eq!(points[4].start_day, 29);
        assert_eq!(points[4].end_day, 31);
    }

    #[test]
    fn weekly_efficiency_hits_exact_yellow_boundary() {
        // Two habits over a 7-day window: 7 of 14 marks is exactly 50%.
        let mut user = user_with_habits(&["a", "b"]);
        for day in 1..=7 {
            set_mark(&mut user, date(2026, 4, day), 0, true).unwrap();
        }
        let points = weekly_efficiency(&user, 2026, 4);
        assert_eq!(points[0].percent, 50.0);
        assert_eq!(points[0].tier, Tier::Yellow);
    }

    #[test]
    fn weekly_efficiency_without_habits_is_red_zero() {
        let user = UserAccount::new("pw");
        let points = weekly_efficiency(&user, 2026, 8);
        assert!(points.iter().all(|p| p.percent == 0.0 && p.tier == Tier::Red));
    }

    #[test]
    fn top_habits_ranks_descending_and_keeps_tie_order() {
        let mut user = user_with_habits(&["first", "busy", "second"]);
        // "busy" completed 3 days; "first" and "second" tie at 1 day.
        for day in 1..=3 {
            set_mark(&mut user, date(2026, 8, day), 1, true).unwrap();
        }
        set_mark(&mut user, date(2026, 8, 1), 0, true).unwrap();
        set_mark(&mut user, date(2026, 8, 1), 2, true).unwrap();

        let ranking = top_habits(&user, 2026, 8);
        assert_eq!(ranking[0].name, "busy");
        assert_eq!(ranking[1].name, "first");
        assert_eq!(ranking[2].name, "second");
    }

    #[test]
    fn top_habits_truncates_to_ten() {
        let names: Vec<String> = (0..12).map(|i| format!("habit {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let user = user_with_habits(&refs);
        assert_eq!(top_habits(&user, 2026, 8).len(), 10);
    }

    #[test]
    fn month_view_covers_grid_and_today_summary() {
        let mut user = user_with_habits(&["Water", "Gym"]);
        let today = date(2026, 8, 26);
        set_mark(&mut user, today, 0, true).unwrap();

        let view = build_month_view(&user, 2026, 8, today).unwrap();
        assert_eq!(view.days_in_month, 31);
        assert_eq!(view.weekdays.len(), 31);
        assert_eq!(view.rows.len(), 2);
        assert!(view.rows[0].marks[25]);
        assert_eq!(view.daily_percent[25], 50.0);
        assert_eq!(view.today.done, 1);
        assert_eq!(view.today.total, 2);
        assert_eq!(view.today.percent, 50.0);

        // A different displayed month reports zero for today.
        let other = build_month_view(&user, 2026, 7, today).unwrap();
        assert_eq!(other.today.done, 0);
        assert_eq!(other.today.percent, 0.0);
    }

    #[test]
    fn month_view_rejects_invalid_month() {
        let user = UserAccount::new("pw");
        assert!(build_month_view(&user, 2026, 13, date(2026, 8, 1)).is_err());
        assert!(build_month_view(&user, 2026, 0, date(2026, 8, 1)).is_err());
    }

    #[test]
    fn month_to_date_consistency_averages_daily_percent() {
        let mut user = user_with_habits(&["a"]);
        let today = date(2026, 8, 4);
        set_mark(&mut user, date(2026, 8, 1), 0, true).unwrap();
        set_mark(&mut user, date(2026, 8, 2), 0, true).unwrap();
        assert_eq!(month_to_date_consistency(&user, today), 50.0);
    }
}
