use crate::metrics::BodyMetrics;
use crate::models::UserAccount;
use crate::stats::{month_to_date_consistency, streak, weekly_efficiency};
use chrono::{Datelike, NaiveDate};

/// Supported advisory locales. Anything unrecognized falls back to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    Hi,
    Mr,
}

impl Locale {
    pub fn parse(value: &str) -> Self {
        match value {
            "hi" => Self::Hi,
            "mr" => Self::Mr,
            _ => Self::En,
        }
    }

    fn strings(self) -> &'static Strings {
        match self {
            Self::En => &EN,
            Self::Hi => &HI,
            Self::Mr => &MR,
        }
    }
}

struct Strings {
    greet: &'static str,
    body_missing: &'static str,
    no_habits: &'static str,
    low_consistency: &'static str,
    high_consistency: &'static str,
}

static EN: Strings = Strings {
    greet: "Hello! I've analyzed your stats. Ask me for a custom diet or workout.",
    body_missing: "Please update your body metrics first for a personalized plan.",
    no_habits: "Add some habits like 'Water' or 'Gym' so I can analyze your consistency.",
    low_consistency: "I noticed your consistency is below 50%. Let's focus on smaller goals.",
    high_consistency: "Great job! You're crushing your habits. Ready to level up?",
};

static HI: Strings = Strings {
    greet: "नमस्ते! मैंने आपके आंकड़ों का विश्लेषण किया है। डाइट या वर्कआउट पूछें।",
    body_missing: "व्यक्तिगत योजना के लिए पहले बॉडी मेट्रिक्स अपडेट करें।",
    no_habits: "कुछ आदतें जोड़ें ताकि मैं विश्लेषण कर सकूँ।",
    low_consistency: "नियमितता 50% से कम है। छोटे लक्ष्यों पर ध्यान दें।",
    high_consistency: "बहुत बढ़िया! आप अपनी आदतों को अच्छे से निभा रहे हैं।",
};

static MR: Strings = Strings {
    greet: "नमस्कार! मी तुमच्या आकडेवारीचे विश्लेषण केले आहे. डाएट किंवा वर्कआउट विचारा.",
    body_missing: "वैयक्तिक योजनेसाठी आधी बॉडी मेट्रिक्स अपडेट करा.",
    no_habits: "विश्लेषणासाठी काही सवयी जोडा.",
    low_consistency: "तुमची सातत्य ५०% पेक्षा कमी आहे. लहान ध्येयांवर लक्ष द्या.",
    high_consistency: "छान! तुम्ही तुमच्या सवयींचे पालन करत आहात.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Workout,
    Diet,
    Habit,
    Body,
    Weekly,
    Greeting,
}

/// First-match keyword search in fixed priority order.
fn detect_intent(query: &str) -> Intent {
    let query = query.to_lowercase();
    if query.contains("workout") {
        Intent::Workout
    } else if query.contains("diet") || query.contains("eat") {
        Intent::Diet
    } else if query.contains("habit") {
        Intent::Habit
    } else if query.contains("body") || query.contains("bmi") {
        Intent::Body
    } else if query.contains("week") || query.contains("consistency") {
        Intent::Weekly
    } else {
        Intent::Greeting
    }
}

/// Produces the bot reply for one free-text question. Stateless: reads the
/// account, never mutates it.
pub fn respond(user: &UserAccount, query: &str, locale: Locale, today: NaiveDate) -> String {
    let strings = locale.strings();
    match detect_intent(query) {
        Intent::Workout => match &user.metrics {
            Some(metrics) => workout_plan(metrics),
            None => strings.body_missing.to_string(),
        },
        Intent::Diet => match &user.metrics {
            Some(metrics) => diet_plan(user, metrics),
            None => strings.body_missing.to_string(),
        },
        Intent::Habit => habit_reply(user, locale, today),
        Intent::Body => match &user.metrics {
            Some(metrics) => format!(
                "Your BMI is {:.1} ({}). Your daily BMR is {} calories. Estimated body fat: {:.1}%.",
                metrics.bmi,
                metrics.category,
                metrics.bmr.round() as i64,
                metrics.body_fat_percent,
            ),
            None => strings.body_missing.to_string(),
        },
        Intent::Weekly => weekly_reply(user, locale, today),
        Intent::Greeting => strings.greet.to_string(),
    }
}

fn workout_plan(metrics: &BodyMetrics) -> String {
    let overweight = metrics.bmi > 25.0;
    format!(
        "[WORKOUT PLAN]\n\
         Goal: {}\n\
         Intensity: at your {} activity multiplier, aim for {} days/week.\n\
         Focus: {}.\n\
         Advice: your current weight is {}kg. Prioritize form over heavy weights.",
        if overweight {
            "Fat Loss & Metabolic Conditioning"
        } else {
            "Hypertrophy & Lean Bulk"
        },
        metrics.activity.multiplier(),
        metrics.activity.sessions_per_week(),
        if overweight {
            "Compound lifts + 20min cardio"
        } else {
            "Progressive overload + high protein intake"
        },
        metrics.weight_kg,
    )
}

fn diet_plan(user: &UserAccount, metrics: &BodyMetrics) -> String {
    let protein_grams = (metrics.weight_kg * 1.6).round() as i64;
    let tracks_water = user
        .habits
        .iter()
        .any(|habit| habit.name.to_lowercase().contains("water"));

    let mut plan = format!(
        "[DIET PLAN]\n\
         Target: {} kCal/day.\n\
         Protein: {}g daily (calculated for your {}kg body weight).\n\
         Carbs: {}.",
        metrics.calories.round() as i64,
        protein_grams,
        metrics.weight_kg,
        if metrics.bmi > 25.0 {
            "keep carbs low (brown rice/oats)"
        } else {
            "moderate carbs for energy"
        },
    );
    if !tracks_water {
        plan.push_str("\nWarning: you aren't tracking 'Water'. Add it to your habits!");
    }
    plan
}

fn habit_reply(user: &UserAccount, locale: Locale, today: NaiveDate) -> String {
    let strings = locale.strings();
    if user.habits.is_empty() {
        return strings.no_habits.to_string();
    }
    if month_to_date_consistency(user, today) < 50.0 {
        strings.low_consistency.to_string()
    } else {
        strings.high_consistency.to_string()
    }
}

fn weekly_reply(user: &UserAccount, locale: Locale, today: NaiveDate) -> String {
    let strings = locale.strings();
    if user.habits.is_empty() {
        return strings.no_habits.to_string();
    }

    let week_index = ((today.day() - 1) / 7) as usize;
    let percent = weekly_efficiency(user, today.year(), today.month())
        .get(week_index)
        .map_or(0.0, |point| point.percent);

    let verdict = if percent < 50.0 {
        strings.low_consistency
    } else {
        strings.high_consistency
    };
    format!("{verdict} This week: {percent:.0}%.")
}

/// Plain-text health report for the external PDF packager: metrics
/// snapshot, habit list with streaks, consistency, and both plans.
pub fn build_report(user: &UserAccount, today: NaiveDate) -> String {
    let mut report = format!("HABIT BUDDY HEALTH REPORT\nDate: {today}\n\n");

    if let Some(metrics) = &user.metrics {
        report.push_str(&format!(
            "[METRICS]\nWeight: {}kg | BMI: {:.1} ({})\nDaily goal: {} kCal\n\n",
            metrics.weight_kg,
            metrics.bmi,
            metrics.category,
            metrics.calories.round() as i64,
        ));
    }

    report.push_str("[HABITS]\n");
    for habit in &user.habits {
        report.push_str(&format!(
            "- {} (streak: {} days)\n",
            habit.name,
            streak(user, habit.id, today)
        ));
    }
    report.push_str(&format!(
        "\nConsistency this month: {:.0}%\n",
        month_to_date_consistency(user, today)
    ));

    let strings = Locale::En.strings();
    let diet = user
        .metrics
        .as_ref()
        .map_or_else(|| strings.body_missing.to_string(), |m| diet_plan(user, m));
    let workout = user
        .metrics
        .as_ref()
        .map_or_else(|| strings.body_missing.to_string(), workout_plan);
    report.push_str(&format!("\n[TRAINER ADVICE]\n{diet}\n\n{workout}\n"));
    report
}
