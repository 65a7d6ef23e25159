use crate::errors::AppError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Fixed activity multipliers for converting BMR to a daily calorie target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::VeryActive => 1.725,
        }
    }

    /// Suggested training days per week at this activity level.
    pub fn sessions_per_week(self) -> u32 {
        match self {
            Self::Sedentary => 3,
            Self::Light => 4,
            Self::Moderate => 5,
            Self::VeryActive => 6,
        }
    }
}

/// Cached anthropometric snapshot. Recomputed wholesale on every metrics
/// submission; no history is retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyMetrics {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: u32,
    pub sex: Sex,
    pub activity: ActivityLevel,
    pub bmi: f64,
    pub category: String,
    pub bmr: f64,
    pub calories: f64,
    pub body_fat_percent: f64,
}

#[derive(Debug, Deserialize)]
pub struct MetricsRequest {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: u32,
    pub sex: Sex,
    pub activity: ActivityLevel,
}

pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

/// Mifflin-St Jeor equation.
pub fn bmr(sex: Sex, weight_kg: f64, height_cm: f64, age: u32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

pub fn daily_calories(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.multiplier()
}

/// BMI-method body-fat estimate. Raw value; may be negative for lean
/// young adults and is clamped before display.
pub fn body_fat_percent(sex: Sex, bmi: f64, age: u32) -> f64 {
    let base = 1.20 * bmi + 0.23 * f64::from(age);
    match sex {
        Sex::Male => base - 16.2,
        Sex::Female => base - 5.4,
    }
}

/// Validates the inputs and computes a full snapshot. Non-positive or
/// non-finite height/weight and zero age are rejected rather than letting
/// NaN propagate into the stored record.
pub fn compute(request: &MetricsRequest) -> Result<BodyMetrics, AppError> {
    if !request.height_cm.is_finite() || request.height_cm <= 0.0 {
        return Err(AppError::bad_request("height must be a positive number"));
    }
    if !request.weight_kg.is_finite() || request.weight_kg <= 0.0 {
        return Err(AppError::bad_request("weight must be a positive number"));
    }
    if request.age == 0 {
        return Err(AppError::bad_request("age must be a positive number"));
    }

    let bmi_value = bmi(request.weight_kg, request.height_cm);
    let bmr_value = bmr(request.sex, request.weight_kg, request.height_cm, request.age);

    Ok(BodyMetrics {
        height_cm: request.height_cm,
        weight_kg: request.weight_kg,
        age: request.age,
        sex: request.sex,
        activity: request.activity,
        bmi: bmi_value,
        category: bmi_category(bmi_value).to_string(),
        bmr: bmr_value,
        calories: daily_calories(bmr_value, request.activity),
        body_fat_percent: body_fat_percent(request.sex, bmi_value, request.age).max(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(sex: Sex) -> MetricsRequest {
        MetricsRequest {
            height_cm: 175.0,
            weight_kg: 70.0,
            age: 30,
            sex,
            activity: ActivityLevel::Sedentary,
        }
    }

    #[test]
    fn bmi_of_reference_adult_is_normal() {
        let value = bmi(70.0, 175.0);
        assert!((value - 22.857).abs() < 0.01);
        assert_eq!(bmi_category(value), "Normal");
    }

    #[test]
    fn bmi_category_boundaries() {
        assert_eq!(bmi_category(18.4), "Underweight");
        assert_eq!(bmi_category(18.5), "Normal");
        assert_eq!(bmi_category(25.0), "Overweight");
        assert_eq!(bmi_category(30.0), "Obese");
    }

    #[test]
    fn bmr_matches_mifflin_st_jeor() {
        assert_eq!(bmr(Sex::Male, 70.0, 175.0, 30), 1648.75);
        assert_eq!(bmr(Sex::Female, 70.0, 175.0, 30), 1482.75);
    }

    #[test]
    fn calories_scale_with_activity() {
        let base = bmr(Sex::Male, 70.0, 175.0, 30);
        assert_eq!(daily_calories(base, ActivityLevel::Sedentary), base * 1.2);
        assert_eq!(daily_calories(base, ActivityLevel::VeryActive), base * 1.725);
    }

    #[test]
    fn body_fat_is_clamped_to_zero_in_snapshot() {
        // A very lean young male produces a negative raw estimate.
        let raw = body_fat_percent(Sex::Male, 13.0, 18);
        assert!(raw < 0.0);

        let snapshot = compute(&MetricsRequest {
            height_cm: 190.0,
            weight_kg: 47.0,
            age: 18,
            sex: Sex::Male,
            activity: ActivityLevel::Sedentary,
        })
        .unwrap();
        assert!(snapshot.body_fat_percent >= 0.0);
    }

    #[test]
    fn compute_rejects_invalid_inputs() {
        let mut bad = request(Sex::Male);
        bad.height_cm = 0.0;
        assert!(compute(&bad).is_err());

        let mut bad = request(Sex::Male);
        bad.weight_kg = -4.0;
        assert!(compute(&bad).is_err());

        let mut bad = request(Sex::Male);
        bad.height_cm = f64::NAN;
        assert!(compute(&bad).is_err());

        let mut bad = request(Sex::Male);
        bad.age = 0;
        assert!(compute(&bad).is_err());
    }

    #[test]
    fn compute_fills_snapshot() {
        let snapshot = compute(&request(Sex::Female)).unwrap();
        assert_eq!(snapshot.category, "Normal");
        assert_eq!(snapshot.bmr, 1482.75);
        assert_eq!(snapshot.calories, 1482.75 * 1.2);
    }
}
