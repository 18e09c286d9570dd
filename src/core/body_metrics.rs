//! 身體指標計算：BMI、每日消耗熱量（TDEE）與三大營養素目標。
//!
//! BMR 採 Mifflin-St Jeor 公式：
//! `10 × 體重(kg) + 6.25 × 身高(cm) − 5 × 年齡 + 5`（男性），女性常數為 `−161`。
//! TDEE = BMR × 活動係數（見 [`ActivityLevel::factor`](crate::domain::person::ActivityLevel::factor)）。

use crate::domain::person::{BmiClass, MacroTargets, Person, Sex};
use crate::utils::error::{MenuError, Result};
use serde::{Deserialize, Serialize};

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// 營養素目標的可調參數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSettings {
    /// 每公斤體重的蛋白質克數
    pub protein_g_per_kg: f64,
    /// 脂質佔總熱量的比例
    pub fat_ratio: f64,
}

impl Default for MacroSettings {
    fn default() -> Self {
        Self {
            protein_g_per_kg: 1.2,
            fat_ratio: 0.25,
        }
    }
}

pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Result<f64> {
    let height_m = height_cm / 100.0;
    if height_m <= 0.0 || !height_m.is_finite() {
        return Err(MenuError::ValidationError {
            message: format!("height_cm must be > 0, got {}", height_cm),
        });
    }
    Ok(weight_kg / (height_m * height_m))
}

pub fn classify_bmi(bmi: f64) -> BmiClass {
    if bmi < 18.5 {
        BmiClass::Underweight
    } else if bmi < 25.0 {
        BmiClass::Normal
    } else if bmi < 30.0 {
        BmiClass::PreObese
    } else {
        BmiClass::Obese
    }
}

pub fn calculate_bmr(person: &Person) -> f64 {
    let sex_constant = match person.sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    10.0 * person.weight_kg + 6.25 * person.height_cm - 5.0 * f64::from(person.age_years)
        + sex_constant
}

pub fn estimate_tdee_kcal(person: &Person) -> f64 {
    calculate_bmr(person) * person.activity_level.factor()
}

/// 蛋白質依體重、脂質依比例，剩下的熱量分給碳水化合物（不低於 0）
pub fn compute_macro_targets(person: &Person, settings: &MacroSettings) -> MacroTargets {
    let kcal = estimate_tdee_kcal(person);
    let protein_g = person.weight_kg * settings.protein_g_per_kg;
    let protein_kcal = protein_g * KCAL_PER_G_PROTEIN;
    let fat_kcal = kcal * settings.fat_ratio;
    let carbs_kcal = (kcal - protein_kcal - fat_kcal).max(0.0);

    MacroTargets {
        energy_kcal: kcal,
        protein_g,
        fat_g: fat_kcal / KCAL_PER_G_FAT,
        carbs_g: carbs_kcal / KCAL_PER_G_CARBS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::person::ActivityLevel;

    fn person(sex: Sex, activity_level: ActivityLevel) -> Person {
        Person {
            age_years: 20,
            sex,
            height_cm: 170.0,
            weight_kg: 60.0,
            activity_level,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_bmi() {
        let bmi = calculate_bmi(72.25, 170.0).unwrap();
        assert!(approx(bmi, 25.0));
    }

    #[test]
    fn test_bmi_rejects_non_positive_height() {
        assert!(matches!(
            calculate_bmi(60.0, 0.0),
            Err(MenuError::ValidationError { .. })
        ));
        assert!(calculate_bmi(60.0, -170.0).is_err());
    }

    #[test]
    fn test_classify_bmi_boundaries() {
        assert_eq!(classify_bmi(18.4), BmiClass::Underweight);
        assert_eq!(classify_bmi(18.5), BmiClass::Normal);
        assert_eq!(classify_bmi(25.0), BmiClass::PreObese);
        assert_eq!(classify_bmi(30.0), BmiClass::Obese);
    }

    #[test]
    fn test_tdee_male_and_female() {
        // 600 + 1062.5 - 100 + 5
        let male = person(Sex::Male, ActivityLevel::Sedentary);
        assert!(approx(calculate_bmr(&male), 1567.5));
        assert!(approx(estimate_tdee_kcal(&male), 1567.5 * 1.2));

        let female = person(Sex::Female, ActivityLevel::Moderate);
        assert!(approx(calculate_bmr(&female), 1401.5));
        assert!(approx(estimate_tdee_kcal(&female), 1401.5 * 1.55));
    }

    #[test]
    fn test_macro_targets_defaults() {
        let male = person(Sex::Male, ActivityLevel::Sedentary);
        let targets = compute_macro_targets(&male, &MacroSettings::default());
        let kcal = 1567.5 * 1.2;

        assert!(approx(targets.energy_kcal, kcal));
        assert!(approx(targets.protein_g, 72.0));
        assert!(approx(targets.fat_g, kcal * 0.25 / 9.0));
        assert!(approx(targets.carbs_g, (kcal - 288.0 - kcal * 0.25) / 4.0));
    }

    #[test]
    fn test_macro_carbs_never_negative() {
        let male = person(Sex::Male, ActivityLevel::Sedentary);
        let settings = MacroSettings {
            protein_g_per_kg: 10.0,
            fat_ratio: 0.9,
        };
        let targets = compute_macro_targets(&male, &settings);
        assert_eq!(targets.carbs_g, 0.0);
    }
}
