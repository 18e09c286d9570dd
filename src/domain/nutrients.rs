use serde::{Deserialize, Serialize};
use std::fmt;

/// 單一品項或合計的營養素紀錄
///
/// 每個欄位都是 `Option<f64>`：`None` 表示「沒有資料」，與 `Some(0.0)` 意義不同。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub energy_kcal: Option<f64>,
    pub protein_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub salt_g: Option<f64>,
    pub calcium_mg: Option<f64>,
    pub vegetables_g: Option<f64>,
    pub iron_mg: Option<f64>,
    #[serde(rename = "vitaminA_ugRAE")]
    pub vitamin_a_ug_rae: Option<f64>,
    #[serde(rename = "vitaminB1_mg")]
    pub vitamin_b1_mg: Option<f64>,
    #[serde(rename = "vitaminB2_mg")]
    pub vitamin_b2_mg: Option<f64>,
    #[serde(rename = "vitaminC_mg")]
    pub vitamin_c_mg: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutrientField {
    EnergyKcal,
    ProteinG,
    FatG,
    CarbsG,
    SaltG,
    CalciumMg,
    VegetablesG,
    IronMg,
    VitaminAUgRae,
    VitaminB1Mg,
    VitaminB2Mg,
    VitaminCMg,
}

impl NutrientField {
    /// 顯示與 CSV 欄位共用的順序
    pub const ALL: [NutrientField; 12] = [
        NutrientField::EnergyKcal,
        NutrientField::ProteinG,
        NutrientField::FatG,
        NutrientField::CarbsG,
        NutrientField::SaltG,
        NutrientField::CalciumMg,
        NutrientField::VegetablesG,
        NutrientField::IronMg,
        NutrientField::VitaminAUgRae,
        NutrientField::VitaminB1Mg,
        NutrientField::VitaminB2Mg,
        NutrientField::VitaminCMg,
    ];

    /// CSV 欄位名稱
    pub fn column(self) -> &'static str {
        match self {
            NutrientField::EnergyKcal => "energy_kcal",
            NutrientField::ProteinG => "protein_g",
            NutrientField::FatG => "fat_g",
            NutrientField::CarbsG => "carbs_g",
            NutrientField::SaltG => "salt_g",
            NutrientField::CalciumMg => "calcium_mg",
            NutrientField::VegetablesG => "vegetables_g",
            NutrientField::IronMg => "iron_mg",
            NutrientField::VitaminAUgRae => "vitaminA_ugRAE",
            NutrientField::VitaminB1Mg => "vitaminB1_mg",
            NutrientField::VitaminB2Mg => "vitaminB2_mg",
            NutrientField::VitaminCMg => "vitaminC_mg",
        }
    }
}

impl fmt::Display for NutrientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl Nutrients {
    /// 只含熱量的紀錄
    pub fn with_energy(energy_kcal: f64) -> Self {
        Self {
            energy_kcal: Some(energy_kcal),
            ..Self::default()
        }
    }

    pub fn get(&self, field: NutrientField) -> Option<f64> {
        match field {
            NutrientField::EnergyKcal => self.energy_kcal,
            NutrientField::ProteinG => self.protein_g,
            NutrientField::FatG => self.fat_g,
            NutrientField::CarbsG => self.carbs_g,
            NutrientField::SaltG => self.salt_g,
            NutrientField::CalciumMg => self.calcium_mg,
            NutrientField::VegetablesG => self.vegetables_g,
            NutrientField::IronMg => self.iron_mg,
            NutrientField::VitaminAUgRae => self.vitamin_a_ug_rae,
            NutrientField::VitaminB1Mg => self.vitamin_b1_mg,
            NutrientField::VitaminB2Mg => self.vitamin_b2_mg,
            NutrientField::VitaminCMg => self.vitamin_c_mg,
        }
    }

    pub fn slot_mut(&mut self, field: NutrientField) -> &mut Option<f64> {
        match field {
            NutrientField::EnergyKcal => &mut self.energy_kcal,
            NutrientField::ProteinG => &mut self.protein_g,
            NutrientField::FatG => &mut self.fat_g,
            NutrientField::CarbsG => &mut self.carbs_g,
            NutrientField::SaltG => &mut self.salt_g,
            NutrientField::CalciumMg => &mut self.calcium_mg,
            NutrientField::VegetablesG => &mut self.vegetables_g,
            NutrientField::IronMg => &mut self.iron_mg,
            NutrientField::VitaminAUgRae => &mut self.vitamin_a_ug_rae,
            NutrientField::VitaminB1Mg => &mut self.vitamin_b1_mg,
            NutrientField::VitaminB2Mg => &mut self.vitamin_b2_mg,
            NutrientField::VitaminCMg => &mut self.vitamin_c_mg,
        }
    }

    /// 逐欄位合併 `other`
    ///
    /// `other` 缺值的欄位完全不動；有值時目前值（缺值視為 0）加上來源值。
    pub fn add_inplace(&mut self, other: &Nutrients) {
        for field in NutrientField::ALL {
            if let Some(value) = other.get(field) {
                let slot = self.slot_mut(field);
                *slot = Some(slot.unwrap_or(0.0) + value);
            }
        }
    }

    /// 乘上份數，缺值保持缺值
    pub fn scaled(&self, factor: f64) -> Nutrients {
        let mut result = Nutrients::default();
        for field in NutrientField::ALL {
            *result.slot_mut(field) = self.get(field).map(|v| v * factor);
        }
        result
    }

    pub fn is_empty(&self) -> bool {
        NutrientField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}
