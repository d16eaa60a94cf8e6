//! 文字輸入表單
//!
//! 將使用者輸入的原始文字欄位轉為 [`PolicyInputs`]。利率以百分比輸入。

use serde::{Deserialize, Serialize};

use crate::{InputError, PolicyInputs, ServiceLevelType};

/// 原始文字表單
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyForm {
    pub unit_cost: String,
    pub ordering_cost: String,
    pub penalty_cost: String,
    /// 年利率（%）
    pub interest_rate_percent: String,
    pub lead_time_months: String,
    pub monthly_demand: String,
    pub monthly_std_dev: String,
    pub service_level: String,
    pub service_level_type: String,
    pub backorder: bool,
}

impl PolicyForm {
    /// 解析所有欄位並重新檢查數值範圍
    pub fn parse(&self) -> Result<PolicyInputs, InputError> {
        let inputs = PolicyInputs {
            unit_cost: parse_field("unit_cost", &self.unit_cost)?,
            ordering_cost: parse_field("ordering_cost", &self.ordering_cost)?,
            penalty_cost: parse_field("penalty_cost", &self.penalty_cost)?,
            interest_rate_annual_fraction: parse_field(
                "interest_rate_percent",
                &self.interest_rate_percent,
            )? / 100.0,
            lead_time_months: parse_field("lead_time_months", &self.lead_time_months)?,
            monthly_demand_mean: parse_field("monthly_demand", &self.monthly_demand)?,
            monthly_demand_std_dev: parse_field("monthly_std_dev", &self.monthly_std_dev)?,
            service_level: parse_field("service_level", &self.service_level)?,
            service_level_type: self.service_level_type.parse()?,
            backorder_enabled: self.backorder,
        };
        inputs.validate()?;
        Ok(inputs)
    }

    /// 解析是否延期交貨的文字輸入，無法辨識的值一律拒絕
    pub fn parse_backorder_flag(raw: &str) -> Result<bool, InputError> {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" | "1" | "是" => Ok(true),
            "n" | "no" | "false" | "0" | "否" => Ok(false),
            "" => Err(InputError::EmptyField { field: "backorder" }),
            _ => Err(InputError::NotABoolean {
                field: "backorder",
                raw: trimmed.to_string(),
            }),
        }
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyField { field });
    }
    trimmed.parse::<f64>().map_err(|_| InputError::NotANumber {
        field,
        raw: trimmed.to_string(),
    })
}
