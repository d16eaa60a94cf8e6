//! 策略輸入模型

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::InputError;

/// 每年月數（年需求 = 月需求 × 12）
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// 服務水準類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceLevelType {
    /// Type 1：每個補貨週期不缺貨的機率
    Type1,
    /// Type 2：由現有庫存直接滿足的需求比例（滿足率）
    Type2,
}

impl fmt::Display for ServiceLevelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceLevelType::Type1 => write!(f, "Type 1"),
            ServiceLevelType::Type2 => write!(f, "Type 2"),
        }
    }
}

impl FromStr for ServiceLevelType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "type1" | "1" => Ok(ServiceLevelType::Type1),
            "type2" | "2" => Ok(ServiceLevelType::Type2),
            _ => Err(InputError::UnknownServiceLevelType(s.to_string())),
        }
    }
}

/// 單一品項的 (Q,R) 策略輸入
///
/// 所有欄位在建構後不再變動；`validate` 會重新檢查每個欄位是否為有限值且在允許範圍內。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyInputs {
    /// 單位成本
    pub unit_cost: f64,

    /// 每次訂購成本
    pub ordering_cost: f64,

    /// 每單位缺貨（延期交貨）成本，僅在啟用延期交貨時計入
    pub penalty_cost: f64,

    /// 年利率（小數，例如 0.20 代表 20%）
    pub interest_rate_annual_fraction: f64,

    /// 前置期（月）
    pub lead_time_months: f64,

    /// 月需求平均值
    pub monthly_demand_mean: f64,

    /// 月需求標準差
    pub monthly_demand_std_dev: f64,

    /// 服務水準，意義取決於 `service_level_type`
    pub service_level: f64,

    /// 服務水準類型
    pub service_level_type: ServiceLevelType,

    /// 是否啟用延期交貨成本
    pub backorder_enabled: bool,
}

impl PolicyInputs {
    /// 創建新的策略輸入（預設無延期交貨、缺貨成本為 0）
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        unit_cost: f64,
        ordering_cost: f64,
        interest_rate_annual_fraction: f64,
        lead_time_months: f64,
        monthly_demand_mean: f64,
        monthly_demand_std_dev: f64,
        service_level: f64,
        service_level_type: ServiceLevelType,
    ) -> Self {
        Self {
            unit_cost,
            ordering_cost,
            penalty_cost: 0.0,
            interest_rate_annual_fraction,
            lead_time_months,
            monthly_demand_mean,
            monthly_demand_std_dev,
            service_level,
            service_level_type,
            backorder_enabled: false,
        }
    }

    /// 建構器模式：設置缺貨成本
    pub fn with_penalty_cost(mut self, penalty_cost: f64) -> Self {
        self.penalty_cost = penalty_cost;
        self
    }

    /// 建構器模式：設置是否啟用延期交貨
    pub fn with_backorder(mut self, enabled: bool) -> Self {
        self.backorder_enabled = enabled;
        self
    }

    /// 建構器模式：設置服務水準類型
    pub fn with_service_level_type(mut self, service_level_type: ServiceLevelType) -> Self {
        self.service_level_type = service_level_type;
        self
    }

    /// 建構器模式：設置服務水準
    pub fn with_service_level(mut self, service_level: f64) -> Self {
        self.service_level = service_level;
        self
    }

    /// 檢查所有欄位
    ///
    /// 服務水準落在 (0, 1) 之外屬於分位數的定義域問題，留給求解器回報 `DomainError`。
    pub fn validate(&self) -> Result<(), InputError> {
        let fields = [
            ("unit_cost", self.unit_cost),
            ("ordering_cost", self.ordering_cost),
            ("penalty_cost", self.penalty_cost),
            ("interest_rate_annual_fraction", self.interest_rate_annual_fraction),
            ("lead_time_months", self.lead_time_months),
            ("monthly_demand_mean", self.monthly_demand_mean),
            ("monthly_demand_std_dev", self.monthly_demand_std_dev),
            ("service_level", self.service_level),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(InputError::NonFinite { field, value });
            }
        }

        require_positive("unit_cost", self.unit_cost)?;
        require_positive("ordering_cost", self.ordering_cost)?;
        require_non_negative("penalty_cost", self.penalty_cost)?;
        require_positive(
            "interest_rate_annual_fraction",
            self.interest_rate_annual_fraction,
        )?;
        require_positive("lead_time_months", self.lead_time_months)?;
        require_positive("monthly_demand_mean", self.monthly_demand_mean)?;
        require_non_negative("monthly_demand_std_dev", self.monthly_demand_std_dev)?;

        Ok(())
    }

    /// 計算衍生彙總值
    pub fn aggregates(&self) -> DemandAggregates {
        DemandAggregates {
            holding_cost: self.unit_cost * self.interest_rate_annual_fraction,
            lead_time_demand: self.monthly_demand_mean * self.lead_time_months,
            annual_demand: self.monthly_demand_mean * MONTHS_PER_YEAR,
            lead_time_std_dev: self.monthly_demand_std_dev * self.lead_time_months.sqrt(),
        }
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), InputError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            value,
            constraint: "必須 > 0",
        })
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            value,
            constraint: "必須 >= 0",
        })
    }
}

/// 由輸入推導的彙總值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandAggregates {
    /// 年持有成本 h = 單位成本 × 年利率
    pub holding_cost: f64,

    /// 前置期需求 μ_L
    pub lead_time_demand: f64,

    /// 年需求 D
    pub annual_demand: f64,

    /// 前置期需求標準差 σ_L
    pub lead_time_std_dev: f64,
}

impl DemandAggregates {
    /// 連續（未取整）經濟訂購量 sqrt(2KD/h)
    pub fn economic_order_quantity(&self, ordering_cost: f64) -> f64 {
        (2.0 * ordering_cost * self.annual_demand / self.holding_cost).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_inputs() -> PolicyInputs {
        PolicyInputs::new(10.0, 50.0, 0.20, 1.0, 100.0, 20.0, 0.95, ServiceLevelType::Type1)
            .with_penalty_cost(5.0)
    }

    #[test]
    fn test_aggregates() {
        let agg = sample_inputs().aggregates();

        assert!((agg.holding_cost - 2.0).abs() < 1e-12);
        assert!((agg.lead_time_demand - 100.0).abs() < 1e-12);
        assert!((agg.annual_demand - 1200.0).abs() < 1e-12);
        assert!((agg.lead_time_std_dev - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_lead_time_std_dev_scales_with_sqrt() {
        let mut inputs = sample_inputs();
        inputs.lead_time_months = 4.0;
        let agg = inputs.aggregates();

        assert!((agg.lead_time_std_dev - 40.0).abs() < 1e-12);
        assert!((agg.lead_time_demand - 400.0).abs() < 1e-12);
        // 年需求與前置期無關
        assert!((agg.annual_demand - 1200.0).abs() < 1e-12);
    }

    #[test]
    fn test_economic_order_quantity() {
        let agg = sample_inputs().aggregates();
        let eoq = agg.economic_order_quantity(50.0);
        assert!((eoq - 60_000f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_builder() {
        let inputs = sample_inputs()
            .with_backorder(true)
            .with_service_level_type(ServiceLevelType::Type2)
            .with_service_level(0.99);

        assert!(inputs.backorder_enabled);
        assert_eq!(inputs.service_level_type, ServiceLevelType::Type2);
        assert_eq!(inputs.service_level, 0.99);
        assert_eq!(inputs.penalty_cost, 5.0);
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample_inputs().validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_zero_std_dev() {
        let mut inputs = sample_inputs();
        inputs.monthly_demand_std_dev = 0.0;
        assert!(inputs.validate().is_ok());
    }

    #[rstest]
    #[case::unit_cost("unit_cost", |i: &mut PolicyInputs| i.unit_cost = 0.0)]
    #[case::ordering_cost("ordering_cost", |i: &mut PolicyInputs| i.ordering_cost = -1.0)]
    #[case::penalty_cost("penalty_cost", |i: &mut PolicyInputs| i.penalty_cost = -0.5)]
    #[case::interest_rate("interest_rate_annual_fraction", |i: &mut PolicyInputs| i.interest_rate_annual_fraction = 0.0)]
    #[case::lead_time("lead_time_months", |i: &mut PolicyInputs| i.lead_time_months = 0.0)]
    #[case::demand_mean("monthly_demand_mean", |i: &mut PolicyInputs| i.monthly_demand_mean = -10.0)]
    #[case::demand_std_dev("monthly_demand_std_dev", |i: &mut PolicyInputs| i.monthly_demand_std_dev = -1.0)]
    fn test_validate_rejects_out_of_range(
        #[case] expected_field: &str,
        #[case] mutate: fn(&mut PolicyInputs),
    ) {
        let mut inputs = sample_inputs();
        mutate(&mut inputs);

        match inputs.validate() {
            Err(InputError::OutOfRange { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("預期 OutOfRange，收到 {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut inputs = sample_inputs();
        inputs.monthly_demand_mean = f64::NAN;
        assert!(matches!(
            inputs.validate(),
            Err(InputError::NonFinite { field: "monthly_demand_mean", .. })
        ));

        let mut inputs = sample_inputs();
        inputs.service_level = f64::INFINITY;
        assert!(matches!(
            inputs.validate(),
            Err(InputError::NonFinite { field: "service_level", .. })
        ));
    }

    #[rstest]
    #[case("Type 1", ServiceLevelType::Type1)]
    #[case("type1", ServiceLevelType::Type1)]
    #[case("1", ServiceLevelType::Type1)]
    #[case("TYPE 2", ServiceLevelType::Type2)]
    #[case(" Type2 ", ServiceLevelType::Type2)]
    #[case("2", ServiceLevelType::Type2)]
    fn test_parse_service_level_type(#[case] raw: &str, #[case] expected: ServiceLevelType) {
        assert_eq!(raw.parse::<ServiceLevelType>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_service_level_type() {
        assert_eq!(
            "Type 3".parse::<ServiceLevelType>(),
            Err(InputError::UnknownServiceLevelType("Type 3".to_string()))
        );
    }

    #[test]
    fn test_service_level_type_display_round_trips() {
        for t in [ServiceLevelType::Type1, ServiceLevelType::Type2] {
            assert_eq!(t.to_string().parse::<ServiceLevelType>().unwrap(), t);
        }
    }
}
