//! 策略計算結果

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{DemandAggregates, ServiceLevelType};

/// (Q,R) 策略計算結果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyResult {
    /// 服務水準類型
    pub service_level_type: ServiceLevelType,

    /// 訂購量 Q
    pub order_quantity: f64,

    /// 再訂購點 R
    pub reorder_point: f64,

    /// 安全庫存 R − μ_L
    pub safety_stock: f64,

    /// 年總成本
    pub total_annual_cost: f64,

    /// 安全係數 z
    pub safety_factor: f64,

    /// 每週期期望缺貨量 n(R)
    pub expected_shortage: f64,

    /// 計算所用的彙總值
    pub aggregates: DemandAggregates,

    /// 成本組成
    pub cost: CostBreakdown,

    /// Type 2 迭代次數（Type 1 為 None）
    pub iterations_used: Option<usize>,
}

impl PolicyResult {
    /// 每年訂購次數 D / Q
    pub fn orders_per_year(&self) -> f64 {
        self.aggregates.annual_demand / self.order_quantity
    }
}

/// 年總成本組成
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// 訂購成本 K·D/Q
    pub ordering: f64,

    /// 持有成本 h·(Q/2 + R − μ_L)
    pub holding: f64,

    /// 缺貨成本 p·D·n(R)/Q（未啟用延期交貨時為 0）
    pub penalty: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.ordering + self.holding + self.penalty
    }
}

impl fmt::Display for PolicyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Optimal Order Quantity (Q): {:.2}", self.order_quantity)?;
        writeln!(f, "Reorder Point (R): {:.2}", self.reorder_point)?;
        writeln!(f, "Safety Stock: {:.2}", self.safety_stock)?;
        writeln!(f, "Total Cost: {:.2}", self.total_annual_cost)?;
        if let Some(iterations) = self.iterations_used {
            writeln!(f, "Number of Iterations: {}", iterations)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result(iterations_used: Option<usize>) -> PolicyResult {
        let cost = CostBreakdown {
            ordering: 244.898,
            holding: 310.7971,
            penalty: 0.0,
        };
        PolicyResult {
            service_level_type: ServiceLevelType::Type1,
            order_quantity: 245.0,
            reorder_point: 132.8971,
            safety_stock: 32.8971,
            total_annual_cost: cost.total(),
            safety_factor: 1.644854,
            expected_shortage: 1.0,
            aggregates: DemandAggregates {
                holding_cost: 2.0,
                lead_time_demand: 100.0,
                annual_demand: 1200.0,
                lead_time_std_dev: 20.0,
            },
            cost,
            iterations_used,
        }
    }

    #[test]
    fn test_report_two_decimals() {
        let report = sample_result(None).to_string();

        assert_eq!(
            report,
            "Optimal Order Quantity (Q): 245.00\n\
             Reorder Point (R): 132.90\n\
             Safety Stock: 32.90\n\
             Total Cost: 555.70\n"
        );
    }

    #[test]
    fn test_report_includes_iterations_for_type2() {
        let report = sample_result(Some(4)).to_string();
        assert!(report.ends_with("Number of Iterations: 4\n"));
    }

    #[test]
    fn test_cost_breakdown_total() {
        let result = sample_result(None);
        assert!((result.cost.total() - result.total_annual_cost).abs() < 1e-12);
        assert!((result.orders_per_year() - 1200.0 / 245.0).abs() < 1e-12);
    }
}
