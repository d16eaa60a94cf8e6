//! 年總成本

use qr_core::{CostBreakdown, DemandAggregates, PolicyInputs};

/// 年成本計算器
pub struct CostCalculator;

impl CostCalculator {
    /// K·D/Q + h·(Q/2 + R − μ_L) [+ p·D·n(R)/Q]
    ///
    /// 缺貨成本僅在啟用延期交貨時計入。
    pub fn annual_cost(
        inputs: &PolicyInputs,
        aggregates: &DemandAggregates,
        order_quantity: f64,
        reorder_point: f64,
        expected_shortage: f64,
    ) -> CostBreakdown {
        let annual_demand = aggregates.annual_demand;

        let ordering = inputs.ordering_cost * annual_demand / order_quantity;
        let holding = aggregates.holding_cost
            * (order_quantity / 2.0 + reorder_point - aggregates.lead_time_demand);
        let penalty = if inputs.backorder_enabled {
            inputs.penalty_cost * annual_demand * expected_shortage / order_quantity
        } else {
            0.0
        };

        CostBreakdown {
            ordering,
            holding,
            penalty,
        }
    }
}
