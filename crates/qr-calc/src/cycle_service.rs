//! Type 1 服務水準（週期不缺貨機率）
//!
//! 封閉解，不需迭代：
//! Q = round(sqrt(2KD/h))，z = Φ⁻¹(α)，R = μ_L + σ_L·z，n(R) = σ_L·(1 − Φ(z))

use qr_core::{DemandAggregates, DomainError, PolicyInputs, PolicyResult, SolverConfig};

use crate::cost::CostCalculator;
use crate::normal::NormalStats;

/// Type 1 策略計算器
pub struct CycleServiceSolver;

impl CycleServiceSolver {
    pub fn solve(
        inputs: &PolicyInputs,
        aggregates: &DemandAggregates,
        config: &SolverConfig,
    ) -> qr_core::Result<PolicyResult> {
        let z = NormalStats::quantile(inputs.service_level)?;

        if aggregates.holding_cost <= 0.0 {
            return Err(DomainError::NonPositiveHoldingCost {
                holding_cost: aggregates.holding_cost,
            }
            .into());
        }

        let eoq = aggregates.economic_order_quantity(inputs.ordering_cost);
        let order_quantity = config.order_rounding.apply(eoq);

        let sigma = aggregates.lead_time_std_dev;
        let reorder_point = aggregates.lead_time_demand + sigma * z;
        let safety_stock = reorder_point - aggregates.lead_time_demand;
        let expected_shortage = Self::expected_shortage(aggregates, reorder_point);

        let cost = CostCalculator::annual_cost(
            inputs,
            aggregates,
            order_quantity,
            reorder_point,
            expected_shortage,
        );

        tracing::debug!(
            "Type 1: EOQ {:.4} → Q {}, z {:.6}, R {:.4}, n(R) {:.6}",
            eoq,
            order_quantity,
            z,
            reorder_point,
            expected_shortage
        );

        Ok(PolicyResult {
            service_level_type: inputs.service_level_type,
            order_quantity,
            reorder_point,
            safety_stock,
            total_annual_cost: cost.total(),
            safety_factor: z,
            expected_shortage,
            aggregates: *aggregates,
            cost,
            iterations_used: None,
        })
    }

    /// 每週期期望缺貨量 n(R) = σ_L·(1 − Φ((R − μ_L)/σ_L))，σ_L = 0 時為 0
    pub fn expected_shortage(aggregates: &DemandAggregates, reorder_point: f64) -> f64 {
        let sigma = aggregates.lead_time_std_dev;
        if sigma == 0.0 {
            return 0.0;
        }
        sigma * NormalStats::survival((reorder_point - aggregates.lead_time_demand) / sigma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qr_core::{OrderRounding, QrError, ServiceLevelType};

    fn sample_inputs() -> PolicyInputs {
        PolicyInputs::new(10.0, 50.0, 0.20, 1.0, 100.0, 20.0, 0.95, ServiceLevelType::Type1)
            .with_penalty_cost(5.0)
    }

    fn solve(inputs: &PolicyInputs, config: &SolverConfig) -> qr_core::Result<PolicyResult> {
        CycleServiceSolver::solve(inputs, &inputs.aggregates(), config)
    }

    #[test]
    fn test_reference_scenario() {
        let result = solve(&sample_inputs(), &SolverConfig::default()).unwrap();

        assert_eq!(result.order_quantity, 245.0);
        assert!((result.safety_factor - 1.644_853_626_951_472).abs() < 1e-9);
        assert!((result.reorder_point - 132.897_072_539_029_4).abs() < 1e-7);
        assert!((result.safety_stock - 32.897_072_539_029_4).abs() < 1e-7);
        assert!((result.expected_shortage - 1.0).abs() < 1e-9);
        assert_eq!(result.iterations_used, None);

        let expected_cost = 50.0 * 1200.0 / 245.0 + 2.0 * (245.0 / 2.0 + result.safety_stock);
        assert!((result.total_annual_cost - expected_cost).abs() < 1e-9);
        assert!((result.total_annual_cost - 555.692_104_261_732).abs() < 1e-6);
    }

    #[test]
    fn test_backorder_penalty_added() {
        let inputs = sample_inputs().with_backorder(true);
        let result = solve(&inputs, &SolverConfig::default()).unwrap();

        // 5 × 1200 × 1.0 / 245
        assert!((result.cost.penalty - 24.489_795_918_367).abs() < 1e-6);
        assert!((result.total_annual_cost - 580.181_900_180_1).abs() < 1e-6);
    }

    #[test]
    fn test_continuous_rounding() {
        let config = SolverConfig::default().with_order_rounding(OrderRounding::Continuous);
        let result = solve(&sample_inputs(), &config).unwrap();

        assert!((result.order_quantity - 60_000f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_zero_std_dev_has_no_shortage() {
        let mut inputs = sample_inputs().with_backorder(true);
        inputs.monthly_demand_std_dev = 0.0;
        let result = solve(&inputs, &SolverConfig::default()).unwrap();

        assert_eq!(result.reorder_point, 100.0);
        assert_eq!(result.safety_stock, 0.0);
        assert_eq!(result.expected_shortage, 0.0);
        assert_eq!(result.cost.penalty, 0.0);
        assert!(result.total_annual_cost.is_finite());
    }

    #[test]
    fn test_service_level_below_half_gives_negative_safety_stock() {
        let inputs = sample_inputs().with_service_level(0.3);
        let result = solve(&inputs, &SolverConfig::default()).unwrap();

        assert!(result.safety_stock < 0.0);
        assert!(result.reorder_point < 100.0);
    }

    #[test]
    fn test_invalid_service_level() {
        let inputs = sample_inputs().with_service_level(1.5);
        assert_eq!(
            solve(&inputs, &SolverConfig::default()),
            Err(QrError::Domain(DomainError::QuantileOutOfDomain { p: 1.5 }))
        );
    }

    #[test]
    fn test_non_positive_holding_cost() {
        let mut inputs = sample_inputs();
        inputs.interest_rate_annual_fraction = 0.0;

        assert!(matches!(
            solve(&inputs, &SolverConfig::default()),
            Err(QrError::Domain(DomainError::NonPositiveHoldingCost { .. }))
        ));
    }
}
