//! Type 2 服務水準（滿足率）
//!
//! Q 與 R 互相影響，以不動點迭代聯合求解：
//!
//! 1. Q₀ = sqrt(2KD/h)（連續值，不取整）
//! 2. z₀ = Φ⁻¹(1 − (1 − β)·Q₀ / σ_L)，R₀ = μ_L + z₀·σ_L
//! 3. 每一步：
//!    - 損失比 λ = (1 − β)·Q_prev / (1 − Φ(z_prev))
//!    - Q_next = λ + sqrt(2DK/h + λ²)
//!    - z_next = Φ⁻¹(1 − (1 − β)·Q_next / σ_L)，R_next = μ_L + z_next·σ_L
//! 4. |ΔQ| 與 |ΔR| 同時小於絕對容差即收斂
//!
//! 迭代次數受 `SolverConfig::max_iterations` 限制，超過時回傳 `QrError::NonConvergence`。

use qr_core::{
    DemandAggregates, DomainError, PolicyInputs, PolicyResult, QrError, SolverConfig,
};

use crate::cost::CostCalculator;
use crate::normal::NormalStats;

/// 迭代狀態 (Q, R, z)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationState {
    pub order_quantity: f64,
    pub reorder_point: f64,
    pub safety_factor: f64,
}

/// 不動點迭代收斂結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convergence {
    pub state: IterationState,
    pub iterations: usize,
}

/// Type 2 不動點迭代
#[derive(Debug, Clone, Copy)]
pub struct FillRateIteration {
    /// 1 − β
    stockout_fraction: f64,
    ordering_cost: f64,
    aggregates: DemandAggregates,
    tail_floor: f64,
}

impl FillRateIteration {
    /// 建立迭代器，檢查 σ_L 與持有成本
    pub fn new(
        inputs: &PolicyInputs,
        aggregates: &DemandAggregates,
        config: &SolverConfig,
    ) -> Result<Self, DomainError> {
        NormalStats::ensure_probability(inputs.service_level)?;

        if aggregates.holding_cost <= 0.0 {
            return Err(DomainError::NonPositiveHoldingCost {
                holding_cost: aggregates.holding_cost,
            });
        }
        if aggregates.lead_time_std_dev <= 0.0 {
            return Err(DomainError::ZeroLeadTimeStdDev);
        }

        Ok(Self {
            stockout_fraction: 1.0 - inputs.service_level,
            ordering_cost: inputs.ordering_cost,
            aggregates: *aggregates,
            tail_floor: config.tail_floor,
        })
    }

    /// 起始點：連續 EOQ 及其對應的再訂購點
    pub fn initial_state(&self) -> Result<IterationState, DomainError> {
        let order_quantity = self.aggregates.economic_order_quantity(self.ordering_cost);
        self.state_for(order_quantity)
    }

    /// 單步更新 (Q_prev, z_prev) → (Q_next, R_next, z_next)
    pub fn step(&self, prev: &IterationState) -> Result<IterationState, DomainError> {
        let tail = NormalStats::survival(prev.safety_factor);
        if !(tail >= self.tail_floor) {
            return Err(DomainError::VanishingTail {
                z: prev.safety_factor,
                tail,
            });
        }

        let loss_ratio = self.expected_shortage(prev.order_quantity) / tail;
        let base = 2.0 * self.aggregates.annual_demand * self.ordering_cost
            / self.aggregates.holding_cost;
        let order_quantity = loss_ratio + (base + loss_ratio * loss_ratio).sqrt();

        self.state_for(order_quantity)
    }

    /// 迭代至收斂或達到上限
    pub fn run(&self, config: &SolverConfig) -> qr_core::Result<Convergence> {
        let mut state = self.initial_state()?;
        tracing::debug!(
            "Type 2 起始點: Q0 {:.4}, z0 {:.6}, R0 {:.4}",
            state.order_quantity,
            state.safety_factor,
            state.reorder_point
        );

        let mut delta_q = f64::INFINITY;
        let mut delta_r = f64::INFINITY;

        for iteration in 1..=config.max_iterations {
            let next = self.step(&state)?;
            delta_q = (next.order_quantity - state.order_quantity).abs();
            delta_r = (next.reorder_point - state.reorder_point).abs();

            tracing::debug!(
                "迭代 {}: Q {:.4}, R {:.4}, |ΔQ| {:.6}, |ΔR| {:.6}",
                iteration,
                next.order_quantity,
                next.reorder_point,
                delta_q,
                delta_r
            );

            if delta_q < config.tolerance && delta_r < config.tolerance {
                return Ok(Convergence {
                    state: next,
                    iterations: iteration,
                });
            }
            state = next;
        }

        tracing::debug!(
            "Type 2 迭代 {} 次後仍未收斂 (|ΔQ| {:.6}, |ΔR| {:.6})",
            config.max_iterations,
            delta_q,
            delta_r
        );
        Err(QrError::NonConvergence {
            iterations: config.max_iterations,
            delta_q,
            delta_r,
        })
    }

    /// 給定 Q 時的期望缺貨量 n = (1 − β)·Q
    pub fn expected_shortage(&self, order_quantity: f64) -> f64 {
        self.stockout_fraction * order_quantity
    }

    /// z = Φ⁻¹(1 − n/σ_L)，R = μ_L + z·σ_L；要求 n < σ_L
    fn state_for(&self, order_quantity: f64) -> Result<IterationState, DomainError> {
        let sigma = self.aggregates.lead_time_std_dev;
        let expected_shortage = self.expected_shortage(order_quantity);
        if !(expected_shortage < sigma) {
            return Err(DomainError::ShortageExceedsStdDev {
                expected_shortage,
                std_dev: sigma,
            });
        }

        let safety_factor = NormalStats::quantile(1.0 - expected_shortage / sigma)?;
        Ok(IterationState {
            order_quantity,
            reorder_point: self.aggregates.lead_time_demand + safety_factor * sigma,
            safety_factor,
        })
    }
}

/// Type 2 策略計算器
pub struct FillRateSolver;

impl FillRateSolver {
    pub fn solve(
        inputs: &PolicyInputs,
        aggregates: &DemandAggregates,
        config: &SolverConfig,
    ) -> qr_core::Result<PolicyResult> {
        let iteration = FillRateIteration::new(inputs, aggregates, config)?;
        let Convergence { state, iterations } = iteration.run(config)?;

        let expected_shortage = iteration.expected_shortage(state.order_quantity);
        let cost = CostCalculator::annual_cost(
            inputs,
            aggregates,
            state.order_quantity,
            state.reorder_point,
            expected_shortage,
        );

        Ok(PolicyResult {
            service_level_type: inputs.service_level_type,
            order_quantity: state.order_quantity,
            reorder_point: state.reorder_point,
            safety_stock: state.reorder_point - aggregates.lead_time_demand,
            total_annual_cost: cost.total(),
            safety_factor: state.safety_factor,
            expected_shortage,
            aggregates: *aggregates,
            cost,
            iterations_used: Some(iterations),
        })
    }
}
