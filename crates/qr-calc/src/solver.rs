//! 策略求解主入口

use qr_core::{DomainError, PolicyInputs, PolicyResult, ServiceLevelType, SolverConfig};
use rayon::prelude::*;

use crate::cycle_service::CycleServiceSolver;
use crate::fill_rate::FillRateSolver;
use crate::normal::NormalStats;

/// (Q,R) 策略求解器
#[derive(Debug, Clone, Default)]
pub struct PolicySolver {
    config: SolverConfig,
}

impl PolicySolver {
    /// 創建新的求解器（配置會先經過檢查）
    pub fn new(config: SolverConfig) -> qr_core::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 計算單一品項的策略
    pub fn solve(&self, inputs: &PolicyInputs) -> qr_core::Result<PolicyResult> {
        tracing::info!(
            "開始計算 {} 策略：服務水準 {}，延期交貨 {}",
            inputs.service_level_type,
            inputs.service_level,
            inputs.backorder_enabled
        );

        inputs.validate()?;
        // 服務水準不在 (0, 1) 時，在任何運算之前拒絕
        NormalStats::ensure_probability(inputs.service_level)?;

        let aggregates = inputs.aggregates();
        tracing::debug!(
            "h {:.4}, μ_L {:.4}, D {:.4}, σ_L {:.4}",
            aggregates.holding_cost,
            aggregates.lead_time_demand,
            aggregates.annual_demand,
            aggregates.lead_time_std_dev
        );

        let outcome = match inputs.service_level_type {
            ServiceLevelType::Type1 => CycleServiceSolver::solve(inputs, &aggregates, &self.config),
            ServiceLevelType::Type2 => FillRateSolver::solve(inputs, &aggregates, &self.config),
        };

        let result = outcome
            .and_then(|result| {
                Self::ensure_finite(&result)?;
                Ok(result)
            })
            .map_err(|e| {
                tracing::warn!("策略計算失敗: {}", e);
                e
            })?;

        tracing::info!(
            "計算完成：Q {:.2}, R {:.2}, 安全庫存 {:.2}, 年總成本 {:.2}",
            result.order_quantity,
            result.reorder_point,
            result.safety_stock,
            result.total_annual_cost
        );

        Ok(result)
    }

    /// 平行計算多個獨立品項，結果順序與輸入一致
    pub fn solve_batch(&self, batch: &[PolicyInputs]) -> Vec<qr_core::Result<PolicyResult>> {
        tracing::info!("批次計算 {} 個品項", batch.len());
        batch.par_iter().map(|inputs| self.solve(inputs)).collect()
    }

    fn ensure_finite(result: &PolicyResult) -> Result<(), DomainError> {
        let values = [
            ("order_quantity", result.order_quantity),
            ("reorder_point", result.reorder_point),
            ("safety_stock", result.safety_stock),
            ("total_annual_cost", result.total_annual_cost),
        ];
        for (quantity, value) in values {
            if !value.is_finite() {
                return Err(DomainError::NonFiniteResult { quantity, value });
            }
        }
        Ok(())
    }
}

/// 使用預設配置計算策略
pub fn solve(inputs: &PolicyInputs) -> qr_core::Result<PolicyResult> {
    PolicySolver::default().solve(inputs)
}
