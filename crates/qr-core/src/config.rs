//! 求解器配置

use serde::{Deserialize, Serialize};

use crate::QrError;

/// Type 2 迭代的預設收斂容差（與需求同單位的絕對值）
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Type 2 迭代的預設上限次數
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// 損失比計算允許的最小尾端機率 1 − Φ(z)
pub const DEFAULT_TAIL_FLOOR: f64 = 1e-12;

/// Type 1 訂購量的取整策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderRounding {
    /// 無條件進位（保守策略，永不少訂）
    #[default]
    Ceiling,

    /// 保留連續 EOQ
    Continuous,
}

impl OrderRounding {
    pub fn apply(self, quantity: f64) -> f64 {
        match self {
            OrderRounding::Ceiling => quantity.ceil(),
            OrderRounding::Continuous => quantity,
        }
    }
}

/// 策略求解器參數配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Type 2 收斂容差（絕對值，Q 與 R 同時適用）
    pub tolerance: f64,

    /// Type 2 最大迭代次數
    pub max_iterations: usize,

    /// Type 1 訂購量取整策略（Type 2 一律使用連續值）
    pub order_rounding: OrderRounding,

    /// 損失比分母 1 − Φ(z) 的下限
    pub tail_floor: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            order_rounding: OrderRounding::Ceiling,
            tail_floor: DEFAULT_TAIL_FLOOR,
        }
    }
}

impl SolverConfig {
    /// 建構器模式：設置收斂容差
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// 建構器模式：設置最大迭代次數
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// 建構器模式：設置 Type 1 取整策略
    pub fn with_order_rounding(mut self, order_rounding: OrderRounding) -> Self {
        self.order_rounding = order_rounding;
        self
    }

    /// 建構器模式：設置尾端機率下限
    pub fn with_tail_floor(mut self, tail_floor: f64) -> Self {
        self.tail_floor = tail_floor;
        self
    }

    /// 從 JSON 載入配置，未提供的欄位使用預設值
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let config: SolverConfig =
            serde_json::from_str(json).map_err(|e| QrError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 檢查配置
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(QrError::InvalidConfig(format!(
                "收斂容差必須為正的有限值，收到 {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(QrError::InvalidConfig("最大迭代次數必須至少為 1".to_string()));
        }
        if !(self.tail_floor.is_finite() && self.tail_floor > 0.0 && self.tail_floor < 1.0) {
            return Err(QrError::InvalidConfig(format!(
                "尾端機率下限必須在 (0, 1) 之間，收到 {}",
                self.tail_floor
            )));
        }
        Ok(())
    }
}
