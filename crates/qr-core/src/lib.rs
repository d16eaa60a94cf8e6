//! # QR Core
//!
//! (Q,R) 庫存策略的核心資料模型與類型定義

pub mod config;
pub mod form;
pub mod inputs;
pub mod result;

// Re-export 主要類型
pub use config::{OrderRounding, SolverConfig};
pub use form::PolicyForm;
pub use inputs::{DemandAggregates, PolicyInputs, ServiceLevelType};
pub use result::{CostBreakdown, PolicyResult};

/// 策略計算錯誤類型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QrError {
    #[error("輸入錯誤: {0}")]
    Input(#[from] InputError),

    #[error("數學定義域錯誤: {0}")]
    Domain(#[from] DomainError),

    #[error("Type 2 迭代未收斂：{iterations} 次後 |ΔQ|={delta_q:.6}, |ΔR|={delta_r:.6}")]
    NonConvergence {
        iterations: usize,
        delta_q: f64,
        delta_r: f64,
    },

    #[error("無效的求解器配置: {0}")]
    InvalidConfig(String),
}

impl QrError {
    pub fn is_input(&self) -> bool {
        matches!(self, QrError::Input(_))
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, QrError::Domain(_))
    }

    pub fn is_non_convergence(&self) -> bool {
        matches!(self, QrError::NonConvergence { .. })
    }
}

/// 輸入欄位錯誤（缺漏、無法解析或超出範圍）
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} 不可為空")]
    EmptyField { field: &'static str },

    #[error("{field} 的輸入無效：{raw:?} 不是有效數字")]
    NotANumber { field: &'static str, raw: String },

    #[error("{field} 必須是有限數值，收到 {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} 超出範圍：{value}（{constraint}）")]
    OutOfRange {
        field: &'static str,
        value: f64,
        constraint: &'static str,
    },

    #[error("{field} 的輸入無效：{raw:?} 不是是/否值")]
    NotABoolean { field: &'static str, raw: String },

    #[error("未知的服務水準類型: {0:?}")]
    UnknownServiceLevelType(String),
}

/// 中間運算在給定輸入下沒有定義
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("持有成本必須為正，收到 {holding_cost}")]
    NonPositiveHoldingCost { holding_cost: f64 },

    #[error("常態分位數的機率必須在 (0, 1) 之間，收到 {p}")]
    QuantileOutOfDomain { p: f64 },

    #[error("前置期需求標準差為 0，無法計算 Type 2 策略")]
    ZeroLeadTimeStdDev,

    #[error("每週期期望缺貨量 {expected_shortage} 不小於前置期標準差 {std_dev}")]
    ShortageExceedsStdDev { expected_shortage: f64, std_dev: f64 },

    #[error("z = {z} 的尾端機率 {tail} 過小，無法計算損失比")]
    VanishingTail { z: f64, tail: f64 },

    #[error("{quantity} 計算結果非有限數值: {value}")]
    NonFiniteResult { quantity: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, QrError>;
