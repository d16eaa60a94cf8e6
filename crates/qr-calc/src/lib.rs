//! # QR Calculation Engine
//!
//! 連續盤點 (Q,R) 策略計算引擎
//!
//! - Type 1（週期服務水準）：封閉解
//! - Type 2（滿足率）：Q 與 R 的不動點迭代

pub mod cost;
pub mod cycle_service;
pub mod fill_rate;
pub mod normal;
pub mod solver;

// Re-export 主要類型
pub use cost::CostCalculator;
pub use cycle_service::CycleServiceSolver;
pub use fill_rate::{Convergence, FillRateIteration, FillRateSolver, IterationState};
pub use normal::NormalStats;
pub use solver::{solve, PolicySolver};
