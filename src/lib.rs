//! # QR Policy
//!
//! 連續盤點 (Q,R) 庫存策略：常態前置期需求下的訂購量、再訂購點、安全庫存與年總成本

pub use qr_calc::{
    solve, Convergence, CostCalculator, CycleServiceSolver, FillRateIteration, FillRateSolver,
    IterationState, NormalStats, PolicySolver,
};
pub use qr_core::{
    CostBreakdown, DemandAggregates, DomainError, InputError, OrderRounding, PolicyForm,
    PolicyInputs, PolicyResult, QrError, Result, ServiceLevelType, SolverConfig,
};
