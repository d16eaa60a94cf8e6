//! 標準常態分佈
//!
//! Φ、1 − Φ 與 Φ⁻¹ 直接以 `statrs` 的 erfc / erfc⁻¹ 計算，尾端不做 `1 - cdf` 相減。
//! 分位數的機率必須落在開區間 (0, 1)，否則回傳 `DomainError::QuantileOutOfDomain`，
//! 不回傳 ±∞。

use std::f64::consts::SQRT_2;

use qr_core::DomainError;
use statrs::function::erf::{erfc, erfc_inv};

/// 標準常態分佈函數
pub struct NormalStats;

impl NormalStats {
    /// 累積分佈函數 Φ(x)
    pub fn cdf(x: f64) -> f64 {
        0.5 * erfc(-x / SQRT_2)
    }

    /// 存活函數 1 − Φ(x)
    pub fn survival(x: f64) -> f64 {
        0.5 * erfc(x / SQRT_2)
    }

    /// 分位數函數 Φ⁻¹(p)
    pub fn quantile(p: f64) -> Result<f64, DomainError> {
        Self::ensure_probability(p)?;
        Ok(-SQRT_2 * erfc_inv(2.0 * p))
    }

    /// 檢查 p 是否在 (0, 1) 之間
    pub fn ensure_probability(p: f64) -> Result<(), DomainError> {
        if p.is_finite() && p > 0.0 && p < 1.0 {
            Ok(())
        } else {
            Err(DomainError::QuantileOutOfDomain { p })
        }
    }
}
