//! # Matcache Calculation
//!
//! 矩陣求逆與驗算

pub mod inversion;
pub mod residual;

// Re-export 主要類型
pub use inversion::{invert, GaussJordan, Inverter};
pub use residual::{identity_residual, multiply};
