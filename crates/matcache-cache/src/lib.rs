//! # Matcache Cache
//!
//! 逆矩陣快取與自我測試

pub mod container;
pub mod fixtures;
pub mod harness;

// Re-export 主要類型
pub use container::InverseCache;
pub use fixtures::{make_random_matrix, make_random_matrix_seeded, random_matrix};
pub use harness::{run_self_test, DimensionReport, SelfTestConfig, SelfTestError, SelfTestReport};
