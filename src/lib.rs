//! # Matcache
//!
//! 惰性求逆矩陣快取：僅在第一次請求時計算逆矩陣，來源矩陣被替換後才重新計算。
//!
//! ```
//! use matcache::{InverseCache, InvertOptions, Matrix};
//!
//! let mut cache = InverseCache::new(Matrix::from_rows(vec![vec![4, 7], vec![2, 6]]).unwrap());
//! let options = InvertOptions::default();
//!
//! let inverse = cache.inverse(&options).unwrap().clone();
//! assert_eq!(inverse.get(0, 0), Some("0.6".parse().unwrap()));
//! assert_eq!(cache.computation_count(), 1);
//!
//! cache.inverse(&options).unwrap();
//! assert_eq!(cache.computation_count(), 1);
//! ```

pub use matcache_cache::{
    make_random_matrix, make_random_matrix_seeded, random_matrix, run_self_test, DimensionReport,
    InverseCache, SelfTestConfig, SelfTestError, SelfTestReport,
};
pub use matcache_calc::{identity_residual, invert, multiply, GaussJordan, Inverter};
pub use matcache_core::{InvertOptions, Matrix, MatrixError, PivotStrategy, Result};

pub use rust_decimal::Decimal;
