//! # Matcache Core
//!
//! 核心資料模型與類型定義

pub mod matrix;
pub mod options;

// Re-export 主要類型
pub use matrix::Matrix;
pub use options::{InvertOptions, PivotStrategy};

/// 矩陣錯誤類型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("矩陣為奇異矩陣，無法求逆")]
    Singular,

    #[error("矩陣不是方陣: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("數值運算溢位")]
    Overflow,

    #[error("第 {row} 列長度不一致: 預期 {expected}，實際 {actual}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("資料長度與形狀不符: 預期 {expected}，實際 {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("矩陣維度不相容: {left:?} x {right:?}")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("無效的求逆參數: {0}")]
    InvalidOptions(String),
}

impl MatrixError {
    /// 是否為求逆計算本身的失敗（奇異、非方陣、溢位）
    pub fn is_computation_failure(&self) -> bool {
        matches!(
            self,
            MatrixError::Singular | MatrixError::NotSquare { .. } | MatrixError::Overflow
        )
    }
}

pub type Result<T> = std::result::Result<T, MatrixError>;
