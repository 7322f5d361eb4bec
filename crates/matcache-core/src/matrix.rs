//! 矩陣模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{MatrixError, Result};

/// 稠密矩陣（列優先儲存，元素為 Decimal）
///
/// 預設值為 0x0 空矩陣，作為尚未提供資料時的佔位值。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Decimal>>", into = "Vec<Vec<Decimal>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Decimal>,
}

impl Matrix {
    /// 創建 0x0 空矩陣
    pub fn empty() -> Self {
        Self::default()
    }

    /// 從逐列資料創建矩陣
    ///
    /// 所有列必須等長，否則回傳 [`MatrixError::RaggedRows`]。
    ///
    /// # 範例
    /// ```
    /// # use matcache_core::Matrix;
    /// let m = Matrix::from_rows(vec![vec![4, 7], vec![2, 6]]).unwrap();
    /// assert_eq!(m.dimensions(), (2, 2));
    /// ```
    pub fn from_rows<T: Into<Decimal>>(rows: Vec<Vec<T>>) -> Result<Self> {
        let row_count = rows.len();
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(row_count * cols);

        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::RaggedRows {
                    row: idx,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend(row.into_iter().map(Into::into));
        }

        Ok(Self {
            rows: row_count,
            cols,
            data,
        })
    }

    /// 從形狀與列優先資料創建矩陣
    pub fn from_shape_vec(rows: usize, cols: usize, data: Vec<Decimal>) -> Result<Self> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(MatrixError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// 以函數 `f(row, col)` 逐一產生元素
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Decimal,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    /// 全零矩陣
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![Decimal::ZERO; rows * cols],
        }
    }

    /// n 階單位矩陣
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = Decimal::ONE;
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (列數, 行數)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 讀取單一元素，越界時回傳 None
    pub fn get(&self, row: usize, col: usize) -> Option<Decimal> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// 讀取整列
    pub fn row(&self, row: usize) -> Option<&[Decimal]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    /// 逐列迭代
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Decimal]> {
        (0..self.rows).map(move |r| &self.data[r * self.cols..(r + 1) * self.cols])
    }

    /// 轉為逐列資料
    pub fn to_rows(&self) -> Vec<Vec<Decimal>> {
        self.iter_rows().map(<[Decimal]>::to_vec).collect()
    }

    /// 列優先的原始資料
    pub fn as_slice(&self) -> &[Decimal] {
        &self.data
    }

    /// 對每個元素套用函數
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(Decimal) -> Decimal,
    {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// 兩矩陣對應元素差的最大絕對值，形狀不同時回傳 None
    pub fn max_abs_diff(&self, other: &Matrix) -> Option<Decimal> {
        if self.dimensions() != other.dimensions() {
            return None;
        }

        Some(
            self.data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| (*a - *b).abs())
                .max()
                .unwrap_or(Decimal::ZERO),
        )
    }

    /// 在容許誤差內是否相等
    pub fn approx_eq(&self, other: &Matrix, tolerance: Decimal) -> bool {
        self.max_abs_diff(other)
            .map(|diff| diff <= tolerance)
            .unwrap_or(false)
    }
}

impl TryFrom<Vec<Vec<Decimal>>> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<Decimal>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<Decimal>> {
    fn from(matrix: Matrix) -> Self {
        matrix.to_rows()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows == 0 {
            return write!(f, "[]");
        }

        for (idx, row) in self.iter_rows().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (col, value) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", value)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows(vec![vec![4, 7], vec![2, 6]]).unwrap();

        assert_eq!(m.dimensions(), (2, 2));
        assert!(m.is_square());
        assert_eq!(m.get(0, 1), Some(Decimal::from(7)));
        assert_eq!(m.get(1, 0), Some(Decimal::from(2)));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.row(1), Some(&[Decimal::from(2), Decimal::from(6)][..]));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Matrix::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();

        assert_eq!(
            err,
            MatrixError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_from_shape_vec_mismatch() {
        let err = Matrix::from_shape_vec(2, 2, vec![Decimal::ONE; 3]).unwrap_err();
        assert_eq!(err, MatrixError::ShapeMismatch { expected: 4, actual: 3 });
    }

    #[test]
    fn test_default_is_empty_placeholder() {
        let m = Matrix::default();

        assert_eq!(m, Matrix::empty());
        assert_eq!(m.dimensions(), (0, 0));
        assert!(m.is_empty());
        assert!(m.is_square());
        assert_eq!(m.to_string(), "[]");
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn test_identity(#[case] n: usize) {
        let id = Matrix::identity(n);

        for r in 0..n {
            for c in 0..n {
                let expected = if r == c { Decimal::ONE } else { Decimal::ZERO };
                assert_eq!(id.get(r, c), Some(expected));
            }
        }
    }

    #[test]
    fn test_approx_eq() {
        let a = Matrix::from_rows(vec![vec![Decimal::new(6, 1), Decimal::new(-7, 1)]]).unwrap();
        let b = Matrix::from_rows(vec![vec![
            Decimal::new(600_001, 6),
            Decimal::new(-7, 1),
        ]])
        .unwrap();

        assert_eq!(a.max_abs_diff(&b), Some(Decimal::new(1, 6)));
        assert!(a.approx_eq(&b, Decimal::new(1, 5)));
        assert!(!a.approx_eq(&b, Decimal::new(1, 7)));

        // 形狀不同不視為相等
        assert!(!a.approx_eq(&Matrix::identity(2), Decimal::ONE));
    }

    #[test]
    fn test_decimal_equality_ignores_scale() {
        // 0.60 與 0.6 視為相等
        let a = Matrix::from_rows(vec![vec![Decimal::new(60, 2)]]).unwrap();
        let b = Matrix::from_rows(vec![vec![Decimal::new(6, 1)]]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_fn() {
        let m = Matrix::from_fn(2, 3, |r, c| Decimal::from(r * 10 + c));

        assert_eq!(m.dimensions(), (2, 3));
        assert_eq!(m.get(1, 2), Some(Decimal::from(12)));
        assert_eq!(m.to_rows()[0], vec![Decimal::ZERO, Decimal::ONE, Decimal::from(2)]);
    }

    #[test]
    fn test_display() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(m.to_string(), "[1, 2]\n[3, 4]");
    }

    #[test]
    fn test_serde_roundtrip_validates_shape() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let back: Matrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);

        let ragged: std::result::Result<Matrix, _> =
            serde_json::from_str(r#"[["1", "2"], ["3"]]"#);
        assert!(ragged.is_err());
    }
}
