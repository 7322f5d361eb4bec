//! 乘積與驗算

use matcache_core::{Matrix, MatrixError, Result};
use rust_decimal::Decimal;

/// 矩陣乘法
pub fn multiply(left: &Matrix, right: &Matrix) -> Result<Matrix> {
    if left.cols() != right.rows() {
        return Err(MatrixError::DimensionMismatch {
            left: left.dimensions(),
            right: right.dimensions(),
        });
    }

    let (rows, inner, cols) = (left.rows(), left.cols(), right.cols());
    let mut data = Vec::with_capacity(rows * cols);

    for r in 0..rows {
        for c in 0..cols {
            let mut sum = Decimal::ZERO;
            for k in 0..inner {
                let a = left.as_slice()[r * inner + k];
                let b = right.as_slice()[k * cols + c];
                let product = a.checked_mul(b).ok_or(MatrixError::Overflow)?;
                sum = sum.checked_add(product).ok_or(MatrixError::Overflow)?;
            }
            data.push(sum);
        }
    }

    Matrix::from_shape_vec(rows, cols, data)
}

/// `source × inverse` 與單位矩陣的最大絕對偏差
///
/// 用於驗算求逆結果，偏差越小越接近真正的逆矩陣。
pub fn identity_residual(source: &Matrix, inverse: &Matrix) -> Result<Decimal> {
    let product = multiply(source, inverse)?;
    if !product.is_square() {
        return Err(MatrixError::NotSquare {
            rows: product.rows(),
            cols: product.cols(),
        });
    }

    let identity = Matrix::identity(product.rows());
    product
        .max_abs_diff(&identity)
        .ok_or(MatrixError::DimensionMismatch {
            left: product.dimensions(),
            right: identity.dimensions(),
        })
}
