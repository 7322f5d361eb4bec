//! 矩陣求逆

use matcache_core::{InvertOptions, Matrix, MatrixError, PivotStrategy, Result};
use rust_decimal::Decimal;

/// 求逆器
///
/// 必須是確定性的純函數：相同輸入與參數得到相同結果或相同錯誤。
pub trait Inverter {
    fn invert(&self, matrix: &Matrix, options: &InvertOptions) -> Result<Matrix>;
}

impl<F> Inverter for F
where
    F: Fn(&Matrix, &InvertOptions) -> Result<Matrix>,
{
    fn invert(&self, matrix: &Matrix, options: &InvertOptions) -> Result<Matrix> {
        self(matrix, options)
    }
}

/// 使用 Gauss-Jordan 消去法求逆
pub fn invert(matrix: &Matrix, options: &InvertOptions) -> Result<Matrix> {
    GaussJordan.invert(matrix, options)
}

/// Gauss-Jordan 消去法求逆器
///
/// 以 Decimal 運算並檢查溢位。0x0 矩陣的逆矩陣為 0x0 矩陣。
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussJordan;

impl Inverter for GaussJordan {
    fn invert(&self, matrix: &Matrix, options: &InvertOptions) -> Result<Matrix> {
        let (rows, cols) = matrix.dimensions();
        if rows != cols {
            tracing::warn!("非方陣無法求逆: {}x{}", rows, cols);
            return Err(MatrixError::NotSquare { rows, cols });
        }

        let n = rows;
        tracing::debug!("開始 Gauss-Jordan 求逆: {}x{}，主元策略 {:?}", n, n, options.pivoting);

        let mut work = matrix.to_rows();
        let mut inverse = Matrix::identity(n).to_rows();

        // 奇異判定門檻依原始矩陣各行的最大絕對值縮放
        let thresholds = (0..n)
            .map(|c| {
                let scale = work
                    .iter()
                    .map(|row| row[c].abs())
                    .max()
                    .unwrap_or(Decimal::ZERO);
                checked_mul(options.pivot_tolerance, scale)
            })
            .collect::<Result<Vec<_>>>()?;

        for col in 0..n {
            let pivot_row = match Self::select_pivot(&work, col, thresholds[col], options.pivoting) {
                Some(row) => row,
                None => {
                    tracing::warn!("第 {} 行找不到可用主元，矩陣為奇異矩陣", col);
                    return Err(MatrixError::Singular);
                }
            };

            if pivot_row != col {
                tracing::debug!("交換第 {} 列與第 {} 列", col, pivot_row);
                work.swap(col, pivot_row);
                inverse.swap(col, pivot_row);
            }

            // 主元列正規化
            let pivot = work[col][col];
            for j in 0..n {
                work[col][j] = checked_div(work[col][j], pivot)?;
                inverse[col][j] = checked_div(inverse[col][j], pivot)?;
            }

            // 消去其他列
            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = work[r][col];
                if factor.is_zero() {
                    continue;
                }
                for j in 0..n {
                    work[r][j] = checked_sub(work[r][j], checked_mul(factor, work[col][j])?)?;
                    inverse[r][j] =
                        checked_sub(inverse[r][j], checked_mul(factor, inverse[col][j])?)?;
                }
            }
        }

        let result = Matrix::from_rows(inverse)?;
        tracing::debug!("Gauss-Jordan 求逆完成: {}x{}", n, n);

        Ok(match options.round_dp {
            Some(dp) => result.map(|v| v.round_dp(dp)),
            None => result,
        })
    }
}

impl GaussJordan {
    /// 選取第 `col` 行的主元列，絕對值不大於 `threshold` 者不可用，找不到時回傳 None
    fn select_pivot(
        work: &[Vec<Decimal>],
        col: usize,
        threshold: Decimal,
        pivoting: PivotStrategy,
    ) -> Option<usize> {
        let candidates = (col..work.len()).map(|r| (r, work[r][col].abs()));

        match pivoting {
            PivotStrategy::Partial => candidates
                // 同值時保留較上方的列
                .fold(None, |best: Option<(usize, Decimal)>, (r, value)| match best {
                    Some((_, best_value)) if best_value >= value => best,
                    _ => Some((r, value)),
                })
                .filter(|(_, value)| *value > threshold)
                .map(|(r, _)| r),
            PivotStrategy::Diagonal => candidates
                .filter(|(_, value)| *value > threshold)
                .map(|(r, _)| r)
                .next(),
        }
    }
}

fn checked_mul(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_mul(b).ok_or(MatrixError::Overflow)
}

fn checked_sub(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_sub(b).ok_or(MatrixError::Overflow)
}

fn checked_div(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_div(b).ok_or(MatrixError::Overflow)
}
