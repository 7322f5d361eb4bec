//! 隨機測試矩陣

use matcache_core::Matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::InverseCache;

/// 隨機元素保留的小數位數
pub const ENTRY_DECIMAL_PLACES: u32 = 6;

/// 產生 n 階隨機方陣
///
/// 元素取自速率為 1 的指數分佈（反函數抽樣），四捨五入至
/// [`ENTRY_DECIMAL_PLACES`] 位小數。此類矩陣幾乎必定可逆，
/// 抽到奇異矩陣時由呼叫端視為測試失敗。
pub fn random_matrix<R: Rng + ?Sized>(rng: &mut R, dimension: usize) -> Matrix {
    Matrix::from_fn(dimension, dimension, |_, _| exponential_entry(&mut *rng))
}

/// 以執行緒亂數產生器建立包裝隨機方陣的快取
pub fn make_random_matrix(dimension: usize) -> InverseCache {
    InverseCache::new(random_matrix(&mut rand::thread_rng(), dimension))
}

/// 以固定種子建立包裝隨機方陣的快取，結果可重現
pub fn make_random_matrix_seeded(dimension: usize, seed: u64) -> InverseCache {
    let mut rng = StdRng::seed_from_u64(seed);
    InverseCache::new(random_matrix(&mut rng, dimension))
}

fn exponential_entry<R: Rng + ?Sized>(rng: &mut R) -> Decimal {
    // gen 落在 [0, 1)，1 - u 落在 (0, 1]，對數有限
    let u: f64 = rng.gen();
    let sample = -(1.0 - u).ln();

    Decimal::try_from(sample)
        .unwrap_or(Decimal::ZERO)
        .round_dp(ENTRY_DECIMAL_PLACES)
}
