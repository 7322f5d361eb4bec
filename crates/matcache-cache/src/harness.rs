//! 自我測試
//!
//! 對一段維度範圍逐一建立隨機快取，驗證計算次數與求逆結果：
//! 1. 建立後計算次數為 0
//! 2. 第一次取逆矩陣後 `來源 × 逆矩陣 ≈ 單位矩陣`，計算次數為 1
//! 3. 重複取用不增加計算次數
//! 4. 替換來源後計算次數歸零，並重複上述循環數輪

use matcache_calc::identity_residual;
use matcache_core::{InvertOptions, MatrixError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::ops::RangeInclusive;

use crate::fixtures::random_matrix;
use crate::InverseCache;

/// 自我測試錯誤
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelfTestError {
    #[error("維度 {dimension} 第 {round} 輪求逆失敗: {source}")]
    Computation {
        dimension: usize,
        round: usize,
        #[source]
        source: MatrixError,
    },

    #[error("維度 {dimension} 第 {round} 輪計算次數錯誤: 預期 {expected}，實際 {actual}")]
    CountMismatch {
        dimension: usize,
        round: usize,
        expected: u64,
        actual: u64,
    },

    #[error("維度 {dimension} 第 {round} 輪驗算偏差 {residual} 超過容許值 {tolerance}")]
    NotIdentity {
        dimension: usize,
        round: usize,
        residual: Decimal,
        tolerance: Decimal,
    },

    #[error("無效的自我測試配置: {0}")]
    InvalidConfig(String),
}

/// 自我測試配置
#[derive(Debug, Clone)]
pub struct SelfTestConfig {
    /// 測試的維度範圍
    pub dimensions: RangeInclusive<usize>,

    /// 替換來源的輪數（不含初始輪）
    pub rounds: usize,

    /// 第一次計算後重複取用的次數
    pub repeat_calls: usize,

    /// `來源 × 逆矩陣` 與單位矩陣的最大容許偏差
    pub tolerance: Decimal,

    /// 亂數種子，None 表示每次不同
    pub seed: Option<u64>,

    /// 轉交給求逆器的參數
    pub options: InvertOptions,
}

impl Default for SelfTestConfig {
    fn default() -> Self {
        Self {
            dimensions: 1..=8,
            rounds: 3,
            repeat_calls: 3,
            tolerance: Decimal::new(1, 9),
            seed: None,
            options: InvertOptions::default(),
        }
    }
}

impl SelfTestConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置維度範圍
    pub fn with_dimensions(mut self, dimensions: RangeInclusive<usize>) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// 建構器模式：設置替換輪數
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// 建構器模式：設置重複取用次數
    pub fn with_repeat_calls(mut self, repeat_calls: usize) -> Self {
        self.repeat_calls = repeat_calls;
        self
    }

    /// 建構器模式：設置容許偏差
    pub fn with_tolerance(mut self, tolerance: Decimal) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// 建構器模式：設置亂數種子
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 建構器模式：設置求逆參數
    pub fn with_options(mut self, options: InvertOptions) -> Self {
        self.options = options;
        self
    }

    /// 檢查配置是否合法
    pub fn validate(&self) -> Result<(), SelfTestError> {
        if self.dimensions.is_empty() {
            return Err(SelfTestError::InvalidConfig(format!(
                "維度範圍為空: {:?}",
                self.dimensions
            )));
        }
        if self.tolerance.is_sign_negative() {
            return Err(SelfTestError::InvalidConfig(format!(
                "容許偏差不可為負數: {}",
                self.tolerance
            )));
        }
        self.options
            .validate()
            .map_err(|e| SelfTestError::InvalidConfig(e.to_string()))
    }
}

/// 單一維度的測試結果
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionReport {
    pub dimension: usize,

    /// 替換來源的輪數
    pub rounds: usize,

    /// 所有輪中最大的驗算偏差
    pub max_residual: Decimal,

    /// 所有輪合計的實際計算次數
    pub computations: u64,
}

/// 自我測試結果
#[derive(Debug, Clone, PartialEq)]
pub struct SelfTestReport {
    /// 依維度由小到大排列
    pub dimensions: Vec<DimensionReport>,
}

impl SelfTestReport {
    /// 所有維度中最大的驗算偏差
    pub fn worst_residual(&self) -> Decimal {
        self.dimensions
            .iter()
            .map(|r| r.max_residual)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// 所有維度合計的實際計算次數
    pub fn total_computations(&self) -> u64 {
        self.dimensions.iter().map(|r| r.computations).sum()
    }
}

/// 執行自我測試，各維度平行進行
pub fn run_self_test(config: &SelfTestConfig) -> Result<SelfTestReport, SelfTestError> {
    config.validate()?;

    tracing::info!(
        "開始自我測試：維度 {:?}，替換 {} 輪，重複取用 {} 次",
        config.dimensions,
        config.rounds,
        config.repeat_calls
    );
    let start_time = std::time::Instant::now();

    let dimensions: Vec<usize> = config.dimensions.clone().collect();
    let reports = dimensions
        .into_par_iter()
        .map(|dimension| check_dimension(config, dimension))
        .collect::<Result<Vec<_>, _>>()?;

    let report = SelfTestReport {
        dimensions: reports,
    };

    tracing::info!(
        "自我測試完成，耗時 {:?}，最大偏差 {}",
        start_time.elapsed(),
        report.worst_residual()
    );

    Ok(report)
}

/// 單一維度的完整測試循環
fn check_dimension(
    config: &SelfTestConfig,
    dimension: usize,
) -> Result<DimensionReport, SelfTestError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(dimension as u64)),
        None => StdRng::from_entropy(),
    };

    let mut cache = InverseCache::new(random_matrix(&mut rng, dimension));
    let mut max_residual = Decimal::ZERO;
    let mut computations = 0;

    for round in 0..=config.rounds {
        if round > 0 {
            cache.set_source(random_matrix(&mut rng, dimension));
        }
        expect_count(&cache, dimension, round, 0)?;

        let current = cache.source().clone();
        let inverse = cache
            .inverse(&config.options)
            .map_err(|source| SelfTestError::Computation {
                dimension,
                round,
                source,
            })?;
        let residual = identity_residual(&current, inverse).map_err(|source| {
            SelfTestError::Computation {
                dimension,
                round,
                source,
            }
        })?;

        if residual > config.tolerance {
            tracing::warn!("維度 {} 第 {} 輪驗算偏差過大: {}", dimension, round, residual);
            return Err(SelfTestError::NotIdentity {
                dimension,
                round,
                residual,
                tolerance: config.tolerance,
            });
        }
        expect_count(&cache, dimension, round, 1)?;

        for _ in 0..config.repeat_calls {
            cache
                .inverse(&config.options)
                .map_err(|source| SelfTestError::Computation {
                    dimension,
                    round,
                    source,
                })?;
        }
        expect_count(&cache, dimension, round, 1)?;

        computations += cache.computation_count();
        max_residual = max_residual.max(residual);
    }

    tracing::debug!("維度 {} 通過，最大偏差 {}", dimension, max_residual);

    Ok(DimensionReport {
        dimension,
        rounds: config.rounds,
        max_residual,
        computations,
    })
}

fn expect_count(
    cache: &InverseCache,
    dimension: usize,
    round: usize,
    expected: u64,
) -> Result<(), SelfTestError> {
    let actual = cache.computation_count();
    if actual != expected {
        return Err(SelfTestError::CountMismatch {
            dimension,
            round,
            expected,
            actual,
        });
    }
    Ok(())
}
