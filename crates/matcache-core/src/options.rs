//! 求逆參數配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{MatrixError, Result};

/// 求逆參數
///
/// 由快取容器原封不動轉交給求逆器。內建的 Gauss-Jordan 只讀取具名欄位，
/// `extra` 保留給自訂求逆器使用。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvertOptions {
    /// 主元選取策略
    pub pivoting: PivotStrategy,

    /// 相對奇異門檻：主元絕對值不大於 `此值 × 該行原始最大絕對值` 即視為奇異
    pub pivot_tolerance: Decimal,

    /// 結果四捨五入的小數位數（None 表示不處理）
    pub round_dp: Option<u32>,

    /// 其他具名參數
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for InvertOptions {
    fn default() -> Self {
        Self {
            pivoting: PivotStrategy::Partial,
            pivot_tolerance: Decimal::new(1, 20),
            round_dp: None,
            extra: BTreeMap::new(),
        }
    }
}

impl InvertOptions {
    /// 創建預設參數
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 載入參數，未提供的欄位使用預設值
    ///
    /// # 範例
    /// ```
    /// # use matcache_core::{InvertOptions, PivotStrategy};
    /// let options = InvertOptions::from_json(r#"{ "pivoting": "diagonal" }"#).unwrap();
    /// assert_eq!(options.pivoting, PivotStrategy::Diagonal);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| MatrixError::InvalidOptions(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// 建構器模式：設置主元選取策略
    pub fn with_pivoting(mut self, pivoting: PivotStrategy) -> Self {
        self.pivoting = pivoting;
        self
    }

    /// 建構器模式：設置奇異判定容許值
    pub fn with_pivot_tolerance(mut self, tolerance: Decimal) -> Self {
        self.pivot_tolerance = tolerance;
        self
    }

    /// 建構器模式：設置結果小數位數
    pub fn with_round_dp(mut self, dp: u32) -> Self {
        self.round_dp = Some(dp);
        self
    }

    /// 建構器模式：設置其他具名參數
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// 讀取其他具名參數
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    /// 檢查參數是否合法
    pub fn validate(&self) -> Result<()> {
        if self.pivot_tolerance.is_sign_negative() {
            return Err(MatrixError::InvalidOptions(format!(
                "pivot_tolerance 不可為負數: {}",
                self.pivot_tolerance
            )));
        }
        Ok(())
    }
}

/// 主元選取策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotStrategy {
    /// 部分主元：選取該行絕對值最大的列
    #[default]
    Partial,

    /// 對角優先：沿用對角元素，僅在可忽略時向下尋找第一個可用列
    Diagonal,
}
