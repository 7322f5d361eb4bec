//! 逆矩陣快取容器

use matcache_calc::{GaussJordan, Inverter};
use matcache_core::{InvertOptions, Matrix, Result};

/// 逆矩陣快取
///
/// 持有一個來源矩陣，第一次請求時才計算逆矩陣並快取，
/// 之後直到來源被替換前都直接回傳快取結果。
///
/// 狀態轉移：
/// - 空 →（`inverse` 成功）→ 已快取，計算次數 +1
/// - 空 →（`inverse` 失敗）→ 空，計算次數不變
/// - 已快取 →（`inverse`）→ 已快取，不再計算
/// - 任意 →（`set_source`）→ 空，計算次數歸零
/// - 任意 →（`set_inverse_unchecked`）→ 已快取，計算次數不變
///
/// 非執行緒安全的設計：所有修改都需要 `&mut self`，
/// 跨執行緒共用時應以單一鎖保護整個容器。
#[derive(Debug, Clone)]
pub struct InverseCache<I = GaussJordan> {
    /// 來源矩陣
    source: Matrix,

    /// 快取的逆矩陣
    inverse: Option<Matrix>,

    /// 實際計算次數（不含快取命中）
    computation_count: u64,

    /// 求逆器
    inverter: I,
}

impl InverseCache<GaussJordan> {
    /// 以 Gauss-Jordan 求逆器創建快取
    pub fn new(source: Matrix) -> Self {
        Self::with_inverter(source, GaussJordan)
    }
}

impl Default for InverseCache<GaussJordan> {
    fn default() -> Self {
        Self::new(Matrix::empty())
    }
}

impl<I: Inverter> InverseCache<I> {
    /// 以自訂求逆器創建快取
    pub fn with_inverter(source: Matrix, inverter: I) -> Self {
        Self {
            source,
            inverse: None,
            computation_count: 0,
            inverter,
        }
    }

    /// 來源矩陣
    pub fn source(&self) -> &Matrix {
        &self.source
    }

    /// 取得逆矩陣，尚未快取時才計算
    ///
    /// `options` 原封不動轉交給求逆器。計算失敗時錯誤直接回傳，
    /// 快取維持空的狀態且計算次數不變，下次呼叫會重新嘗試。
    pub fn inverse(&mut self, options: &InvertOptions) -> Result<&Matrix> {
        let inverse = match self.inverse.take() {
            Some(cached) => {
                tracing::debug!("逆矩陣快取命中，計算次數 {}", self.computation_count);
                cached
            }
            None => {
                let (rows, cols) = self.source.dimensions();
                tracing::debug!("逆矩陣尚未快取，開始計算: {}x{}", rows, cols);

                let computed = self.inverter.invert(&self.source, options)?;
                self.computation_count += 1;

                tracing::debug!("逆矩陣計算完成，計算次數 {}", self.computation_count);
                computed
            }
        };

        Ok(&*self.inverse.insert(inverse))
    }

    /// 替換來源矩陣，清除快取並將計算次數歸零
    ///
    /// 不會觸發計算，也不檢查新矩陣是否可逆。
    pub fn set_source(&mut self, source: Matrix) {
        tracing::debug!(
            "替換來源矩陣: {:?} -> {:?}，清除快取",
            self.source.dimensions(),
            source.dimensions()
        );
        self.source = source;
        self.inverse = None;
        self.computation_count = 0;
    }

    /// 直接覆寫快取的逆矩陣
    ///
    /// 不驗證 `inverse` 是否真的是來源矩陣的逆矩陣，也不改變計算次數，
    /// 之後 `inverse()` 會原樣回傳此值。呼叫後快取可能與來源不一致，
    /// 一般情況請勿使用。
    pub fn set_inverse_unchecked(&mut self, inverse: Matrix) {
        tracing::debug!("覆寫快取逆矩陣（未驗證）: {:?}", inverse.dimensions());
        self.inverse = Some(inverse);
    }

    /// 實際計算次數
    pub fn computation_count(&self) -> u64 {
        self.computation_count
    }

    /// 是否已有快取
    pub fn is_cached(&self) -> bool {
        self.inverse.is_some()
    }

    /// 查看快取內容，不觸發計算
    pub fn cached_inverse(&self) -> Option<&Matrix> {
        self.inverse.as_ref()
    }

    /// 求逆器引用
    pub fn inverter(&self) -> &I {
        &self.inverter
    }
}
