// ==========================================
// 薬剤在庫管理・発注計算システム - 照合結果エンティティ
// ==========================================
// 職責: 返品候補・発注候補の型定義
// 不変条件: 1コードにつき余剰か不足のどちらか一方、差分 0 は無出力
// ==========================================

use serde::{Deserialize, Serialize};

/// 返品候補1件（在庫数 > 使用予定量）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurplusEntry {
    pub code: String,
    pub name: String,
    pub unit: String,
    /// 在庫数
    pub stock_quantity: f64,
    /// 使用予定量
    pub planned_quantity: f64,
    /// 返品可能数（= 在庫数 − 使用予定量、常に正）
    pub excess_quantity: f64,
    /// 薬価
    pub unit_price: f64,
}

/// 発注候補1件（使用予定量 > 在庫数）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortageEntry {
    pub code: String,
    pub name: String,
    pub unit: String,
    /// 在庫数
    pub stock_quantity: f64,
    /// 使用予定量
    pub planned_quantity: f64,
    /// 発注必要数（= 使用予定量 − 在庫数、常に正）
    pub deficit_quantity: f64,
    /// 薬価
    pub unit_price: f64,
    /// 概算金額（= 発注必要数 × 薬価。薬価 0 でも件は残る）
    pub estimated_cost: f64,
}

/// 1コードの分類結果
///
/// 在庫 = 予定 のコードはどちらにも分類されない（None）
#[derive(Debug, Clone, PartialEq)]
pub enum ReconciliationEntry {
    Surplus(SurplusEntry),
    Shortage(ShortageEntry),
}

impl ReconciliationEntry {
    pub fn code(&self) -> &str {
        match self {
            ReconciliationEntry::Surplus(e) => &e.code,
            ReconciliationEntry::Shortage(e) => &e.code,
        }
    }
}
