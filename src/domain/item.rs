// ==========================================
// 薬剤在庫管理・発注計算システム - スナップショット行
// ==========================================
// 職責: 外部スナップショット1行分の型定義
// 寿命: 1回の照合計算の間のみ（永続化しない）
// ==========================================

use serde::{Deserialize, Serialize};

/// 在庫スナップショット1行（Fメニュー出力）
///
/// 数量セルが空欄・非数値の場合は取り込み時に 0.0 へ丸められる
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// 薬剤コード（トリム済み。空コード行は取り込み時に除外）
    pub code: String,
    /// 薬品名
    pub name: String,
    /// 単位
    pub unit: String,
    /// 在庫数
    pub stock_quantity: f64,
}

/// 使用予定スナップショット1行
///
/// 在庫側とはコード列名が異なる外部システムの出力
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    /// 薬剤コード（トリム済み）
    pub code: String,
    /// 薬剤名
    pub name: String,
    /// 薬価
    pub unit_price: f64,
    /// 使用予定量
    pub planned_quantity: f64,
}
