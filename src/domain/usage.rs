// ==========================================
// 薬剤在庫管理・発注計算システム - 使用量履歴エンティティ
// ==========================================
// 職責: 蓄積レコードと統計サマリーの型定義
// 不変条件: 同一コード・同一日付のレコードは最大1件
// ==========================================

use serde::{Deserialize, Serialize};

/// 使用量の観測1件
///
/// 日付はゼロ埋め ISO 8601 文字列（"YYYY-MM-DD"）で保持する。
/// 文字列の辞書順がそのまま日付順になる
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageObservation {
    pub date: String,
    pub quantity: f64,
}

/// 1薬剤分の蓄積履歴（永続化単位）
///
/// 保存形式 (usage_history.json):
/// ```json
/// {
///     "<薬剤コード>": {
///         "name": "薬品名",
///         "records": [ {"date": "2026-02-19", "quantity": 120.0}, ... ]
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemHistory {
    /// 薬品名（最終書き込みが勝つ）
    pub name: String,
    /// 観測レコード（挿入順）
    pub records: Vec<UsageObservation>,
}

/// 品目別統計サマリー（都度再計算、永続化しない）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub code: String,
    pub name: String,
    /// 記録回数（≥ 1）
    pub count: usize,
    /// 平均
    pub mean: f64,
    /// 不偏標準偏差（n−1 で割る。count == 1 のとき厳密に 0.0）
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
    /// 最新日付（日付文字列の最大）
    pub latest_date: String,
    /// 最新日付の使用予定量
    pub latest_quantity: f64,
}

impl UsageSummary {
    /// 安全在庫 = 平均 + 1σ
    pub fn safety_stock(&self) -> f64 {
        self.mean + self.stddev
    }
}
