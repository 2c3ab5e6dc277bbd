// ==========================================
// 薬剤在庫管理・発注計算システム - 照合エンジン
// ==========================================
// 職責: 在庫と使用予定をコードで突合し、余剰/不足に分類
// 赤線: 純粋関数。入出力以外の副作用なし、内部エラーなし
// 不変条件: 1コードにつき最大1件、差分 0 は無出力
// ==========================================

use crate::domain::{
    InventoryRecord, ReconciliationEntry, ScheduleRecord, ShortageEntry, SurplusEntry,
};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::instrument;

/// 照合結果（返品候補 + 発注候補）
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileResult {
    /// 返品候補（初期順: 薬価の高い順）
    pub surplus: Vec<SurplusEntry>,
    /// 発注候補（初期順: 概算金額の高い順）
    pub shortage: Vec<ShortageEntry>,
}

impl ReconcileResult {
    /// 発注候補の概算合計金額
    pub fn total_estimated_cost(&self) -> f64 {
        self.shortage.iter().map(|e| e.estimated_cost).sum()
    }
}

pub struct ReconcileEngine;

impl ReconcileEngine {
    pub fn new() -> Self {
        Self
    }

    /// 照合を実行する
    ///
    /// 1. 両スナップショットから コード → 行 の辞書を作る（同一コードは後勝ち）
    /// 2. コードの和集合を走査し、差分 = 在庫数 − 使用予定量 で分類
    /// 3. 初期ソート: 返品候補 → 薬価降順、発注候補 → 概算金額降順
    ///
    /// 同値の並びは初出順（在庫行 → 使用予定のみの行）のまま安定。
    /// 入力の並べ替えに対しては未規定
    #[instrument(skip_all, fields(inventory = inventory.len(), schedule = schedule.len()))]
    pub fn reconcile(
        &self,
        inventory: &[InventoryRecord],
        schedule: &[ScheduleRecord],
    ) -> ReconcileResult {
        // コード → 行（後勝ち）。all_codes は初出順を保持
        let mut inv_map: HashMap<&str, &InventoryRecord> = HashMap::new();
        let mut all_codes: Vec<&str> = Vec::new();
        for rec in inventory {
            if inv_map.insert(rec.code.as_str(), rec).is_none() {
                all_codes.push(rec.code.as_str());
            }
        }

        let mut sch_map: HashMap<&str, &ScheduleRecord> = HashMap::new();
        for rec in schedule {
            if sch_map.insert(rec.code.as_str(), rec).is_none() && !inv_map.contains_key(rec.code.as_str()) {
                all_codes.push(rec.code.as_str());
            }
        }

        let mut surplus = Vec::new();
        let mut shortage = Vec::new();

        for code in all_codes {
            let inv_row = inv_map.get(code).copied();
            let sch_row = sch_map.get(code).copied();

            match Self::classify(code, inv_row, sch_row) {
                Some(ReconciliationEntry::Surplus(e)) => surplus.push(e),
                Some(ReconciliationEntry::Shortage(e)) => shortage.push(e),
                None => {}
            }
        }

        // 初期ソート（安定ソートなので同値は突合順のまま）
        surplus.sort_by(|a, b| cmp_f64_desc(a.unit_price, b.unit_price));
        shortage.sort_by(|a, b| cmp_f64_desc(a.estimated_cost, b.estimated_cost));

        ReconcileResult { surplus, shortage }
    }

    /// 1コード分を分類する
    ///
    /// - 在庫数・使用予定量・薬価は欠けている側を 0.0 とみなす
    /// - 薬品名・単位は在庫側優先。在庫行が無ければ使用予定側の名前 + 空単位
    /// - 差分 = 在庫数 − 使用予定量。正 → 余剰、負 → 不足、0 → なし
    pub fn classify(
        code: &str,
        inv_row: Option<&InventoryRecord>,
        sch_row: Option<&ScheduleRecord>,
    ) -> Option<ReconciliationEntry> {
        let stock = inv_row.map(|r| r.stock_quantity).unwrap_or(0.0);
        let planned = sch_row.map(|r| r.planned_quantity).unwrap_or(0.0);
        let price = sch_row.map(|r| r.unit_price).unwrap_or(0.0);

        let (name, unit) = match (inv_row, sch_row) {
            (Some(inv), _) => (inv.name.clone(), inv.unit.clone()),
            (None, Some(sch)) => (sch.name.clone(), String::new()),
            (None, None) => (String::new(), String::new()),
        };

        let delta = stock - planned;

        if delta > 0.0 {
            Some(ReconciliationEntry::Surplus(SurplusEntry {
                code: code.to_string(),
                name,
                unit,
                stock_quantity: stock,
                planned_quantity: planned,
                excess_quantity: delta,
                unit_price: price,
            }))
        } else if delta < 0.0 {
            let deficit = -delta;
            Some(ReconciliationEntry::Shortage(ShortageEntry {
                code: code.to_string(),
                name,
                unit,
                stock_quantity: stock,
                planned_quantity: planned,
                deficit_quantity: deficit,
                unit_price: price,
                estimated_cost: deficit * price,
            }))
        } else {
            None
        }
    }
}

impl Default for ReconcileEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn cmp_f64_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
