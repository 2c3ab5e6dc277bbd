// ==========================================
// 薬剤在庫管理・発注計算システム - 並べ替え変換
// ==========================================
// 職責: 表示用の並べ替え（純粋な変換。エンジン状態を持たない）
// 規約: 同一列の再選択で昇降反転、新しい列の初回は降順
// ==========================================

use crate::domain::{ShortageEntry, SurplusEntry, UsageSummary};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// 並べ替え状態（呼び出し側が保持する値オブジェクト）
#[derive(Debug, Clone, PartialEq)]
pub struct SortState<K: PartialEq + Copy> {
    column: Option<K>,
    direction: SortDirection,
}

impl<K: PartialEq + Copy> SortState<K> {
    pub fn new() -> Self {
        Self {
            column: None,
            direction: SortDirection::Descending,
        }
    }

    /// 列選択を適用し、結果の並び方向を返す
    ///
    /// 同じ列なら方向を反転、別の列なら降順から始める
    pub fn toggle(&mut self, column: K) -> SortDirection {
        if self.column == Some(column) {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Descending;
        }
        self.direction
    }

    pub fn current(&self) -> Option<(K, SortDirection)> {
        self.column.map(|c| (c, self.direction))
    }
}

impl<K: PartialEq + Copy> Default for SortState<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// 返品候補リストの並べ替えキー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurplusSortKey {
    Code,
    Name,
    Unit,
    Stock,
    Planned,
    Excess,
    Price,
}

/// 発注候補リストの並べ替えキー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortageSortKey {
    Code,
    Name,
    Unit,
    Stock,
    Planned,
    Deficit,
    Price,
    Cost,
}

/// 統計サマリーの並べ替えキー（安全在庫は計算列）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSortKey {
    Code,
    Name,
    Count,
    Mean,
    StdDev,
    SafetyStock,
    Min,
    Max,
    LatestDate,
    LatestQuantity,
}

pub fn sort_surplus(entries: &mut [SurplusEntry], key: SurplusSortKey, direction: SortDirection) {
    entries.sort_by(|a, b| {
        let ord = match key {
            SurplusSortKey::Code => a.code.cmp(&b.code),
            SurplusSortKey::Name => a.name.cmp(&b.name),
            SurplusSortKey::Unit => a.unit.cmp(&b.unit),
            SurplusSortKey::Stock => cmp_f64(a.stock_quantity, b.stock_quantity),
            SurplusSortKey::Planned => cmp_f64(a.planned_quantity, b.planned_quantity),
            SurplusSortKey::Excess => cmp_f64(a.excess_quantity, b.excess_quantity),
            SurplusSortKey::Price => cmp_f64(a.unit_price, b.unit_price),
        };
        apply_direction(ord, direction)
    });
}

pub fn sort_shortage(entries: &mut [ShortageEntry], key: ShortageSortKey, direction: SortDirection) {
    entries.sort_by(|a, b| {
        let ord = match key {
            ShortageSortKey::Code => a.code.cmp(&b.code),
            ShortageSortKey::Name => a.name.cmp(&b.name),
            ShortageSortKey::Unit => a.unit.cmp(&b.unit),
            ShortageSortKey::Stock => cmp_f64(a.stock_quantity, b.stock_quantity),
            ShortageSortKey::Planned => cmp_f64(a.planned_quantity, b.planned_quantity),
            ShortageSortKey::Deficit => cmp_f64(a.deficit_quantity, b.deficit_quantity),
            ShortageSortKey::Price => cmp_f64(a.unit_price, b.unit_price),
            ShortageSortKey::Cost => cmp_f64(a.estimated_cost, b.estimated_cost),
        };
        apply_direction(ord, direction)
    });
}

pub fn sort_summaries(entries: &mut [UsageSummary], key: StatsSortKey, direction: SortDirection) {
    entries.sort_by(|a, b| {
        let ord = match key {
            StatsSortKey::Code => a.code.cmp(&b.code),
            StatsSortKey::Name => a.name.cmp(&b.name),
            StatsSortKey::Count => a.count.cmp(&b.count),
            StatsSortKey::Mean => cmp_f64(a.mean, b.mean),
            StatsSortKey::StdDev => cmp_f64(a.stddev, b.stddev),
            StatsSortKey::SafetyStock => cmp_f64(a.safety_stock(), b.safety_stock()),
            StatsSortKey::Min => cmp_f64(a.min, b.min),
            StatsSortKey::Max => cmp_f64(a.max, b.max),
            StatsSortKey::LatestDate => a.latest_date.cmp(&b.latest_date),
            StatsSortKey::LatestQuantity => cmp_f64(a.latest_quantity, b.latest_quantity),
        };
        apply_direction(ord, direction)
    });
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn apply_direction(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}
