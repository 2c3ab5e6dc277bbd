// ==========================================
// 薬剤在庫管理・発注計算システム - CSV 出力
// ==========================================
// 職責: 照合結果・統計サマリーの CSV 書き出し
// 形式: UTF-8 + BOM（Excel でそのまま開ける）、日本語ヘッダー
// ==========================================

use crate::domain::{ShortageEntry, SurplusEntry, UsageSummary};
use crate::export::error::ExportResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// UTF-8 BOM（Excel 互換のため先頭に付ける）
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// 返品候補リストの出力ヘッダー
pub const SURPLUS_HEADERS: [&str; 7] =
    ["コード", "薬品名", "単位", "在庫数", "使用予定量", "返品可能数", "薬価"];

/// 発注候補リストの出力ヘッダー
pub const SHORTAGE_HEADERS: [&str; 8] = [
    "コード", "薬品名", "単位", "在庫数", "使用予定量", "発注必要数", "薬価", "概算金額",
];

/// 統計サマリーの出力ヘッダー
pub const STATS_HEADERS: [&str; 10] = [
    "コード",
    "薬品名",
    "記録回数",
    "平均",
    "標準偏差(σ)",
    "安全在庫(平均+1σ)",
    "最小",
    "最大",
    "最新日付",
    "最新量",
];

/// 返品候補1件分のフィールド列（出力側で再計算しない）
pub fn surplus_fields(entry: &SurplusEntry) -> Vec<String> {
    vec![
        entry.code.clone(),
        entry.name.clone(),
        entry.unit.clone(),
        format!("{:.1}", entry.stock_quantity),
        format!("{:.1}", entry.planned_quantity),
        format!("{:.1}", entry.excess_quantity),
        format!("{:.2}", entry.unit_price),
    ]
}

/// 発注候補1件分のフィールド列
pub fn shortage_fields(entry: &ShortageEntry) -> Vec<String> {
    vec![
        entry.code.clone(),
        entry.name.clone(),
        entry.unit.clone(),
        format!("{:.1}", entry.stock_quantity),
        format!("{:.1}", entry.planned_quantity),
        format!("{:.1}", entry.deficit_quantity),
        format!("{:.2}", entry.unit_price),
        format!("{:.0}", entry.estimated_cost),
    ]
}

/// 統計サマリー1件分のフィールド列
pub fn summary_fields(summary: &UsageSummary) -> Vec<String> {
    vec![
        summary.code.clone(),
        summary.name.clone(),
        summary.count.to_string(),
        format!("{:.1}", summary.mean),
        format!("{:.1}", summary.stddev),
        format!("{:.1}", summary.safety_stock()),
        format!("{:.1}", summary.min),
        format!("{:.1}", summary.max),
        summary.latest_date.clone(),
        format!("{:.1}", summary.latest_quantity),
    ]
}

pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// 返品候補リストを書き出す
    pub fn write_surplus(&self, path: &Path, entries: &[SurplusEntry]) -> ExportResult<()> {
        self.write_table(path, &SURPLUS_HEADERS, entries.iter().map(surplus_fields))
    }

    /// 発注候補リストを書き出す
    pub fn write_shortage(&self, path: &Path, entries: &[ShortageEntry]) -> ExportResult<()> {
        self.write_table(path, &SHORTAGE_HEADERS, entries.iter().map(shortage_fields))
    }

    /// 統計サマリーを書き出す
    pub fn write_statistics(&self, path: &Path, summaries: &[UsageSummary]) -> ExportResult<()> {
        self.write_table(path, &STATS_HEADERS, summaries.iter().map(summary_fields))
    }

    fn write_table<I>(&self, path: &Path, headers: &[&str], rows: I) -> ExportResult<()>
    where
        I: Iterator<Item = Vec<String>>,
    {
        let mut file = File::create(path)?;
        file.write_all(UTF8_BOM)?;

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(headers)?;
        for row in rows {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}
