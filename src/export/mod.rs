// ==========================================
// 薬剤在庫管理・発注計算システム - 出力層
// ==========================================
// 職責: 照合結果・統計のファイル出力
// 赤線: 値の再計算をしない（エンジンの出力をそのまま整形）
// ==========================================

pub mod csv_export;
pub mod error;

// 重導出
pub use csv_export::{
    shortage_fields, summary_fields, surplus_fields, CsvExporter, SHORTAGE_HEADERS,
    STATS_HEADERS, SURPLUS_HEADERS,
};
pub use error::{ExportError, ExportResult};
