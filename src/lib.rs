// ==========================================
// 薬剤在庫管理・発注計算システム - コアライブラリ
// ==========================================
// 在庫スナップショットと使用予定スナップショットを照合し、
// 返品候補・発注候補を算出する。使用予定量は JSON ファイルに
// 蓄積し、品目別の統計（平均・標準偏差・安全在庫）を計算する
// ==========================================

// ==========================================
// モジュール宣言
// ==========================================

// 領域層 - エンティティと型
pub mod domain;

// 取込層 - 外部スナップショットの読み込み
pub mod importer;

// エンジン層 - 照合・統計・並べ替え
pub mod engine;

// リポジトリ層 - 使用量履歴の永続化
pub mod repository;

// 出力層 - CSV 書き出し
pub mod export;

// 設定層 - カラム名・保存先
pub mod config;

// ログシステム
pub mod logging;

// ==========================================
// コア型の重導出
// ==========================================

pub use config::AppConfig;
pub use domain::{
    InventoryRecord, ItemHistory, ReconciliationEntry, ScheduleRecord, ShortageEntry,
    SurplusEntry, UsageObservation, UsageSummary,
};
pub use engine::{ReconcileEngine, ReconcileResult, SortDirection, SortState, StatisticsEngine};
pub use export::CsvExporter;
pub use importer::{CsvParser, FieldMapper, ImportError, ImportResult};
pub use repository::{RepositoryError, UsageHistoryRepository};

// ==========================================
// 定数定義
// ==========================================

// システムバージョン
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// システム名
pub const APP_NAME: &str = "薬剤在庫管理・発注計算システム";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
