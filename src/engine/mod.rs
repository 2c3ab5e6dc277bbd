// ==========================================
// 薬剤在庫管理・発注計算システム - エンジン層
// ==========================================
// 職責: 照合・統計・並べ替えの業務ルール実装
// 赤線: エンジンは I/O を行わない（永続化はリポジトリ層の責務）
// ==========================================

pub mod reconcile;
pub mod sort;
pub mod statistics;

// 重導出
pub use reconcile::{ReconcileEngine, ReconcileResult};
pub use sort::{
    sort_shortage, sort_summaries, sort_surplus, ShortageSortKey, SortDirection, SortState,
    StatsSortKey, SurplusSortKey,
};
pub use statistics::StatisticsEngine;
