// ==========================================
// 薬剤在庫管理・発注計算システム - 領域モデル層
// ==========================================
// 職責: 領域エンティティ・型の定義
// 赤線: データアクセスロジック・エンジンロジックを含まない
// ==========================================

pub mod item;
pub mod reconciliation;
pub mod usage;

// 重導出
pub use item::{InventoryRecord, ScheduleRecord};
pub use reconciliation::{ReconciliationEntry, ShortageEntry, SurplusEntry};
pub use usage::{ItemHistory, UsageObservation, UsageSummary};
