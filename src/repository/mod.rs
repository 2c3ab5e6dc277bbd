// ==========================================
// 薬剤在庫管理・発注計算システム - リポジトリ層
// ==========================================
// 職責: 永続化データ（使用量履歴）へのアクセス
// 赤線: 履歴ストアの変更は統計サブシステム経由のみ
// ==========================================

pub mod error;
pub mod usage_history_repo;

// 重導出
pub use error::{RepositoryError, RepositoryResult};
pub use usage_history_repo::{UsageHistoryRepository, DEFAULT_FILENAME};
