// ==========================================
// 薬剤在庫管理・発注計算システム - リポジトリ層エラー型
// ==========================================
// 方針: 読み込み側の破損は吸収（空ストア扱い）、
//       書き込み失敗のみ呼び出し側へ返す
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("使用量履歴の書き込みに失敗しました: {0}")]
    Io(#[from] std::io::Error),

    #[error("使用量履歴のシリアライズに失敗しました: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result 型エイリアス
pub type RepositoryResult<T> = Result<T, RepositoryError>;
