// ==========================================
// 薬剤在庫管理・発注計算システム - 出力層エラー型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("出力ファイルの作成に失敗しました: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 書き出しに失敗しました: {0}")]
    Csv(#[from] csv::Error),
}

/// Result 型エイリアス
pub type ExportResult<T> = Result<T, ExportError>;
