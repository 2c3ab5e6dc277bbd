// ==========================================
// 薬剤在庫管理・発注計算システム - 取込層エラー型
// ==========================================
// 工具: thiserror 派生マクロ
// 方針: 数値の変換失敗はエラーにしない（0.0 に丸める）
// ==========================================

use thiserror::Error;

/// 取込層エラー型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== ファイル関連 =====
    #[error("ファイルが存在しません: {0}")]
    FileNotFound(String),

    #[error("文字コードを判定できませんでした: {0}")]
    DecodeError(String),

    #[error("ファイル読み込みに失敗しました: {0}")]
    FileReadError(String),

    #[error("CSV 解析に失敗しました: {0}")]
    CsvParseError(String),

    // ===== スキーマ関連 =====
    #[error(
        "{file} に必要なカラムがありません: {}（検出されたカラム: {}）",
        .missing.join(", "),
        .detected.join(", ")
    )]
    MissingColumns {
        /// どのスナップショットか（在庫ファイル / 使用予定ファイル）
        file: String,
        missing: Vec<String>,
        detected: Vec<String>,
    },

    // ===== 汎用 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 型エイリアス
pub type ImportResult<T> = Result<T, ImportError>;
