// ==========================================
// 薬剤在庫管理・発注計算システム - 設定層
// ==========================================
// 職責: カラム名・スキップ行数・履歴保存先の設定管理
// 方針: 設定ファイルが無い/壊れている場合は既定値で続行
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 在庫スナップショットのカラム名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryColumns {
    pub code: String,
    pub name: String,
    pub unit: String,
    pub stock: String,
}

impl Default for InventoryColumns {
    fn default() -> Self {
        Self {
            code: "レセコンコード".to_string(),
            name: "薬品名".to_string(),
            unit: "単位".to_string(),
            stock: "在庫数".to_string(),
        }
    }
}

/// 使用予定スナップショットのカラム名
///
/// 在庫側とコード列名が異なる点に注意（外部システム由来）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleColumns {
    pub code: String,
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl Default for ScheduleColumns {
    fn default() -> Self {
        Self {
            code: "薬剤ｺｰﾄﾞ".to_string(),
            name: "薬剤名".to_string(),
            price: "薬価".to_string(),
            quantity: "使用予定量".to_string(),
        }
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub inventory_columns: InventoryColumns,
    pub schedule_columns: ScheduleColumns,
    /// 使用予定ファイルのヘッダー前ゴミ行数
    pub schedule_skip_rows: usize,
    /// 使用量履歴の保存ディレクトリ（未指定ならデータディレクトリ）
    pub history_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            inventory_columns: InventoryColumns::default(),
            schedule_columns: ScheduleColumns::default(),
            schedule_skip_rows: 4,
            history_dir: None,
        }
    }
}

impl AppConfig {
    /// JSON 設定ファイルを読み込む
    ///
    /// ファイルが無い・読めない・解析できない場合は既定値を返す
    /// （履歴ストアと同じ寛容ポリシー）
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// 履歴保存先ディレクトリを解決する
    pub fn resolve_history_dir(&self) -> PathBuf {
        match &self.history_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("pharma-inventory"),
        }
    }

    /// 在庫ファイルの必須カラム一覧
    pub fn required_inventory_columns(&self) -> Vec<&str> {
        vec![
            &self.inventory_columns.code,
            &self.inventory_columns.name,
            &self.inventory_columns.unit,
            &self.inventory_columns.stock,
        ]
    }

    /// 使用予定ファイルの必須カラム一覧
    pub fn required_schedule_columns(&self) -> Vec<&str> {
        vec![
            &self.schedule_columns.code,
            &self.schedule_columns.name,
            &self.schedule_columns.price,
            &self.schedule_columns.quantity,
        ]
    }
}
