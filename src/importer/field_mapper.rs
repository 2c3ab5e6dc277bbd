// ==========================================
// 薬剤在庫管理・発注計算システム - 項目マッパー
// ==========================================
// 職責: 必須カラム検査 + 行マップ → 型付きレコードへの変換
// 方針: カラム欠落は不足カラム名と検出カラム一覧を添えて即エラー、
//       数値セルは寛容に変換（data_cleaner 参照）
// ==========================================

use crate::config::{InventoryColumns, ScheduleColumns};
use crate::domain::{InventoryRecord, ScheduleRecord};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 必須カラムの存在検査
    ///
    /// 欠けているカラムがあれば、不足分すべてと検出されたヘッダー全体を
    /// 1つのエラーにまとめて返す（入力の修正を助けるため）
    pub fn check_required(
        &self,
        file_label: &str,
        headers: &[String],
        required: &[&str],
    ) -> ImportResult<()> {
        let missing: Vec<String> = required
            .iter()
            .filter(|r| !headers.iter().any(|h| h == *r))
            .map(|r| r.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ImportError::MissingColumns {
                file: file_label.to_string(),
                missing,
                detected: headers.to_vec(),
            })
        }
    }

    /// 在庫スナップショットの行マップを `InventoryRecord` へ変換する
    ///
    /// コードが空欄の行は照合対象外として落とす
    pub fn map_inventory(
        &self,
        rows: &[HashMap<String, String>],
        columns: &InventoryColumns,
    ) -> Vec<InventoryRecord> {
        rows.iter()
            .filter_map(|row| {
                let code = self.cleaner.clean_text(self.get(row, &columns.code));
                if code.is_empty() {
                    return None;
                }
                Some(InventoryRecord {
                    code,
                    name: self.get(row, &columns.name).to_string(),
                    unit: self.get(row, &columns.unit).to_string(),
                    stock_quantity: self.cleaner.to_number(self.get(row, &columns.stock)),
                })
            })
            .collect()
    }

    /// 使用予定スナップショットの行マップを `ScheduleRecord` へ変換する
    pub fn map_schedule(
        &self,
        rows: &[HashMap<String, String>],
        columns: &ScheduleColumns,
    ) -> Vec<ScheduleRecord> {
        rows.iter()
            .filter_map(|row| {
                let code = self.cleaner.clean_text(self.get(row, &columns.code));
                if code.is_empty() {
                    return None;
                }
                Some(ScheduleRecord {
                    code,
                    name: self.get(row, &columns.name).to_string(),
                    unit_price: self.cleaner.to_number(self.get(row, &columns.price)),
                    planned_quantity: self.cleaner.to_number(self.get(row, &columns.quantity)),
                })
            })
            .collect()
    }

    fn get<'a>(&self, row: &'a HashMap<String, String>, key: &str) -> &'a str {
        row.get(key).map(|v| v.as_str()).unwrap_or("")
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_check_required_ok() {
        let mapper = FieldMapper::new();
        let headers = vec![
            "レセコンコード".to_string(),
            "薬品名".to_string(),
            "単位".to_string(),
            "在庫数".to_string(),
        ];
        let result = mapper.check_required(
            "在庫ファイル",
            &headers,
            &["レセコンコード", "薬品名", "単位", "在庫数"],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_required_missing() {
        let mapper = FieldMapper::new();
        let headers = vec!["レセコンコード".to_string(), "薬品名".to_string()];
        let result = mapper.check_required(
            "在庫ファイル",
            &headers,
            &["レセコンコード", "薬品名", "単位", "在庫数"],
        );

        match result {
            Err(ImportError::MissingColumns { file, missing, detected }) => {
                assert_eq!(file, "在庫ファイル");
                assert_eq!(missing, vec!["単位".to_string(), "在庫数".to_string()]);
                assert_eq!(detected.len(), 2);
            }
            other => panic!("MissingColumns を期待: {:?}", other.err()),
        }
    }

    #[test]
    fn test_map_inventory_basic() {
        let mapper = FieldMapper::new();
        let rows = vec![row(&[
            ("レセコンコード", " A001 "),
            ("薬品名", "アスピリン錠"),
            ("単位", "錠"),
            ("在庫数", "1,200"),
        ])];

        let records = mapper.map_inventory(&rows, &InventoryColumns::default());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "A001");
        assert_eq!(records[0].stock_quantity, 1200.0);
    }

    #[test]
    fn test_map_inventory_drops_empty_code() {
        let mapper = FieldMapper::new();
        let rows = vec![
            row(&[("レセコンコード", "  "), ("在庫数", "5")]),
            row(&[("レセコンコード", "B002"), ("在庫数", "10")]),
        ];

        let records = mapper.map_inventory(&rows, &InventoryColumns::default());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "B002");
    }

    #[test]
    fn test_map_schedule_lenient_numbers() {
        let mapper = FieldMapper::new();
        let rows = vec![row(&[
            ("薬剤ｺｰﾄﾞ", "C003"),
            ("薬剤名", "ガーゼ"),
            ("薬価", "不明"),
            ("使用予定量", ""),
        ])];

        let records = mapper.map_schedule(&rows, &ScheduleColumns::default());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].unit_price, 0.0);
        assert_eq!(records[0].planned_quantity, 0.0);
    }
}
