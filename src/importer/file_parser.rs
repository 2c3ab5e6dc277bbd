// ==========================================
// 薬剤在庫管理・発注計算システム - ファイル解析器
// ==========================================
// 職責: CSV → (ヘッダー列, 行マップ列) への変換
// 対応: UTF-8（BOM 許容）。他エンコーディングの判定は対象外、
//       復号失敗はファイル名付きのエラーとして呼び出し側へ返す
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;

/// 解析結果: ヘッダーの並びと、ヘッダー名 → セル値の行マップ
pub type RawTable = (Vec<String>, Vec<HashMap<String, String>>);

pub struct CsvParser;

impl CsvParser {
    /// CSV を読み込む
    ///
    /// skip_rows: ヘッダー行の前にあるゴミ行の数（使用予定ファイルは 4）。
    /// 完全に空白の行は読み飛ばす
    pub fn parse_with_skip(&self, file_path: &Path, skip_rows: usize) -> ImportResult<RawTable> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let bytes = std::fs::read(file_path)?;
        let text = match String::from_utf8(bytes) {
            Ok(t) => t,
            Err(_) => {
                return Err(ImportError::DecodeError(file_path.display().to_string()));
            }
        };
        let mut body = text.strip_prefix('\u{feff}').unwrap_or(&text);

        // skip_rows 行だけ先頭を捨てる
        for _ in 0..skip_rows {
            match body.find('\n') {
                Some(idx) => body = &body[idx + 1..],
                None => {
                    body = "";
                    break;
                }
            }
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 行長の不一致を許容
            .from_reader(body.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 完全空白行はスキップ
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok((headers, records))
    }
}
