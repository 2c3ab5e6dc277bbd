// ==========================================
// 薬剤在庫管理・発注計算システム - 使用量履歴リポジトリ
// ==========================================
// 職責: 品目別使用量履歴の JSON ファイル永続化
// 保存: 変更のたびに全量書き換え（UTF-8、整形出力、非 ASCII 温存）
// 読込: ファイル欠落・破損は空ストアとして扱う（起動を止めない）
// 排他: 単一プロセス・単一スレッド前提。マルチスレッドのホストに
//       組み込む場合は呼び出し側で直列化すること
// ==========================================

use crate::domain::{ItemHistory, UsageObservation};
use crate::importer::DataCleaner;
use crate::repository::error::RepositoryResult;
use chrono::Local;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::{instrument, warn};

/// 既定の保存ファイル名
pub const DEFAULT_FILENAME: &str = "usage_history.json";

pub struct UsageHistoryRepository {
    filepath: PathBuf,
    data: BTreeMap<String, ItemHistory>,
}

impl UsageHistoryRepository {
    /// 指定ディレクトリ内の既定ファイルを開く
    pub fn open(directory: &Path) -> Self {
        Self::with_path(directory.join(DEFAULT_FILENAME))
    }

    /// 保存ファイルパスを直接指定して開く
    pub fn with_path(filepath: PathBuf) -> Self {
        let data = Self::load(&filepath);
        Self { filepath, data }
    }

    fn load(path: &Path) -> BTreeMap<String, ItemHistory> {
        if !path.exists() {
            return BTreeMap::new();
        }
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "履歴ファイルを読めないため空ストアで開始");
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&text) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "履歴ファイルが破損しているため空ストアで開始");
                BTreeMap::new()
            }
        }
    }

    /// 全量をファイルへ書き戻す
    ///
    /// serde_json は非 ASCII をエスケープしないため、薬品名はそのまま残る
    fn save(&self) -> RepositoryResult<()> {
        let json = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&self.filepath, json)?;
        Ok(())
    }

    /// 1件の観測を登録・更新して永続化する
    ///
    /// - コードが空（トリム後）なら何もしない
    /// - 薬品名は最終書き込みが勝つ
    /// - 同一コード・同一日付の既存レコードは数量を上書き（追記しない）
    pub fn upsert(&mut self, code: &str, name: &str, quantity: f64, date: &str) -> RepositoryResult<()> {
        if self.apply_upsert(code, name, quantity, date) {
            self.save()?;
        }
        Ok(())
    }

    /// 永続化せずに upsert を適用する。適用されたら true
    fn apply_upsert(&mut self, code: &str, name: &str, quantity: f64, date: &str) -> bool {
        let code = code.trim();
        if code.is_empty() {
            return false;
        }

        let entry = self
            .data
            .entry(code.to_string())
            .or_insert_with(|| ItemHistory {
                name: name.to_string(),
                records: Vec::new(),
            });

        match entry.records.iter_mut().find(|r| r.date == date) {
            Some(rec) => rec.quantity = quantity,
            None => entry.records.push(UsageObservation {
                date: date.to_string(),
                quantity,
            }),
        }

        // 名前を最新に更新
        entry.name = name.to_string();
        true
    }

    /// 使用予定の行マップ一括登録（1バッチ1保存）
    ///
    /// - 数量セルは寛容に変換（変換不能 → 0.0）
    /// - date 省略時は今日
    ///
    /// 戻り値: 適用された行数
    #[instrument(skip_all, fields(rows = rows.len()))]
    pub fn bulk_upsert(
        &mut self,
        rows: &[HashMap<String, String>],
        code_field: &str,
        name_field: &str,
        quantity_field: &str,
        date: Option<chrono::NaiveDate>,
    ) -> RepositoryResult<usize> {
        let date_str = date
            .unwrap_or_else(|| Local::now().date_naive())
            .format("%Y-%m-%d")
            .to_string();
        let cleaner = DataCleaner;

        let mut applied = 0;
        for row in rows {
            let code = row.get(code_field).map(|v| v.as_str()).unwrap_or("");
            let name = row.get(name_field).map(|v| v.as_str()).unwrap_or("");
            let quantity = cleaner.to_number(row.get(quantity_field).map(|v| v.as_str()).unwrap_or(""));

            if self.apply_upsert(code, name, quantity, &date_str) {
                applied += 1;
            }
        }

        self.save()?;
        Ok(applied)
    }

    /// 指定コード・日付のレコードを1件削除して即永続化する
    ///
    /// レコードが空になったコードはストアから取り除く。
    /// 戻り値: 削除が起きたか
    pub fn delete_observation(&mut self, code: &str, date: &str) -> RepositoryResult<bool> {
        let Some(history) = self.data.get_mut(code) else {
            return Ok(false);
        };

        let before = history.records.len();
        history.records.retain(|r| r.date != date);
        let removed = history.records.len() != before;

        if history.records.is_empty() {
            self.data.remove(code);
        }
        self.save()?;
        Ok(removed)
    }

    /// 全データを消去して空の状態を永続化する
    pub fn clear(&mut self) -> RepositoryResult<()> {
        self.data.clear();
        self.save()
    }

    /// 蓄積されているユニーク日付の数（「何日分のデータか」の目安）
    pub fn observation_date_count(&self) -> usize {
        let mut dates: BTreeSet<&str> = BTreeSet::new();
        for history in self.data.values() {
            for rec in &history.records {
                dates.insert(rec.date.as_str());
            }
        }
        dates.len()
    }

    /// 蓄積されている品目数
    pub fn item_count(&self) -> usize {
        self.data.len()
    }

    pub fn get(&self, code: &str) -> Option<&ItemHistory> {
        self.data.get(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ItemHistory)> {
        self.data.iter()
    }

    pub fn path(&self) -> &Path {
        &self.filepath
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_yields_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = UsageHistoryRepository::open(dir.path());
        assert_eq!(store.item_count(), 0);
        assert_eq!(store.observation_date_count(), 0);
    }

    #[test]
    fn test_open_corrupt_file_yields_empty_store() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_FILENAME), "{ not json !!").unwrap();

        let store = UsageHistoryRepository::open(dir.path());
        assert_eq!(store.item_count(), 0);
    }

    #[test]
    fn test_upsert_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = UsageHistoryRepository::open(dir.path());

        store.upsert("A001", "アスピリン錠", 40.0, "2026-01-01").unwrap();
        store.upsert("A001", "アスピリン錠", 40.0, "2026-01-01").unwrap();

        let history = store.get("A001").unwrap();
        assert_eq!(history.records.len(), 1);
        assert_eq!(history.records[0].quantity, 40.0);
    }

    #[test]
    fn test_upsert_same_date_overwrites_quantity_and_name() {
        let dir = TempDir::new().unwrap();
        let mut store = UsageHistoryRepository::open(dir.path());

        store.upsert("A001", "旧名称", 10.0, "2026-01-01").unwrap();
        store.upsert("A001", "新名称", 20.0, "2026-01-01").unwrap();

        let history = store.get("A001").unwrap();
        assert_eq!(history.name, "新名称");
        assert_eq!(history.records.len(), 1);
        assert_eq!(history.records[0].quantity, 20.0);
    }

    #[test]
    fn test_upsert_empty_code_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = UsageHistoryRepository::open(dir.path());

        store.upsert("   ", "名無し", 5.0, "2026-01-01").unwrap();

        assert_eq!(store.item_count(), 0);
        // 保存も走らない（ファイル未作成）
        assert!(!dir.path().join(DEFAULT_FILENAME).exists());
    }

    #[test]
    fn test_bulk_upsert_lenient_quantities() {
        let dir = TempDir::new().unwrap();
        let mut store = UsageHistoryRepository::open(dir.path());

        let rows: Vec<HashMap<String, String>> = vec![
            [("薬剤ｺｰﾄﾞ", "A001"), ("薬剤名", "アスピリン錠"), ("使用予定量", "1,200")],
            [("薬剤ｺｰﾄﾞ", "B002"), ("薬剤名", "ガーゼ"), ("使用予定量", "数量不明")],
            [("薬剤ｺｰﾄﾞ", ""), ("薬剤名", "コード無し"), ("使用予定量", "5")],
        ]
        .into_iter()
        .map(|pairs| {
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        })
        .collect();

        let date = NaiveDate::from_ymd_opt(2026, 2, 19);
        let applied = store
            .bulk_upsert(&rows, "薬剤ｺｰﾄﾞ", "薬剤名", "使用予定量", date)
            .unwrap();

        assert_eq!(applied, 2);
        assert_eq!(store.get("A001").unwrap().records[0].quantity, 1200.0);
        // 変換不能は 0.0 に丸めて件は残す
        assert_eq!(store.get("B002").unwrap().records[0].quantity, 0.0);
        assert_eq!(store.get("B002").unwrap().records[0].date, "2026-02-19");
        assert!(store.get("").is_none());
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = UsageHistoryRepository::open(dir.path());
            store.upsert("A001", "アスピリン錠", 40.0, "2026-01-01").unwrap();
            store.upsert("A001", "アスピリン錠", 55.0, "2026-01-02").unwrap();
            store.upsert("B002", "ガーゼ", 10.0, "2026-01-01").unwrap();
        }

        let reloaded = UsageHistoryRepository::open(dir.path());
        assert_eq!(reloaded.item_count(), 2);
        let a = reloaded.get("A001").unwrap();
        assert_eq!(a.name, "アスピリン錠");
        assert_eq!(a.records.len(), 2);
        assert_eq!(reloaded.observation_date_count(), 2);
    }

    #[test]
    fn test_saved_json_keeps_non_ascii_literal() {
        let dir = TempDir::new().unwrap();
        let mut store = UsageHistoryRepository::open(dir.path());
        store.upsert("A001", "アスピリン錠", 40.0, "2026-01-01").unwrap();

        let text = std::fs::read_to_string(dir.path().join(DEFAULT_FILENAME)).unwrap();
        assert!(text.contains("アスピリン錠"));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_delete_last_observation_removes_code() {
        let dir = TempDir::new().unwrap();
        let mut store = UsageHistoryRepository::open(dir.path());
        store.upsert("A001", "アスピリン錠", 40.0, "2026-01-01").unwrap();
        assert_eq!(store.observation_date_count(), 1);

        let removed = store.delete_observation("A001", "2026-01-01").unwrap();

        assert!(removed);
        assert!(store.get("A001").is_none());
        assert_eq!(store.observation_date_count(), 0);

        // 削除は即永続化される
        let reloaded = UsageHistoryRepository::open(dir.path());
        assert_eq!(reloaded.item_count(), 0);
    }

    #[test]
    fn test_delete_unknown_code_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = UsageHistoryRepository::open(dir.path());
        let removed = store.delete_observation("ZZZZ", "2026-01-01").unwrap();
        assert!(!removed);
    }

    #[test]
    fn test_clear_persists_empty_state() {
        let dir = TempDir::new().unwrap();
        let mut store = UsageHistoryRepository::open(dir.path());
        store.upsert("A001", "アスピリン錠", 40.0, "2026-01-01").unwrap();

        store.clear().unwrap();

        assert_eq!(store.item_count(), 0);
        let reloaded = UsageHistoryRepository::open(dir.path());
        assert_eq!(reloaded.item_count(), 0);
    }

    #[test]
    fn test_observation_date_count_distinct_across_items() {
        let dir = TempDir::new().unwrap();
        let mut store = UsageHistoryRepository::open(dir.path());
        store.upsert("A001", "アスピリン錠", 40.0, "2026-01-01").unwrap();
        store.upsert("B002", "ガーゼ", 10.0, "2026-01-01").unwrap();
        store.upsert("A001", "アスピリン錠", 42.0, "2026-01-02").unwrap();

        // 2品目・3レコードだがユニーク日付は 2
        assert_eq!(store.observation_date_count(), 2);
    }
}
