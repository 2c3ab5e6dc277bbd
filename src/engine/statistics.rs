// ==========================================
// 薬剤在庫管理・発注計算システム - 統計エンジン
// ==========================================
// 職責: 蓄積履歴から品目別の記述統計を算出
// 方針: 毎回全レコードから再計算（増分集計を持たない。
//       レコード数は営業日数で頭打ちになるため十分軽い）
// 赤線: 標準偏差は不偏分散（n−1 で割る）。数値互換のため変更不可
// ==========================================

use crate::domain::{UsageObservation, UsageSummary};
use crate::repository::UsageHistoryRepository;
use tracing::instrument;

pub struct StatisticsEngine;

impl StatisticsEngine {
    pub fn new() -> Self {
        Self
    }

    /// 全品目の統計サマリーを返す
    ///
    /// レコードが 1 件以上ある品目のみ対象。
    /// count == 1 のとき標準偏差は厳密に 0.0
    #[instrument(skip_all, fields(items = store.item_count()))]
    pub fn summarize(&self, store: &UsageHistoryRepository) -> Vec<UsageSummary> {
        let mut result = Vec::new();

        for (code, history) in store.iter() {
            let records = &history.records;
            if records.is_empty() {
                continue;
            }

            let n = records.len();
            let sum: f64 = records.iter().map(|r| r.quantity).sum();
            let mean = sum / n as f64;

            let stddev = if n >= 2 {
                let variance: f64 = records
                    .iter()
                    .map(|r| (r.quantity - mean).powi(2))
                    .sum::<f64>()
                    / (n - 1) as f64;
                variance.sqrt()
            } else {
                0.0
            };

            let min = records.iter().map(|r| r.quantity).fold(f64::INFINITY, f64::min);
            let max = records
                .iter()
                .map(|r| r.quantity)
                .fold(f64::NEG_INFINITY, f64::max);

            // 日付は ISO 8601 文字列なので辞書順の最大が最新
            let latest = records
                .iter()
                .max_by(|a, b| a.date.cmp(&b.date))
                .expect("records is non-empty");

            result.push(UsageSummary {
                code: code.clone(),
                name: history.name.clone(),
                count: n,
                mean,
                stddev,
                min,
                max,
                latest_date: latest.date.clone(),
                latest_quantity: latest.quantity,
            });
        }

        result
    }

    /// 指定コードの全レコードを日付昇順で返す
    ///
    /// データが変わらない限り呼び出しごとに同じ並びを返す
    pub fn detail(&self, store: &UsageHistoryRepository, code: &str) -> Vec<UsageObservation> {
        let mut records = store
            .get(code)
            .map(|h| h.records.clone())
            .unwrap_or_default();
        records.sort_by(|a, b| a.date.cmp(&b.date));
        records
    }
}

impl Default for StatisticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(records: &[(&str, &str, f64, &str)]) -> (TempDir, UsageHistoryRepository) {
        let dir = TempDir::new().unwrap();
        let mut store = UsageHistoryRepository::open(dir.path());
        for (code, name, qty, date) in records {
            store.upsert(code, name, *qty, date).unwrap();
        }
        (dir, store)
    }

    #[test]
    fn test_mean_and_sample_stddev() {
        let (_dir, store) = store_with(&[
            ("A001", "アスピリン錠", 10.0, "2026-01-01"),
            ("A001", "アスピリン錠", 20.0, "2026-01-02"),
            ("A001", "アスピリン錠", 30.0, "2026-01-03"),
        ]);

        let summaries = StatisticsEngine::new().summarize(&store);

        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert_eq!(s.count, 3);
        assert_eq!(s.mean, 20.0);
        // 不偏分散 = ((10-20)² + 0 + (30-20)²) / 2 = 100
        assert_eq!(s.stddev, 10.0);
        assert_eq!(s.min, 10.0);
        assert_eq!(s.max, 30.0);
        assert_eq!(s.latest_date, "2026-01-03");
        assert_eq!(s.latest_quantity, 30.0);
        assert_eq!(s.safety_stock(), 30.0);
    }

    #[test]
    fn test_single_observation_stddev_is_exactly_zero() {
        let (_dir, store) = store_with(&[("B002", "ガーゼ", 123.4, "2026-02-19")]);

        let summaries = StatisticsEngine::new().summarize(&store);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].stddev, 0.0);
        assert_eq!(summaries[0].safety_stock(), summaries[0].mean);
    }

    #[test]
    fn test_latest_is_max_date_not_insertion_order() {
        // 挿入順と日付順が異なるケース
        let (_dir, store) = store_with(&[
            ("A001", "アスピリン錠", 50.0, "2026-03-01"),
            ("A001", "アスピリン錠", 70.0, "2026-01-15"),
        ]);

        let summaries = StatisticsEngine::new().summarize(&store);

        assert_eq!(summaries[0].latest_date, "2026-03-01");
        assert_eq!(summaries[0].latest_quantity, 50.0);
    }

    #[test]
    fn test_detail_sorted_ascending_and_stable() {
        let (_dir, store) = store_with(&[
            ("A001", "アスピリン錠", 30.0, "2026-01-03"),
            ("A001", "アスピリン錠", 10.0, "2026-01-01"),
            ("A001", "アスピリン錠", 20.0, "2026-01-02"),
        ]);

        let engine = StatisticsEngine::new();
        let first = engine.detail(&store, "A001");
        let second = engine.detail(&store, "A001");

        let dates: Vec<&str> = first.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-01-01", "2026-01-02", "2026-01-03"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_detail_unknown_code_is_empty() {
        let (_dir, store) = store_with(&[]);
        let records = StatisticsEngine::new().detail(&store, "ZZZZ");
        assert!(records.is_empty());
    }
}
