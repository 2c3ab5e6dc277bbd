// ==========================================
// 薬剤在庫管理・発注計算システム - データ清掃
// ==========================================
// 職責: TRIM / 数値の寛容な変換
// 方針: 汚れた値で計算全体を止めない（変換不能 → 0.0）
// ==========================================

pub struct DataCleaner;

impl DataCleaner {
    /// 前後空白を除去した文字列を返す
    pub fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// カンマ区切り文字列を f64 に変換する
    ///
    /// - 桁区切りは半角 "," と全角 "，" の両方を除去
    /// - 空欄・変換不能は 0.0（エラーにしない）
    pub fn to_number(&self, value: &str) -> f64 {
        let s: String = value
            .chars()
            .filter(|c| *c != ',' && *c != '，')
            .collect();
        let s = s.trim();
        if s.is_empty() {
            return 0.0;
        }
        s.parse::<f64>().unwrap_or(0.0)
    }
}
