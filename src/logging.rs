// ==========================================
// ログシステム初期化
// ==========================================
// tracing + tracing-subscriber
// 環境変数でログレベルを設定可能
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// ログシステムを初期化する
///
/// # 環境変数
/// - RUST_LOG: ログレベルフィルター（既定: info）
///   例: RUST_LOG=debug / RUST_LOG=pharma_inventory=trace
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// テスト用の初期化（多重初期化を許容）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
