// ==========================================
// 薬剤在庫管理・発注計算システム - CLI エントリポイント
// ==========================================
// 使い方: pharma-inventory <在庫CSV> <使用予定CSV> [出力ディレクトリ]
// 流れ: 解析 → スキーマ検査 → 照合 → CSV 出力 → 使用量蓄積 → 統計出力
// ==========================================

use anyhow::{Context, Result};
use pharma_inventory::config::AppConfig;
use pharma_inventory::engine::{ReconcileEngine, StatisticsEngine};
use pharma_inventory::export::CsvExporter;
use pharma_inventory::importer::{CsvParser, FieldMapper};
use pharma_inventory::repository::UsageHistoryRepository;
use std::path::{Path, PathBuf};
use tracing::info;

fn main() -> Result<()> {
    pharma_inventory::logging::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "使い方: {} <在庫CSV> <使用予定CSV> [出力ディレクトリ]",
            args.first().map(|s| s.as_str()).unwrap_or("pharma-inventory")
        );
        std::process::exit(2);
    }

    let inventory_path = Path::new(&args[1]);
    let schedule_path = Path::new(&args[2]);
    let out_dir = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    // 設定（無ければ既定値）
    let config = AppConfig::load(Path::new("pharma-inventory.json"));

    // 1. スナップショット読み込み
    let parser = CsvParser;
    let (inv_headers, inv_rows) = parser
        .parse_with_skip(inventory_path, 0)
        .context("在庫ファイルの読み込みに失敗しました")?;
    let (sch_headers, sch_rows) = parser
        .parse_with_skip(schedule_path, config.schedule_skip_rows)
        .context("使用予定ファイルの読み込みに失敗しました")?;

    // 2. スキーマ検査
    let mapper = FieldMapper::new();
    mapper.check_required("在庫ファイル", &inv_headers, &config.required_inventory_columns())?;
    mapper.check_required("使用予定ファイル", &sch_headers, &config.required_schedule_columns())?;

    // 3. 型付け + 照合
    let inventory = mapper.map_inventory(&inv_rows, &config.inventory_columns);
    let schedule = mapper.map_schedule(&sch_rows, &config.schedule_columns);

    let result = ReconcileEngine::new().reconcile(&inventory, &schedule);

    // 4. 候補リスト出力
    std::fs::create_dir_all(&out_dir)?;
    let exporter = CsvExporter::new();
    exporter.write_surplus(&out_dir.join("返品候補リスト.csv"), &result.surplus)?;
    exporter.write_shortage(&out_dir.join("発注候補リスト.csv"), &result.shortage)?;

    info!(
        surplus = result.surplus.len(),
        shortage = result.shortage.len(),
        total_cost = format!("¥{:.0}", result.total_estimated_cost()),
        "計算完了"
    );

    // 5. 使用予定の蓄積と統計出力
    let history_dir = config.resolve_history_dir();
    std::fs::create_dir_all(&history_dir)?;
    let mut store = UsageHistoryRepository::open(&history_dir);
    let applied = store.bulk_upsert(
        &sch_rows,
        &config.schedule_columns.code,
        &config.schedule_columns.name,
        &config.schedule_columns.quantity,
        None,
    )?;

    let summaries = StatisticsEngine::new().summarize(&store);
    exporter.write_statistics(&out_dir.join("使用量統計.csv"), &summaries)?;

    info!(
        applied,
        days = store.observation_date_count(),
        items = store.item_count(),
        "使用量履歴を更新"
    );

    Ok(())
}
