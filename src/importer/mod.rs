// ==========================================
// 薬剤在庫管理・発注計算システム - 取込層
// ==========================================
// 職責: 外部スナップショット（CSV）の読み込みと型付け
// 方針: スキーマ異常は即エラー、セル値の汚れは 0.0 に吸収
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重導出
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, RawTable};
