pub mod app_config;
pub mod commission_table;
pub mod export;
pub mod tesseract;

pub use commission_table::CommissionTable;
pub use export::SummaryWriter;
pub use tesseract::TesseractReader;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to load {path}: {reason}")]
    CommissionTable { path: String, reason: String },
    #[error("Failed to write {path}: {source}")]
    Export {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
