pub mod images;
pub mod library;
pub mod recent;
pub mod settings;
pub mod state;

pub use images::format::{detect_format, supported_extensions, ImageFormat};
pub use images::model::{FolderNode, IncomingFile, IngestReport, ReconcileReport};
pub use library::ingest::{ingest_files, IngestError};
pub use library::reconcile::reconcile_extensions;
pub use library::scanner::scan_tree;
pub use recent::RecentRing;
pub use state::AppState;

/// Install the global tracing subscriber. The shell calls this once at
/// startup, before any core operation runs.
pub fn init_logging() {
    tracing_subscriber::fmt::init();
}
