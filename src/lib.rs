pub mod cache;
pub mod config;
pub mod guide;
pub mod mapping;
pub mod resolve;
pub mod server;
pub mod utils;

// Re-export commonly used types
pub use cache::{source_signal, MappingCache, SourceSignal};
pub use config::{read_config, ParecerConfig};
pub use guide::{GuideContext, GuideEngine, GuideError};
pub use mapping::{
    load, load_mapping, ColumnLayout, Mapping, MappingEntry, MappingError, StudentRoster,
};
pub use resolve::{
    fetch_document, resolve_for_student, Document, FetchError, FileKind, ResolvedFile,
};
pub use server::ParecerDaemonService;
