pub mod directory;
pub mod host;
pub mod memory;
pub mod trigger;

pub use directory::DirectoryHost;
pub use host::{Anchor, Blob, DownloadHost, ObjectUrl};
pub use memory::{MemoryHost, SavedDownload};
pub use trigger::{download_csv, download_csv_default, CSV_MIME, DEFAULT_FILENAME};
