//! Document list, upload, download, and delete.

pub mod sink;
pub mod staged;
pub mod state;
pub mod workflow;

pub use sink::{DirectorySink, sanitize_file_name};
pub use staged::StagedFile;
pub use state::DocumentListState;
pub use workflow::{DeleteOutcome, DocumentWorkflow, ListOutcome, UploadOutcome};
