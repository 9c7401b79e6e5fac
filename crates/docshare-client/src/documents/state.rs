//! Observable state of the document view.

use docshare_core::types::{Document, DocumentId};

use super::staged::StagedFile;

/// Locally held projection of the service's document list, plus the
/// staged upload.
///
/// The two counters fence List responses: `latest_list` is the sequence
/// number of the most recently issued List, `epoch` increases on every
/// confirmed local mutation (delete, upload).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentListState {
    pub(crate) documents: Vec<Document>,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
    pub(crate) staged: Option<StagedFile>,
    pub(crate) uploading: bool,
    pub(crate) latest_list: u64,
    pub(crate) epoch: u64,
}

impl DocumentListState {
    /// Documents from the last applied List, minus confirmed deletions.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Whether the most recent List is still in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed List, cleared by the next successful one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// File waiting to be uploaded.
    pub fn staged(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    /// Whether an upload is in flight.
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Look up a document by id.
    pub fn find(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.iter().find(|doc| &doc.id == id)
    }

    /// Number of confirmed local mutations so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
