//! Document workflow: keeps the local list consistent with the service.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use docshare_core::error::{AppError, ErrorKind};
use docshare_core::result::AppResult;
use docshare_core::traits::DownloadSink;
use docshare_core::types::{Document, DocumentId};

use super::staged::StagedFile;
use super::state::DocumentListState;
use crate::http::ApiClient;

/// Result of a List call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    /// The response replaced the local list.
    Applied(Vec<Document>),
    /// A newer List was issued, or the list was mutated locally while this
    /// one was in flight. The response was discarded.
    Superseded,
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    /// The created document, when the service echoed it back.
    pub document: Option<Document>,
    /// Whether the follow-up List was applied.
    pub refreshed: bool,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The service deleted the document and it was removed locally.
    Deleted,
    /// Confirmation was refused; nothing was sent.
    Declined,
}

/// List, upload, download, and delete against the service.
///
/// Each workflow belongs to one consuming view. Dropping it (or calling
/// [`DocumentWorkflow::close`]) cancels in-flight requests, which then
/// fail with [`ErrorKind::Cancelled`] without touching state.
#[derive(Debug)]
pub struct DocumentWorkflow {
    /// Client for document endpoints.
    api: ApiClient,
    /// Where downloads are saved.
    sink: Arc<dyn DownloadSink>,
    /// Published view state.
    state: watch::Sender<DocumentListState>,
    /// Cancelled when the owning view goes away.
    cancel: CancellationToken,
}

impl DocumentWorkflow {
    /// Creates a workflow with an empty list.
    pub fn new(api: ApiClient, sink: Arc<dyn DownloadSink>) -> Self {
        Self::with_cancellation(api, sink, CancellationToken::new())
    }

    /// Creates a workflow cancelled together with `parent`.
    pub fn with_parent(
        api: ApiClient,
        sink: Arc<dyn DownloadSink>,
        parent: &CancellationToken,
    ) -> Self {
        Self::with_cancellation(api, sink, parent.child_token())
    }

    fn with_cancellation(
        api: ApiClient,
        sink: Arc<dyn DownloadSink>,
        cancel: CancellationToken,
    ) -> Self {
        let (state, _) = watch::channel(DocumentListState::default());
        Self {
            api,
            sink,
            state,
            cancel,
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<DocumentListState> {
        self.state.subscribe()
    }

    /// Current state.
    pub fn snapshot(&self) -> DocumentListState {
        self.state.borrow().clone()
    }

    /// Documents currently held locally.
    pub fn documents(&self) -> Vec<Document> {
        self.state.borrow().documents.clone()
    }

    /// Look up a locally held document.
    pub fn find(&self, id: &DocumentId) -> Option<Document> {
        self.state.borrow().find(id).cloned()
    }

    /// Cancel in-flight requests and refuse new ones.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    /// Whether the workflow has been closed.
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fetch the full list and replace the local copy.
    ///
    /// On failure the previous list is kept and the error indicator set.
    /// Stale responses (see [`ListOutcome::Superseded`]) are discarded.
    pub async fn list(&self) -> AppResult<ListOutcome> {
        self.ensure_open()?;
        let (seq, epoch) = self.update(|s| {
            s.latest_list += 1;
            s.loading = true;
            (s.latest_list, s.epoch)
        });
        debug!(seq, epoch, "Listing documents");

        match self.guarded(self.api.list_documents()).await {
            Ok(documents) => Ok(self.update(|s| {
                let is_latest = s.latest_list == seq;
                if is_latest {
                    s.loading = false;
                }
                if is_latest && s.epoch == epoch {
                    s.documents = documents.clone();
                    s.error = None;
                    ListOutcome::Applied(documents)
                } else {
                    debug!(seq, latest = s.latest_list, "Discarding stale document list");
                    ListOutcome::Superseded
                }
            })),
            Err(e) if e.kind == ErrorKind::Cancelled => Err(e),
            Err(e) => {
                let err = AppError::wrap(
                    ErrorKind::ListFailed,
                    "Failed to load documents",
                    e,
                );
                self.update(|s| {
                    if s.latest_list == seq {
                        s.loading = false;
                        s.error = Some(err.message.clone());
                    }
                });
                warn!(error = %err, "Document list failed");
                Err(err)
            }
        }
    }

    /// Stage a file for upload, replacing any previous selection.
    pub fn stage(&self, file: StagedFile) {
        self.update(|s| s.staged = Some(file));
    }

    /// Drop the staged file.
    pub fn unstage(&self) {
        self.update(|s| s.staged = None);
    }

    /// Stage a file from disk and upload it.
    pub async fn upload_path(&self, path: &Path, name: Option<&str>) -> AppResult<UploadOutcome> {
        let file = StagedFile::from_path(path, name).await?;
        self.stage(file);
        self.upload().await
    }

    /// Upload the staged file, then refresh the list.
    ///
    /// With nothing staged this fails with `NoFileSelected` and sends
    /// nothing. On failure the staged file is kept for a retry.
    pub async fn upload(&self) -> AppResult<UploadOutcome> {
        self.ensure_open()?;
        let staged = self
            .state
            .borrow()
            .staged
            .clone()
            .ok_or_else(AppError::no_file_selected)?;

        self.update(|s| s.uploading = true);
        let result = self
            .guarded(self.api.upload(&staged.name, &staged.mime_type, staged.data.clone()))
            .await;

        let document = match result {
            Ok(document) => document,
            Err(e) if e.kind == ErrorKind::Cancelled => return Err(e),
            Err(e) => {
                self.update(|s| s.uploading = false);
                let err = AppError::wrap(
                    ErrorKind::UploadFailed,
                    "Failed to upload the document. Please try again.",
                    e,
                );
                warn!(error = %err, file = %staged.name, "Upload failed");
                return Err(err);
            }
        };

        self.update(|s| {
            s.uploading = false;
            s.epoch += 1;
            if s.staged.as_ref() == Some(&staged) {
                s.staged = None;
            }
        });
        info!(file = %staged.name, bytes = staged.size(), "Document uploaded");

        let refreshed = match self.list().await {
            Ok(outcome) => matches!(outcome, ListOutcome::Applied(_)),
            Err(e) if e.kind == ErrorKind::Cancelled => return Err(e),
            Err(e) => {
                warn!(error = %e, "Refresh after upload failed");
                false
            }
        };

        Ok(UploadOutcome {
            document,
            refreshed,
        })
    }

    /// Download a document and hand it to the sink.
    ///
    /// The saved file is named after the document's stored name. The list
    /// is never modified.
    pub async fn download(&self, id: &DocumentId) -> AppResult<PathBuf> {
        self.ensure_open()?;
        let known_name = self.find(id).map(|doc| doc.name);

        let content = self
            .guarded(self.api.download(id))
            .await
            .map_err(|e| download_failed(id, e))?;

        let file_name = known_name
            .or(content.suggested_name)
            .unwrap_or_else(|| id.to_string());

        let path = self
            .guarded(self.sink.save(&file_name, content.data))
            .await
            .map_err(|e| download_failed(id, e))?;
        info!(id = %id, path = %path.display(), "Document downloaded");
        Ok(path)
    }

    /// Delete a document after `confirm` approves it.
    ///
    /// The document leaves the local list only once the service confirms
    /// the deletion. On failure the list is unchanged.
    pub async fn delete(
        &self,
        id: &DocumentId,
        confirm: impl FnOnce(&DocumentId) -> bool,
    ) -> AppResult<DeleteOutcome> {
        self.ensure_open()?;
        if !confirm(id) {
            debug!(id = %id, "Delete not confirmed");
            return Ok(DeleteOutcome::Declined);
        }

        match self.guarded(self.api.delete(id)).await {
            Ok(()) => {
                self.update(|s| {
                    s.documents.retain(|doc| &doc.id != id);
                    s.epoch += 1;
                });
                info!(id = %id, "Document deleted");
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) if e.kind == ErrorKind::Cancelled => Err(e),
            Err(e) => {
                let err = AppError::wrap(
                    ErrorKind::DeleteFailed,
                    "Failed to delete the document",
                    e,
                );
                warn!(error = %err, id = %id, "Delete failed");
                Err(err)
            }
        }
    }

    fn ensure_open(&self) -> AppResult<()> {
        if self.is_closed() {
            return Err(AppError::cancelled());
        }
        Ok(())
    }

    /// Run a request unless the workflow is closed first.
    async fn guarded<T>(&self, request: impl Future<Output = AppResult<T>>) -> AppResult<T> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(AppError::cancelled()),
            result = request => if self.cancel.is_cancelled() {
                Err(AppError::cancelled())
            } else {
                result
            },
        }
    }

    /// Apply `f` to the state and notify subscribers.
    fn update<R>(&self, f: impl FnOnce(&mut DocumentListState) -> R) -> R {
        let mut out = None;
        self.state.send_modify(|s| out = Some(f(s)));
        out.expect("send_modify runs its closure exactly once")
    }
}

impl Drop for DocumentWorkflow {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn download_failed(id: &DocumentId, err: AppError) -> AppError {
    if err.kind == ErrorKind::Cancelled {
        return err;
    }
    let err = AppError::wrap(
        ErrorKind::DownloadFailed,
        "Failed to download the document",
        err,
    );
    warn!(error = %err, id = %id, "Download failed");
    err
}
