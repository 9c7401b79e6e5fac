//! Document management CLI commands.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use dialoguer::Confirm;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use docshare_client::documents::{DeleteOutcome, DirectorySink, DocumentWorkflow};
use docshare_core::config::AppConfig;
use docshare_core::error::AppError;
use docshare_core::types::{Document, DocumentId};

/// Arguments for document commands
#[derive(Debug, Args)]
pub struct DocsArgs {
    /// Document subcommand
    #[command(subcommand)]
    pub command: DocsCommand,
}

/// Document subcommands
#[derive(Debug, Subcommand)]
pub enum DocsCommand {
    /// List your documents
    List,
    /// Upload a file
    Upload {
        /// File to upload
        file: PathBuf,
        /// Name to store the document under
        #[arg(long)]
        name: Option<String>,
    },
    /// Download a document
    Download {
        /// Document ID
        id: String,
        /// Directory to save into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete a document
    Delete {
        /// Document ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Document display row for table output
#[derive(Debug, Serialize, Tabled)]
struct DocumentRow {
    /// Document ID
    id: String,
    /// File name
    name: String,
    /// Upload date
    uploaded: String,
    /// Size in MB
    size: String,
}

impl From<&Document> for DocumentRow {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.to_string(),
            name: doc.name.clone(),
            uploaded: doc.created_at.format("%Y-%m-%d %H:%M").to_string(),
            size: output::format_mb(doc.size_mb()),
        }
    }
}

/// Execute document commands
pub async fn execute(args: &DocsArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let session = super::connect(config).await?;
    super::require_user(&session).await?;

    let directory = match &args.command {
        DocsCommand::Download {
            output: Some(dir), ..
        } => dir.clone(),
        _ => config.downloads.directory.clone(),
    };
    let sink = DirectorySink::new(directory, config.downloads.overwrite);
    let workflow = DocumentWorkflow::new(session.api().clone(), Arc::new(sink));

    match &args.command {
        DocsCommand::List => {
            workflow.list().await?;
            print_documents(&workflow, format);
        }
        DocsCommand::Upload { file, name } => {
            let outcome = workflow.upload_path(file, name.as_deref()).await?;
            let uploaded = outcome
                .document
                .as_ref()
                .map(|doc| doc.name.clone())
                .unwrap_or_else(|| file.display().to_string());
            output::print_success(&format!("Uploaded '{uploaded}'"));
            if outcome.refreshed {
                print_documents(&workflow, format);
            } else {
                output::print_warning("The document list could not be refreshed");
            }
        }
        DocsCommand::Download { id, .. } => {
            let id = DocumentId::new(id.as_str());
            prime_names(&workflow).await;
            let path = workflow.download(&id).await?;
            output::print_success(&format!("Saved to {}", path.display()));
        }
        DocsCommand::Delete { id, yes } => {
            let id = DocumentId::new(id.as_str());
            prime_names(&workflow).await;
            let label = workflow
                .find(&id)
                .map(|doc| format!("'{}'", doc.name))
                .unwrap_or_else(|| format!("document {id}"));

            let confirmed = *yes
                || Confirm::new()
                    .with_prompt(format!("Are you sure you want to delete {label}?"))
                    .default(false)
                    .interact()
                    .map_err(super::prompt_error)?;

            match workflow.delete(&id, |_| confirmed).await? {
                DeleteOutcome::Deleted => output::print_success(&format!("Deleted {label}")),
                DeleteOutcome::Declined => output::print_warning("Nothing deleted"),
            }
        }
    }

    Ok(())
}

/// Load the list so stored names are known; failures only cost the name.
async fn prime_names(workflow: &DocumentWorkflow) {
    if let Err(e) = workflow.list().await {
        tracing::debug!(error = %e, "Could not load document names");
    }
}

fn print_documents(workflow: &DocumentWorkflow, format: OutputFormat) {
    let rows: Vec<DocumentRow> = workflow.documents().iter().map(DocumentRow::from).collect();
    output::print_list(&rows, format);
}
