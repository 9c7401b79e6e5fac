//! Integration tests for the document workflow against a live HTTP service.

mod helpers;

use docshare_client::documents::{DeleteOutcome, ListOutcome};
use docshare_core::error::ErrorKind;
use docshare_core::types::DocumentId;

async fn logged_in() -> (helpers::TestApp, docshare_client::SessionManager) {
    let app = helpers::TestApp::with_account("Ayşe", "ayse@example.com", "pw").await;
    let session = app.session().await;
    session.login("ayse@example.com", "pw").await.unwrap();
    (app, session)
}

#[tokio::test]
async fn test_full_document_lifecycle() {
    let (app, session) = logged_in().await;
    let workflow = app.workflow(&session);

    assert_eq!(workflow.list().await.unwrap(), ListOutcome::Applied(vec![]));

    let source = app.dir.path().join("report.txt");
    tokio::fs::write(&source, b"quarterly numbers").await.unwrap();

    let uploaded = workflow.upload_path(&source, None).await.unwrap();
    assert!(uploaded.refreshed);
    let created = uploaded.document.expect("service echoes the document");
    assert_eq!(created.name, "report.txt");
    assert_eq!(created.size, 17);
    assert_eq!(workflow.documents(), vec![created.clone()]);
    assert_eq!(workflow.snapshot().staged(), None);

    let saved = workflow.download(&created.id).await.unwrap();
    assert_eq!(saved, app.dir.path().join("downloads").join("report.txt"));
    assert_eq!(
        tokio::fs::read(&saved).await.unwrap(),
        b"quarterly numbers".to_vec()
    );

    let outcome = workflow.delete(&created.id, |_| true).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(workflow.documents().is_empty());
    assert!(app.service.document_names().is_empty());
}

#[tokio::test]
async fn test_delete_only_removes_target() {
    let (app, session) = logged_in().await;
    let workflow = app.workflow(&session);

    for name in ["a.pdf", "b.pdf"] {
        let path = app.dir.path().join(name);
        tokio::fs::write(&path, name.as_bytes()).await.unwrap();
        workflow.upload_path(&path, None).await.unwrap();
    }
    let docs = workflow.documents();
    assert_eq!(docs.len(), 2);

    workflow.delete(&docs[0].id, |_| true).await.unwrap();
    assert_eq!(workflow.documents(), vec![docs[1].clone()]);
    assert_eq!(app.service.document_names(), vec!["b.pdf".to_string()]);
}

#[tokio::test]
async fn test_declined_delete_keeps_document() {
    let (app, session) = logged_in().await;
    let workflow = app.workflow(&session);

    let path = app.dir.path().join("keep.txt");
    tokio::fs::write(&path, b"keep").await.unwrap();
    workflow.upload_path(&path, None).await.unwrap();
    let doc = workflow.documents().remove(0);

    let outcome = workflow.delete(&doc.id, |_| false).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(workflow.documents().len(), 1);
    assert_eq!(app.service.document_names(), vec!["keep.txt".to_string()]);
}

#[tokio::test]
async fn test_missing_document_errors_leave_list_intact() {
    let (app, session) = logged_in().await;
    let workflow = app.workflow(&session);

    let path = app.dir.path().join("only.txt");
    tokio::fs::write(&path, b"x").await.unwrap();
    workflow.upload_path(&path, None).await.unwrap();

    let ghost = DocumentId::new("doc-missing");
    let err = workflow.delete(&ghost, |_| true).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::DeleteFailed);
    assert_eq!(err.status(), Some(404));

    let err = workflow.download(&ghost).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::DownloadFailed);
    assert_eq!(workflow.documents().len(), 1);
}

#[tokio::test]
async fn test_upload_missing_file_is_no_file_selected() {
    let (app, session) = logged_in().await;
    let workflow = app.workflow(&session);
    let before = app.server.received_requests().await.unwrap().len();

    let err = workflow
        .upload_path(&app.dir.path().join("nope.txt"), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NoFileSelected);
    assert_eq!(app.server.received_requests().await.unwrap().len(), before);
}

#[tokio::test]
async fn test_requests_after_logout_are_rejected() {
    let (app, session) = logged_in().await;
    let workflow = app.workflow(&session);
    workflow.list().await.unwrap();

    session.logout();

    let err = workflow.list().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ListFailed);
    assert!(err.is_unauthorized());
    assert_eq!(workflow.snapshot().error(), Some("Failed to load documents"));
}
