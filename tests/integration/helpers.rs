//! Shared test helpers for integration tests.
//!
//! [`FakeService`] is a small in-memory stand-in for the document service,
//! mounted on a `wiremock` server so the client runs against real HTTP.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use docshare_client::{ApiClient, DirectorySink, DocumentWorkflow, FileTokenStore, SessionManager};
use docshare_core::config::{ApiConfig, SessionConfig};
use docshare_core::traits::TokenStore;

/// Registered account held by the fake service.
#[derive(Debug, Clone)]
struct Account {
    id: String,
    name: String,
    email: String,
    password: String,
}

/// Stored document held by the fake service.
#[derive(Debug, Clone)]
struct StoredDocument {
    id: String,
    name: String,
    content: Vec<u8>,
}

#[derive(Debug, Default)]
struct FakeState {
    accounts: Vec<Account>,
    tokens: HashMap<String, String>,
    documents: Vec<StoredDocument>,
    next_id: u64,
}

/// In-memory document service.
#[derive(Debug, Clone, Default)]
pub struct FakeService {
    state: Arc<Mutex<FakeState>>,
}

impl FakeService {
    /// Add an account directly, bypassing `/signup`.
    pub fn add_account(&self, name: &str, email: &str, password: &str) {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("user-{}", state.next_id);
        state.accounts.push(Account {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        });
    }

    /// Names of the documents the service currently holds.
    pub fn document_names(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.documents.iter().map(|d| d.name.clone()).collect()
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.state.lock().unwrap().accounts.len()
    }

    fn detail(status: u16, message: &str) -> ResponseTemplate {
        ResponseTemplate::new(status).set_body_json(json!({ "detail": message }))
    }

    fn bearer(request: &Request) -> Option<String> {
        let value = request.headers.get("authorization")?.to_str().ok()?;
        value.strip_prefix("Bearer ").map(str::to_string)
    }

    fn document_json(doc: &StoredDocument) -> Value {
        json!({
            "id": doc.id,
            "name": doc.name,
            "createdAt": "2024-05-01T10:30:00Z",
            "size": doc.content.len(),
        })
    }

    fn handle(&self, request: &Request) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();
        let method = request.method.as_str().to_string();
        let path = request.url.path().to_string();
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

        match (method.as_str(), segments.as_slice()) {
            ("POST", ["login"]) => {
                let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
                    return Self::detail(422, "Invalid body");
                };
                let username = body["username"].as_str().unwrap_or_default();
                let password = body["password"].as_str().unwrap_or_default();
                let Some(account) = state
                    .accounts
                    .iter()
                    .find(|a| a.email == username && a.password == password)
                    .cloned()
                else {
                    return Self::detail(401, "Incorrect username or password");
                };
                state.next_id += 1;
                let token = format!("token-{}", state.next_id);
                state.tokens.insert(token.clone(), account.id);
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "access_token": token, "token_type": "bearer" }))
            }
            ("POST", ["signup"]) => {
                let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
                    return Self::detail(422, "Invalid body");
                };
                let email = body["email"].as_str().unwrap_or_default().to_string();
                if state.accounts.iter().any(|a| a.email == email) {
                    return Self::detail(400, "Email already registered");
                }
                state.next_id += 1;
                let id = format!("user-{}", state.next_id);
                state.accounts.push(Account {
                    id,
                    name: body["name"].as_str().unwrap_or_default().to_string(),
                    email,
                    password: body["password"].as_str().unwrap_or_default().to_string(),
                });
                ResponseTemplate::new(200).set_body_json(json!({ "message": "User created" }))
            }
            _ => {
                let Some(account) = Self::bearer(request)
                    .and_then(|token| state.tokens.get(&token).cloned())
                    .and_then(|id| state.accounts.iter().find(|a| a.id == id).cloned())
                else {
                    return Self::detail(401, "Could not validate credentials");
                };
                Self::handle_authenticated(&mut state, &account, &method, &segments, request)
            }
        }
    }

    fn handle_authenticated(
        state: &mut FakeState,
        account: &Account,
        method: &str,
        segments: &[&str],
        request: &Request,
    ) -> ResponseTemplate {
        match (method, segments) {
            ("GET", ["user"]) => ResponseTemplate::new(200).set_body_json(json!({
                "user": { "id": account.id, "name": account.name, "email": account.email }
            })),
            ("GET", ["documents"]) => {
                let documents: Vec<Value> =
                    state.documents.iter().map(Self::document_json).collect();
                ResponseTemplate::new(200).set_body_json(json!({ "documents": documents }))
            }
            ("POST", ["upload"]) => {
                let Some((name, content)) = parse_multipart_file(&request.body) else {
                    return Self::detail(422, "No file");
                };
                state.next_id += 1;
                let doc = StoredDocument {
                    id: format!("doc-{}", state.next_id),
                    name,
                    content,
                };
                let body = Self::document_json(&doc);
                state.documents.push(doc);
                ResponseTemplate::new(200).set_body_json(body)
            }
            ("GET", ["download", id]) => match state.documents.iter().find(|d| d.id == *id) {
                Some(doc) => ResponseTemplate::new(200)
                    .insert_header(
                        "content-disposition",
                        format!("attachment; filename=\"{}\"", doc.name).as_str(),
                    )
                    .set_body_bytes(doc.content.clone()),
                None => Self::detail(404, "Document not found"),
            },
            ("DELETE", ["delete", id]) => {
                let before = state.documents.len();
                state.documents.retain(|d| d.id != *id);
                if state.documents.len() == before {
                    Self::detail(404, "Document not found")
                } else {
                    ResponseTemplate::new(200)
                        .set_body_json(json!({ "message": "Document deleted" }))
                }
            }
            _ => Self::detail(404, "Not Found"),
        }
    }
}

impl Respond for FakeService {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.handle(request)
    }
}

/// Pull the file name and content of the first multipart part.
fn parse_multipart_file(body: &[u8]) -> Option<(String, Vec<u8>)> {
    let text = String::from_utf8_lossy(body);
    let start = text.find("filename=\"")? + "filename=\"".len();
    let end = start + text[start..].find('"')?;
    let name = text[start..end].to_string();

    let header_end = find(body, b"\r\n\r\n", end)? + 4;
    let content_end = find(body, b"\r\n--", header_end)?;
    Some((name, body[header_end..content_end].to_vec()))
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// Test application context
pub struct TestApp {
    /// Mock HTTP server hosting the fake service
    pub server: MockServer,
    /// The fake service state
    pub service: FakeService,
    /// Scratch directory for tokens and downloads
    pub dir: TempDir,
}

impl TestApp {
    /// Start a fake service with no accounts
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let service = FakeService::default();
        Mock::given(any())
            .respond_with(service.clone())
            .mount(&server)
            .await;
        Self {
            server,
            service,
            dir: TempDir::new().unwrap(),
        }
    }

    /// Start a fake service with one account
    pub async fn with_account(name: &str, email: &str, password: &str) -> Self {
        let app = Self::new().await;
        app.service.add_account(name, email, password);
        app
    }

    /// Session configuration pointing into the scratch directory
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            token_dir: Some(self.dir.path().join("session")),
            ..SessionConfig::default()
        }
    }

    /// File-backed token store, shared by every client of this app
    pub fn token_store(&self) -> Arc<FileTokenStore> {
        Arc::new(FileTokenStore::from_config(&self.session_config()))
    }

    /// API client against the fake service
    pub fn api(&self) -> ApiClient {
        let config = ApiConfig {
            base_url: self.server.uri(),
            ..ApiConfig::default()
        };
        let store: Arc<dyn TokenStore> = self.token_store();
        ApiClient::new(&config, store).unwrap()
    }

    /// Session manager after startup resolution, as a fresh process would see it
    pub async fn session(&self) -> SessionManager {
        SessionManager::start(self.api()).await
    }

    /// Document workflow saving downloads into `downloads/`
    pub fn workflow(&self, session: &SessionManager) -> DocumentWorkflow {
        let sink = DirectorySink::new(self.dir.path().join("downloads"), false);
        DocumentWorkflow::new(session.api().clone(), Arc::new(sink))
    }
}
