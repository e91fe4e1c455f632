//! In-process stand-in for the RBAC backend.
//!
//! Binds to 127.0.0.1:0 so every test gets its own server. Tokens are
//! unsigned JWT-shaped strings; the console never verifies signatures.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    Form, Json, Router,
    extract::{OriginalUri, Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rbac_console::{
    api_client::{ApiClient, ApiClientConfig},
    console::{Console, ConsoleConfig},
    session::{Session, store::MemoryTokenStore},
};
use serde::Deserialize;
use serde_json::{Value, json};

pub const COLLECTIONS: [(&str, &str); 4] = [
    ("users", "user_id"),
    ("roles", "role_id"),
    ("permissions", "permission_id"),
    ("permission-groups", "group_id"),
];

pub struct Account {
    pub mail: String,
    pub password: String,
    pub roles: Vec<String>,
}

#[derive(Default)]
pub struct Backend {
    pub accounts: Vec<Account>,
    pub collections: HashMap<String, Vec<Value>>,
    /// Authorization header of every request, in arrival order.
    pub authorizations: Vec<Option<String>>,
    /// Every list request answers 500 while set.
    pub fail_lists: bool,
    issued: HashMap<String, Vec<String>>,
    next_id: i64,
}

impl Backend {
    pub fn new() -> Self {
        let mut backend = Self {
            next_id: 1,
            ..Default::default()
        };
        for (name, _) in COLLECTIONS {
            backend.collections.insert(name.to_string(), vec![]);
        }
        backend
    }

    pub fn account(mut self, mail: &str, password: &str, roles: &[&str]) -> Self {
        self.accounts.push(Account {
            mail: mail.to_string(),
            password: password.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        });
        self
    }

    /// Adds a record, assigning the next id.
    pub fn seed(mut self, collection: &str, record: Value) -> Self {
        self.insert(collection, record);
        self
    }

    fn insert(&mut self, collection: &str, mut record: Value) -> Value {
        let id = self.next_id;
        self.next_id += 1;

        if let Some(object) = record.as_object_mut() {
            object.insert(id_field(collection).to_string(), json!(id));
            object.remove("password");
        }

        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        record
    }

    pub fn records(&self, collection: &str) -> &[Value] {
        self.collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn id_field(collection: &str) -> &'static str {
    COLLECTIONS
        .iter()
        .find(|(name, _)| *name == collection)
        .map(|(_, field)| *field)
        .unwrap_or("id")
}

pub fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs() as i64
}

pub fn token(sub: &str, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({ "sub": sub, "exp": exp }).to_string());
    format!("{header}.{payload}.signature")
}

type Shared = Arc<Mutex<Backend>>;

fn detail(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "detail": text }))).into_response()
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(State(backend): State<Shared>, Form(form): Form<LoginForm>) -> Response {
    if form.username == "broken@example.com" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }

    let mut backend = backend.lock().expect("backend lock");
    let Some(account) = backend
        .accounts
        .iter()
        .find(|a| a.mail == form.username && a.password == form.password)
    else {
        return detail(StatusCode::UNAUTHORIZED, "Incorrect username or password");
    };

    let issued = token(&account.mail, now_secs() + 3600);
    let roles = account.roles.clone();
    backend.issued.insert(issued.clone(), roles);

    Json(json!({ "access_token": issued, "token_type": "bearer" })).into_response()
}

/// Records the header and resolves the caller's roles.
fn authorize(backend: &mut Backend, headers: &HeaderMap) -> Result<Vec<String>, Response> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(String::from);
    backend.authorizations.push(header.clone());

    header
        .as_deref()
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| backend.issued.get(token).cloned())
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
}

async fn me(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    let mut backend = backend.lock().expect("backend lock");
    match authorize(&mut backend, &headers) {
        Ok(roles) => Json(json!({ "roles": roles })).into_response(),
        Err(response) => response,
    }
}

fn collection_of(uri: &OriginalUri) -> String {
    uri.path()
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

async fn list(State(backend): State<Shared>, uri: OriginalUri, headers: HeaderMap) -> Response {
    let mut backend = backend.lock().expect("backend lock");
    if let Err(response) = authorize(&mut backend, &headers) {
        return response;
    }
    if backend.fail_lists {
        return (StatusCode::INTERNAL_SERVER_ERROR, "listing unavailable").into_response();
    }

    Json(backend.records(&collection_of(&uri)).to_vec()).into_response()
}

async fn create(
    State(backend): State<Shared>,
    uri: OriginalUri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = backend.lock().expect("backend lock");
    if let Err(response) = authorize(&mut backend, &headers) {
        return response;
    }

    let collection = collection_of(&uri);
    if collection == "roles" {
        let taken = backend
            .records("roles")
            .iter()
            .any(|role| role["role_name"] == body["role_name"]);
        if taken {
            return detail(StatusCode::BAD_REQUEST, "Role already exists");
        }
    }

    let record = backend.insert(&collection, body);
    (StatusCode::CREATED, Json(record)).into_response()
}

fn position(backend: &Backend, collection: &str, id: i64) -> Option<usize> {
    backend
        .records(collection)
        .iter()
        .position(|record| record[id_field(collection)] == json!(id))
}

async fn get_one(
    State(backend): State<Shared>,
    uri: OriginalUri,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let mut backend = backend.lock().expect("backend lock");
    if let Err(response) = authorize(&mut backend, &headers) {
        return response;
    }

    let collection = collection_of(&uri);
    match position(&backend, &collection, id) {
        Some(index) => Json(backend.records(&collection)[index].clone()).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn update(
    State(backend): State<Shared>,
    uri: OriginalUri,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = backend.lock().expect("backend lock");
    if let Err(response) = authorize(&mut backend, &headers) {
        return response;
    }

    let collection = collection_of(&uri);
    let Some(index) = position(&backend, &collection, id) else {
        return detail(StatusCode::NOT_FOUND, "Not found");
    };

    let records = backend.collections.entry(collection).or_default();
    if let (Some(record), Some(changes)) = (records[index].as_object_mut(), body.as_object()) {
        for (key, value) in changes {
            if key != "password" {
                record.insert(key.clone(), value.clone());
            }
        }
    }

    Json(records[index].clone()).into_response()
}

async fn delete(
    State(backend): State<Shared>,
    uri: OriginalUri,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let mut backend = backend.lock().expect("backend lock");
    if let Err(response) = authorize(&mut backend, &headers) {
        return response;
    }

    let collection = collection_of(&uri);
    let Some(index) = position(&backend, &collection, id) else {
        return detail(StatusCode::NOT_FOUND, "Not found");
    };
    backend.collections.entry(collection).or_default().remove(index);

    StatusCode::NO_CONTENT.into_response()
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub backend: Shared,
}

impl TestServer {
    pub async fn spawn(backend: Backend) -> Self {
        let backend = Arc::new(Mutex::new(backend));

        let mut app = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/me", get(me));
        for (name, _) in COLLECTIONS {
            app = app
                .route(&format!("/{name}/"), get(list).post(create))
                .route(
                    &format!("/{name}/{{id}}"),
                    get(get_one).put(update).delete(delete),
                );
        }
        let app = app.with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app.into_make_service()).await;
        });

        Self { addr, backend }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn console(&self, store: Arc<MemoryTokenStore>) -> Console {
        let api = ApiClient::new(
            ApiClientConfig {
                base_url: self.url(),
                request_timeout: None,
            },
            Session::new(store),
        )
        .expect("api client");

        Console::new(api, ConsoleConfig::default())
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.backend
            .lock()
            .expect("backend lock")
            .authorizations
            .last()
            .cloned()
            .flatten()
    }

    pub fn fail_lists(&self, fail: bool) {
        self.backend.lock().expect("backend lock").fail_lists = fail;
    }

    pub fn count(&self, collection: &str) -> usize {
        self.backend
            .lock()
            .expect("backend lock")
            .records(collection)
            .len()
    }
}
