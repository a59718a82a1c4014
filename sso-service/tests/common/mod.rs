use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Duration;
use sso_service::domain::auth::errors::StorageError;
use sso_service::domain::auth::models::App;
use sso_service::domain::auth::models::AppId;
use sso_service::domain::auth::models::AppSecret;
use sso_service::domain::auth::models::PasswordHash;
use sso_service::domain::auth::models::User;
use sso_service::domain::auth::models::UserId;
use sso_service::domain::auth::ports::AppProvider;
use sso_service::domain::auth::ports::UserProvider;
use sso_service::domain::auth::ports::UserSaver;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::server::router;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::inbound::grpc::RequestValidator;
use sso_service::proto::auth_client::AuthClient;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;

pub const APP_ID: i32 = 1;
pub const APP_SECRET: &str = "test-app-secret-at-least-32-bytes-long";
pub const TOKEN_TTL_MINUTES: i64 = 60;

struct StoredUser {
    user: User,
    is_admin: bool,
}

/// Store double implementing every storage port, counting calls.
pub struct InMemoryStore {
    users: Mutex<Vec<StoredUser>>,
    apps: Vec<App>,
    calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn new(apps: Vec<App>) -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            apps,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn promote_to_admin(&self, user_id: i64) {
        let mut users = self.users.lock().unwrap();
        let stored = users
            .iter_mut()
            .find(|stored| stored.user.id.0 == user_id)
            .expect("user to promote exists");
        stored.is_admin = true;
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserSaver for InMemoryStore {
    async fn save_user(
        &self,
        email: &str,
        password_hash: &PasswordHash,
    ) -> Result<UserId, StorageError> {
        self.record_call();
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|stored| stored.user.email == email) {
            return Err(StorageError::AlreadyExists);
        }

        let id = UserId(users.len() as i64 + 1);
        users.push(StoredUser {
            user: User {
                id,
                email: email.to_string(),
                password_hash: password_hash.clone(),
            },
            is_admin: false,
        });

        Ok(id)
    }
}

#[async_trait]
impl UserProvider for InMemoryStore {
    async fn user(&self, email: &str) -> Result<User, StorageError> {
        self.record_call();
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|stored| stored.user.email == email)
            .map(|stored| stored.user.clone())
            .ok_or(StorageError::NotFound)
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError> {
        self.record_call();
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|stored| stored.user.id == user_id)
            .map(|stored| stored.is_admin)
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl AppProvider for InMemoryStore {
    async fn app(&self, app_id: AppId) -> Result<App, StorageError> {
        self.record_call();
        self.apps
            .iter()
            .find(|app| app.id == app_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

/// gRPC server running on an ephemeral port, plus a connected client.
pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub client: AuthClient<Channel>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let store = Arc::new(InMemoryStore::new(vec![App {
            id: AppId(APP_ID),
            name: "test-app".to_string(),
            secret: AppSecret::new(APP_SECRET.to_string()),
        }]));

        let auth_service = Arc::new(
            AuthService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
                Duration::minutes(TOKEN_TTL_MINUTES),
            )
            .with_password_hasher(
                PasswordHasher::with_work_factor(64, 1, 1).expect("valid parameters"),
            ),
        );
        let grpc_service = AuthGrpcService::new(auth_service, RequestValidator::new());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move {
            router(grpc_service)
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("gRPC server failed");
        });

        let client = AuthClient::connect(format!("http://{}", address))
            .await
            .expect("Failed to connect to gRPC server");

        Self { store, client }
    }
}
