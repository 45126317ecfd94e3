//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up test environment with database
//! - A scripted AI provider so no test reaches a real model
//! - Helpers for creating isolated users
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL env var).

#![allow(dead_code)]

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use uuid::Uuid;

use practice_backend::config::{AiDefaults, AppConfig, Environment};
use practice_backend::db::Database;
use practice_backend::models::{Module, Role, User};
use practice_backend::services::ai::{
    AiError, ChatMessage, ChatOptions, ChatProvider, ProviderResolver,
};
use practice_backend::services::seed::seed_dev_fixtures;
use practice_backend::{build_router, AppState};

type Reply = dyn Fn(&[ChatMessage]) -> Result<String, AiError> + Send + Sync;

/// Provider that answers from a closure and counts its calls.
pub struct ScriptedProvider {
    reply: Box<Reply>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(
        reply: impl Fn(&[ChatMessage]) -> Result<String, AiError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            reply: Box::new(reply),
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider whose every call fails
    pub fn failing() -> Self {
        Self::new(|_| Err(AiError::EmptyResponse))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        _options: &ChatOptions,
    ) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)(messages)
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// Resolver handing out the same scripted provider for every module.
pub struct ScriptedResolver {
    provider: Arc<ScriptedProvider>,
}

#[async_trait]
impl ProviderResolver for ScriptedResolver {
    async fn provider_for(&self, _module: Module) -> Result<Arc<dyn ChatProvider>, AiError> {
        let provider: Arc<dyn ChatProvider> = self.provider.clone();
        Ok(provider)
    }
}

/// Test context containing database connection and test router.
///
/// Use this to set up integration tests with a real database connection.
/// Requires DATABASE_URL environment variable to be set.
pub struct TestContext {
    pub db: Arc<Database>,
    pub provider: Arc<ScriptedProvider>,
    state: AppState,
    app: Router,
}

impl TestContext {
    /// Development-mode context whose AI provider always fails, so every
    /// AI-backed route serves its fallback payload.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        Self::build(Environment::Development, ScriptedProvider::failing()).await
    }

    /// Development-mode context with a scripted provider.
    pub async fn with_provider(provider: ScriptedProvider) -> Self {
        Self::build(Environment::Development, provider).await
    }

    /// Production-mode context.
    pub async fn production(provider: ScriptedProvider) -> Self {
        Self::build(Environment::Production, provider).await
    }

    async fn build(environment: Environment, provider: ScriptedProvider) -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url, 5)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let config = AppConfig {
            database_url,
            max_connections: 5,
            host: "127.0.0.1".to_string(),
            port: 0,
            environment,
            ai: AiDefaults::default(),
        };

        seed_dev_fixtures(&db, &config.ai)
            .await
            .expect("Failed to seed development fixtures");

        let db = Arc::new(db);
        let provider = Arc::new(provider);

        let state = AppState {
            db: db.clone(),
            ai: Arc::new(ScriptedResolver {
                provider: provider.clone(),
            }),
            config: Arc::new(config),
        };

        let app = build_router(state.clone());

        Self {
            db,
            provider,
            state,
            app,
        }
    }

    /// Application state, for calling services directly.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create an isolated user with a unique phone number.
    pub async fn create_user(&self, role: Role, grade: Option<&str>) -> User {
        let id = Uuid::new_v4();
        let phone = format!("test-{}", id.simple());
        self.db
            .create_user(id, &phone, role, grade, Some("test user"))
            .await
            .expect("Failed to create test user")
    }

    pub async fn create_student(&self) -> User {
        self.create_user(Role::Student, Some("初一")).await
    }

    /// Create a parent linked to the given student.
    pub async fn create_parent_of(&self, student_id: Uuid) -> User {
        let parent = self.create_user(Role::Parent, None).await;
        let invite_code = format!("T{}", &Uuid::new_v4().simple().to_string()[..8]);
        self.db
            .link_parent(parent.id, student_id, &invite_code)
            .await
            .expect("Failed to link parent");
        parent
    }

    /// Remove a test user; plans, submissions, mistakes and links cascade.
    pub async fn cleanup_user(&self, user_id: Uuid) {
        let _ = self.db.delete_user(user_id).await;
    }

    /// Remove an AI config row created by a test.
    pub async fn cleanup_ai_config(&self, module: &str) {
        let _ = sqlx::query("DELETE FROM ai_configs WHERE module = $1")
            .bind(module)
            .execute(self.db.pool())
            .await;
    }

    /// Remove a classical text created by a test.
    pub async fn cleanup_text(&self, text_id: Uuid) {
        let _ = self.db.delete_text(text_id).await;
    }
}
