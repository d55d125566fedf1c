//! Common test utilities for envsettings integration tests
//!
//! Provides a fabricated environment with the required variables set and
//! helpers for assembling the application settings from it.

#![allow(dead_code)]

use envsettings::{AppSettings, BuildMode, ExposeSecret, MapEnv, Result, SettingsAssembler};

pub const CLIENT_ID: &str = "gh-client-id";
pub const CLIENT_SECRET: &str = "gh-client-secret";

// =============================================================================
// Test Fixtures
// =============================================================================

/// Fabricated environment plus the build mode to assemble under
pub struct TestFixture {
    pub env: MapEnv,
    pub mode: BuildMode,
}

impl TestFixture {
    /// Only the required variables, production build
    pub fn new() -> Self {
        init_logging();
        Self {
            env: MapEnv::new()
                .with("APP_GITHUB_CLIENT_ID", CLIENT_ID)
                .with("APP_GITHUB_CLIENT_SECRET", CLIENT_SECRET),
            mode: BuildMode::Production,
        }
    }

    /// No variables at all
    pub fn empty() -> Self {
        init_logging();
        Self {
            env: MapEnv::new(),
            mode: BuildMode::Production,
        }
    }

    /// Set `APP_{key}`
    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.env = self.env.with(format!("APP_{key}"), value);
        self
    }

    pub fn mode(mut self, mode: BuildMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn assembler(&self) -> SettingsAssembler {
        SettingsAssembler::builder()
            .source(self.env.clone())
            .build_mode(self.mode)
            .build()
            .expect("default prefix is valid")
    }

    pub fn assemble(&self) -> Result<AppSettings> {
        self.assembler().assemble()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Field-wise equality, including the credentials the JSON dump redacts
pub fn assert_same_settings(left: &AppSettings, right: &AppSettings) {
    assert_eq!(
        serde_json::to_value(left).unwrap(),
        serde_json::to_value(right).unwrap()
    );
    assert_eq!(
        left.github_client_secret.expose_secret(),
        right.github_client_secret.expose_secret()
    );
    assert_eq!(
        left.github_auth_token.as_ref().map(|t| t.expose_secret()),
        right.github_auth_token.as_ref().map(|t| t.expose_secret())
    );
}
