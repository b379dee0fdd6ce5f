// Login session store with optional on-disk persistence
use crate::application::session::CredentialProvider;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

/// Holds the bearer token between login and logout.
///
/// With a `path`, the session is written as TOML on login, removed on logout
/// and restored by [`SessionStore::load`] on the next start.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<Session>>,
    path: Option<PathBuf>,
}

impl SessionStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Restore a persisted session; a missing file means logged out
    pub async fn load(path: PathBuf) -> Result<Self> {
        let current = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Some(
                toml::from_str::<Session>(&contents)
                    .with_context(|| format!("Failed to parse session file {}", path.display()))?,
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read session file {}", path.display()));
            }
        };

        if current.is_some() {
            tracing::info!("Restored session from {}", path.display());
        }

        Ok(Self {
            current: RwLock::new(current),
            path: Some(path),
        })
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn login(&self, token: &str) -> Result<Session> {
        let token = token.trim();
        if token.is_empty() {
            anyhow::bail!("Session token must not be blank");
        }

        let session = Session {
            token: token.to_string(),
            issued_at: Utc::now(),
        };

        if let Some(path) = &self.path {
            let contents = toml::to_string(&session).context("Failed to encode session")?;
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(dir).await?;
            }
            tokio::fs::write(path, contents)
                .await
                .with_context(|| format!("Failed to write session file {}", path.display()))?;
        }

        self.replace(Some(session.clone()));
        tracing::info!("Session started at {}", session.issued_at);
        Ok(session)
    }

    pub async fn logout(&self) -> Result<()> {
        self.replace(None);

        if let Some(path) = &self.path {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to remove session file {}", path.display()));
                }
            }
        }

        tracing::info!("Session cleared");
        Ok(())
    }

    fn replace(&self, session: Option<Session>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = session;
    }
}

impl CredentialProvider for SessionStore {
    fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("seaice-{}-{}.toml", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_login_logout_lifecycle() {
        let store = SessionStore::in_memory();
        assert_eq!(store.token(), None);

        store.login(" tok-1 ").await.unwrap();
        assert_eq!(store.token(), Some("tok-1".to_string()));

        store.logout().await.unwrap();
        assert_eq!(store.token(), None);
    }

    #[tokio::test]
    async fn test_poisoned_lock_keeps_session() {
        let store = Arc::new(SessionStore::in_memory());
        store.login("tok-2").await.unwrap();

        let holder = store.clone();
        let panicked = std::thread::spawn(move || {
            let _guard = holder.current.write().unwrap();
            panic!("writer died holding the session lock");
        })
        .join();
        assert!(panicked.is_err());
        assert!(store.current.is_poisoned());

        assert_eq!(store.token(), Some("tok-2".to_string()));
        store.logout().await.unwrap();
        assert_eq!(store.token(), None);
    }

    #[tokio::test]
    async fn test_blank_token_rejected() {
        let store = SessionStore::in_memory();
        assert!(store.login("   ").await.is_err());
        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn test_session_persists_across_loads() {
        let path = temp_path("persist");
        let _ = std::fs::remove_file(&path);

        let store = SessionStore::load(path.clone()).await.unwrap();
        assert!(store.current().is_none());
        let session = store.login("persisted-token").await.unwrap();

        let restored = SessionStore::load(path.clone()).await.unwrap();
        assert_eq!(restored.current(), Some(session));

        restored.logout().await.unwrap();
        assert!(!path.exists());
        let after_logout = SessionStore::load(path).await.unwrap();
        assert_eq!(after_logout.token(), None);
    }

    #[tokio::test]
    async fn test_corrupt_session_file_is_an_error() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "token = ").unwrap();

        assert!(SessionStore::load(path.clone()).await.is_err());
        let _ = std::fs::remove_file(path);
    }
}
