//! SessionRegistry - Active sessions keyed by code.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::connection_registry::ConnectionRegistry;
use crate::domain::foundation::Timestamp;
use crate::domain::session::{SessionCode, SessionError};
use crate::ports::CodeSource;

/// One live game session.
pub struct Session {
    code: SessionCode,
    name: String,
    created_at: Timestamp,
    connections: ConnectionRegistry,
}

impl Session {
    fn new(code: SessionCode, name: String) -> Self {
        Self {
            connections: ConnectionRegistry::new(code.clone()),
            code,
            name,
            created_at: Timestamp::now(),
        }
    }

    pub fn code(&self) -> &SessionCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn connections(&self) -> &ConnectionRegistry {
        &self.connections
    }

    pub async fn summary(&self) -> SessionSummary {
        let roster = self.connections.summary().await;
        SessionSummary {
            code: self.code.clone(),
            name: self.name.clone(),
            player_count: roster.player_count,
            host_connected: roster.host_connected,
            created_at: self.created_at,
        }
    }
}

/// Listing entry for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub code: SessionCode,
    pub name: String,
    pub player_count: usize,
    pub host_connected: bool,
    pub created_at: Timestamp,
}

/// Creation settings.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub max_code_attempts: u32,
    pub default_session_name: String,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            max_code_attempts: 32,
            default_session_name: "Untitled game".to_string(),
        }
    }
}

/// Owns every active session of this process.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionCode, Arc<Session>>>,
    codes: Arc<dyn CodeSource>,
    settings: RegistrySettings,
}

impl SessionRegistry {
    pub fn new(codes: Arc<dyn CodeSource>, settings: RegistrySettings) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            codes,
            settings,
        }
    }

    /// Registers a new empty session under a fresh code.
    pub async fn create(&self, name: Option<String>) -> Result<SessionCode, SessionError> {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.settings.default_session_name.clone());

        let mut sessions = self.sessions.write().await;
        for attempt in 1..=self.settings.max_code_attempts {
            let code = self.codes.next_code();
            if sessions.contains_key(&code) {
                tracing::debug!(session = %code, attempt, "Session code collision, retrying");
                continue;
            }
            sessions.insert(code.clone(), Arc::new(Session::new(code.clone(), name)));
            tracing::info!(session = %code, active = sessions.len(), "Session created");
            return Ok(code);
        }

        tracing::error!(
            attempts = self.settings.max_code_attempts,
            active = sessions.len(),
            "Could not find a free session code"
        );
        Err(SessionError::CodeSpaceExhausted {
            attempts: self.settings.max_code_attempts,
        })
    }

    pub async fn lookup(&self, code: &SessionCode) -> Result<Arc<Session>, SessionError> {
        self.sessions
            .read()
            .await
            .get(code)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(code.clone()))
    }

    /// Snapshot of all sessions ordered by code.
    pub async fn list(&self) -> Vec<SessionSummary> {
        let mut sessions: Vec<Arc<Session>> =
            self.sessions.read().await.values().cloned().collect();
        sessions.sort_by(|a, b| a.code.cmp(&b.code));

        let mut summaries = Vec::with_capacity(sessions.len());
        for session in sessions {
            summaries.push(session.summary().await);
        }
        summaries
    }

    /// Removes a session. Absent codes are a no-op.
    pub async fn delete(&self, code: &SessionCode) -> Option<Arc<Session>> {
        let removed = self.sessions.write().await.remove(code);
        if removed.is_some() {
            tracing::info!(session = %code, "Session removed");
        }
        removed
    }

    /// Removes `session` only if it is still the one registered under its
    /// code. A later session that reused the code is left alone.
    pub async fn delete_if_same(&self, session: &Arc<Session>) -> bool {
        let mut sessions = self.sessions.write().await;
        let same = sessions
            .get(session.code())
            .is_some_and(|current| Arc::ptr_eq(current, session));
        if same {
            sessions.remove(session.code());
            tracing::info!(session = %session.code(), "Session removed");
        }
        same
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::codes::FixedCodeSource;

    fn code(s: &str) -> SessionCode {
        SessionCode::parse(s).unwrap()
    }

    fn registry(codes: &[&'static str]) -> SessionRegistry {
        SessionRegistry::new(
            Arc::new(FixedCodeSource::new(codes.iter().copied()).unwrap()),
            RegistrySettings::default(),
        )
    }

    #[tokio::test]
    async fn create_registers_session_with_default_name() {
        let registry = registry(&["abcd"]);

        let created = registry.create(None).await.unwrap();

        assert_eq!(created, code("abcd"));
        let session = registry.lookup(&created).await.unwrap();
        assert_eq!(session.name(), "Untitled game");
    }

    #[tokio::test]
    async fn create_uses_trimmed_custom_name() {
        let registry = registry(&["abcd"]);
        let created = registry.create(Some("  Friday quiz ".to_string())).await.unwrap();
        assert_eq!(registry.lookup(&created).await.unwrap().name(), "Friday quiz");
    }

    #[tokio::test]
    async fn create_retries_on_collision() {
        let registry = registry(&["abcd", "abcd", "wxyz"]);

        let first = registry.create(None).await.unwrap();
        let second = registry.create(None).await.unwrap();

        assert_eq!(first, code("abcd"));
        assert_eq!(second, code("wxyz"));
    }

    #[tokio::test]
    async fn create_gives_up_after_configured_attempts() {
        let registry = SessionRegistry::new(
            Arc::new(FixedCodeSource::new(["abcd"]).unwrap()),
            RegistrySettings {
                max_code_attempts: 3,
                ..RegistrySettings::default()
            },
        );
        registry.create(None).await.unwrap();

        let result = registry.create(None).await;

        assert_eq!(result, Err(SessionError::CodeSpaceExhausted { attempts: 3 }));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn lookup_unknown_code_is_not_found() {
        let registry = registry(&["abcd"]);
        let result = registry.lookup(&code("zzzz")).await;
        assert!(matches!(result, Err(SessionError::NotFound(c)) if c == code("zzzz")));
    }

    #[tokio::test]
    async fn delete_twice_is_harmless() {
        let registry = registry(&["abcd"]);
        let created = registry.create(None).await.unwrap();

        assert!(registry.delete(&created).await.is_some());
        assert!(registry.delete(&created).await.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn deleted_code_can_be_reused() {
        let registry = registry(&["abcd"]);
        let created = registry.create(None).await.unwrap();
        registry.delete(&created).await;

        assert_eq!(registry.create(None).await.unwrap(), created);
    }

    #[tokio::test]
    async fn delete_if_same_spares_a_session_that_reused_the_code() {
        let registry = registry(&["abcd"]);
        let created = registry.create(None).await.unwrap();
        let stale = registry.lookup(&created).await.unwrap();
        registry.delete(&created).await;
        registry.create(None).await.unwrap();

        assert!(!registry.delete_if_same(&stale).await);
        let current = registry.lookup(&created).await.unwrap();
        assert!(!Arc::ptr_eq(&current, &stale));

        assert!(registry.delete_if_same(&current).await);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn list_is_ordered_by_code() {
        let registry = registry(&["mmmm", "aaaa", "zzzz"]);
        for _ in 0..3 {
            registry.create(None).await.unwrap();
        }

        let codes: Vec<String> = registry
            .list()
            .await
            .into_iter()
            .map(|s| s.code.to_string())
            .collect();

        assert_eq!(codes, vec!["aaaa", "mmmm", "zzzz"]);
    }

    #[tokio::test]
    async fn concurrent_deletes_never_fail() {
        let registry = Arc::new(registry(&["abcd"]));
        let created = registry.create(None).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let code = created.clone();
                tokio::spawn(async move { registry.delete(&code).await.is_some() })
            })
            .collect();

        let mut removed = 0;
        for handle in handles {
            if handle.await.unwrap() {
                removed += 1;
            }
        }
        assert_eq!(removed, 1);
    }
}
