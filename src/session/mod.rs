use crate::storage::{read_item, remove_item, write_item};
use std::sync::Mutex;

/// Value stored under the "authorized" key while a session is active.
pub const AUTHORIZED_FLAG: &str = "authorized";

/// Authorization flag + bearer token, persisted together.
pub trait SessionStore: Send + Sync {
    fn set_authorized(&self, token: &str);

    fn clear(&self);

    /// Bearer token of an active session.
    ///
    /// A set flag without a token is an inconsistent pair and reads as
    /// unauthenticated.
    fn token(&self) -> Option<String>;

    fn is_authorized(&self) -> bool {
        self.token().is_some()
    }
}

fn active_token(flag: Option<String>, token: Option<String>) -> Option<String> {
    match (flag.as_deref(), token) {
        (Some(AUTHORIZED_FLAG), Some(token)) if !token.trim().is_empty() => Some(token),
        _ => None,
    }
}

/// Session persisted in `window.localStorage`.
#[derive(Clone, Debug)]
pub struct LocalSession {
    authorized_key: String,
    token_key: String,
}

impl LocalSession {
    pub fn new(authorized_key: impl Into<String>, token_key: impl Into<String>) -> Self {
        Self {
            authorized_key: authorized_key.into(),
            token_key: token_key.into(),
        }
    }
}

impl SessionStore for LocalSession {
    fn set_authorized(&self, token: &str) {
        write_item(&self.token_key, token);
        write_item(&self.authorized_key, AUTHORIZED_FLAG);
    }

    fn clear(&self) {
        remove_item(&self.authorized_key);
        remove_item(&self.token_key);
    }

    fn token(&self) -> Option<String> {
        active_token(read_item(&self.authorized_key), read_item(&self.token_key))
    }
}

#[derive(Default, Debug)]
struct RawPair {
    flag: Option<String>,
    token: Option<String>,
}

/// In-process session, used headless and by tests.
#[derive(Default, Debug)]
pub struct MemorySession {
    pair: Mutex<RawPair>,
}

impl MemorySession {
    /// Starts from raw stored values, including inconsistent ones.
    pub fn from_raw(flag: Option<&str>, token: Option<&str>) -> Self {
        Self {
            pair: Mutex::new(RawPair {
                flag: flag.map(str::to_string),
                token: token.map(str::to_string),
            }),
        }
    }

    fn with_pair<R>(&self, f: impl FnOnce(&mut RawPair) -> R) -> R {
        let mut guard = match self.pair.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}

impl SessionStore for MemorySession {
    fn set_authorized(&self, token: &str) {
        self.with_pair(|p| {
            p.flag = Some(AUTHORIZED_FLAG.to_string());
            p.token = Some(token.to_string());
        });
    }

    fn clear(&self) {
        self.with_pair(|p| *p = RawPair::default());
    }

    fn token(&self) -> Option<String> {
        self.with_pair(|p| active_token(p.flag.clone(), p.token.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_session_roundtrip() {
        let s = MemorySession::default();
        assert!(!s.is_authorized());

        s.set_authorized("t1");
        assert!(s.is_authorized());
        assert_eq!(s.token().as_deref(), Some("t1"));

        s.clear();
        assert!(!s.is_authorized());
        assert!(s.token().is_none());
    }

    #[test]
    fn test_flag_without_token_is_unauthenticated() {
        assert!(!MemorySession::from_raw(Some(AUTHORIZED_FLAG), None).is_authorized());
        assert!(!MemorySession::from_raw(Some(AUTHORIZED_FLAG), Some("")).is_authorized());
    }

    #[test]
    fn test_token_without_flag_is_unauthenticated() {
        assert!(!MemorySession::from_raw(None, Some("t1")).is_authorized());
        // The legacy client wrote the string "null" when clearing.
        assert!(!MemorySession::from_raw(Some("null"), Some("null")).is_authorized());
    }
}
