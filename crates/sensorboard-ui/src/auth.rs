//! Session guard
//!
//! Signed-in admins are kept in a server-side store keyed by a random id; the
//! browser only holds that id in the session cookie. Pages that need a
//! session take a [`RequireSession`] extractor, which redirects to `/login`
//! before the handler runs, so no remote call is made for anonymous requests.

use crate::AppState;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use dashmap::DashMap;
use sensorboard_core::Session;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone)]
struct StoredSession {
    session: Session,
    expires_at: Instant,
}

/// In-memory session store with expiry
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, StoredSession>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Store a session and return its new id
    pub fn create(&self, session: Session) -> String {
        self.purge_expired();

        let id = Uuid::new_v4().to_string();
        self.sessions.insert(
            id.clone(),
            StoredSession {
                session,
                expires_at: Instant::now() + self.ttl,
            },
        );
        id
    }

    /// Look up a live session; expired entries are dropped on the way
    pub fn get(&self, id: &str) -> Option<Session> {
        let expired = match self.sessions.get(id) {
            Some(entry) if entry.expires_at > Instant::now() => {
                return Some(entry.session.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.sessions.remove(id);
            debug!("Session expired");
        }
        None
    }

    pub fn remove(&self, id: &str) -> Option<Session> {
        self.sessions.remove(id).map(|(_, stored)| stored.session)
    }

    /// Drop every expired session, returning how many were removed
    ///
    /// Runs on every login and walks the whole store.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.sessions.retain(|_, stored| {
            let live = stored.expires_at > now;
            if !live {
                removed += 1;
            }
            live
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Extractor for pages that need a signed-in admin
#[derive(Debug, Clone)]
pub struct RequireSession(pub Session);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        jar.get(&state.config.cookie_name)
            .and_then(|cookie| state.sessions.get(cookie.value()))
            .map(RequireSession)
            .ok_or_else(|| {
                debug!(path = %parts.uri.path(), "No session, redirecting to login");
                Redirect::to(LOGIN_PATH)
            })
    }
}

/// Session id from the request cookies, if any
pub fn session_id(jar: &CookieJar, cookie_name: &str) -> Option<String> {
    jar.get(cookie_name).map(|cookie| cookie.value().to_string())
}

/// Cookie carrying a freshly created session id
pub fn session_cookie(cookie_name: &str, id: String) -> Cookie<'static> {
    Cookie::build((cookie_name.to_string(), id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie that clears the session id
pub fn removal_cookie(cookie_name: &str) -> Cookie<'static> {
    Cookie::build((cookie_name.to_string(), "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensorboard_core::AdminRole;

    fn admin() -> Session {
        Session::new("budi", AdminRole::SuperAdmin)
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_round_trip() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create(admin());
        assert_eq!(store.get(&id), Some(admin()));
        assert_eq!(store.get("unknown"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_expires() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create(admin());

        tokio::time::advance(Duration::from_secs(61)).await;

        assert_eq!(store.get(&id), None);
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired_keeps_live_sessions() {
        let store = SessionStore::new(Duration::from_secs(60));
        store.create(admin());
        tokio::time::advance(Duration::from_secs(30)).await;
        let live = store.create(admin());
        tokio::time::advance(Duration::from_secs(31)).await;

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(&live).is_some());
    }

    #[test]
    fn test_purge_during_concurrent_logins_counts_only_expired() {
        let store = std::sync::Arc::new(SessionStore::new(Duration::from_secs(60)));

        let writers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        store.create(admin());
                    }
                })
            })
            .collect();

        for _ in 0..200 {
            assert_eq!(store.purge_expired(), 0);
        }
        for writer in writers {
            writer.join().unwrap();
        }
        assert_eq!(store.len(), 800);
    }

    #[test]
    fn test_remove() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create(admin());
        assert_eq!(store.remove(&id), Some(admin()));
        assert_eq!(store.get(&id), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("session", "abc".to_string());
        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
    }
}
