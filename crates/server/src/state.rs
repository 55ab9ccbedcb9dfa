use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use pdfquiz_core::Session;
use pdfquiz_llm::QuizGenerator;

/// A session behind its own lock: actions on one session run one at a time.
pub type SharedSession = Arc<Mutex<Session>>;

pub struct AppState {
    pub config: pdfquiz_core::Config,
    /// `None` when no API key is configured; generation endpoints answer 503.
    pub generator: Option<QuizGenerator>,
    pub sessions: SessionStore,
}

struct StoredSession {
    session: SharedSession,
    last_seen: Instant,
}

/// In-memory session registry. Nothing survives a restart; idle sessions are
/// dropped by [`run_session_sweeper`].
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, StoredSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> (Uuid, SharedSession) {
        let session = Session::new();
        let id = session.id;
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(
            id,
            StoredSession {
                session: shared.clone(),
                last_seen: Instant::now(),
            },
        );
        (id, shared)
    }

    /// Look up a session and mark it as used.
    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions.get_mut(id)?;
        stored.last_seen = Instant::now();
        Some(stored.session.clone())
    }

    /// Drop sessions unused for at least `max_idle`. Sessions with an action
    /// in flight are kept. Returns the number removed.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| {
            stored.last_seen.elapsed() < max_idle || stored.session.try_lock().is_err()
        });
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Periodically evict idle sessions. Runs until the runtime shuts down.
pub async fn run_session_sweeper(state: Arc<AppState>, max_idle: Duration) {
    let tick = max_idle.min(Duration::from_secs(SWEEP_INTERVAL_SECS));
    let mut interval = tokio::time::interval(tick);

    loop {
        interval.tick().await;
        let removed = state.sessions.evict_idle(max_idle).await;
        if removed > 0 {
            info!(
                "Evicted {} idle session(s), {} remaining",
                removed,
                state.sessions.len().await
            );
        } else {
            debug!("Session sweep: nothing idle");
        }
    }
}

const SWEEP_INTERVAL_SECS: u64 = 60;
