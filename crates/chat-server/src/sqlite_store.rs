//! SQLite-backed message store.
//!
//! Messages live in a single `messages` table. Every row gets a
//! monotonic `seq` from `AUTOINCREMENT`, and listing orders by it, so
//! per-room order is insertion order by construction rather than by
//! whatever the engine happens to return for an unsorted scan.
//!
//! `rusqlite` is blocking; each call runs on the blocking pool with
//! the connection behind a mutex.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chat_core::{ChatError, Message, MessageStore};
use rusqlite::{params, Connection};
use tracing::info;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS messages (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    room        TEXT NOT NULL,
    user_id     TEXT NOT NULL,
    text        TEXT NOT NULL,
    time        TEXT NOT NULL,
    fingerprint TEXT
);

CREATE INDEX IF NOT EXISTS idx_messages_room_seq ON messages(room, seq);
";

/// Persistent [`MessageStore`].
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database file at `path` and ensure the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ChatError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(storage_err)?;

        // WAL lets readers proceed while a post is being committed.
        let _: String = conn
            .query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))
            .map_err(storage_err)?;

        let store = Self::with_connection(conn)?;
        info!(path = %path.display(), "opened sqlite message store");
        Ok(store)
    }

    /// A throwaway database, used by tests.
    pub fn in_memory() -> Result<Self, ChatError> {
        let conn = Connection::open_in_memory().map_err(storage_err)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, ChatError> {
        conn.execute_batch(SCHEMA_SQL).map_err(storage_err)?;
        Ok(SqliteStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, ChatError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| ChatError::Storage("sqlite connection poisoned".to_string()))?;
            f(&*guard).map_err(storage_err)
        })
        .await
        .map_err(|e| ChatError::Storage(format!("sqlite task failed: {}", e)))?
    }
}

#[async_trait]
impl MessageStore for SqliteStore {
    async fn append(&self, room: &str, message: Message) -> Result<(), ChatError> {
        let room = room.to_string();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO messages (room, user_id, text, time, fingerprint)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    room,
                    message.user_id,
                    message.text,
                    message.time,
                    message.fingerprint
                ],
            )
            .map(|_| ())
        })
        .await
    }

    async fn list_by_room(&self, room: &str) -> Result<Vec<Message>, ChatError> {
        let room = room.to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT user_id, text, time, room, fingerprint
                 FROM messages
                 WHERE room = ?1
                 ORDER BY seq ASC",
            )?;

            let rows = stmt
                .query_map(params![room], |row| {
                    Ok(Message {
                        user_id: row.get(0)?,
                        text: row.get(1)?,
                        time: row.get(2)?,
                        room: row.get(3)?,
                        fingerprint: row.get(4)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(rows)
        })
        .await
    }
}

fn storage_err(e: rusqlite::Error) -> ChatError {
    ChatError::Storage(e.to_string())
}
