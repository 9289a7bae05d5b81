//! File-backed conversation memory.
//!
//! Storage layout under the root directory:
//!
//! ```text
//! root/
//! ├── _titles.json          # session id -> custom title
//! ├── <session-id>.json     # [{"type":"USER","content":"..."}, ...]
//! └── ...
//! ```
//!
//! Each session file holds the full history, pretty-printed, rewritten on
//! every append. An in-process cache keeps loaded histories; the
//! serialization unit is the session id -- the load→append→persist sequence
//! runs inside a per-session async mutex held in a `DashMap` lock table, so
//! appends to distinct sessions never contend.
//!
//! Persist-then-cache ordering: the cache is updated only after the write
//! succeeds, so a failed `append` leaves cache and disk consistent at the
//! pre-append history.
//!
//! Title index I/O is best-effort: read and write failures are logged at
//! warn level and swallowed. A lost title is cosmetic; a lost message is not.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;

use parlance_core::catalog;
use parlance_core::memory::ConversationMemory;
use parlance_types::error::MemoryError;
use parlance_types::message::{ChatMessage, MessageRole};
use parlance_types::session::SessionSummary;

/// Filename of the title index, excluded from session enumeration.
const TITLE_INDEX_FILE: &str = "_titles.json";

/// Extension of per-session history files.
const SESSION_FILE_SUFFIX: &str = ".json";

/// A cached session history. `None` until first load.
type SessionSlot = Arc<Mutex<Option<Vec<ChatMessage>>>>;

/// File-backed implementation of `ConversationMemory`.
///
/// One instance owns one storage root; construct it explicitly at startup
/// and share it behind an `Arc`. There is no ambient/static state.
pub struct FileConversationMemory {
    root: PathBuf,
    /// Per-session lock table and history cache.
    sessions: DashMap<String, SessionSlot>,
    /// Custom titles, mirrored to `_titles.json`.
    titles: DashMap<String, String>,
    /// Serializes all writes to the shared title index file.
    title_index_lock: Mutex<()>,
}

impl FileConversationMemory {
    /// Create a store rooted at `root`, creating the directory if needed
    /// and loading the title index tolerantly.
    ///
    /// # Errors
    ///
    /// Returns `MemoryError::Init` if the root directory cannot be created;
    /// this is fatal at startup. A missing or malformed title index is not
    /// an error.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, MemoryError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| MemoryError::Init {
            path: root.display().to_string(),
            source,
        })?;

        let titles = DashMap::new();
        match std::fs::read_to_string(root.join(TITLE_INDEX_FILE)) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(loaded) => {
                    for (id, title) in loaded {
                        titles.insert(id, title);
                    }
                }
                Err(e) => warn!(error = %e, "ignoring malformed title index"),
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(error = %e, "failed to read title index"),
        }

        Ok(Self {
            root,
            sessions: DashMap::new(),
            titles,
            title_index_lock: Mutex::new(()),
        })
    }

    /// The storage root this instance owns.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn session_path(&self, session_id: &str) -> PathBuf {
        self.root.join(format!("{session_id}{SESSION_FILE_SUFFIX}"))
    }

    /// Get or create the session's cache slot.
    fn slot(&self, session_id: &str) -> SessionSlot {
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }

    /// Read a session file from disk. Absent or malformed files read as
    /// empty -- tolerant read, never an error.
    async fn load_from_disk(&self, session_id: &str) -> Vec<ChatMessage> {
        let path = self.session_path(session_id);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    warn!(session_id, error = %e, "failed to read session file, treating as empty");
                }
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<MessageRecord>>(&raw) {
            Ok(records) => records.into_iter().map(MessageRecord::into_message).collect(),
            Err(e) => {
                warn!(session_id, error = %e, "malformed session file, treating as empty");
                Vec::new()
            }
        }
    }

    /// Write the full history to the session file.
    async fn persist(
        &self,
        session_id: &str,
        history: &[ChatMessage],
    ) -> Result<(), MemoryError> {
        let records: Vec<MessageRecord> =
            history.iter().map(MessageRecord::from_message).collect();
        let json = serde_json::to_vec_pretty(&records).map_err(|source| {
            MemoryError::Serialize {
                session_id: session_id.to_string(),
                source,
            }
        })?;
        tokio::fs::write(self.session_path(session_id), json)
            .await
            .map_err(|source| MemoryError::Persist {
                session_id: session_id.to_string(),
                source,
            })
    }

    /// Load the session history through the cache (full history).
    async fn load_session(&self, session_id: &str) -> Vec<ChatMessage> {
        let slot = self.slot(session_id);
        let mut guard = slot.lock().await;
        if guard.is_none() {
            *guard = Some(self.load_from_disk(session_id).await);
        }
        guard.clone().unwrap_or_default()
    }

    /// Persist the title index. Best-effort: failures are logged, never
    /// surfaced. All index writes serialize through one coarse lock.
    async fn save_titles(&self) {
        let _io_guard = self.title_index_lock.lock().await;
        let snapshot: BTreeMap<String, String> = self
            .titles
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        let json = match serde_json::to_vec_pretty(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize title index");
                return;
            }
        };
        if let Err(e) = tokio::fs::write(self.root.join(TITLE_INDEX_FILE), json).await {
            warn!(error = %e, "failed to persist title index");
        }
    }
}

impl ConversationMemory for FileConversationMemory {
    async fn append(
        &self,
        session_id: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<(), MemoryError> {
        let slot = self.slot(session_id);
        let mut guard = slot.lock().await;

        let mut history = match guard.take() {
            Some(history) => history,
            None => self.load_from_disk(session_id).await,
        };
        let prior_len = history.len();
        history.extend(messages);

        match self.persist(session_id, &history).await {
            Ok(()) => {
                *guard = Some(history);
                Ok(())
            }
            Err(e) => {
                // Keep the cache at the pre-append history so it stays
                // consistent with what is on disk.
                history.truncate(prior_len);
                *guard = Some(history);
                Err(e)
            }
        }
    }

    async fn read(&self, session_id: &str, limit: usize) -> Vec<ChatMessage> {
        let mut messages = self.load_session(session_id).await;
        if limit == 0 || messages.len() <= limit {
            messages
        } else {
            messages.split_off(messages.len() - limit)
        }
    }

    async fn clear(&self, session_id: &str) {
        // Wait for in-flight operations on this session before deleting,
        // and leave any straggler holding the old slot an empty history
        // that matches the now-absent file.
        if let Some((_, slot)) = self.sessions.remove(session_id) {
            let mut guard = slot.lock().await;
            *guard = Some(Vec::new());
        }

        self.titles.remove(session_id);
        self.save_titles().await;

        if let Err(e) = tokio::fs::remove_file(self.session_path(session_id)).await {
            if e.kind() != ErrorKind::NotFound {
                warn!(session_id, error = %e, "failed to delete session file");
            }
        }
    }

    async fn set_title(&self, session_id: &str, title: &str) {
        self.titles
            .insert(session_id.to_string(), title.to_string());
        self.save_titles().await;
    }

    async fn title(&self, session_id: &str) -> Option<String> {
        self.titles.get(session_id).map(|entry| entry.clone())
    }

    async fn list_sessions(&self) -> Vec<SessionSummary> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "failed to enumerate session directory");
                return Vec::new();
            }
        };

        let mut summaries = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "failed to read session directory entry");
                    break;
                }
            };

            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name == TITLE_INDEX_FILE {
                continue;
            }
            let Some(id) = name.strip_suffix(SESSION_FILE_SUFFIX) else {
                continue;
            };

            // The listing timestamp is the file's mtime -- durable state,
            // not an in-memory field.
            let last_modified_ms = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(time) => system_time_ms(time),
                Err(e) => {
                    warn!(session = id, error = %e, "failed to read session file mtime");
                    continue;
                }
            };

            let custom = self.titles.get(id).map(|entry| entry.clone());
            let title = match custom {
                Some(title) if !title.trim().is_empty() => title,
                _ => {
                    let messages = self.load_session(id).await;
                    catalog::derive_title(&messages)
                }
            };

            summaries.push(SessionSummary {
                id: id.to_string(),
                title,
                last_modified_ms,
            });
        }

        // Most recent first; session id breaks ties deterministically.
        summaries.sort_by(|a, b| {
            b.last_modified_ms
                .cmp(&a.last_modified_ms)
                .then_with(|| a.id.cmp(&b.id))
        });
        summaries
    }
}

fn system_time_ms(time: SystemTime) -> i64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Private record type for the on-disk message format
// ---------------------------------------------------------------------------

/// On-disk message record: `{"type":"USER","content":"..."}`.
#[derive(Serialize, Deserialize)]
struct MessageRecord {
    #[serde(rename = "type")]
    kind: String,
    content: String,
}

impl MessageRecord {
    fn from_message(message: &ChatMessage) -> Self {
        Self {
            kind: message.role.to_string(),
            content: message.content.clone(),
        }
    }

    fn into_message(self) -> ChatMessage {
        // Unknown role strings decode as user messages (tolerant read).
        let role = self.kind.parse().unwrap_or(MessageRole::User);
        ChatMessage {
            role,
            content: self.content,
        }
    }
}
