//! Asynchronous mock data-access layer for guestbook entries.
//!
//! Both operations wait out a configurable latency before touching storage so the
//! presentation layer sees realistic loading states. The collection lives in one
//! JSON blob, newest entry first.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::config::DEFAULT_LATENCY_MS;
use crate::db::BlobStore;
use crate::errors::AppError;
use crate::models::GuestbookEntry;

/// Storage key of the serialized collection.
pub const STORAGE_KEY: &str = "guestbook_entries";

/// Used when the palette is configured empty.
const FALLBACK_SIGNATURE: &str = "#ffffff";

/// A fixed entry written on first read.
#[derive(Debug, Clone)]
pub struct SeedEntry {
    pub name: String,
    pub message: String,
    pub signature: String,
    /// How long before the seeding moment the entry claims to have been written
    pub age: chrono::Duration,
}

/// Latency, signature palette and seed content.
#[derive(Debug, Clone)]
pub struct GuestbookConfig {
    pub latency: Duration,
    pub palette: Vec<String>,
    /// Newest first
    pub seed: Vec<SeedEntry>,
}

impl Default for GuestbookConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            palette: vec!["#b8bb26".to_string(), "#cc241d".to_string()],
            seed: vec![
                SeedEntry {
                    name: "Charles".to_string(),
                    message: "Love the aesthetic! Clean transitions.".to_string(),
                    signature: "#ff00ff".to_string(),
                    age: chrono::Duration::days(1),
                },
                SeedEntry {
                    name: "Sarah".to_string(),
                    message: "Aimal, this portfolio is sick. Linux forever.".to_string(),
                    signature: "#00ffff".to_string(),
                    age: chrono::Duration::days(2),
                },
            ],
        }
    }
}

impl GuestbookConfig {
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

/// Mock guestbook backend.
pub struct GuestbookStore {
    storage: Arc<dyn BlobStore>,
    config: GuestbookConfig,
    /// Serializes read-modify-write of the blob
    write_lock: Mutex<()>,
}

impl GuestbookStore {
    pub fn new(storage: Arc<dyn BlobStore>, config: GuestbookConfig) -> Self {
        Self {
            storage,
            config,
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &GuestbookConfig {
        &self.config
    }

    /// Return the whole collection, seeding it on first use.
    ///
    /// A malformed blob is discarded and re-seeded. If storage cannot be read at
    /// all, one re-seed is attempted and an empty collection is returned when that
    /// write fails too. Only a failed seed write on an empty store is an error.
    pub async fn fetch_entries(&self) -> Result<Vec<GuestbookEntry>, AppError> {
        self.simulate_latency().await;
        let _guard = self.write_lock.lock().await;

        match self.storage.get(STORAGE_KEY).await {
            Ok(Some(blob)) => match decode(&blob) {
                Ok(entries) => Ok(entries),
                Err(e) => {
                    tracing::warn!("Discarding malformed guestbook blob: {}", e);
                    self.write_seed().await
                }
            },
            Ok(None) => {
                tracing::info!("No guestbook blob found, seeding");
                self.write_seed().await
            }
            Err(e) => {
                tracing::warn!("Failed to read guestbook blob: {}", e);
                match self.write_seed().await {
                    Ok(seed) => Ok(seed),
                    Err(e) => {
                        tracing::warn!("Re-seed after read failure also failed: {}", e);
                        Ok(Vec::new())
                    }
                }
            }
        }
    }

    /// Append a new entry at the front of the collection and return it.
    ///
    /// `name` and `message` are expected to be validated by the caller.
    pub async fn add_entry(&self, name: &str, message: &str) -> Result<GuestbookEntry, AppError> {
        self.simulate_latency().await;
        let _guard = self.write_lock.lock().await;

        let now = Utc::now();
        let mut entries = match self.storage.get(STORAGE_KEY).await? {
            Some(blob) => decode(&blob).unwrap_or_else(|e| {
                tracing::warn!("Replacing malformed guestbook blob with seed: {}", e);
                self.seed_entries(now)
            }),
            None => self.seed_entries(now),
        };

        let entry = GuestbookEntry {
            id: next_id(&entries, now),
            name: name.to_string(),
            message: message.to_string(),
            created_at: now.to_rfc3339(),
            signature: pick_signature(&self.config.palette),
        };

        entries.insert(0, entry.clone());
        self.storage.put(STORAGE_KEY, &encode(&entries)?).await?;

        tracing::info!(id = entry.id, "Guestbook entry added");
        Ok(entry)
    }

    async fn simulate_latency(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }

    async fn write_seed(&self) -> Result<Vec<GuestbookEntry>, AppError> {
        let seed = self.seed_entries(Utc::now());
        self.storage.put(STORAGE_KEY, &encode(&seed)?).await?;
        Ok(seed)
    }

    /// Seed ids count down from the seed length so the newest seed has the largest id.
    fn seed_entries(&self, now: DateTime<Utc>) -> Vec<GuestbookEntry> {
        let count = self.config.seed.len() as u64;
        self.config
            .seed
            .iter()
            .enumerate()
            .map(|(i, seed)| GuestbookEntry {
                id: count - i as u64,
                name: seed.name.clone(),
                message: seed.message.clone(),
                created_at: (now - seed.age).to_rfc3339(),
                signature: seed.signature.clone(),
            })
            .collect()
    }
}

/// Serialize a collection into its durable blob form.
pub fn encode(entries: &[GuestbookEntry]) -> Result<String, AppError> {
    Ok(serde_json::to_string(entries)?)
}

/// Parse a durable blob.
pub fn decode(blob: &str) -> Result<Vec<GuestbookEntry>, serde_json::Error> {
    serde_json::from_str(blob)
}

/// Millisecond timestamp, bumped past the newest existing id when the clock lags.
fn next_id(entries: &[GuestbookEntry], now: DateTime<Utc>) -> u64 {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let newest = entries.iter().map(|e| e.id).max().unwrap_or(0);
    millis.max(newest + 1)
}

fn pick_signature(palette: &[String]) -> String {
    if palette.is_empty() {
        return FALLBACK_SIGNATURE.to_string();
    }
    let roll = uuid::Uuid::new_v4().as_u128();
    let index = (roll % palette.len() as u128) as usize;
    palette[index].clone()
}
