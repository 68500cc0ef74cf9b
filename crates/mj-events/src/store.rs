//! File-backed, size-bounded event history per tenant.
//!
//! Each tenant owns one JSON file holding its whole sequence, newest first.
//! Every mutation rewrites that file through a sibling temporary file and a
//! rename, so a reader never sees a half-written sequence. All file work for
//! a tenant happens while holding that tenant's lock from [`TenantLocks`].

use crate::codec;
use crate::error::EventError;
use crate::locks::TenantLocks;
use crate::tenant::TenantKey;
use crate::types::EventRecord;
use std::fs::Permissions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

pub struct EventStore {
    data_dir: PathBuf,
    max_events: usize,
    locks: TenantLocks,
}

impl EventStore {
    /// `max_events == 0` keeps every record.
    pub fn new(data_dir: impl Into<PathBuf>, max_events: usize) -> Self {
        Self {
            data_dir: data_dir.into(),
            max_events,
            locks: TenantLocks::new(),
        }
    }

    /// Creates the data directory if needed and returns the store.
    pub async fn open(data_dir: impl Into<PathBuf>, max_events: usize) -> Result<Self, EventError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .await
            .map_err(|err| io_error(&data_dir, &err))?;
        info!(data_dir = %data_dir.display(), max_events, "event store ready");
        Ok(Self::new(data_dir, max_events))
    }

    pub fn path_for(&self, key: &TenantKey) -> PathBuf {
        self.data_dir.join(key.file_name())
    }

    /// Decodes `raw` and prepends it to the tenant's history, returning the
    /// sequence as persisted.
    ///
    /// A malformed body is rejected before the tenant's file is touched.
    pub async fn append(
        &self,
        key: &TenantKey,
        raw: &[u8],
    ) -> Result<Vec<EventRecord>, EventError> {
        let record = codec::decode(raw)?;
        let _guard = self.locks.acquire(key).await;
        let path = self.path_for(key);
        let (mut events, permissions) = load_or_create(&path).await?;
        debug!(tenant = %key, event_type = %record.event_type, "appending event");
        events.insert(0, record);
        trim(&mut events, self.max_events);
        write_sequence(&path, &events, permissions).await?;
        Ok(events)
    }

    /// Returns the tenant's history, creating an empty one on first access.
    pub async fn read(&self, key: &TenantKey) -> Result<Vec<EventRecord>, EventError> {
        let _guard = self.locks.acquire(key).await;
        let path = self.path_for(key);
        let (events, _) = load_or_create(&path).await?;
        Ok(events)
    }
}

fn trim(events: &mut Vec<EventRecord>, max_events: usize) {
    if max_events > 0 && events.len() > max_events {
        events.truncate(max_events);
    }
}

/// Only a missing file is treated as an empty history. Any other metadata
/// failure, such as a permission error, is reported instead of replacing the
/// file.
async fn load_or_create(
    path: &Path,
) -> Result<(Vec<EventRecord>, Option<Permissions>), EventError> {
    match fs::metadata(path).await {
        Ok(metadata) => {
            let bytes = fs::read(path).await.map_err(|err| io_error(path, &err))?;
            let events =
                serde_json::from_slice(&bytes).map_err(|err| EventError::StoreCorrupt {
                    path: path.display().to_string(),
                    message: err.to_string(),
                })?;
            Ok((events, Some(metadata.permissions())))
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            let permissions = new_file_permissions();
            write_sequence(path, &[], permissions.clone()).await?;
            info!(path = %path.display(), "created event data file");
            Ok((Vec::new(), permissions))
        }
        Err(err) => Err(io_error(path, &err)),
    }
}

async fn write_sequence(
    path: &Path,
    events: &[EventRecord],
    permissions: Option<Permissions>,
) -> Result<(), EventError> {
    let bytes = serde_json::to_vec(events).map_err(|err| EventError::Encode {
        message: err.to_string(),
    })?;
    let tmp = temp_path(path);
    fs::write(&tmp, &bytes)
        .await
        .map_err(|err| io_error(&tmp, &err))?;
    if let Some(permissions) = permissions {
        fs::set_permissions(&tmp, permissions)
            .await
            .map_err(|err| io_error(&tmp, &err))?;
    }
    fs::rename(&tmp, path)
        .await
        .map_err(|err| io_error(path, &err))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

fn io_error(path: &Path, err: &std::io::Error) -> EventError {
    EventError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(tag: &str) -> EventRecord {
        EventRecord::new(tag, json!({ "event": tag }))
    }

    #[test]
    fn trim_drops_oldest_records() {
        let mut events = vec![record("c"), record("b"), record("a")];
        trim(&mut events, 2);
        assert_eq!(events, vec![record("c"), record("b")]);
    }

    #[test]
    fn trim_with_zero_keeps_everything() {
        let mut events = vec![record("c"), record("b"), record("a")];
        trim(&mut events, 0);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn temp_path_is_a_sibling() {
        let path = Path::new("/data/events_abc.json");
        assert_eq!(temp_path(path), Path::new("/data/events_abc.json.tmp"));
    }
}
