use crate::error::StoreError;
use crate::model::Task;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 2;
const STORE_FILE_NAME: &str = "tasks.json";
const STORE_PATH_ENV: &str = "TODO_STORE_PATH";

#[derive(Debug, Serialize, Deserialize)]
struct StoredTasks {
    schema_version: u32,
    tasks: Vec<Task>,
    #[serde(default)]
    next_id: u64,
}

/// Everything the store persists: the collection plus the id counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreState {
    pub tasks: Vec<Task>,
    pub next_id: u64,
}

impl StoreState {
    pub fn empty() -> Self {
        StoreState {
            tasks: Vec::new(),
            next_id: 1,
        }
    }
}

#[derive(Debug)]
pub struct StateLoad {
    pub state: StoreState,
    pub error: Option<StoreError>,
}

pub fn store_path() -> Result<PathBuf, StoreError> {
    if let Ok(path) = std::env::var(STORE_PATH_ENV)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| StoreError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("todo_store")
            .join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| StoreError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("todo_store")
            .join(STORE_FILE_NAME))
    }
}

pub fn load_state(path: &Path) -> Result<StoreState, StoreError> {
    if !path.exists() {
        return Ok(StoreState::empty());
    }

    let content = std::fs::read_to_string(path).map_err(|err| StoreError::io(err.to_string()))?;
    let stored: StoredTasks =
        serde_json::from_str(&content).map_err(|err| StoreError::invalid_data(err.to_string()))?;

    if !(1..=SCHEMA_VERSION).contains(&stored.schema_version) {
        return Err(StoreError::invalid_data("schema_version mismatch"));
    }

    // v1 stores carried no counter; resume above the highest id already taken.
    let next_id = if stored.next_id == 0 {
        stored
            .tasks
            .iter()
            .map(|task| task.id)
            .max()
            .map_or(1, |id| id + 1)
    } else {
        stored.next_id
    };

    if stored.tasks.iter().any(|task| task.id >= next_id) {
        return Err(StoreError::invalid_data("next_id behind existing task ids"));
    }

    Ok(StoreState {
        tasks: stored.tasks,
        next_id,
    })
}

/// Soft-fail variant for store construction: corrupt or unreadable data falls
/// back to an empty state and hands the error back for logging.
pub fn load_state_with_fallback(path: &Path) -> StateLoad {
    match load_state(path) {
        Ok(state) => StateLoad { state, error: None },
        Err(err) => StateLoad {
            state: StoreState::empty(),
            error: Some(err),
        },
    }
}

pub fn save_state(path: &Path, state: &StoreState) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| StoreError::io(err.to_string()))?;
    }

    let stored = StoredTasks {
        schema_version: SCHEMA_VERSION,
        tasks: state.tasks.to_vec(),
        next_id: state.next_id,
    };
    let content = serde_json::to_string_pretty(&stored)
        .map_err(|err| StoreError::invalid_data(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| StoreError::io(err.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions)
            .map_err(|err| StoreError::io(err.to_string()))?;
    }

    Ok(())
}
