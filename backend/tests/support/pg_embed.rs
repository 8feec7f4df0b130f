//! Embedded PostgreSQL bootstrap for integration tests.
//!
//! `pg-embed-setup-unpriv` installs binaries and data under `/var/tmp` unless
//! `PG_RUNTIME_DIR` and `PG_DATA_DIR` say otherwise. When either is missing,
//! both are pointed at a fresh directory under `target/pg-embed` for the
//! duration of the bootstrap. Bootstraps are serialised because they mutate
//! the process environment.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Attempts after the first one when the binary download flakes.
const MAX_RETRIES: u32 = 3;
/// Initial backoff, doubled per retry.
const RETRY_DELAY: Duration = Duration::from_millis(500);

fn scratch_dirs() -> Result<(PathBuf, PathBuf), std::io::Error> {
    let target = std::env::var_os("CARGO_TARGET_DIR").map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("target"),
        PathBuf::from,
    );
    let base = target
        .join("pg-embed")
        .join(format!("users-{}-{}", std::process::id(), Uuid::new_v4()));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((runtime_dir, data_dir))
}

fn is_transient(message: &str) -> bool {
    let message = message.to_lowercase();
    [
        "error decoding response body",
        "connection reset",
        "connection refused",
        "timed out",
        "timeout",
        "temporarily unavailable",
        "dns error",
    ]
    .iter()
    .any(|pattern| message.contains(pattern))
}

/// Start an embedded cluster, retrying transient download failures.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_dirs =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if needs_dirs {
        let (runtime_dir, data_dir) = scratch_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt == MAX_RETRIES || !is_transient(&last_error) {
                    break;
                }
                let delay = RETRY_DELAY * 2_u32.pow(attempt);
                eprintln!("pg-embed: attempt {} failed, retrying in {delay:?}", attempt + 1);
                std::thread::sleep(delay);
            }
        }
    }
    Err(last_error)
}
