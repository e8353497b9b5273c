//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "medboard";
const APPLICATION: &str = "medboard";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Persistent application data.
///
/// - Linux: `$XDG_DATA_HOME/medboard` or `~/.local/share/medboard`
/// - macOS: `~/Library/Application Support/com.medboard.medboard`
/// - Windows: `C:\Users\<User>\AppData\Roaming\medboard\medboard\data`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Regenerable data such as logs.
///
/// - Linux: `$XDG_CACHE_HOME/medboard` or `~/.cache/medboard`
/// - macOS: `~/Library/Caches/com.medboard.medboard`
/// - Windows: `C:\Users\<User>\AppData\Local\medboard\medboard\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// The settings database holding the persisted session.
pub fn settings_db() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("settings.db"))
}

pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}

/// Renames latest.log to a timestamped name and prunes old logs.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    let latest = cache.join("latest.log");

    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let archived = cache.join(format!("{}.log", timestamp));
        let _ = fs::rename(&latest, &archived);
    }

    prune_logs(&cache, MAX_OLD_LOGS);
}

/// Removes the oldest archived logs beyond `keep`.
fn prune_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != "latest.log"
        })
        .collect();

    // oldest first
    logs.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());

    if logs.len() > keep {
        for entry in logs.iter().take(logs.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_prune_keeps_newest() {
        let dir = std::env::temp_dir().join(format!("medboard-logs-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for name in ["20250101_000000.log", "20250102_000000.log", "20250103_000000.log"] {
            fs::write(dir.join(name), b"x").unwrap();
            std::thread::sleep(Duration::from_millis(20));
        }
        fs::write(dir.join("latest.log"), b"x").unwrap();

        prune_logs(&dir, 1);

        let mut left: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(left, vec!["20250103_000000.log", "latest.log"]);
        fs::remove_dir_all(&dir).unwrap();
    }
}
