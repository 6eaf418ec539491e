//! API host override: env var → .env in dir.

use std::path::Path;

use crate::utils::config::PackagePaths;

fn non_empty_env(key: &str) -> Option<String> {
    let s = std::env::var(key).ok()?;
    let s = s.trim().to_string();
    (!s.is_empty()).then_some(s)
}

/// Read `OSFMIRROR_API_HOST` from the environment, falling back to a `.env` file in `dir`.
pub fn api_host_from_env(dir: &Path) -> Option<String> {
    let key = PackagePaths::get().host_env_key();
    if let Some(s) = non_empty_env(key) {
        return Some(s);
    }
    let env_path = dir.join(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(&env_path);
        return non_empty_env(key);
    }
    None
}
