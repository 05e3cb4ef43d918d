//! Environment loading for the trivia CLI

use std::path::PathBuf;

use tracing::debug;

/// Load environment variables from .env files.
///
/// Priority order (highest to lowest):
/// 1. Variables already set in the environment
/// 2. Current directory .env
/// 3. ~/.trivia/.env
///
/// dotenvy never overwrites a variable that is already set, so loading the
/// current directory first gives it precedence over the home file.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => {
                    debug!("Loaded .env from ~/.trivia: {}", env_file.display());
                    loaded_from.push(env_file);
                }
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    loaded_from
}

/// The trivia config directory (~/.trivia)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".trivia"))
}
