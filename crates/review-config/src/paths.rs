use std::path::PathBuf;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "REVMERGE_CONFIG_DIR";

pub struct PathManager {
    config_dir: PathBuf,
}

impl PathManager {
    /// Platform config directory (e.g. `~/.config/revmerge` on Linux), or
    /// `$REVMERGE_CONFIG_DIR` when set. `None` if neither can be determined.
    pub fn new() -> Option<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()?.join("revmerge"),
        };
        Some(Self::with_base(config_dir))
    }

    pub fn with_base(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_under_base() {
        let paths = PathManager::with_base("/tmp/revmerge-test");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/revmerge-test/config.toml"));
    }
}
