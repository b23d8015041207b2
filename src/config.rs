use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HomeboardConfig {
    pub data_dir: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("homeboard.toml")
}

pub fn default_data_dir_in(base: &Path) -> PathBuf {
    base.join(".homeboard")
}

/// Directory holding the small-value tier's JSON documents
pub fn kv_dir_in(data_dir: &Path) -> PathBuf {
    data_dir.join("kv")
}

/// Database file backing the blob tier
pub fn blob_db_path_in(data_dir: &Path) -> PathBuf {
    data_dir.join("media.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<HomeboardConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: HomeboardConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &HomeboardConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_data_dir(data_dir: &Path) -> std::io::Result<()> {
    if !data_dir.as_os_str().is_empty() && !data_dir.exists() {
        std::fs::create_dir_all(data_dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("homeboard.toml");

        let config = HomeboardConfig {
            data_dir: Some("/tmp/boards".into()),
        };
        write_config(&path, &config, false).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.data_dir.as_deref(), Some("/tmp/boards"));

        // a second write without force is refused
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_derived_paths() {
        let data_dir = default_data_dir_in(Path::new("/home/u"));
        assert_eq!(kv_dir_in(&data_dir), Path::new("/home/u/.homeboard/kv"));
        assert_eq!(
            blob_db_path_in(&data_dir),
            Path::new("/home/u/.homeboard/media.db")
        );
    }
}
