//! `init` command: write the default configuration.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::config::{ConfigLoader, CONFIG_DIR};

#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub path: PathBuf,
    pub written: bool,
    pub message: String,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }
}

/// Write the default config under `root`. Leaves an existing file alone unless `force`.
pub async fn write_default_config(root: &Path, force: bool) -> Result<InitOutput> {
    let dir = root.join(CONFIG_DIR);
    let path = dir.join("config.yaml");

    if !force && tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Ok(InitOutput {
            message: format!(
                "{} already exists; use --force to overwrite",
                path.display()
            ),
            path,
            written: false,
        });
    }

    tokio::fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    tokio::fs::write(&path, ConfigLoader::default_yaml()?)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(InitOutput {
        message: format!("Wrote default configuration to {}", path.display()),
        path,
        written: true,
    })
}

pub async fn execute(force: bool, json_mode: bool) -> Result<()> {
    let result = write_default_config(Path::new("."), force).await?;
    output(&result, json_mode);
    Ok(())
}
