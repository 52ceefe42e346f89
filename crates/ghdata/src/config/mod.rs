use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub home_dir: PathBuf,
    pub cwd: PathBuf,
    pub database_path: PathBuf,
    pub publicwww_api_key: Option<String>,
}

/// Default GHTorrent database location, relative to the home directory.
pub const DEFAULT_DATABASE_RELATIVE_PATH: &str = ".ghdata/ghtorrent.sqlite";

pub fn resolve_runtime_config(
    home_dir: &Path,
    cwd: &Path,
    database_override: Option<&Path>,
    publicwww_api_key: Option<&str>,
) -> Result<RuntimeConfig> {
    if !home_dir.is_absolute() {
        bail!("home_dir must be absolute: {}", home_dir.display());
    }
    if !cwd.is_absolute() {
        bail!("cwd must be absolute: {}", cwd.display());
    }

    let home_dir = normalize_lexical(home_dir);
    let cwd = normalize_lexical(cwd);
    let database_path = match database_override {
        Some(path) => resolve_user_path(path, &home_dir, &cwd)?,
        None => home_dir.join(DEFAULT_DATABASE_RELATIVE_PATH),
    };
    let publicwww_api_key = publicwww_api_key
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string);

    Ok(RuntimeConfig {
        home_dir,
        cwd,
        database_path: normalize_lexical(&database_path),
        publicwww_api_key,
    })
}

fn resolve_user_path(path: &Path, home_dir: &Path, cwd: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path, home_dir)?;
    let resolved = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };

    Ok(normalize_lexical(&resolved))
}

fn expand_tilde(path: &Path, home_dir: &Path) -> Result<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let mut expanded = home_dir.to_path_buf();
            for component in components {
                expanded.push(component.as_os_str());
            }
            Ok(expanded)
        }
        Some(Component::Normal(first))
            if first
                .to_str()
                .is_some_and(|segment| segment.starts_with('~')) =>
        {
            bail!(
                "unsupported home expansion syntax (only `~` and `~/...` are supported): {}",
                path.display()
            )
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn normalize_lexical(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component.as_os_str());
                }
            }
            _ => normalized.push(component.as_os_str()),
        }
    }

    normalized
}
