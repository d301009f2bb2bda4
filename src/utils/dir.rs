use std::{env, io, path::PathBuf};

use anyhow::{anyhow, Result};

const APPLICATION_DIR_NAME: &str = "serenity-mood";

/// Uses `dir` when provided, otherwise falls back to [create_application_default_path]. The
/// directory is created if it doesn't exist yet.
pub fn resolve_application_path(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(path) => ensure_dir(path),
        None => create_application_default_path(),
    }
}

pub fn create_application_default_path() -> Result<PathBuf> {
    let path = {
        #[cfg(windows)]
        {
            let mut path = PathBuf::from(
                env::var("APPDATA").map_err(|_| anyhow!("APPDATA should be present on Windows"))?,
            );
            path.push(APPLICATION_DIR_NAME);
            path
        }
        #[cfg(not(windows))]
        {
            let mut path = env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .or_else(|_| {
                    env::var("HOME").map(|home| {
                        let mut path = PathBuf::from(home);
                        path.push(".local/state");
                        path
                    })
                })
                .map_err(|_| anyhow!("Couldn't find neither XDG_STATE_HOME nor HOME"))?;
            path.push(APPLICATION_DIR_NAME);
            path
        }
    };

    ensure_dir(path)
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf> {
    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use super::resolve_application_path;

    #[test]
    fn test_explicit_dir_is_created() -> Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("a/b");

        let resolved = resolve_application_path(Some(target.clone()))?;

        assert_eq!(resolved, target);
        assert!(target.is_dir());
        Ok(())
    }
}
