//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::Dirs;
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "arview";

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.is_empty())
}

impl EnvResolver for StdEnvResolver {
    fn resolve_dirs(&self) -> Result<Dirs, Error> {
        if let Some(home) = non_empty_var("ARVIEW_HOME") {
            let home = PathBuf::from(home);
            return Ok(Dirs {
                config_dir: home.join("config"),
                state_dir: home.join("state"),
            });
        }

        let user_home = non_empty_var("HOME").map(PathBuf::from);
        let config_base = non_empty_var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| user_home.as_ref().map(|h| h.join(".config")))
            .ok_or_else(|| Error::env("HOME is not set"))?;
        let state_base = non_empty_var("XDG_STATE_HOME")
            .map(PathBuf::from)
            .or_else(|| user_home.as_ref().map(|h| h.join(".local").join("state")))
            .ok_or_else(|| Error::env("HOME is not set"))?;

        Ok(Dirs {
            config_dir: config_base.join(APP_DIR),
            state_dir: state_base.join(APP_DIR),
        })
    }

    fn models_path_from_env(&self) -> Option<PathBuf> {
        non_empty_var("ARVIEW_MODELS").map(PathBuf::from)
    }

    fn base_url_from_env(&self) -> Option<String> {
        non_empty_var("ARVIEW_BASE_URL")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 環境変数を触るテストはこの 1 本にまとめる（並列実行で干渉しないように）
    #[test]
    fn test_resolve_from_env_vars() {
        let saved: Vec<(&str, Option<String>)> = ["ARVIEW_HOME", "ARVIEW_MODELS", "ARVIEW_BASE_URL"]
            .into_iter()
            .map(|k| (k, env::var(k).ok()))
            .collect();

        env::set_var("ARVIEW_HOME", "/tmp/arview-home");
        env::set_var("ARVIEW_MODELS", "/tmp/models.json");
        env::set_var("ARVIEW_BASE_URL", "");
        let r = StdEnvResolver;
        let dirs = r.resolve_dirs().unwrap();
        assert_eq!(dirs.config_dir, PathBuf::from("/tmp/arview-home/config"));
        assert_eq!(dirs.state_dir, PathBuf::from("/tmp/arview-home/state"));
        assert_eq!(r.models_path_from_env(), Some(PathBuf::from("/tmp/models.json")));
        assert_eq!(r.base_url_from_env(), None);

        for (k, v) in saved {
            match v {
                Some(v) => env::set_var(k, v),
                None => env::remove_var(k),
            }
        }
    }
}
