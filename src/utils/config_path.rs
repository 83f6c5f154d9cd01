use crate::config::DEFAULT_CONFIG_FILE;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Откуда взят путь к файлу конфигурации
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Передан через --config
    Explicit,
    /// Рядом с исполняемым файлом
    ExecutableDir,
    /// Текущий каталог: бинарник запущен из каталога сборки cargo
    BuildLocation,
    /// Текущий каталог: путь к исполняемому файлу определить не удалось
    CurrentDir,
}

#[derive(Debug, Clone)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub source: ConfigSource,
    pub running_from: Option<PathBuf>,
}

pub fn resolve_config_path(explicit: Option<&Path>) -> ConfigLocation {
    let running_from = match std::env::current_exe() {
        Ok(exe) => exe.parent().map(Path::to_path_buf),
        Err(e) => {
            warn!("Не удалось определить путь к исполняемому файлу: {}", e);
            None
        }
    };

    resolve_from(explicit, running_from)
}

fn resolve_from(explicit: Option<&Path>, running_from: Option<PathBuf>) -> ConfigLocation {
    let (path, source) = match (explicit, running_from.as_deref()) {
        (Some(path), _) => (path.to_path_buf(), ConfigSource::Explicit),
        (None, Some(dir)) if !is_build_location(dir) => {
            (dir.join(DEFAULT_CONFIG_FILE), ConfigSource::ExecutableDir)
        }
        (None, Some(_)) => (PathBuf::from(DEFAULT_CONFIG_FILE), ConfigSource::BuildLocation),
        (None, None) => (PathBuf::from(DEFAULT_CONFIG_FILE), ConfigSource::CurrentDir),
    };

    ConfigLocation {
        path,
        source,
        running_from,
    }
}

/// `target/debug`, `target/release/deps`, `target/<triple>/release` и т.п.
pub fn is_build_location(dir: &Path) -> bool {
    let components: Vec<_> = dir.iter().collect();

    components
        .iter()
        .position(|c| *c == "target")
        .map(|idx| {
            components[idx + 1..]
                .iter()
                .any(|c| *c == "debug" || *c == "release")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_locations_are_detected() {
        assert!(is_build_location(Path::new("/home/me/mouse-move/target/debug")));
        assert!(is_build_location(Path::new("/home/me/mouse-move/target/release/deps")));
        assert!(is_build_location(Path::new("/src/target/x86_64-unknown-linux-gnu/release")));
        assert!(!is_build_location(Path::new("/usr/local/bin")));
        assert!(!is_build_location(Path::new("/opt/target")));
    }

    #[test]
    fn test_explicit_path_wins() {
        let location = resolve_from(
            Some(Path::new("/etc/mouse_move.yaml")),
            Some(PathBuf::from("/usr/local/bin")),
        );
        assert_eq!(location.path, PathBuf::from("/etc/mouse_move.yaml"));
        assert_eq!(location.source, ConfigSource::Explicit);
    }

    #[test]
    fn test_installed_binary_uses_its_directory() {
        let location = resolve_from(None, Some(PathBuf::from("/usr/local/bin")));
        assert_eq!(location.path, PathBuf::from("/usr/local/bin/mouse_move.yaml"));
        assert_eq!(location.source, ConfigSource::ExecutableDir);
    }

    #[test]
    fn test_unknown_executable_falls_back_to_cwd() {
        let location = resolve_from(None, None);
        assert_eq!(location.path, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(location.source, ConfigSource::CurrentDir);
        assert!(location.running_from.is_none());
    }

    #[test]
    fn test_build_directory_falls_back_to_cwd() {
        let location = resolve_from(None, Some(PathBuf::from("/work/target/debug")));
        assert_eq!(location.path, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(location.source, ConfigSource::BuildLocation);
    }
}
