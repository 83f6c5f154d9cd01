use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MouseMoveError {
    #[error("Не удалось прочитать файл конфигурации {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Ошибка разбора конфигурации {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    #[error("Не удалось получить метаданные файла {path:?}: {source}")]
    ConfigStat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Ошибка uinput: {0}")]
    Uinput(#[from] uinput::Error),

    #[error("Указатель недоступен: {0}")]
    PointerUnavailable(String),

    #[error("Недостаточно прав доступа: {0}")]
    Permission(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl MouseMoveError {
    /// Ошибки, после которых продолжать работу небезопасно
    pub fn is_fatal(&self) -> bool {
        matches!(self, MouseMoveError::ConfigParse { .. })
    }
}

pub type Result<T> = std::result::Result<T, MouseMoveError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! mouse_move_error {
    (pointer_unavailable, $($arg:tt)*) => {
        $crate::error::MouseMoveError::PointerUnavailable(format!($($arg)*))
    };
    (permission, $($arg:tt)*) => {
        $crate::error::MouseMoveError::Permission(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::MouseMoveError::Internal(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_parse_errors_are_fatal() {
        let read = MouseMoveError::ConfigRead {
            path: PathBuf::from("mouse_move.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(!read.is_fatal());

        let parse = MouseMoveError::ConfigParse {
            path: PathBuf::from("mouse_move.yaml"),
            source: Box::new(figment::Error::from("bad".to_string())),
        };
        assert!(parse.is_fatal());

        let pointer = crate::mouse_move_error!(pointer_unavailable, "нет дисплея {}", ":0");
        assert!(!pointer.is_fatal());
        assert!(pointer.to_string().contains(":0"));
    }

    #[test]
    fn test_io_errors_name_the_config_file() {
        let stat = MouseMoveError::ConfigStat {
            path: PathBuf::from("/etc/mouse_move.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = stat.to_string();
        assert!(message.contains("/etc/mouse_move.yaml"), "{}", message);
        assert!(message.contains("denied"), "{}", message);
        assert!(std::error::Error::source(&stat).is_some());
        assert!(!stat.is_fatal());
    }
}
