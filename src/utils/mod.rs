pub mod config_path;
pub mod logging;
pub mod permissions;

pub use config_path::{resolve_config_path, ConfigSource};
pub use logging::init_tracing;

// ✅ Макросы условного логирования: аргументы не вычисляются, если уровень выключен
#[macro_export]
macro_rules! debug_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! trace_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!($($arg)*);
        }
    };
}
