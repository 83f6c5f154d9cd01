use crate::config::Config;
use anyhow::Result;
use tracing::warn;
use tracing_subscriber::{
    fmt::time::ChronoLocal, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter,
    Registry,
};

/// Формат времени в начале каждой строки лога
pub const TIMESTAMP_FORMAT: &str = "%m-%d-%Y %H:%M:%S";

/// Управляет уровнем логирования во время работы: флаг `debug` из конфигурации
/// включает отладочный вывод без перезапуска процесса.
pub struct LogControl {
    handle: reload::Handle<EnvFilter, Registry>,
    base_directive: String,
}

pub fn init_tracing(level: &str) -> Result<LogControl> {
    // RUST_LOG имеет приоритет над --log-level
    let base_directive = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| level.to_string());
    let filter = EnvFilter::try_new(&base_directive)?;
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
                .with_target(false)
                .compact(),
        )
        .init();

    Ok(LogControl {
        handle,
        base_directive,
    })
}

impl LogControl {
    /// Применить флаг `debug` из только что загруженной конфигурации
    pub fn apply(&self, config: &Config) {
        let directive = filter_directive(&self.base_directive, config.debug);

        match EnvFilter::try_new(&directive) {
            Ok(filter) => {
                if let Err(e) = self.handle.reload(filter) {
                    warn!("Не удалось изменить уровень логирования: {}", e);
                }
            }
            Err(e) => warn!("Неверный фильтр логирования '{}': {}", directive, e),
        }
    }
}

fn filter_directive(base: &str, debug: bool) -> String {
    if debug {
        format!("{},{}=debug", base, env!("CARGO_CRATE_NAME"))
    } else {
        base.to_string()
    }
}
