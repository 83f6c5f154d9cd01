use crate::config::Config;
use crate::error::Result;
use crate::services::config_watcher::{ConfigWatcher, FileSnapshot};
use crate::services::Actuator;
use crate::utils::logging::{LogControl, TIMESTAMP_FORMAT};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Что делать, если изменённый файл конфигурации не удалось разобрать
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReloadFailurePolicy {
    /// Завершить процесс, как при ошибке на старте
    Exit,
    /// Оставить прежнюю конфигурацию и ждать следующего изменения файла
    Keep,
}

/// Главный цикл: активность → пауза → проверка файла → (перезагрузка).
///
/// Текущая конфигурация и снимок файла принадлежат только Runner'у и
/// заменяются вместе.
pub struct Runner {
    config: Config,
    watcher: ConfigWatcher,
    actuator: Actuator,
    on_reload_error: ReloadFailurePolicy,
    log_control: Option<LogControl>,
}

impl Runner {
    /// Начальная загрузка конфигурации. Любая ошибка здесь означает, что работать не с чем.
    pub fn start(
        config_path: PathBuf,
        actuator: Actuator,
        on_reload_error: ReloadFailurePolicy,
        log_control: Option<LogControl>,
    ) -> Result<Self> {
        info!("Загрузка конфигурации из: {}", config_path.display());

        let config = Config::load(&config_path)?;
        let snapshot = FileSnapshot::capture(&config_path)?;

        let runner = Self {
            config,
            watcher: ConfigWatcher::new(config_path, snapshot),
            actuator,
            on_reload_error,
            log_control,
        };

        runner.apply_log_level();
        runner.log_settings();
        Ok(runner)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        self.watcher.path()
    }

    /// Возвращает ошибку только если перезагрузка оказалась фатальной
    pub async fn run(mut self) -> Result<()> {
        info!(
            "Цикл запущен (механизм: {}, файл: {})",
            self.actuator.backend(),
            self.config_path().display()
        );

        loop {
            self.cycle().await?;
        }
    }

    pub async fn cycle(&mut self) -> Result<()> {
        self.tick().await;

        let delay = self.config.delay();
        debug!("Пауза {:?}...", delay);
        tokio::time::sleep(delay).await;

        self.check_reload()?;
        Ok(())
    }

    /// Один цикл активности; ошибки механизма указателя только логируются
    pub async fn tick(&mut self) {
        if let Err(e) = self.actuator.tick(&self.config).await {
            error!(
                "Не удалось сдвинуть указатель ({}): {}. Повтор в следующем цикле",
                self.actuator.backend(),
                e
            );
        }
    }

    /// Проверяет файл и при изменении заменяет конфигурацию целиком.
    /// Возвращает `true`, если новая конфигурация применена.
    pub fn check_reload(&mut self) -> Result<bool> {
        let snapshot = match self.watcher.has_changed() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Ok(false),
            Err(e) => {
                warn!("{}. Продолжаем с прежней конфигурацией", e);
                return Ok(false);
            }
        };

        warn!("Файл конфигурации изменился во время работы!");
        info!("Перезагрузка и применение новой конфигурации...");

        match Config::load(self.watcher.path()) {
            Ok(config) => {
                self.config = config;
                self.watcher.commit(snapshot);
                self.apply_log_level();
                self.log_settings();
                Ok(true)
            }
            Err(e) if e.is_fatal() => match self.on_reload_error {
                ReloadFailurePolicy::Exit => Err(e),
                ReloadFailurePolicy::Keep => {
                    error!("{}. Оставляем прежнюю конфигурацию до следующего изменения файла", e);
                    // Тот же битый файл не разбираем повторно в каждом цикле
                    self.watcher.commit(snapshot);
                    Ok(false)
                }
            },
            Err(e) => {
                warn!("{}. Продолжаем с прежней конфигурацией", e);
                Ok(false)
            }
        }
    }

    fn apply_log_level(&self) {
        if let Some(log_control) = &self.log_control {
            log_control.apply(&self.config);
        }
    }

    fn log_settings(&self) {
        let modified: DateTime<Local> = self.watcher.snapshot().modified.into();

        info!("Конфигурация ({}):", modified.format(TIMESTAMP_FORMAT));
        info!("  Enabled: {}", self.config.enabled);
        info!("  Debug: {}", self.config.debug);
        info!("  Delay seconds: {}", self.config.delay_seconds);
    }
}
