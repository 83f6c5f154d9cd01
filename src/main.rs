use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info, warn};
mod config;
mod error;
mod events;
mod services;
mod utils;

use services::{create_pointer, Actuator, PointerKind, ReloadFailurePolicy, Runner};
use utils::{resolve_config_path, ConfigSource};

/// Завершение по SIGINT/SIGTERM
const EXIT_SIGNAL: i32 = 1;
/// Файл конфигурации отсутствует или не разбирается
const EXIT_CONFIG: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "mouse_move", version)]
#[command(about = "Периодически сдвигает указатель мыши, чтобы не срабатывали заставка и блокировка")]
struct Args {
    /// Путь к файлу конфигурации (по умолчанию mouse_move.yaml рядом с исполняемым файлом)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Механизм управления указателем
    #[arg(long, value_enum, default_value = "auto")]
    backend: PointerKind,

    /// Режим сухого запуска (без реальных действий)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования, пока в конфигурации не включён debug
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Реакция на ошибку разбора при перезагрузке конфигурации
    #[arg(long, value_enum, default_value = "exit")]
    on_reload_error: ReloadFailurePolicy,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Инициализация системы логирования
    let log_control = utils::init_tracing(&args.log_level)?;

    info!("{} - v{}", env!("CARGO_BIN_NAME"), env!("CARGO_PKG_VERSION"));

    let location = resolve_config_path(args.config.as_deref());
    match location.source {
        ConfigSource::BuildLocation => {
            warn!("Запуск из каталога сборки, файл конфигурации ищем в текущем каталоге")
        }
        ConfigSource::CurrentDir => {
            warn!("Каталог исполняемого файла неизвестен, файл конфигурации ищем в текущем каталоге")
        }
        ConfigSource::Explicit | ConfigSource::ExecutableDir => {}
    }
    if let Some(dir) = &location.running_from {
        info!("Запуск из: {}", dir.display());
    }

    let kind = if args.dry_run { PointerKind::DryRun } else { args.backend };
    if kind == PointerKind::DryRun {
        warn!("Режим сухого запуска - реальные действия отключены");
    }

    let actuator = Actuator::new(create_pointer(kind)?);

    let runner = match Runner::start(location.path, actuator, args.on_reload_error, Some(log_control)) {
        Ok(runner) => runner,
        Err(e) => {
            error!("{}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if !runner.config().enabled {
        info!("Движение указателя выключено (enabled: false), ждём изменения конфигурации");
    }

    tokio::select! {
        result = runner.run() => {
            if let Err(e) = result {
                error!("Фатальная ошибка конфигурации: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        name = shutdown_signal() => {
            info!("Получен сигнал {}, завершение работы", name);
            std::process::exit(EXIT_SIGNAL);
        }
    }

    Ok(())
}

/// Ожидание SIGINT или SIGTERM
async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(err) => {
                error!("Ошибка при ожидании сигнала завершения: {}", err);
                std::future::pending().await
            }
        }
    };

    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => match stream.recv().await {
                Some(()) => "SIGTERM",
                None => std::future::pending().await,
            },
            Err(err) => {
                warn!("Не удалось подписаться на SIGTERM: {}", err);
                std::future::pending().await
            }
        }
    };

    tokio::select! {
        name = ctrl_c => name,
        name = terminate => name,
    }
}
