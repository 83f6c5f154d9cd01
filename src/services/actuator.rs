use crate::config::Config;
use crate::debug_if_enabled;
use crate::error::Result;
use crate::services::pointer::PointerControl;
use tracing::info;

/// Насколько сдвигается указатель по оси X перед возвратом
pub const NUDGE_DISTANCE: i32 = 10;

/// Имитирует активность пользователя: сдвигает указатель и возвращает его на место
pub struct Actuator {
    pointer: Box<dyn PointerControl>,
}

impl Actuator {
    pub fn new(pointer: Box<dyn PointerControl>) -> Self {
        info!("Инициализация Actuator (механизм: {})", pointer.name());
        Self { pointer }
    }

    pub fn backend(&self) -> &'static str {
        self.pointer.name()
    }

    /// Один цикл активности. При `enabled == false` указатель не трогаем вовсе.
    pub async fn tick(&mut self, config: &Config) -> Result<()> {
        if !config.enabled {
            debug_if_enabled!("Не выполняется (enabled == false)");
            return Ok(());
        }

        let origin = self.pointer.position().await?;
        info!("Сдвиг указателя {}", origin);

        self.pointer.move_to(origin.offset(NUDGE_DISTANCE, 0)).await?;
        self.pointer.move_to(origin).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MouseMoveError;
    use crate::events::Point;
    use crate::services::pointer::DryRunPointer;

    struct UnavailablePointer;

    #[async_trait::async_trait]
    impl PointerControl for UnavailablePointer {
        fn name(&self) -> &'static str {
            "unavailable"
        }

        async fn position(&mut self) -> Result<Point> {
            Err(MouseMoveError::PointerUnavailable("нет дисплея".to_string()))
        }

        async fn move_to(&mut self, _target: Point) -> Result<()> {
            panic!("move_to не должен вызываться без позиции");
        }
    }

    #[tokio::test]
    async fn test_enabled_tick_moves_and_restores() {
        let pointer = DryRunPointer::at(Point::new(40, 60));
        let history = pointer.history();
        let mut actuator = Actuator::new(Box::new(pointer));

        actuator.tick(&Config::default()).await.unwrap();

        assert_eq!(
            *history.lock(),
            vec![Point::new(40 + NUDGE_DISTANCE, 60), Point::new(40, 60)]
        );
    }

    #[tokio::test]
    async fn test_disabled_tick_never_moves() {
        let pointer = DryRunPointer::new();
        let history = pointer.history();
        let mut actuator = Actuator::new(Box::new(pointer));
        let config = Config {
            enabled: false,
            ..Config::default()
        };

        actuator.tick(&config).await.unwrap();
        actuator.tick(&config).await.unwrap();

        assert!(history.lock().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_tick_skips_unavailable_backend() {
        let mut actuator = Actuator::new(Box::new(UnavailablePointer));
        let config = Config {
            enabled: false,
            ..Config::default()
        };

        assert!(actuator.tick(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_backend_failure_is_recoverable() {
        let mut actuator = Actuator::new(Box::new(UnavailablePointer));

        let err = actuator.tick(&Config::default()).await.unwrap_err();
        assert!(matches!(err, MouseMoveError::PointerUnavailable(_)));
        assert!(!err.is_fatal());
    }
}
