use crate::error::{MouseMoveError, Result};
use crate::events::Point;
use crate::utils::permissions;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uinput::event::controller::Controller::Mouse;
use uinput::event::controller::Mouse::Left;
use uinput::event::relative::Position::{X, Y};
use uinput::event::relative::Relative::Position;
use uinput::event::Event::{Controller, Relative};

use super::r#trait::PointerControl;

/// Время, за которое композитор успевает подхватить новое устройство;
/// события, отправленные раньше, могут потеряться
const DEVICE_SETTLE: Duration = Duration::from_millis(500);

/// Виртуальное относительное устройство указателя.
///
/// uinput не умеет читать абсолютную позицию курсора, поэтому устройство ведёт
/// собственную систему координат с началом в `(0, 0)` и переводит абсолютные
/// перемещения в относительные события `REL_X`/`REL_Y`.
pub struct UinputPointer {
    device: Option<uinput::Device>,
    created_at: Option<Instant>,
    device_name: String,
    position: Point,
}

impl UinputPointer {
    pub fn new(device_name: &str) -> Self {
        info!("Инициализация UinputPointer '{}'", device_name);

        if let Err(e) = permissions::check_permissions() {
            warn!("{}", e);
            for line in permissions::get_setup_commands() {
                warn!("   {}", line);
            }
        }

        let mut pointer = Self {
            device: None,
            created_at: None,
            device_name: device_name.to_string(),
            position: Point::default(),
        };

        // Создаём устройство сразу, чтобы к первому циклу система его уже увидела
        if let Err(e) = pointer.device() {
            warn!("{}. Попытки создать устройство будут повторяться на каждом цикле", e);
        }

        pointer
    }

    fn create_virtual_device(device_name: &str) -> Result<uinput::Device> {
        info!("Создание виртуального устройства uinput '{}'", device_name);

        // Без хотя бы одной кнопки мыши относительные события игнорируются
        let device = uinput::default()?
            .name(device_name)?
            .event(Controller(Mouse(Left)))?
            .event(Relative(Position(X)))?
            .event(Relative(Position(Y)))?
            .create()
            .map_err(|e| {
                MouseMoveError::PointerUnavailable(format!(
                    "Не удалось создать виртуальное устройство '{}': {}",
                    device_name, e
                ))
            })?;

        info!("Виртуальное устройство '{}' создано успешно", device_name);
        Ok(device)
    }

    fn device(&mut self) -> Result<&mut uinput::Device> {
        if self.device.is_none() {
            self.device = Some(Self::create_virtual_device(&self.device_name)?);
            self.created_at = Some(Instant::now());
        }

        self.device
            .as_mut()
            .ok_or_else(|| MouseMoveError::Internal("Виртуальное устройство недоступно".to_string()))
    }

    /// Ждёт, пока только что созданное устройство станет видно системе
    async fn wait_until_settled(&mut self) -> Result<()> {
        self.device()?;

        let remaining = settle_remaining(self.created_at, Instant::now());
        if !remaining.is_zero() {
            debug!("uinput: ожидание готовности устройства {:?}", remaining);
            tokio::time::sleep(remaining).await;
        }
        Ok(())
    }

    fn send_relative(&mut self, dx: i32, dy: i32) -> Result<()> {
        let device = self.device()?;

        let sent = device
            .send(X, dx)
            .and_then(|_| device.send(Y, dy))
            .and_then(|_| device.synchronize());

        if let Err(e) = sent {
            // Пересоздаём устройство на следующем цикле
            self.device = None;
            self.created_at = None;
            return Err(MouseMoveError::Uinput(e));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl PointerControl for UinputPointer {
    fn name(&self) -> &'static str {
        "uinput"
    }

    async fn position(&mut self) -> Result<Point> {
        Ok(self.position)
    }

    async fn move_to(&mut self, target: Point) -> Result<()> {
        let (dx, dy) = self.position.delta_to(target);
        if (dx, dy) == (0, 0) {
            return Ok(());
        }

        self.wait_until_settled().await?;
        self.send_relative(dx, dy)?;
        debug!("uinput: относительное перемещение ({}, {})", dx, dy);

        self.position = target;
        Ok(())
    }
}

fn settle_remaining(created_at: Option<Instant>, now: Instant) -> Duration {
    created_at
        .map(|at| DEVICE_SETTLE.saturating_sub(now.saturating_duration_since(at)))
        .unwrap_or_default()
}

impl Drop for UinputPointer {
    fn drop(&mut self) {
        if self.device.is_some() {
            info!("Закрытие виртуального устройства '{}'", self.device_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_position_starts_at_origin() {
        let mut pointer = UinputPointer::new("mouse-move test pointer");

        assert_eq!(pointer.position().await.unwrap(), Point::new(0, 0));
        // Нулевое перемещение ничего не отправляет, даже если устройства нет
        pointer.move_to(Point::new(0, 0)).await.unwrap();
        assert_eq!(pointer.position().await.unwrap(), Point::new(0, 0));
    }

    #[test]
    fn test_device_creation_is_attempted_up_front() {
        let pointer = UinputPointer::new("mouse-move eager pointer");
        // Либо устройство уже есть, либо создание не удалось и метки времени нет
        assert_eq!(pointer.device.is_some(), pointer.created_at.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_device_waits_before_first_event() {
        let created = Instant::now();
        assert_eq!(settle_remaining(Some(created), created), DEVICE_SETTLE);

        tokio::time::advance(Duration::from_millis(200)).await;
        assert_eq!(
            settle_remaining(Some(created), Instant::now()),
            DEVICE_SETTLE - Duration::from_millis(200)
        );

        tokio::time::advance(DEVICE_SETTLE).await;
        assert_eq!(settle_remaining(Some(created), Instant::now()), Duration::ZERO);
        assert_eq!(settle_remaining(None, Instant::now()), Duration::ZERO);
    }
}
