use crate::error::Result;
use crate::events::Point;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

use super::r#trait::PointerControl;

/// Указатель без реальных действий: только логирует и запоминает перемещения
pub struct DryRunPointer {
    position: Point,
    history: Arc<Mutex<Vec<Point>>>,
}

impl DryRunPointer {
    pub fn new() -> Self {
        Self::at(Point::new(500, 500))
    }

    pub fn at(position: Point) -> Self {
        Self {
            position,
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Общий журнал перемещений, остаётся доступным после передачи указателя в Actuator
    #[allow(dead_code)]
    pub fn history(&self) -> Arc<Mutex<Vec<Point>>> {
        self.history.clone()
    }
}

#[async_trait::async_trait]
impl PointerControl for DryRunPointer {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    async fn position(&mut self) -> Result<Point> {
        Ok(self.position)
    }

    async fn move_to(&mut self, target: Point) -> Result<()> {
        info!("[DRY RUN] Перемещение указателя: {} -> {}", self.position, target);
        self.history.lock().push(target);
        self.position = target;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_moves_are_recorded() {
        let mut pointer = DryRunPointer::at(Point::new(1, 2));
        let history = pointer.history();

        pointer.move_to(Point::new(11, 2)).await.unwrap();
        pointer.move_to(Point::new(1, 2)).await.unwrap();

        assert_eq!(*history.lock(), vec![Point::new(11, 2), Point::new(1, 2)]);
        assert_eq!(pointer.position().await.unwrap(), Point::new(1, 2));
    }
}
