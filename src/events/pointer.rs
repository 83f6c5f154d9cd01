use std::fmt;

/// Координаты указателя в единицах устройства
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Смещение, переводящее `self` в `target`
    pub fn delta_to(self, target: Point) -> (i32, i32) {
        (
            target.x.saturating_sub(self.x),
            target.y.saturating_sub(self.y),
        )
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x:{}, y:{}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_delta() {
        let origin = Point::new(100, 200);
        let moved = origin.offset(10, 0);

        assert_eq!(moved, Point::new(110, 200));
        assert_eq!(origin.delta_to(moved), (10, 0));
        assert_eq!(moved.delta_to(origin), (-10, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(3, -4).to_string(), "x:3, y:-4");
    }
}
