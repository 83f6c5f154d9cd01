use crate::error::{MouseMoveError, Result};
use crate::events::Point;
use crate::trace_if_enabled;
use std::process::Command;
use tracing::debug;

use super::r#trait::PointerControl;

pub struct XdotoolPointer;

impl XdotoolPointer {
    pub fn new() -> Self {
        Self
    }

    pub fn is_available() -> bool {
        Command::new("xdotool")
            .arg("version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn run(args: &[&str]) -> Result<String> {
        let output = Command::new("xdotool").args(args).output().map_err(|e| {
            debug!("xdotool не найден или не работает: {}", e);
            MouseMoveError::PointerUnavailable(format!("xdotool не найден: {}", e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("xdotool вернул ошибку: {}", stderr);
            return Err(MouseMoveError::PointerUnavailable(format!(
                "xdotool {} вернул ошибку: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Разбирает вывод `xdotool getmouselocation --shell` (строки `X=..`, `Y=..`, `SCREEN=..`, `WINDOW=..`)
fn parse_location(output: &str) -> Option<Point> {
    let mut x = None;
    let mut y = None;

    for line in output.lines() {
        match line.trim().split_once('=') {
            Some(("X", value)) => x = value.parse().ok(),
            Some(("Y", value)) => y = value.parse().ok(),
            _ => {}
        }
    }

    Some(Point::new(x?, y?))
}

#[async_trait::async_trait]
impl PointerControl for XdotoolPointer {
    fn name(&self) -> &'static str {
        "xdotool"
    }

    async fn position(&mut self) -> Result<Point> {
        let output = Self::run(&["getmouselocation", "--shell"])?;
        trace_if_enabled!("xdotool getmouselocation: {:?}", output);

        parse_location(&output).ok_or_else(|| {
            MouseMoveError::PointerUnavailable(format!(
                "Неожиданный вывод xdotool getmouselocation: {:?}",
                output.trim()
            ))
        })
    }

    async fn move_to(&mut self, target: Point) -> Result<()> {
        let x = target.x.to_string();
        let y = target.y.to_string();
        Self::run(&["mousemove", "--", &x, &y])?;
        debug!("xdotool переместил указатель в {}", target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell_location() {
        let output = "X=812\nY=441\nSCREEN=0\nWINDOW=65011718\n";
        assert_eq!(parse_location(output), Some(Point::new(812, 441)));
    }

    #[test]
    fn test_parse_rejects_incomplete_output() {
        assert_eq!(parse_location("X=10\nSCREEN=0\n"), None);
        assert_eq!(parse_location("X=abc\nY=5\n"), None);
        assert_eq!(parse_location(""), None);
    }
}
