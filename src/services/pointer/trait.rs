use crate::error::Result;
use crate::events::Point;
use tracing::info;

use super::DryRunPointer;
use super::virtual_pointer::UinputPointer;
use super::xdotool::XdotoolPointer;

/// Trait for pointer control backends
#[async_trait::async_trait]
pub trait PointerControl: Send {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Current pointer coordinates
    async fn position(&mut self) -> Result<Point>;

    /// Move the pointer to the given coordinates
    async fn move_to(&mut self, target: Point) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PointerKind {
    /// xdotool в X11-сессии, иначе uinput
    Auto,
    Xdotool,
    Uinput,
    DryRun,
}

/// Factory function to create a pointer backend of the requested kind
pub fn create_pointer(kind: PointerKind) -> Result<Box<dyn PointerControl>> {
    let kind = match kind {
        PointerKind::Auto => detect_pointer_kind(),
        other => other,
    };

    info!("Выбран механизм управления указателем: {:?}", kind);

    match kind {
        PointerKind::Xdotool => Ok(Box::new(XdotoolPointer::new())),
        PointerKind::Uinput => Ok(Box::new(UinputPointer::new("mouse-move Virtual Pointer"))),
        PointerKind::DryRun => Ok(Box::new(DryRunPointer::new())),
        PointerKind::Auto => Err(crate::mouse_move_error!(
            internal,
            "Не удалось определить механизм управления указателем"
        )),
    }
}

fn detect_pointer_kind() -> PointerKind {
    let x11_session = match std::env::var("XDG_SESSION_TYPE") {
        Ok(session) => session == "x11",
        Err(_) => std::env::var_os("DISPLAY").is_some() && std::env::var_os("WAYLAND_DISPLAY").is_none(),
    };

    if x11_session && XdotoolPointer::is_available() {
        PointerKind::Xdotool
    } else {
        PointerKind::Uinput
    }
}
