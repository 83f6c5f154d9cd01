//! Pointer control backends
//!
//! Этот модуль отвечает ТОЛЬКО за чтение и перемещение указателя.
//! Решение о том, нужно ли двигать указатель, принимает Actuator на основе Config.

mod dry_run;
mod virtual_pointer;
mod xdotool;
mod r#trait;

pub use self::dry_run::DryRunPointer;
pub use self::r#trait::{create_pointer, PointerControl, PointerKind};
