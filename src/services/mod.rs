pub mod actuator;
pub mod config_watcher;
pub mod pointer;
pub mod runner;

pub use actuator::Actuator;
pub use pointer::{create_pointer, PointerKind};
pub use runner::{ReloadFailurePolicy, Runner};
