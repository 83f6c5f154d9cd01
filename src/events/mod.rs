pub mod pointer;

pub use pointer::Point;
