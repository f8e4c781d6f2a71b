//! Foundational containers shared by the lexer and the later phases.

pub mod buf;
pub mod map;
pub mod seq;

pub use buf::Buf;
pub use map::StrMap;
pub use seq::Seq;
