//! Shared bridge types for peerchat-web
//!
//! Defines the settings document, the fixed theme-variable table, and the
//! JSON messages exchanged between Host and UI. Everything here compiles on
//! both native and wasm targets.

pub mod form;
pub mod messages;
pub mod settings;
pub mod theme;

pub use form::*;
pub use messages::*;
pub use settings::*;
pub use theme::*;
