//! Hosts that render quiz state and forward player intents
//!
//! - `terminal`: line-oriented stdin/stdout host (native)
//! - `web`: `wasm-bindgen` class driven from the page (wasm32)

#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use terminal::TerminalUi;
#[cfg(target_arch = "wasm32")]
pub use web::WebQuiz;
