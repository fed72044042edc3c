//! Platform abstraction layer
//!
//! The simulation itself is platform-free. This module holds the glue a
//! browser front end needs:
//! - `web`: wasm-bindgen wrapper driven from `requestAnimationFrame`

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebRunner;
