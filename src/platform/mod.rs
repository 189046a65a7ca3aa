//! Browser platform layer
//!
//! - `dom`: card elements, in-place door toggling, click resolution, downloads
//!
//! Storage lives in [`crate::persistence::LocalStore`].

#[cfg(target_arch = "wasm32")]
pub mod dom;
