//! Bundled native libraries for Skiff.
//!
//! Each module is an independent library: a unit struct whose `init` builds
//! its function types through the session's registry and attaches the native
//! implementations. `install` registers all of them under their module
//! names; hosts that want a subset register the structs individually.

pub mod base64;
pub mod collections;
pub mod datetime;
pub mod json;
pub mod strings;
mod util;

pub use base64::Base64Lib;
pub use collections::CollectionsLib;
pub use datetime::DateTimeLib;
pub use json::JsonLib;
pub use strings::StringsLib;

use std::sync::Arc;

use resolve::{LibraryRegistry, ResolveError};

/// Install every bundled library into `libs` under its module name.
pub fn install(libs: &mut LibraryRegistry) -> Result<(), ResolveError> {
    libs.register("base64", Arc::new(Base64Lib))?;
    libs.register("strings", Arc::new(StringsLib))?;
    libs.register("json", Arc::new(JsonLib))?;
    libs.register("datetime", Arc::new(DateTimeLib))?;
    libs.register("collections", Arc::new(CollectionsLib))?;
    Ok(())
}
