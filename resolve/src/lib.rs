pub mod error;
pub mod library;
pub mod session;

pub use error::{Loc, ResolveError};
pub use library::{Library, LibraryRegistry};
pub use session::{Compiled, Session};
