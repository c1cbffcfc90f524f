pub mod error;
pub mod func;
pub mod store;
pub mod value;


pub use error::RuntimeError;
pub use func::{FuncImpl, FuncValue, Function};
pub use store::{CallOps, Frame, ValueStore};
pub use value::{MapKey, MessageVal, Value};
