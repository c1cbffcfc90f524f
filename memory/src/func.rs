use std::fmt;
use std::sync::Arc;

use types::{FuncMeta, TypeId};

use crate::error::RuntimeError;
use crate::store::{Frame, ValueStore};
use crate::value::Value;

/// The unified implementation signature for every callable, host-implemented
/// or script-compiled. The body reads its inputs from the frame's parameter
/// registers and writes its results into the frame's result registers.
pub type FuncImpl = Arc<dyn Fn(&mut ValueStore, Frame) -> Result<(), RuntimeError> + Send + Sync>;

/// Descriptor pairing a canonical Function-kind type with an implementation.
///
/// Register counts are fixed when the descriptor is built (by a library's
/// init or by the compiler's register-allocation pass), so the calling
/// convention never re-derives them at run time.
pub struct Function {
    /// Canonical Function-kind handle in the session's type registry.
    pub typ: TypeId,
    /// Captured-environment registers at the front of the frame.
    pub caps: u16,
    /// Parameter registers, adjacent to the captures.
    pub ins: u16,
    /// Result registers, adjacent to the parameters.
    pub outs: u16,
    /// Total frame size: captures + params + results + locals.
    pub frame_slots: u16,
    pub imp: FuncImpl,
}

impl Function {
    /// Descriptor for a host-implemented function: no captures, no locals.
    ///
    /// `meta` must be the same signature `typ` was interned from.
    pub fn native(typ: TypeId, meta: &FuncMeta, imp: FuncImpl) -> Self {
        let ins = meta.ins.len() as u16;
        let outs = meta.outs.len() as u16;
        Function {
            typ,
            caps: 0,
            ins,
            outs,
            frame_slots: ins + outs,
            imp,
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Function(typ={}, caps={}, ins={}, outs={}, slots={})",
            self.typ, self.caps, self.ins, self.outs, self.frame_slots
        )
    }
}

/// A first-class function value: an entry point plus the captured
/// environment snapshotted at closure-creation time.
///
/// Two values closing over the same `Function` with different captures are
/// fully independent callables; each invocation materializes its captures
/// into a fresh frame.
#[derive(Clone)]
pub struct FuncValue {
    pub func: Arc<Function>,
    pub captures: Vec<Value>,
}

impl FuncValue {
    /// A function value with no captured environment.
    pub fn plain(func: Arc<Function>) -> Self {
        Self {
            func,
            captures: Vec::new(),
        }
    }

    /// Close over `captures`, snapshotting them by value. Reference-typed
    /// captures share the underlying object with the enclosing scope.
    pub fn close(func: Arc<Function>, captures: Vec<Value>) -> Self {
        Self { func, captures }
    }
}

impl PartialEq for FuncValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func) && self.captures == other.captures
    }
}

impl fmt::Debug for FuncValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "func(typ={}, caps={})", self.func.typ, self.captures.len())
    }
}
