use std::sync::Arc;

use crate::error::RuntimeError;
use crate::func::FuncValue;
use crate::value::Value;

/// The per-execution register file.
///
/// A fixed-capacity run of dynamically-typed slots addressed by
/// compile-time-assigned indices. Capacity is fixed before execution starts
/// (by the compiler's register-allocation pass); `top` is the watermark below
/// which registers belong to live frames.
pub struct ValueStore {
    slots: Box<[Value]>,
    top: usize,
}

impl ValueStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Value::Nil; capacity].into_boxed_slice(),
            top: 0,
        }
    }

    #[inline]
    pub fn get(&self, reg: usize) -> &Value {
        &self.slots[reg]
    }

    #[inline]
    pub fn set(&mut self, reg: usize, val: Value) {
        self.slots[reg] = val;
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Current frame watermark. Registers at and above it are free.
    pub fn top(&self) -> usize {
        self.top
    }

    /// Reserve `count` registers for a root frame and return its base.
    ///
    /// Hosts call this once per execution to lay out the program's own
    /// registers; nested frames are reserved by `call` itself.
    pub fn reserve(&mut self, count: usize) -> Result<usize, RuntimeError> {
        let base = self.top;
        let limit = base
            .checked_add(count)
            .ok_or(RuntimeError::StackOverflow)?;
        if limit > self.slots.len() {
            return Err(RuntimeError::StackOverflow);
        }
        self.top = limit;
        Ok(base)
    }
}

/// Register layout of one live frame: `[captures][params][results][locals]`
/// at a contiguous base.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub base: usize,
    pub caps: usize,
    pub ins: usize,
    pub outs: usize,
}

impl Frame {
    /// Register of captured value `i`.
    #[inline]
    pub fn cap(&self, i: usize) -> usize {
        self.base + i
    }

    /// Register of parameter `i`.
    #[inline]
    pub fn arg(&self, i: usize) -> usize {
        self.base + self.caps + i
    }

    /// Register of result `i`.
    #[inline]
    pub fn ret(&self, i: usize) -> usize {
        self.base + self.caps + self.ins + i
    }

    /// Register of local scratch slot `i`.
    #[inline]
    pub fn local(&self, i: usize) -> usize {
        self.base + self.caps + self.ins + self.outs + i
    }
}

/// The one calling convention shared by native and script-compiled
/// functions. Symmetry on both sides of the boundary is what lets either
/// kind sit in the same function-value slot and be invoked identically.
pub trait CallOps {
    /// Invoke `fv` with arguments in the contiguous caller registers
    /// starting at `args_start`; results land in the caller registers
    /// starting at `rets_start`.
    fn call(
        &mut self,
        fv: &FuncValue,
        args_start: usize,
        rets_start: usize,
    ) -> Result<(), RuntimeError>;
}

impl CallOps for ValueStore {
    fn call(
        &mut self,
        fv: &FuncValue,
        args_start: usize,
        rets_start: usize,
    ) -> Result<(), RuntimeError> {
        let func = Arc::clone(&fv.func);
        let caps = fv.captures.len();
        debug_assert_eq!(caps, func.caps as usize);
        debug_assert!(
            func.frame_slots as usize >= caps + (func.ins + func.outs) as usize,
            "frame layout smaller than captures + params + results"
        );

        let base = self.top;
        let limit = base + func.frame_slots as usize;
        if limit > self.slots.len()
            || args_start + func.ins as usize > self.slots.len()
            || rets_start + func.outs as usize > self.slots.len()
        {
            return Err(RuntimeError::StackOverflow);
        }

        let frame = Frame {
            base,
            caps,
            ins: func.ins as usize,
            outs: func.outs as usize,
        };

        // Captured values first, into the fresh registers at the frame base;
        // the call's arguments into the adjacent parameter range; results
        // and locals start out nil.
        for (i, cap) in fv.captures.iter().enumerate() {
            self.slots[frame.cap(i)] = cap.clone();
        }
        for i in 0..frame.ins {
            self.slots[frame.arg(i)] = self.slots[args_start + i].clone();
        }
        for slot in &mut self.slots[frame.ret(0)..limit] {
            *slot = Value::Nil;
        }

        self.top = limit;
        let imp = &*func.imp;
        let result = imp(self, frame);
        self.top = base;
        result?;

        for i in 0..frame.outs {
            self.slots[rets_start + i] = self.slots[frame.ret(i)].clone();
        }
        Ok(())
    }
}
