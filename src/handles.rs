//! Opaque handles for backend-owned objects.
//!
//! Everything the LLVM-C API hands out is a raw reference whose lifetime is
//! managed by the context (or module, or function) it came from. The wrappers
//! here are plain `Copy` newtypes over those references: they never dispose,
//! clone, or inspect the underlying object, they only travel between calls.
//! Equality is pointer identity, which for LLVM's uniqued constants and types
//! means semantic identity as well.

use llvm_sys::prelude::{
    LLVMBasicBlockRef, LLVMBuilderRef, LLVMContextRef, LLVMTypeRef, LLVMValueRef,
};

/// A backend context. Owns every type, value, and block created within it.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Context(LLVMContextRef);

impl Context {
    /// Wrap a raw context reference.
    ///
    /// # Safety
    ///
    /// `raw` must be a live `LLVMContextRef` obtained from LLVM and must
    /// outlive every use of the returned handle.
    pub unsafe fn from_raw(raw: LLVMContextRef) -> Self {
        Context(raw)
    }

    /// The raw reference expected by LLVM-C entry points.
    pub fn as_raw(self) -> LLVMContextRef {
        self.0
    }
}

/// A type descriptor. Immutable once created; uniqued per context.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Type(LLVMTypeRef);

impl Type {
    /// Wrap a raw type reference.
    ///
    /// # Safety
    ///
    /// `raw` must be a live `LLVMTypeRef` from the backend (or null, if a
    /// failed backend call is being passed along).
    pub unsafe fn from_raw(raw: LLVMTypeRef) -> Self {
        Type(raw)
    }

    /// The raw reference expected by LLVM-C entry points.
    pub fn as_raw(self) -> LLVMTypeRef {
        self.0
    }

    /// Whether this is the backend's null sentinel rather than a real type.
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

/// A value: an instruction result, constant, argument, or function.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Value(LLVMValueRef);

impl Value {
    /// Wrap a raw value reference.
    ///
    /// # Safety
    ///
    /// `raw` must be a live `LLVMValueRef` from the backend (or null, if a
    /// failed backend call is being passed along).
    pub unsafe fn from_raw(raw: LLVMValueRef) -> Self {
        Value(raw)
    }

    /// The raw reference expected by LLVM-C entry points.
    pub fn as_raw(self) -> LLVMValueRef {
        self.0
    }

    /// Whether this is the backend's null sentinel rather than a real value.
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

/// A basic block within some function.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BasicBlock(LLVMBasicBlockRef);

impl BasicBlock {
    /// Wrap a raw basic-block reference.
    ///
    /// # Safety
    ///
    /// `raw` must be a live `LLVMBasicBlockRef` from the backend.
    pub unsafe fn from_raw(raw: LLVMBasicBlockRef) -> Self {
        BasicBlock(raw)
    }

    /// The raw reference expected by LLVM-C entry points.
    pub fn as_raw(self) -> LLVMBasicBlockRef {
        self.0
    }
}

/// An instruction builder. Created, positioned, and disposed by the caller;
/// wrappers only pass it through to the instruction-building entry points.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Builder(LLVMBuilderRef);

impl Builder {
    /// Wrap a raw builder reference.
    ///
    /// # Safety
    ///
    /// `raw` must be a live `LLVMBuilderRef` positioned by the caller.
    pub unsafe fn from_raw(raw: LLVMBuilderRef) -> Self {
        Builder(raw)
    }

    /// The raw reference expected by LLVM-C entry points.
    pub fn as_raw(self) -> LLVMBuilderRef {
        self.0
    }
}
