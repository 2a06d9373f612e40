//! Slice-friendly wrappers over the LLVM-C variadic calling convention.
//!
//! The LLVM-C API expresses every variable-length operand list as a raw
//! pointer array plus an explicit element count, with boolean options encoded
//! as 0/1 integers. This crate adapts those entry points to plain Rust slices
//! of opaque handles: each wrapper marshals its slice into the pointer-array
//! shape at the call boundary, forwards to the backend, and returns the
//! produced handle unchanged. All handles stay owned by the LLVM context that
//! created them; nothing here allocates, caches, or disposes backend state.
//!
//! # Example
//! ```ignore
//! use llvm_marshal::{build, Builder, Type, Value};
//!
//! // i32 add2(i32, i32)
//! let fn_ty = build::function_type(i32_ty, &[i32_ty, i32_ty], false);
//! let sum = build::build_call(builder, fn_ty, add2, &[lhs, rhs], "sum");
//! ```
//!
//! # Architecture
//!
//! - [`handles`] - `Copy` newtypes over the raw LLVM-C references
//! - [`build`] - one wrapper per pointer-array entry point

pub mod build;
pub mod handles;

// Re-export the full surface; the crate is small enough to use flat.
pub use build::{
    add_incoming, build_call, build_gep, const_array, const_struct, function_type, struct_type,
};
pub use handles::{BasicBlock, Builder, Context, Type, Value};
