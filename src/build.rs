// This module implements the slice-to-pointer-array wrappers that are the core of the
// llvm-marshal crate. The LLVM-C API passes every variable-length operand list as a raw
// pointer array plus an explicit element count, and encodes boolean options as 0/1
// integers; each wrapper here accepts an ordered Rust slice of opaque handles (plus bool
// flags and &str diagnostic names), lays the raw references out in a contiguous buffer
// that lives only for the duration of the call, and forwards to the single matching
// entry point: LLVMConstArray2 for constant arrays, LLVMFunctionType for function types,
// LLVMStructTypeInContext for struct types, LLVMAddIncoming for phi edges, LLVMBuildGEP2
// for address computations, LLVMBuildCall2 for calls, and LLVMConstStructInContext for
// constant structs. Whatever handle the backend produces is returned unchanged, null
// included; the wrappers keep no state between calls and never examine the handles they
// are given.

//! Slice-based wrappers over LLVM-C's pointer-array calling convention.
//!
//! Each function measures its slice, marshals the raw references into a
//! contiguous buffer at the call boundary, and invokes one backend entry
//! point. Order is preserved positionally and the backend's result comes
//! back verbatim. Handle validity is the caller's obligation, taken on when
//! the handles were created with [`Value::from_raw`] and friends.

use std::ffi::CString;
use std::os::raw::c_uint;

use llvm_sys::core::{
    LLVMAddIncoming, LLVMBuildCall2, LLVMBuildGEP2, LLVMConstArray2, LLVMConstStructInContext,
    LLVMFunctionType, LLVMStructTypeInContext,
};
use llvm_sys::prelude::{LLVMBasicBlockRef, LLVMBool, LLVMTypeRef, LLVMValueRef};

use crate::handles::{BasicBlock, Builder, Context, Type, Value};

fn raw_values(values: &[Value]) -> Vec<LLVMValueRef> {
    values.iter().map(|v| v.as_raw()).collect()
}

fn raw_types(types: &[Type]) -> Vec<LLVMTypeRef> {
    types.iter().map(|t| t.as_raw()).collect()
}

fn raw_blocks(blocks: &[BasicBlock]) -> Vec<LLVMBasicBlockRef> {
    blocks.iter().map(|b| b.as_raw()).collect()
}

/// Encode a flag the way the backend expects: 1 for true, 0 for false.
fn llvm_bool(flag: bool) -> LLVMBool {
    if flag {
        1
    } else {
        0
    }
}

/// Convert a diagnostic label to a NUL-terminated C string. Labels are
/// advisory, so one with an interior NUL degrades to the empty name.
fn c_name(name: &str) -> CString {
    CString::new(name).unwrap_or_default()
}

/// Build a constant array with element type `element_ty` from `values`.
///
/// Element order is preserved positionally. The backend requires the element
/// types to match `element_ty`; nothing is checked here.
pub fn const_array(element_ty: Type, values: &[Value]) -> Value {
    log::trace!("const_array: {} elements", values.len());
    let mut raw = raw_values(values);
    unsafe {
        Value::from_raw(LLVMConstArray2(
            element_ty.as_raw(),
            raw.as_mut_ptr(),
            raw.len() as u64,
        ))
    }
}

/// Build a function type from a return type and ordered parameter types.
pub fn function_type(ret: Type, params: &[Type], variadic: bool) -> Type {
    log::trace!(
        "function_type: {} params, variadic={}",
        params.len(),
        variadic
    );
    let mut raw = raw_types(params);
    unsafe {
        Type::from_raw(LLVMFunctionType(
            ret.as_raw(),
            raw.as_mut_ptr(),
            raw.len() as c_uint,
            llvm_bool(variadic),
        ))
    }
}

/// Build an anonymous struct type in `ctx` from ordered member types.
///
/// `packed` drops inter-member padding, as with LLVM's `<{ ... }>` syntax.
pub fn struct_type(ctx: Context, members: &[Type], packed: bool) -> Type {
    log::trace!("struct_type: {} members, packed={}", members.len(), packed);
    let mut raw = raw_types(members);
    unsafe {
        Type::from_raw(LLVMStructTypeInContext(
            ctx.as_raw(),
            raw.as_mut_ptr(),
            raw.len() as c_uint,
            llvm_bool(packed),
        ))
    }
}

/// Register incoming edges on a phi node: `values[i]` arrives from
/// `blocks[i]`.
///
/// The slices must pair up one to one. Edges accumulate across calls; the
/// backend does not deduplicate and neither does this wrapper.
pub fn add_incoming(phi: Value, values: &[Value], blocks: &[BasicBlock]) {
    assert_eq!(
        values.len(),
        blocks.len(),
        "phi incoming values and blocks must pair up"
    );
    log::trace!("add_incoming: {} edges", blocks.len());
    let mut vals = raw_values(values);
    let mut blks = raw_blocks(blocks);
    unsafe {
        LLVMAddIncoming(
            phi.as_raw(),
            vals.as_mut_ptr(),
            blks.as_mut_ptr(),
            blks.len() as c_uint,
        );
    }
}

/// Emit an address computation from `ptr` and the ordered `indices`.
///
/// `pointee_ty` is the type `ptr` points at, required since pointers went
/// opaque. `name` labels the result in the textual IR.
pub fn build_gep(
    builder: Builder,
    pointee_ty: Type,
    ptr: Value,
    indices: &[Value],
    name: &str,
) -> Value {
    log::trace!("build_gep: {} indices", indices.len());
    let mut raw = raw_values(indices);
    let name = c_name(name);
    unsafe {
        Value::from_raw(LLVMBuildGEP2(
            builder.as_raw(),
            pointee_ty.as_raw(),
            ptr.as_raw(),
            raw.as_mut_ptr(),
            raw.len() as c_uint,
            name.as_ptr(),
        ))
    }
}

/// Emit a call to `callee` with ordered `args`.
///
/// `fn_ty` is the callee's function type. Argument order must match the
/// callee's parameter order; the backend enforces that at verification time,
/// not here.
pub fn build_call(
    builder: Builder,
    fn_ty: Type,
    callee: Value,
    args: &[Value],
    name: &str,
) -> Value {
    log::trace!("build_call: {} args", args.len());
    let mut raw = raw_values(args);
    let name = c_name(name);
    unsafe {
        Value::from_raw(LLVMBuildCall2(
            builder.as_raw(),
            fn_ty.as_raw(),
            callee.as_raw(),
            raw.as_mut_ptr(),
            raw.len() as c_uint,
            name.as_ptr(),
        ))
    }
}

/// Build an anonymous constant struct in `ctx` from ordered field values.
pub fn const_struct(ctx: Context, values: &[Value], packed: bool) -> Value {
    log::trace!("const_struct: {} fields, packed={}", values.len(), packed);
    let mut raw = raw_values(values);
    unsafe {
        Value::from_raw(LLVMConstStructInContext(
            ctx.as_raw(),
            raw.as_mut_ptr(),
            raw.len() as c_uint,
            llvm_bool(packed),
        ))
    }
}
