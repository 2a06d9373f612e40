//! Constant aggregate construction through the slice wrappers.
//!
//! These tests drive the real backend and read the produced constants back
//! with LLVM-C query calls. Constants are uniqued per context, so positional
//! pass-through is observable as pointer identity between the input handles
//! and the aggregate's elements.

use llvm_sys::core::*;
use llvm_sys::prelude::*;

use llvm_marshal::{build, Context, Type, Value};

/// Private context per test so the parallel harness stays safe.
struct Fixture {
    raw: LLVMContextRef,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            raw: unsafe { LLVMContextCreate() },
        }
    }

    fn ctx(&self) -> Context {
        unsafe { Context::from_raw(self.raw) }
    }

    fn i32_ty(&self) -> Type {
        unsafe { Type::from_raw(LLVMInt32TypeInContext(self.raw)) }
    }

    fn i64_ty(&self) -> Type {
        unsafe { Type::from_raw(LLVMInt64TypeInContext(self.raw)) }
    }

    fn int(&self, ty: Type, value: u64) -> Value {
        unsafe { Value::from_raw(LLVMConstInt(ty.as_raw(), value, 0)) }
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        unsafe { LLVMContextDispose(self.raw) }
    }
}

fn element(aggregate: Value, index: u32) -> Value {
    unsafe { Value::from_raw(LLVMGetAggregateElement(aggregate.as_raw(), index)) }
}

#[test]
fn const_array_preserves_order_and_length() {
    let f = Fixture::new();
    let elems = [
        f.int(f.i32_ty(), 1),
        f.int(f.i32_ty(), 2),
        f.int(f.i32_ty(), 3),
    ];

    let arr = build::const_array(f.i32_ty(), &elems);

    unsafe {
        assert_eq!(LLVMGetArrayLength2(LLVMTypeOf(arr.as_raw())), 3);
    }
    for (i, e) in elems.iter().enumerate() {
        assert_eq!(element(arr, i as u32), *e);
    }
}

#[test]
fn single_element_array_has_length_one() {
    let f = Fixture::new();
    let only = [f.int(f.i32_ty(), 42)];

    let arr = build::const_array(f.i32_ty(), &only);

    unsafe {
        assert_eq!(LLVMGetArrayLength2(LLVMTypeOf(arr.as_raw())), 1);
    }
    assert_eq!(element(arr, 0), only[0]);
}

#[test]
fn const_struct_preserves_field_order() {
    let f = Fixture::new();
    let fields = [f.int(f.i32_ty(), 7), f.int(f.i64_ty(), 9)];

    let st = build::const_struct(f.ctx(), &fields, false);

    unsafe {
        let ty = LLVMTypeOf(st.as_raw());
        assert_eq!(LLVMCountStructElementTypes(ty), 2);
        assert_eq!(LLVMIsPackedStruct(ty), 0);
    }
    assert_eq!(element(st, 0), fields[0]);
    assert_eq!(element(st, 1), fields[1]);
}

#[test]
fn packed_flag_reaches_the_backend() {
    let f = Fixture::new();
    let fields = [f.int(f.i32_ty(), 1), f.int(f.i32_ty(), 2)];

    let st = build::const_struct(f.ctx(), &fields, true);

    unsafe {
        assert_ne!(LLVMIsPackedStruct(LLVMTypeOf(st.as_raw())), 0);
    }
}

#[test]
fn const_struct_type_matches_struct_type_of_same_members() {
    // Literal struct types are uniqued structurally, so the type built from
    // struct_type and the type of a constant with the same layout must be
    // the same handle.
    let f = Fixture::new();
    let built = build::struct_type(f.ctx(), &[f.i32_ty(), f.i64_ty()], false);

    let st = build::const_struct(f.ctx(), &[f.int(f.i32_ty(), 1), f.int(f.i64_ty(), 2)], false);
    let of_const = unsafe { Type::from_raw(LLVMTypeOf(st.as_raw())) };

    assert_eq!(built, of_const);
}
