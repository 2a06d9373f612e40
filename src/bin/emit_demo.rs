// This binary exercises every slice-based wrapper in llvm-marshal against a real LLVM
// context. It builds a small demonstration module containing: two constant aggregate
// globals (an i32 lookup array built with const_array and an unpacked struct built with
// const_struct), a packed struct global whose type comes from struct_type, a variadic
// printf declaration and a non-variadic helper declaration built with function_type, and
// a classify() function whose body runs through a diamond of basic blocks with a phi
// node (add_incoming), an address computation into a stack array (build_gep), and a call
// to the helper (build_call). The module is then checked with LLVMVerifyModule and its
// textual IR is printed to stdout or written to a file. Verification failures and write
// failures are reported through a thiserror enum; logging goes through log/env_logger
// and is controlled with RUST_LOG as usual.

//! Demonstration driver for the slice-based LLVM wrappers.
//!
//! ```text
//! cargo run --bin emit_demo             # IR on stdout
//! cargo run --bin emit_demo -- -o demo.ll
//! ```

use std::ffi::{CStr, CString};
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use llvm_sys::analysis::{LLVMVerifierFailureAction, LLVMVerifyModule};
use llvm_sys::core::*;
use llvm_sys::prelude::*;
use llvm_sys::LLVMIntPredicate;
use thiserror::Error;

use llvm_marshal::{build, BasicBlock, Builder, Context, Type, Value};

#[derive(Error, Debug)]
enum EmitError {
    #[error("module verification failed: {reason}")]
    Verify { reason: String },

    #[error("failed to write IR to {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Build a demonstration module through the slice-based wrappers and print
/// its textual IR.
#[derive(Parser)]
#[command(name = "emit_demo")]
struct Args {
    /// Write the IR to this path instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), EmitError> {
    env_logger::init();
    let args = Args::parse();

    let ir = emit_demo_module()?;
    match &args.output {
        Some(path) => fs::write(path, &ir).map_err(|source| EmitError::Write {
            path: path.clone(),
            source,
        })?,
        None => print!("{ir}"),
    }
    Ok(())
}

fn cstr(name: &str) -> CString {
    CString::new(name).expect("static name")
}

#[allow(unsafe_op_in_unsafe_fn)]
unsafe fn const_i(ty: Type, value: u64) -> Value {
    Value::from_raw(LLVMConstInt(ty.as_raw(), value, 0))
}

#[allow(unsafe_op_in_unsafe_fn)]
unsafe fn add_constant_global(module: LLVMModuleRef, name: &str, ty: Type, init: Value) {
    let global = LLVMAddGlobal(module, ty.as_raw(), cstr(name).as_ptr());
    LLVMSetInitializer(global, init.as_raw());
    LLVMSetGlobalConstant(global, 1);
}

/// Build the demonstration module and return its textual IR.
fn emit_demo_module() -> Result<String, EmitError> {
    unsafe {
        let ctx_raw = LLVMContextCreate();
        let module = LLVMModuleCreateWithNameInContext(cstr("demo").as_ptr(), ctx_raw);
        let builder_raw = LLVMCreateBuilderInContext(ctx_raw);

        let ctx = Context::from_raw(ctx_raw);
        let builder = Builder::from_raw(builder_raw);

        let i8_ty = Type::from_raw(LLVMInt8TypeInContext(ctx_raw));
        let i32_ty = Type::from_raw(LLVMInt32TypeInContext(ctx_raw));
        let i64_ty = Type::from_raw(LLVMInt64TypeInContext(ctx_raw));
        let ptr_ty = Type::from_raw(LLVMPointerTypeInContext(ctx_raw, 0));

        // @lut = constant [3 x i32] [i32 1, i32 2, i32 3]
        let lut_init = build::const_array(
            i32_ty,
            &[
                const_i(i32_ty, 1),
                const_i(i32_ty, 2),
                const_i(i32_ty, 3),
            ],
        );
        add_constant_global(
            module,
            "lut",
            Type::from_raw(LLVMTypeOf(lut_init.as_raw())),
            lut_init,
        );

        // @origin = constant { i32, i64 } { i32 7, i64 9 }
        let origin_init = build::const_struct(
            ctx,
            &[const_i(i32_ty, 7), const_i(i64_ty, 9)],
            false,
        );
        add_constant_global(
            module,
            "origin",
            Type::from_raw(LLVMTypeOf(origin_init.as_raw())),
            origin_init,
        );

        // @flags = constant <{ i8, i32 }> <{ i8 1, i32 127 }>
        // Literal struct types are uniqued structurally, so the type built
        // here and the type of the packed constant are the same handle.
        let packed_ty = build::struct_type(ctx, &[i8_ty, i32_ty], true);
        let flags_init =
            build::const_struct(ctx, &[const_i(i8_ty, 1), const_i(i32_ty, 127)], true);
        add_constant_global(module, "flags", packed_ty, flags_init);

        // declare i32 @double_i32(i32)
        let double_ty = build::function_type(i32_ty, &[i32_ty], false);
        let double_fn = Value::from_raw(LLVMAddFunction(
            module,
            cstr("double_i32").as_ptr(),
            double_ty.as_raw(),
        ));

        // declare i32 @printf(ptr, ...)
        let printf_ty = build::function_type(i32_ty, &[ptr_ty], true);
        LLVMAddFunction(module, cstr("printf").as_ptr(), printf_ty.as_raw());

        // define i32 @classify(i32 %n)
        let classify_ty = build::function_type(i32_ty, &[i32_ty], false);
        let classify = LLVMAddFunction(
            module,
            cstr("classify").as_ptr(),
            classify_ty.as_raw(),
        );
        let n = Value::from_raw(LLVMGetParam(classify, 0));

        let entry = LLVMAppendBasicBlockInContext(ctx_raw, classify, cstr("entry").as_ptr());
        let positive =
            LLVMAppendBasicBlockInContext(ctx_raw, classify, cstr("positive").as_ptr());
        let fallback =
            LLVMAppendBasicBlockInContext(ctx_raw, classify, cstr("fallback").as_ptr());
        let join = LLVMAppendBasicBlockInContext(ctx_raw, classify, cstr("join").as_ptr());

        LLVMPositionBuilderAtEnd(builder_raw, entry);
        let scratch_ty = Type::from_raw(LLVMArrayType2(i32_ty.as_raw(), 4));
        let scratch = Value::from_raw(LLVMBuildAlloca(
            builder_raw,
            scratch_ty.as_raw(),
            cstr("scratch").as_ptr(),
        ));
        let is_positive = LLVMBuildICmp(
            builder_raw,
            LLVMIntPredicate::LLVMIntSGT,
            n.as_raw(),
            const_i(i32_ty, 0).as_raw(),
            cstr("is_positive").as_ptr(),
        );
        LLVMBuildCondBr(builder_raw, is_positive, positive, fallback);

        LLVMPositionBuilderAtEnd(builder_raw, positive);
        let doubled = build::build_call(builder, double_ty, double_fn, &[n], "doubled");
        LLVMBuildBr(builder_raw, join);

        LLVMPositionBuilderAtEnd(builder_raw, fallback);
        let minus_one = Value::from_raw(LLVMConstInt(i32_ty.as_raw(), u64::MAX, 1));
        LLVMBuildBr(builder_raw, join);

        LLVMPositionBuilderAtEnd(builder_raw, join);
        let picked = Value::from_raw(LLVMBuildPhi(
            builder_raw,
            i32_ty.as_raw(),
            cstr("picked").as_ptr(),
        ));
        build::add_incoming(
            picked,
            &[doubled, minus_one],
            &[
                BasicBlock::from_raw(positive),
                BasicBlock::from_raw(fallback),
            ],
        );
        let slot = build::build_gep(
            builder,
            scratch_ty,
            scratch,
            &[const_i(i64_ty, 0), const_i(i64_ty, 2)],
            "slot",
        );
        LLVMBuildStore(builder_raw, picked.as_raw(), slot.as_raw());
        LLVMBuildRet(builder_raw, picked.as_raw());

        let mut message = std::ptr::null_mut();
        let broken = LLVMVerifyModule(
            module,
            LLVMVerifierFailureAction::LLVMReturnStatusAction,
            &mut message,
        );
        let reason = if message.is_null() {
            String::from("no detail from verifier")
        } else {
            let text = CStr::from_ptr(message).to_string_lossy().into_owned();
            LLVMDisposeMessage(message);
            text
        };

        let ir = if broken == 0 {
            let ir_c = LLVMPrintModuleToString(module);
            let text = CStr::from_ptr(ir_c).to_string_lossy().into_owned();
            LLVMDisposeMessage(ir_c);
            Some(text)
        } else {
            None
        };

        LLVMDisposeBuilder(builder_raw);
        LLVMDisposeModule(module);
        LLVMContextDispose(ctx_raw);

        match ir {
            Some(text) => {
                log::info!("demonstration module verified, {} bytes of IR", text.len());
                Ok(text)
            }
            None => Err(EmitError::Verify { reason }),
        }
    }
}
