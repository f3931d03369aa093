//! JSON bindings generator for contract modules.
//!
//! Takes parsed contract modules (classes, functions, passthrough text) and
//! produces new module text with JSON marshalling injected: data classes
//! gain decode/encode/serialize/toJSON methods, and exported entry
//! functions are wrapped in shims that decode their arguments from the host
//! input payload and encode their results back. The generated code targets
//! the host runtime's marshalling primitives; this crate only emits text.
//!
//! Modules opt in with the `@jsonBindgen` class decorator or the deprecated
//! module-wide `@jsonfile` marker, and opt out with `@notJsonfile`.
//!
//! # Example
//!
//! ```
//! use json_bindgen::{
//!     BindingsBuilder, ClassDecl, Declaration, FieldDecl, Member, Module, SourceKind,
//! };
//!
//! let module = Module::new("assembly/main.ts", SourceKind::UserEntry)
//!     .with_text("@jsonBindgen\nexport class Point { x: i32; }")
//!     .with_declarations(vec![Declaration::Class(
//!         ClassDecl::new("Point")
//!             .with_header("@jsonBindgen\nexport class Point")
//!             .with_decorator("jsonBindgen")
//!             .with_members(vec![Member::Field(FieldDecl::new("x").with_type("i32"))]),
//!     )]);
//!
//! let mut builder = BindingsBuilder::new();
//! let output = builder.build(&module)?;
//! assert!(output.contains("static decode(buf: Uint8Array): Point {"));
//! # Ok::<(), json_bindgen::TransformError>(())
//! ```

pub mod ast;
pub mod builder;
pub mod classify;
pub mod codec;
pub mod diagnostics;
pub mod error;
pub mod fragment;
pub mod host;
pub mod transform;
pub mod wrapper;

pub use ast::{
    ClassDecl, Declaration, FieldDecl, FunctionDecl, Member, Module, OtherDecl, OtherMember,
    Param, SourceKind,
};
pub use builder::BindingsBuilder;
pub use classify::{AnnotationKind, ClassDisposition};
pub use diagnostics::Diagnostics;
pub use error::{HostError, PipelineError, TransformError};
pub use fragment::{Fragment, Slot};
pub use host::{Host, TypeCheck};
pub use transform::Transformer;
