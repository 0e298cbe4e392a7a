//! Diagnostics for the m2c front end.
//!
//! The lexer and parser record [`Diagnostic`]s as plain data into a
//! [`DiagnosticQueue`], which keeps the per-phase [`Statistics`]. Rendering is
//! left to a [`DiagnosticEmitter`](emitter::DiagnosticEmitter).

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod queue;

pub use diagnostic::{Diagnostic, Expected, Severity};
pub use error_code::{ErrorCode, Phase};
pub use queue::{DiagnosticQueue, Statistics};
