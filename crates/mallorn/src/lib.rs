//! # Mallorn
//!
//! The namespace-qualified binding environment for a small
//! symbolic-expression runtime.
//!
//! Mallorn stores named values, partitions them into namespaces, resolves
//! qualified and unqualified symbol references, and enforces who may bind
//! what, where. The textual reader and the evaluator are collaborators on
//! either side of it: the reader hands it already-parsed values, the
//! evaluator gives the stored values their meaning.
//!
//! ## Architecture
//!
//! - **Qualified symbols**: `(namespace, name)` pairs keying one flat
//!   bindings map; namespaces exist only as that tag.
//! - **Environment**: the root binding store, a single reader/writer lock
//!   over the map and the current-namespace cursor, with two-tier
//!   resolution (current namespace first, then the reserved `core`
//!   namespace) and write-scope enforcement.
//! - **Bootstrap**: a one-time pass that preloads `core` with special
//!   forms, primitives, and type descriptors before normal scoping rules
//!   take effect.
//!
//! ## Example
//!
//! ```
//! use mallorn::{Environment, Value};
//!
//! let env = Environment::new();
//!
//! // Builtins resolve from any namespace through the core fallback
//! assert!(env.resolve("impl?").is_ok());
//!
//! env.bind("pi", Value::Float(3.1412))?;
//! assert_eq!(env.resolve("pi")?, Value::Float(3.1412));
//! # Ok::<(), mallorn::EnvironmentError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod environment;
pub mod error;
pub mod symbol;
pub mod value;

// Re-export main types
pub use environment::{
    Environment, EnvironmentRef, Scope, CORE_NS, DEFAULT_NS, NS_MARKER, NS_SYMBOL,
};
pub use error::{EnvironmentError, Result};
pub use symbol::{QualifiedSymbol, NS_SEPARATOR};
pub use value::{BuiltinFn, BuiltinFnPtr, SpecialForm, TypeDesc, Value};

/// Mallorn version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
