//! Thread-safe namespace-qualified binding store and resolver

mod bootstrap;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{EnvironmentError, Result};
use crate::symbol::QualifiedSymbol;
use crate::value::Value;

/// Reserved namespace holding built-in special forms and primitives.
///
/// Every namespace sees these implicitly through fallback resolution.
pub const CORE_NS: &str = "core";

/// Default working namespace, active once construction completes.
pub const DEFAULT_NS: &str = "user";

/// Name the namespace-switch primitive is bound under.
pub const NS_SYMBOL: &str = "ns";

/// Symbol rebound on every namespace switch so code can resolve the name
/// of the namespace it is currently in.
pub const NS_MARKER: &str = "*ns*";

/// Rewrites applied to raw symbol text before qualification on resolve.
///
/// A fixed table rather than conditionals in the resolver: the
/// namespace-switch primitive must stay reachable from any namespace,
/// and future aliases slot in here.
const RESOLVE_ALIASES: &[(&str, &str)] = &[("ns", "user/ns")];

/// Shared handle to an environment.
pub type EnvironmentRef = Arc<Environment>;

/// Scope of named values, as seen by the reader and evaluator.
///
/// Layered scopes (function frames, let bindings) sit above this crate;
/// they delegate to an enclosing scope until a root is reached.
pub trait Scope {
    /// Bind `symbol` to `value` in this scope.
    fn bind(&self, symbol: &str, value: Value) -> Result<()>;

    /// Look up the value bound to `symbol`.
    fn resolve(&self, symbol: &str) -> Result<Value>;

    /// The enclosing scope, if any.
    fn parent(&self) -> Option<&dyn Scope>;
}

/// The root binding store for a symbolic-expression runtime.
///
/// One flat map holds the bindings of every namespace, keyed by
/// [`QualifiedSymbol`]; a single reader/writer lock guards the map
/// together with the current-namespace cursor. Values are opaque here,
/// interpreting them is the evaluator's business.
///
/// # Example
///
/// ```
/// use mallorn::{Environment, Value};
///
/// let env = Environment::new();
/// assert_eq!(env.current_namespace(), "user");
///
/// env.bind("pi", Value::Float(3.1412))?;
/// assert_eq!(env.resolve("pi")?, Value::Float(3.1412));
/// assert_eq!(env.resolve("user/pi")?, Value::Float(3.1412));
/// # Ok::<(), mallorn::EnvironmentError>(())
/// ```
#[derive(Debug)]
pub struct Environment {
    state: RwLock<State>,
}

#[derive(Debug)]
struct State {
    /// Namespace that unqualified binds and lookups land in
    current_ns: String,

    /// Write-scope enforcement; off only while bootstrap preloads core
    scope_check: bool,

    /// All bindings across all namespaces
    bindings: HashMap<QualifiedSymbol, Value>,
}

impl Environment {
    /// Create a fully bootstrapped environment.
    ///
    /// The core namespace is populated with the builtin table, write-scope
    /// enforcement is active, and [`DEFAULT_NS`] is the current namespace.
    /// Returns an [`EnvironmentRef`] so bound primitives can hold a weak
    /// handle back to their own environment.
    ///
    /// # Panics
    ///
    /// Panics if any builtin fails to register. The builtin table ships
    /// with the runtime, so a failure here is a bug in the runtime itself,
    /// not a recoverable condition.
    pub fn new() -> EnvironmentRef {
        let env = Arc::new(Environment {
            state: RwLock::new(State {
                current_ns: CORE_NS.to_string(),
                scope_check: false,
                bindings: HashMap::new(),
            }),
        });

        if let Err(err) = bootstrap::run(&env) {
            panic!("environment bootstrap failed: {err}");
        }
        env
    }

    /// Bind `symbol` to `value`.
    ///
    /// The symbol is qualified against the current namespace. Rebinding an
    /// existing slot silently overwrites it (`def` may redefine).
    ///
    /// # Errors
    ///
    /// - [`EnvironmentError::InvalidSymbol`] for malformed symbol text.
    /// - [`EnvironmentError::ScopeViolation`] when the target namespace
    ///   differs from the current one while enforcement is active.
    pub fn bind(&self, symbol: &str, value: Value) -> Result<()> {
        let mut state = self.state.write().unwrap();

        let qualified = QualifiedSymbol::qualify(symbol, &state.current_ns)?;
        if state.scope_check && qualified.namespace != state.current_ns {
            return Err(EnvironmentError::ScopeViolation {
                symbol: symbol.to_string(),
                namespace: state.current_ns.clone(),
            });
        }

        state.bindings.insert(qualified, value);
        Ok(())
    }

    /// Look up the value bound to `symbol`.
    ///
    /// The current namespace is consulted first, then the same local name
    /// in [`CORE_NS`]. Checking the current namespace first lets code
    /// shadow a core name deliberately; the fallback is what gives every
    /// namespace implicit visibility of the builtins.
    ///
    /// # Errors
    ///
    /// - [`EnvironmentError::InvalidSymbol`] for malformed symbol text.
    /// - [`EnvironmentError::UnresolvedSymbol`] when neither lookup finds
    ///   a value.
    pub fn resolve(&self, symbol: &str) -> Result<Value> {
        let state = self.state.read().unwrap();

        let target = RESOLVE_ALIASES
            .iter()
            .find(|(from, _)| *from == symbol)
            .map_or(symbol, |(_, to)| *to);

        let primary = QualifiedSymbol::qualify(target, &state.current_ns)?;
        let fallback = primary.with_namespace(CORE_NS);

        state
            .bindings
            .get(&primary)
            .or_else(|| state.bindings.get(&fallback))
            .cloned()
            .ok_or_else(|| EnvironmentError::UnresolvedSymbol {
                symbol: symbol.to_string(),
            })
    }

    /// Switch the current namespace to `name`.
    ///
    /// After moving the cursor, [`NS_MARKER`] is bound in the now-current
    /// namespace to a symbol naming it, so introspection code can read
    /// "what namespace am I in" through ordinary resolution. The write
    /// lock is released before that bind; it reuses `bind`'s own locking
    /// and validation.
    ///
    /// # Errors
    ///
    /// Propagates any error from the marker bind.
    pub fn switch_namespace(&self, name: &str) -> Result<()> {
        {
            let mut state = self.state.write().unwrap();
            state.current_ns = name.to_string();
        }

        self.bind(NS_MARKER, Value::symbol(name))
    }

    /// The currently active namespace.
    pub fn current_namespace(&self) -> String {
        self.state.read().unwrap().current_ns.clone()
    }

    /// Number of bindings across all namespaces.
    pub fn len(&self) -> usize {
        self.state.read().unwrap().bindings.len()
    }

    /// Check if the environment holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.state.read().unwrap().bindings.is_empty()
    }

    /// Turn write-scope enforcement on once bootstrap has preloaded core.
    fn enable_scope_check(&self) {
        self.state.write().unwrap().scope_check = true;
    }
}

impl Scope for Environment {
    fn bind(&self, symbol: &str, value: Value) -> Result<()> {
        Environment::bind(self, symbol, value)
    }

    fn resolve(&self, symbol: &str) -> Result<Value> {
        Environment::resolve(self, symbol)
    }

    /// Always `None`: this store is the root scope.
    fn parent(&self) -> Option<&dyn Scope> {
        None
    }
}
