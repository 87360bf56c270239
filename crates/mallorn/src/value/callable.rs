//! Callable and marker value types: builtins, special forms, descriptors

use std::sync::Arc;

use super::Value;

/// Type alias for builtin function pointers to reduce complexity
pub type BuiltinFnPtr = Arc<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

/// A built-in native function.
///
/// These are Rust functions exposed to the runtime; the environment
/// stores them like any other value.
#[derive(Clone)]
pub struct BuiltinFn {
    /// Function name (for display/debugging)
    pub name: String,

    /// Arity (-1 for variadic)
    pub arity: i32,

    /// The actual function pointer
    pub func: BuiltinFnPtr,
}

impl BuiltinFn {
    /// Create a new builtin from any compatible closure.
    pub fn new(
        name: impl Into<String>,
        arity: i32,
        func: impl Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            func: Arc::new(func),
        }
    }
}

impl std::fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BuiltinFn({})", self.name)
    }
}

/// Special forms recognized by the evaluator.
///
/// The environment holds these as opaque markers under their core-namespace
/// names; interpreting them is entirely the evaluator's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    /// `(do expr...)` sequential evaluation
    Do,
    /// `(def name value)` top-level binding
    Def,
    /// `(if test then else)` conditional
    If,
    /// `(fn* (params) body)` function construction
    Fn,
    /// `(macro* (params) body)` macro construction
    Macro,
    /// `(let* (bindings) body)` local bindings
    Let,
    /// `(quote form)` literal form
    Quote,
    /// `(syntax-quote form)` template form
    SyntaxQuote,
}

impl SpecialForm {
    /// The local name the form is bound under in the core namespace.
    pub fn name(self) -> &'static str {
        match self {
            SpecialForm::Do => "do",
            SpecialForm::Def => "def",
            SpecialForm::If => "if",
            SpecialForm::Fn => "fn*",
            SpecialForm::Macro => "macro*",
            SpecialForm::Let => "let*",
            SpecialForm::Quote => "quote",
            SpecialForm::SyntaxQuote => "syntax-quote",
        }
    }
}

/// Runtime type descriptors.
///
/// Concrete descriptors name a single value shape; `Seq` and `Invokable`
/// are abstract capabilities bound under the `types` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDesc {
    /// The nil type
    Nil,
    /// Booleans
    Bool,
    /// Integers
    Int,
    /// Floating point numbers
    Float,
    /// Strings
    String,
    /// Symbols
    Symbol,
    /// List forms
    List,
    /// Built-in functions
    Builtin,
    /// Special form markers
    SpecialForm,
    /// Type descriptors themselves
    Type,
    /// Anything traversable as a sequence
    Seq,
    /// Anything that can be applied to arguments
    Invokable,
}

impl TypeDesc {
    /// Stable display name of the descriptor.
    pub fn name(self) -> &'static str {
        match self {
            TypeDesc::Nil => "Nil",
            TypeDesc::Bool => "Bool",
            TypeDesc::Int => "Int",
            TypeDesc::Float => "Float",
            TypeDesc::String => "String",
            TypeDesc::Symbol => "Symbol",
            TypeDesc::List => "List",
            TypeDesc::Builtin => "Builtin",
            TypeDesc::SpecialForm => "SpecialForm",
            TypeDesc::Type => "Type",
            TypeDesc::Seq => "Seq",
            TypeDesc::Invokable => "Invokable",
        }
    }

    /// Whether `value` satisfies this descriptor.
    ///
    /// Concrete descriptors match the exact value shape; abstract ones
    /// match a capability.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            TypeDesc::Seq => matches!(value, Value::List(_) | Value::String(_)),
            TypeDesc::Invokable => value.is_invokable(),
            concrete => value.type_desc() == concrete,
        }
    }
}
