//! Namespace-qualified symbols and the qualification of raw symbol text

use std::fmt;

use crate::error::{EnvironmentError, Result};

/// Separator between the namespace and local parts of a symbol.
pub const NS_SEPARATOR: char = '/';

/// A namespace-qualified symbol: one binding slot in the environment.
///
/// Two qualified symbols name the same slot iff both fields match exactly.
/// The pair is the key of the environment's flat bindings map; namespaces
/// exist only as this tag, never as separate storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedSymbol {
    /// The namespace partition the symbol lives in
    pub namespace: String,

    /// The local name within that namespace
    pub name: String,
}

impl QualifiedSymbol {
    /// Create a qualified symbol from already-split parts.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Qualify raw symbol text against the given current namespace.
    ///
    /// - The separator character by itself is an ordinary local name in the
    ///   current namespace (division is bound as `core//`).
    /// - Text without a separator lands in the current namespace.
    /// - Text with a separator splits at its first occurrence into
    ///   namespace and local name. The local name may itself be the
    ///   separator character, so a symbol like `core//` stays legal.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::InvalidSymbol`] when the local part
    /// contains a further separator, i.e. more than one qualification
    /// level (`a/b/c`).
    pub fn qualify(raw: &str, current_ns: &str) -> Result<Self> {
        if raw == "/" {
            return Ok(Self::new(current_ns, raw));
        }

        match raw.split_once(NS_SEPARATOR) {
            None => Ok(Self::new(current_ns, raw)),
            Some((namespace, name)) => {
                if name.contains(NS_SEPARATOR) && name != "/" {
                    return Err(EnvironmentError::InvalidSymbol {
                        symbol: raw.to_string(),
                    });
                }
                Ok(Self::new(namespace, name))
            }
        }
    }

    /// The same local name forced into another namespace.
    ///
    /// Resolution uses this to compute the core-namespace fallback slot.
    pub fn with_namespace(&self, namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: self.name.clone(),
        }
    }
}

impl fmt::Display for QualifiedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, NS_SEPARATOR, self.name)
    }
}
