//! Error types for symbol qualification and binding operations

use thiserror::Error;

/// Main error type for environment operations
#[derive(Error, Debug)]
pub enum EnvironmentError {
    /// Raw symbol text carries more than one qualification level
    #[error("invalid qualified symbol: '{symbol}'")]
    InvalidSymbol {
        /// The offending symbol text, as given by the caller
        symbol: String,
    },

    /// A bind targeted a namespace other than the caller's current one
    #[error("cannot bind outside current namespace")]
    ScopeViolation {
        /// The symbol whose bind was rejected
        symbol: String,
        /// The namespace that was current when the bind was rejected
        namespace: String,
    },

    /// Neither the qualified lookup nor the core fallback found a value
    #[error("unable to resolve symbol: {symbol}")]
    UnresolvedSymbol {
        /// The symbol as given by the caller
        symbol: String,
    },

    /// A registration failed while the environment was being constructed
    #[error("bootstrap failed while registering '{symbol}'")]
    Bootstrap {
        /// The builtin whose registration failed
        symbol: String,
        /// The underlying qualification or bind error
        #[source]
        source: Box<EnvironmentError>,
    },
}

/// Result type alias for environment operations
pub type Result<T> = std::result::Result<T, EnvironmentError>;
