//! Front-end configuration.
//!
//! Settings here change how the lexer and parser behave; they never carry state
//! between calls. Every entry point has a `*_with_config` variant and a plain variant
//! that uses [`FrontendConfig::default`].

/// Default limit for nested statements and expressions.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 200;

/// Lexer and parser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Maximum nesting of statements and expressions before parsing fails with a
    /// recursion error
    pub max_nesting_depth: usize,
    /// Fold a `-` that is immediately followed by a digit into the number token.
    ///
    /// On by default. With folding on, `x -1` lexes as `x` followed by the number `-1`
    /// rather than a subtraction.
    pub fold_negative_literals: bool,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            fold_negative_literals: true,
        }
    }
}

impl FrontendConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Enable or disable negative literal folding in the lexer
    pub fn with_fold_negative_literals(mut self, fold: bool) -> Self {
        self.fold_negative_literals = fold;
        self
    }
}
