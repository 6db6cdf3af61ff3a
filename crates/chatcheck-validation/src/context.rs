//! Validation context carried through every rule

use chatcheck_core::ValidationMode;

/// Current JSON path and the mode the rules run under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    /// Current JSON path
    pub path: String,
    /// Validation mode
    pub mode: ValidationMode,
}

impl ValidationContext {
    /// Create a context rooted at `$`
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            path: "$".to_string(),
            mode,
        }
    }

    /// Create a child context with updated path
    pub fn child<P: AsRef<str>>(&self, path_segment: P) -> Self {
        Self {
            path: format!("{}.{}", self.path, path_segment.as_ref()),
            mode: self.mode,
        }
    }

    /// Create a child context for array index
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
            mode: self.mode,
        }
    }

    pub fn is_finetuning(&self) -> bool {
        self.mode == ValidationMode::Finetuning
    }

    pub fn is_serving(&self) -> bool {
        self.mode == ValidationMode::Serving
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new(ValidationMode::default())
    }
}
