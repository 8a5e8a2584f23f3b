//! Analysis passes

use std::fmt;

/// Disassembly pass kind.
///
/// Exploratory passes establish label placement and operand widths and
/// must leave the output sink untouched. The final pass renders text.
/// The driver sets the pass on the output engine before issuing any
/// formatting calls for that pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    Exploratory,
    Final,
}

impl Pass {
    /// True for the pass that produces visible output
    #[inline]
    pub fn is_final(self) -> bool {
        self == Pass::Final
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Exploratory => write!(f, "exploratory"),
            Pass::Final => write!(f, "final"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_final() {
        assert!(Pass::Final.is_final());
        assert!(!Pass::Exploratory.is_final());
    }

    #[test]
    fn test_display() {
        assert_eq!(Pass::Exploratory.to_string(), "exploratory");
        assert_eq!(Pass::Final.to_string(), "final");
    }
}
