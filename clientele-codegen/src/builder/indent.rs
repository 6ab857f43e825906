//! Indentation configuration for code generation.

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
    Tab,
}

impl Indent {
    /// 4-space indentation, as rustfmt emits.
    pub const RUST: Self = Self::Spaces(4);

    /// The string for one indent level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(2) => "  ",
            Self::Spaces(8) => "        ",
            Self::Spaces(_) => "    ",
            Self::Tab => "\t",
        }
    }

    /// Width of one level in columns (tabs count as 4).
    pub fn width(&self) -> usize {
        match self {
            Self::Spaces(2) => 2,
            Self::Spaces(8) => 8,
            Self::Spaces(_) | Self::Tab => 4,
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::RUST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_as_str() {
        assert_eq!(Indent::Spaces(2).as_str(), "  ");
        assert_eq!(Indent::RUST.as_str(), "    ");
        assert_eq!(Indent::Tab.as_str(), "\t");
    }

    #[test]
    fn test_default_is_rust() {
        assert_eq!(Indent::default(), Indent::Spaces(4));
        assert_eq!(Indent::default().width(), 4);
    }
}
