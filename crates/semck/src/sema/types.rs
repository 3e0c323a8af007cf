//! The type domain of the checker

use std::fmt;

/// Static type of a variable or expression.
///
/// `Undefined` only comes from an unrecognized declared type name. Most rules
/// treat it as "unknown, do not contradict"; comparisons reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Type {
    #[default]
    Undefined,
    Int,
    Real,
    Bool,
    List,
}

impl Type {
    /// Resolve a declared type name. Unknown names map to `Undefined`.
    pub fn from_type_name(name: &str) -> Type {
        match name {
            "int" => Type::Int,
            "bool" => Type::Bool,
            "float" => Type::Real,
            "list" => Type::List,
            _ => Type::Undefined,
        }
    }

    pub fn is_defined(self) -> bool {
        self != Type::Undefined
    }

    /// `Int` or `Real`
    pub fn is_numeric(self) -> bool {
        matches!(self, Type::Int | Type::Real)
    }

    /// Both types are known and they differ
    pub fn conflicts_with(self, other: Type) -> bool {
        self.is_defined() && other.is_defined() && self != other
    }

    pub fn name(self) -> &'static str {
        match self {
            Type::Undefined => "undefined",
            Type::Int => "int",
            Type::Real => "float",
            Type::Bool => "bool",
            Type::List => "list",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Type::from_type_name("int"), Type::Int);
        assert_eq!(Type::from_type_name("bool"), Type::Bool);
        assert_eq!(Type::from_type_name("float"), Type::Real);
        assert_eq!(Type::from_type_name("list"), Type::List);
        assert_eq!(Type::from_type_name("string"), Type::Undefined);
        assert_eq!(Type::from_type_name("Int"), Type::Undefined);
    }

    #[test]
    fn test_no_numeric_promotion() {
        assert!(Type::Int.conflicts_with(Type::Real));
        assert!(Type::Real.conflicts_with(Type::Int));
        assert!(!Type::Int.conflicts_with(Type::Int));
    }

    #[test]
    fn test_undefined_never_conflicts() {
        for ty in [Type::Undefined, Type::Int, Type::Real, Type::Bool, Type::List] {
            assert!(!Type::Undefined.conflicts_with(ty));
            assert!(!ty.conflicts_with(Type::Undefined));
        }
    }

    #[test]
    fn test_numeric() {
        assert!(Type::Int.is_numeric());
        assert!(Type::Real.is_numeric());
        assert!(!Type::Bool.is_numeric());
        assert!(!Type::List.is_numeric());
        assert!(!Type::Undefined.is_numeric());
    }
}
