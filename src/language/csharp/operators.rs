//! User-defined operators and their C# tokens.
//!
//! Operators are compiled to static (or, for compound assignments, instance) methods with
//! special `op_*` names. [`Operator`] maps those names back to the token written after the
//! `operator` keyword.

use std::str::FromStr;

use strum::{EnumIter, EnumString, IntoStaticStr};

/// Syntactic category of an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorCategory {
    /// One operand
    Unary,
    /// Two operands
    Binary,
    /// User-defined conversion (`implicit` or `explicit`)
    Conversion,
    /// Instance compound assignment (`+=`, `++`, ...)
    CompoundAssignment,
}

/// A user-defined operator, parsed from its special method name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
pub enum Operator {
    /// `op_Implicit`
    #[strum(serialize = "op_Implicit")]
    Implicit,
    /// `op_Explicit`
    #[strum(serialize = "op_Explicit")]
    Explicit,
    /// `op_CheckedExplicit`
    #[strum(serialize = "op_CheckedExplicit")]
    CheckedExplicit,

    /// `op_UnaryPlus`
    #[strum(serialize = "op_UnaryPlus")]
    UnaryPlus,
    /// `op_UnaryNegation`
    #[strum(serialize = "op_UnaryNegation")]
    UnaryNegation,
    /// `op_CheckedUnaryNegation`
    #[strum(serialize = "op_CheckedUnaryNegation")]
    CheckedUnaryNegation,
    /// `op_LogicalNot`
    #[strum(serialize = "op_LogicalNot")]
    LogicalNot,
    /// `op_OnesComplement`
    #[strum(serialize = "op_OnesComplement")]
    OnesComplement,
    /// `op_Increment`
    #[strum(serialize = "op_Increment")]
    Increment,
    /// `op_CheckedIncrement`
    #[strum(serialize = "op_CheckedIncrement")]
    CheckedIncrement,
    /// `op_Decrement`
    #[strum(serialize = "op_Decrement")]
    Decrement,
    /// `op_CheckedDecrement`
    #[strum(serialize = "op_CheckedDecrement")]
    CheckedDecrement,
    /// `op_True`
    #[strum(serialize = "op_True")]
    True,
    /// `op_False`
    #[strum(serialize = "op_False")]
    False,

    /// `op_Addition`
    #[strum(serialize = "op_Addition")]
    Addition,
    /// `op_CheckedAddition`
    #[strum(serialize = "op_CheckedAddition")]
    CheckedAddition,
    /// `op_Subtraction`
    #[strum(serialize = "op_Subtraction")]
    Subtraction,
    /// `op_CheckedSubtraction`
    #[strum(serialize = "op_CheckedSubtraction")]
    CheckedSubtraction,
    /// `op_Multiply`
    #[strum(serialize = "op_Multiply")]
    Multiply,
    /// `op_CheckedMultiply`
    #[strum(serialize = "op_CheckedMultiply")]
    CheckedMultiply,
    /// `op_Division`
    #[strum(serialize = "op_Division")]
    Division,
    /// `op_CheckedDivision`
    #[strum(serialize = "op_CheckedDivision")]
    CheckedDivision,
    /// `op_Modulus`
    #[strum(serialize = "op_Modulus")]
    Modulus,
    /// `op_BitwiseAnd`
    #[strum(serialize = "op_BitwiseAnd")]
    BitwiseAnd,
    /// `op_BitwiseOr`
    #[strum(serialize = "op_BitwiseOr")]
    BitwiseOr,
    /// `op_ExclusiveOr`
    #[strum(serialize = "op_ExclusiveOr")]
    ExclusiveOr,
    /// `op_LeftShift`
    #[strum(serialize = "op_LeftShift")]
    LeftShift,
    /// `op_RightShift`
    #[strum(serialize = "op_RightShift")]
    RightShift,
    /// `op_UnsignedRightShift`
    #[strum(serialize = "op_UnsignedRightShift")]
    UnsignedRightShift,
    /// `op_Equality`
    #[strum(serialize = "op_Equality")]
    Equality,
    /// `op_Inequality`
    #[strum(serialize = "op_Inequality")]
    Inequality,
    /// `op_LessThan`
    #[strum(serialize = "op_LessThan")]
    LessThan,
    /// `op_GreaterThan`
    #[strum(serialize = "op_GreaterThan")]
    GreaterThan,
    /// `op_LessThanOrEqual`
    #[strum(serialize = "op_LessThanOrEqual")]
    LessThanOrEqual,
    /// `op_GreaterThanOrEqual`
    #[strum(serialize = "op_GreaterThanOrEqual")]
    GreaterThanOrEqual,

    /// `op_AdditionAssignment`
    #[strum(serialize = "op_AdditionAssignment")]
    AdditionAssignment,
    /// `op_CheckedAdditionAssignment`
    #[strum(serialize = "op_CheckedAdditionAssignment")]
    CheckedAdditionAssignment,
    /// `op_SubtractionAssignment`
    #[strum(serialize = "op_SubtractionAssignment")]
    SubtractionAssignment,
    /// `op_CheckedSubtractionAssignment`
    #[strum(serialize = "op_CheckedSubtractionAssignment")]
    CheckedSubtractionAssignment,
    /// `op_MultiplicationAssignment`
    #[strum(serialize = "op_MultiplicationAssignment")]
    MultiplicationAssignment,
    /// `op_CheckedMultiplicationAssignment`
    #[strum(serialize = "op_CheckedMultiplicationAssignment")]
    CheckedMultiplicationAssignment,
    /// `op_DivisionAssignment`
    #[strum(serialize = "op_DivisionAssignment")]
    DivisionAssignment,
    /// `op_CheckedDivisionAssignment`
    #[strum(serialize = "op_CheckedDivisionAssignment")]
    CheckedDivisionAssignment,
    /// `op_ModulusAssignment`
    #[strum(serialize = "op_ModulusAssignment")]
    ModulusAssignment,
    /// `op_BitwiseAndAssignment`
    #[strum(serialize = "op_BitwiseAndAssignment")]
    BitwiseAndAssignment,
    /// `op_BitwiseOrAssignment`
    #[strum(serialize = "op_BitwiseOrAssignment")]
    BitwiseOrAssignment,
    /// `op_ExclusiveOrAssignment`
    #[strum(serialize = "op_ExclusiveOrAssignment")]
    ExclusiveOrAssignment,
    /// `op_LeftShiftAssignment`
    #[strum(serialize = "op_LeftShiftAssignment")]
    LeftShiftAssignment,
    /// `op_RightShiftAssignment`
    #[strum(serialize = "op_RightShiftAssignment")]
    RightShiftAssignment,
    /// `op_UnsignedRightShiftAssignment`
    #[strum(serialize = "op_UnsignedRightShiftAssignment")]
    UnsignedRightShiftAssignment,
    /// `op_IncrementAssignment`
    #[strum(serialize = "op_IncrementAssignment")]
    IncrementAssignment,
    /// `op_CheckedIncrementAssignment`
    #[strum(serialize = "op_CheckedIncrementAssignment")]
    CheckedIncrementAssignment,
    /// `op_DecrementAssignment`
    #[strum(serialize = "op_DecrementAssignment")]
    DecrementAssignment,
    /// `op_CheckedDecrementAssignment`
    #[strum(serialize = "op_CheckedDecrementAssignment")]
    CheckedDecrementAssignment,
}

impl Operator {
    /// Parse a special method name, `None` if it names no known operator
    #[must_use]
    pub fn from_method_name(name: &str) -> Option<Self> {
        Operator::from_str(name).ok()
    }

    /// The metadata name of the operator method
    #[must_use]
    pub fn method_name(self) -> &'static str {
        self.into()
    }

    /// The token following `operator` (or, for conversions, preceding it)
    ///
    /// Checked operators share the token of their unchecked counterpart; see [`Self::is_checked`].
    #[must_use]
    pub fn symbol(self) -> &'static str {
        use Operator::*;
        match self {
            Implicit => "implicit",
            Explicit | CheckedExplicit => "explicit",
            UnaryPlus | Addition | CheckedAddition => "+",
            UnaryNegation | CheckedUnaryNegation | Subtraction | CheckedSubtraction => "-",
            LogicalNot => "!",
            OnesComplement => "~",
            Increment | CheckedIncrement | IncrementAssignment | CheckedIncrementAssignment => {
                "++"
            }
            Decrement | CheckedDecrement | DecrementAssignment | CheckedDecrementAssignment => {
                "--"
            }
            True => "true",
            False => "false",
            Multiply | CheckedMultiply => "*",
            Division | CheckedDivision => "/",
            Modulus => "%",
            BitwiseAnd => "&",
            BitwiseOr => "|",
            ExclusiveOr => "^",
            LeftShift => "<<",
            RightShift => ">>",
            UnsignedRightShift => ">>>",
            Equality => "==",
            Inequality => "!=",
            LessThan => "<",
            GreaterThan => ">",
            LessThanOrEqual => "<=",
            GreaterThanOrEqual => ">=",
            AdditionAssignment | CheckedAdditionAssignment => "+=",
            SubtractionAssignment | CheckedSubtractionAssignment => "-=",
            MultiplicationAssignment | CheckedMultiplicationAssignment => "*=",
            DivisionAssignment | CheckedDivisionAssignment => "/=",
            ModulusAssignment => "%=",
            BitwiseAndAssignment => "&=",
            BitwiseOrAssignment => "|=",
            ExclusiveOrAssignment => "^=",
            LeftShiftAssignment => "<<=",
            RightShiftAssignment => ">>=",
            UnsignedRightShiftAssignment => ">>>=",
        }
    }

    /// The syntactic category of the operator
    #[must_use]
    pub fn category(self) -> OperatorCategory {
        use Operator::*;
        match self {
            Implicit | Explicit | CheckedExplicit => OperatorCategory::Conversion,
            UnaryPlus | UnaryNegation | CheckedUnaryNegation | LogicalNot | OnesComplement
            | Increment | CheckedIncrement | Decrement | CheckedDecrement | True | False => {
                OperatorCategory::Unary
            }
            AdditionAssignment
            | CheckedAdditionAssignment
            | SubtractionAssignment
            | CheckedSubtractionAssignment
            | MultiplicationAssignment
            | CheckedMultiplicationAssignment
            | DivisionAssignment
            | CheckedDivisionAssignment
            | ModulusAssignment
            | BitwiseAndAssignment
            | BitwiseOrAssignment
            | ExclusiveOrAssignment
            | LeftShiftAssignment
            | RightShiftAssignment
            | UnsignedRightShiftAssignment
            | IncrementAssignment
            | CheckedIncrementAssignment
            | DecrementAssignment
            | CheckedDecrementAssignment => OperatorCategory::CompoundAssignment,
            _ => OperatorCategory::Binary,
        }
    }

    /// Check if this is the `checked` variant of an operator
    #[must_use]
    pub fn is_checked(self) -> bool {
        self.method_name().starts_with("op_Checked")
    }

    /// Check if this is a user-defined conversion
    #[must_use]
    pub fn is_conversion(self) -> bool {
        self.category() == OperatorCategory::Conversion
    }
}

/// The operator token for a special method name, or the name itself if it is not an operator
#[must_use]
pub fn operator_symbol(name: &str) -> &str {
    Operator::from_method_name(name).map_or(name, |operator| operator.symbol())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn symbols_are_unique_per_category() {
        let mut seen = HashSet::new();
        for operator in Operator::iter() {
            assert!(!operator.symbol().is_empty());
            assert!(
                seen.insert((operator.symbol(), operator.category(), operator.is_checked())),
                "{operator:?} duplicates another operator"
            );
        }
    }

    #[test]
    fn method_names_round_trip() {
        for operator in Operator::iter() {
            assert!(operator.method_name().starts_with("op_"));
            assert_eq!(Operator::from_method_name(operator.method_name()), Some(operator));
        }
    }

    #[test]
    fn symbol_lookup() {
        assert_eq!(operator_symbol("op_Addition"), "+");
        assert_eq!(operator_symbol("op_CheckedMultiply"), "*");
        assert_eq!(operator_symbol("op_UnsignedRightShift"), ">>>");
        assert_eq!(operator_symbol("op_LeftShiftAssignment"), "<<=");
        assert_eq!(operator_symbol("op_Implicit"), "implicit");
        assert_eq!(operator_symbol("op_Frobnicate"), "op_Frobnicate");
        assert_eq!(operator_symbol("Add"), "Add");
    }

    #[test]
    fn categories() {
        assert_eq!(Operator::UnaryNegation.category(), OperatorCategory::Unary);
        assert_eq!(Operator::Subtraction.category(), OperatorCategory::Binary);
        assert_eq!(Operator::CheckedExplicit.category(), OperatorCategory::Conversion);
        assert_eq!(
            Operator::IncrementAssignment.category(),
            OperatorCategory::CompoundAssignment
        );
        assert!(Operator::CheckedExplicit.is_checked());
        assert!(!Operator::Explicit.is_checked());
        assert!(Operator::Implicit.is_conversion());
    }
}
