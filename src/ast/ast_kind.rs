use std::fmt;

/// An enum of identifiers representing AST nodes.
///
/// This enum can be printed using the [`fmt::Display`] trait.
/// When parsing, this enum is used to indicate what AST node encountered a parsing error.
pub enum ASTKind {
    /// See: [crate::ast::Document]
    Document,
    /// See: [crate::ast::OperationDefinition]
    OperationDefinition,
    /// See: [crate::ast::FragmentDefinition]
    FragmentDefinition,
    /// See: [crate::ast::VariableDefinition]
    VariableDefinition,
    /// See: [crate::ast::Type]
    Type,
    /// See: [crate::ast::NamedType]
    NamedType,
    /// See: `ListType` on [crate::ast::Type]
    ListType,
    /// See: [crate::ast::Field]
    Field,
    /// See: [crate::ast::FragmentSpread]
    FragmentSpread,
    /// See: [crate::ast::InlineFragment]
    InlineFragment,
    /// See: [crate::ast::Selection]
    Selection,
    /// See: [crate::ast::Directive]
    Directive,
    /// See: [crate::ast::Argument]
    Argument,
    /// See: [crate::ast::ObjectField]
    ObjectField,
    /// See: [crate::ast::Value]
    Value,
    /// See: [crate::ast::Variable]
    Variable,
}

impl fmt::Display for ASTKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ASTKind::Document => f.write_str("Document"),
            ASTKind::OperationDefinition => f.write_str("Operation Definition"),
            ASTKind::FragmentDefinition => f.write_str("Fragment Definition"),
            ASTKind::VariableDefinition => f.write_str("Variable Definition"),
            ASTKind::Type => f.write_str("Type"),
            ASTKind::NamedType => f.write_str("Type Name"),
            ASTKind::ListType => f.write_str("List Type"),
            ASTKind::Field => f.write_str("Field"),
            ASTKind::FragmentSpread => f.write_str("Fragment Spread"),
            ASTKind::InlineFragment => f.write_str("Inline Fragment"),
            ASTKind::Selection => f.write_str("Selection"),
            ASTKind::Directive => f.write_str("Directive"),
            ASTKind::Argument => f.write_str("Argument"),
            ASTKind::ObjectField => f.write_str("Object Field"),
            ASTKind::Value => f.write_str("Value"),
            ASTKind::Variable => f.write_str("Variable"),
        }
    }
}
