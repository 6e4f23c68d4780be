//! Syntax node kinds.

use std::fmt;

/// The kinds of syntax nodes the tooling backend recognizes.
///
/// This is a closed set: a real grammar produces more constructs than listed
/// here, but anything else reaches the backend as a plain container node and
/// is only ever traversed, never interpreted. Consumers must keep an explicit
/// default case when matching on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root node of a parsed file
    File,
    /// A statement block (function body, control-flow body, do-block)
    Block,
    /// An assignment statement: targets `ExprList`, then values `ExprList`
    AssignStat,
    /// An ordered list of expressions
    ExprList,
    /// A `local` declaration: one or more `NameDef`s, then an optional value list
    LocalDef,
    /// A name being introduced (local name, parameter)
    NameDef,
    /// A bare identifier used as an expression
    NameExpr,
    /// A literal expression (number, string, boolean, nil)
    LiteralExpr,
    /// A member access expression: base expression, then member `Ident`
    IndexExpr,
    /// A table literal
    TableExpr,
    /// One field of a table literal: optional key `Ident`, then value
    TableField,
    /// A top-level `function f() ... end` definition
    FuncDef,
    /// A `local function f() ... end` definition
    LocalFuncDef,
    /// A method definition: receiver expression, name `Ident`, params, body
    ClassMethodDef,
    /// An anonymous function expression
    ClosureExpr,
    /// A parameter list of `NameDef`s
    ParamList,
    /// An identifier token node
    Ident,
    /// A documentation comment, owning doc tags
    Comment,
    /// A `@class` doc tag declaring a nominal type
    DocClassDef,
    /// A `@field` doc tag declaring a member of a class
    DocFieldDef,
    /// An explicit class reference attached to a `@field` tag
    DocClassRef,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
