//! Literal lowering.

use super::{compile_expression, compile_expressions, CompileContext};
use crate::e2e::ast::Expr;
use crate::e2e::ir::{Expression, PropertyAssignment};

pub fn boolean(value: bool) -> Expr {
    Expr::Bool(value)
}

pub fn numeric(value: f64) -> Expr {
    Expr::Num(value)
}

pub fn string(value: &str) -> Expr {
    Expr::string(value)
}

pub fn array(ctx: &mut CompileContext<'_>, elements: &[Expression]) -> Expr {
    Expr::Array(compile_expressions(ctx, elements))
}

/// Properties keep their IR order.
pub fn object(ctx: &mut CompileContext<'_>, properties: &[PropertyAssignment]) -> Expr {
    Expr::Object(
        properties
            .iter()
            .map(|property| (property.name.clone(), compile_expression(ctx, &property.value)))
            .collect(),
    )
}

pub fn null() -> Expr {
    Expr::Null
}

pub fn undefined() -> Expr {
    Expr::Undefined
}
