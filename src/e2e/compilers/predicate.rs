//! Assertions through `TestValidator`.
//!
//! Every predicate carries a title that the runtime prints when the
//! assertion fails.

use super::{compile_expression, functional, CompileContext};
use crate::e2e::ast::Expr;
use crate::e2e::ir::{ArrowFunction, Expression};

/// `TestValidator.equals(title, x, y)`
pub fn equal(ctx: &mut CompileContext<'_>, title: &str, x: &Expression, y: &Expression) -> Expr {
    let validator = ctx.e2e("TestValidator");
    let x = compile_expression(ctx, x);
    let y = compile_expression(ctx, y);
    validator
        .member("equals")
        .call(vec![Expr::string(title), x, y])
}

/// `TestValidator.error(title, () => TestValidator.equals(title, x, y))`
pub fn not_equal(ctx: &mut CompileContext<'_>, title: &str, x: &Expression, y: &Expression) -> Expr {
    let validator = ctx.e2e("TestValidator");
    let equals = equal(ctx, title, x, y);
    validator
        .member("error")
        .call(vec![Expr::string(title), Expr::thunk(equals)])
}

/// `TestValidator.predicate(title, expression)`
pub fn conditional(ctx: &mut CompileContext<'_>, title: &str, expression: &Expression) -> Expr {
    let validator = ctx.e2e("TestValidator");
    let condition = compile_expression(ctx, expression);
    validator
        .member("predicate")
        .call(vec![Expr::string(title), condition])
}

/// `await TestValidator.error(title, async () => { ... })`
pub fn error(ctx: &mut CompileContext<'_>, title: &str, function: &ArrowFunction) -> Expr {
    let validator = ctx.e2e("TestValidator");
    let thunk = functional::arrow(ctx, function);
    validator
        .member("error")
        .call(vec![Expr::string(title), thunk])
        .awaited()
}
