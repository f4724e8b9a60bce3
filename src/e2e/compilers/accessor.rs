//! Identifier, property/element access, and API call lowering.

use super::{compile_expression, CompileContext, CONNECTION};
use crate::e2e::ast::Expr;
use crate::e2e::document::{accessor_segments, Endpoint};
use crate::e2e::ir::Expression;

pub fn identifier(text: &str) -> Expr {
    Expr::ident(text)
}

pub fn property_access(
    ctx: &mut CompileContext<'_>,
    expression: &Expression,
    name: &str,
    question_dot: bool,
) -> Expr {
    Expr::Member {
        object: Box::new(compile_expression(ctx, expression)),
        property: name.to_string(),
        optional: question_dot,
    }
}

pub fn element_access(
    ctx: &mut CompileContext<'_>,
    expression: &Expression,
    argument: &Expression,
    question_dot: bool,
) -> Expr {
    Expr::Index {
        object: Box::new(compile_expression(ctx, expression)),
        index: Box::new(compile_expression(ctx, argument)),
        optional: question_dot,
    }
}

/// `await api.functional.<accessor>(connection[, argument])`
pub fn api_call(
    ctx: &mut CompileContext<'_>,
    endpoint: &Endpoint,
    argument: Option<&Expression>,
) -> Expr {
    let function = sdk_function(ctx, endpoint);
    let mut args = vec![Expr::ident(CONNECTION)];
    if let Some(argument) = argument {
        args.push(compile_expression(ctx, argument));
    }
    function.call(args).awaited()
}

/// SDK function for `endpoint`, e.g. `api.functional.shoppings.sales.create`.
///
/// Endpoints missing from the accessor map fall back to the accessor the
/// route migration would derive; the type checker downstream reports them.
pub fn sdk_function(ctx: &mut CompileContext<'_>, endpoint: &Endpoint) -> Expr {
    let segments = match ctx.accessors.get(endpoint) {
        Some(route) => route.accessor.clone(),
        None => {
            tracing::debug!(%endpoint, "endpoint not in document, deriving accessor");
            accessor_segments(endpoint, None)
        }
    };
    segments
        .into_iter()
        .fold(ctx.api().member("functional"), |object, segment| object.member(segment))
}

/// Response body type name of the operation behind `endpoint`, if any.
pub fn response_type(ctx: &CompileContext<'_>, endpoint: &Endpoint) -> Option<String> {
    match ctx.accessors.get(endpoint) {
        Some(route) => route.operation.response_body.clone(),
        None => ctx
            .document
            .operations
            .iter()
            .find(|operation| operation.endpoint() == *endpoint)
            .and_then(|operation| operation.response_body.clone()),
    }
}
