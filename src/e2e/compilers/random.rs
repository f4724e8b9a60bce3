//! Random value generators.
//!
//! Typed generators compile to `typia.random<T>()` where `T` intersects the
//! base type with one `tags.*` constraint per bound that is present. Named
//! generators go through `RandomGenerator` from the e2e library.

use super::{compile_expression, CompileContext};
use crate::e2e::ast::{Expr, TypeNode};
use crate::e2e::ir::{Expression, RandomKeyword};

pub fn boolean(ctx: &mut CompileContext<'_>) -> Expr {
    typia_random(ctx, TypeNode::Keyword("boolean"))
}

pub fn integer(
    ctx: &mut CompileContext<'_>,
    minimum: Option<i64>,
    maximum: Option<i64>,
    multiple_of: Option<i64>,
) -> Expr {
    let mut members = vec![
        TypeNode::Keyword("number"),
        tag(ctx, "Type", TypeNode::StringLiteral("int32".to_string())),
    ];
    members.extend(numeric_bounds(
        ctx,
        minimum.map(|v| v as f64),
        maximum.map(|v| v as f64),
        multiple_of.map(|v| v as f64),
    ));
    typia_random(ctx, TypeNode::Intersection(members))
}

pub fn number(
    ctx: &mut CompileContext<'_>,
    minimum: Option<f64>,
    maximum: Option<f64>,
    multiple_of: Option<f64>,
) -> Expr {
    let mut members = vec![TypeNode::Keyword("number")];
    members.extend(numeric_bounds(ctx, minimum, maximum, multiple_of));
    typia_random(ctx, intersection(members))
}

pub fn string(ctx: &mut CompileContext<'_>, min_length: Option<u32>, max_length: Option<u32>) -> Expr {
    let mut members = vec![TypeNode::Keyword("string")];
    if let Some(min) = min_length {
        members.push(tag(ctx, "MinLength", TypeNode::NumberLiteral(min as f64)));
    }
    if let Some(max) = max_length {
        members.push(tag(ctx, "MaxLength", TypeNode::NumberLiteral(max as f64)));
    }
    typia_random(ctx, intersection(members))
}

pub fn pattern(ctx: &mut CompileContext<'_>, pattern: &str) -> Expr {
    let members = vec![
        TypeNode::Keyword("string"),
        tag(ctx, "Pattern", TypeNode::StringLiteral(pattern.to_string())),
    ];
    typia_random(ctx, TypeNode::Intersection(members))
}

/// `format` is a JSON-schema format name such as `email` or `uuid`.
pub fn format(ctx: &mut CompileContext<'_>, format: &str) -> Expr {
    let members = vec![
        TypeNode::Keyword("string"),
        tag(ctx, "Format", TypeNode::StringLiteral(format.to_string())),
    ];
    typia_random(ctx, TypeNode::Intersection(members))
}

pub fn keyword(ctx: &mut CompileContext<'_>, keyword: RandomKeyword) -> Expr {
    let args = keyword
        .default_length()
        .map(|length| vec![Expr::Num(length as f64)])
        .unwrap_or_default();
    ctx.e2e("RandomGenerator").member(keyword.method()).call(args)
}

pub fn pick(ctx: &mut CompileContext<'_>, expression: &Expression) -> Expr {
    let generator = ctx.e2e("RandomGenerator");
    let candidates = compile_expression(ctx, expression);
    generator.member("pick").call(vec![candidates])
}

pub fn sample(ctx: &mut CompileContext<'_>, expression: &Expression, count: u32) -> Expr {
    let generator = ctx.e2e("RandomGenerator");
    let candidates = compile_expression(ctx, expression);
    generator
        .member("sample")
        .call(vec![candidates, Expr::Num(count as f64)])
}

fn typia_random(ctx: &mut CompileContext<'_>, type_arg: TypeNode) -> Expr {
    ctx.typia().member("random").call_with_types(vec![type_arg], vec![])
}

fn tag(ctx: &mut CompileContext<'_>, name: &str, argument: TypeNode) -> TypeNode {
    TypeNode::generic(ctx.tag(name), vec![argument])
}

fn numeric_bounds(
    ctx: &mut CompileContext<'_>,
    minimum: Option<f64>,
    maximum: Option<f64>,
    multiple_of: Option<f64>,
) -> Vec<TypeNode> {
    [("Minimum", minimum), ("Maximum", maximum), ("MultipleOf", multiple_of)]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| tag(ctx, name, TypeNode::NumberLiteral(v))))
        .collect()
}

// A lone base type needs no intersection.
fn intersection(mut members: Vec<TypeNode>) -> TypeNode {
    if members.len() == 1 {
        members.remove(0)
    } else {
        TypeNode::Intersection(members)
    }
}
