//! Statement and declared-type lowering.

use super::{accessor, compile_expression, CompileContext};
use crate::e2e::ast::{Expr, Stmt, TypeNode, VarKind};
use crate::e2e::document::Endpoint;
use crate::e2e::ir::{Block, Expression, Mutability, Statement, TypeSchema};

pub fn compile_block(ctx: &mut CompileContext<'_>, block: &Block) -> Vec<Stmt> {
    compile_statements(ctx, &block.statements)
}

pub fn compile_statements(ctx: &mut CompileContext<'_>, statements: &[Statement]) -> Vec<Stmt> {
    statements
        .iter()
        .flat_map(|statement| compile_statement(ctx, statement))
        .collect()
}

/// Lower one statement. Most statements map one-to-one; an API operation
/// with a bound response yields the declaration and its assertion.
pub fn compile_statement(ctx: &mut CompileContext<'_>, statement: &Statement) -> Vec<Stmt> {
    match statement {
        Statement::Block(block) => vec![Stmt::Block(compile_block(ctx, block))],
        Statement::ExpressionStatement { expression } => {
            vec![Stmt::Expr(compile_expression(ctx, expression))]
        }
        Statement::VariableDeclaration {
            name,
            type_schema,
            initializer,
            mutability,
        } => {
            let type_ann = type_schema.as_ref().map(|schema| compile_type(ctx, schema));
            let init = initializer
                .as_ref()
                .map(|expression| compile_expression(ctx, expression));
            vec![Stmt::VarDecl {
                kind: match mutability {
                    Mutability::Const => VarKind::Const,
                    Mutability::Let => VarKind::Let,
                },
                name: name.clone(),
                type_ann,
                init,
            }]
        }
        Statement::IfStatement {
            condition,
            then_statement,
            else_statement,
        } => {
            let condition = compile_expression(ctx, condition);
            let then_branch = compile_block(ctx, then_statement);
            let else_branch = else_statement.as_deref().map(|statement| {
                let mut compiled = compile_statement(ctx, statement);
                if compiled.len() == 1 {
                    Box::new(compiled.remove(0))
                } else {
                    Box::new(Stmt::Block(compiled))
                }
            });
            vec![Stmt::If {
                condition,
                then_branch,
                else_branch,
            }]
        }
        Statement::ReturnStatement { expression } => vec![Stmt::Return(
            expression
                .as_ref()
                .map(|expression| compile_expression(ctx, expression)),
        )],
        Statement::ThrowStatement { expression } => {
            vec![Stmt::Throw(compile_expression(ctx, expression))]
        }
        Statement::ApiOperateStatement {
            endpoint,
            argument,
            variable_name,
        } => api_operate(ctx, endpoint, argument.as_ref(), variable_name.as_deref()),
    }
}

// const <name>: <Response> = await api.functional...(connection, arg);
// typia.assert(<name>);
// Without a known response type the binding stays, untyped and unasserted.
fn api_operate(
    ctx: &mut CompileContext<'_>,
    endpoint: &Endpoint,
    argument: Option<&Expression>,
    variable_name: Option<&str>,
) -> Vec<Stmt> {
    let call = accessor::api_call(ctx, endpoint, argument);
    let response = accessor::response_type(ctx, endpoint);
    match (variable_name, response) {
        (Some(name), Some(response)) => {
            let type_ann = ctx.structure(&response);
            let assert = ctx
                .typia()
                .member("assert")
                .call(vec![Expr::ident(name)]);
            vec![
                Stmt::VarDecl {
                    kind: VarKind::Const,
                    name: name.to_string(),
                    type_ann: Some(type_ann),
                    init: Some(call),
                },
                Stmt::Expr(assert),
            ]
        }
        (Some(name), None) => vec![Stmt::VarDecl {
            kind: VarKind::Const,
            name: name.to_string(),
            type_ann: None,
            init: Some(call),
        }],
        (None, _) => vec![Stmt::Expr(call)],
    }
}

/// Lower a declared variable type. Integers carry the `int32` tag.
pub fn compile_type(ctx: &mut CompileContext<'_>, schema: &TypeSchema) -> TypeNode {
    match schema {
        TypeSchema::Boolean => TypeNode::Keyword("boolean"),
        TypeSchema::Integer => TypeNode::Intersection(vec![
            TypeNode::Keyword("number"),
            TypeNode::generic(
                ctx.tag("Type"),
                vec![TypeNode::StringLiteral("int32".to_string())],
            ),
        ]),
        TypeSchema::Number => TypeNode::Keyword("number"),
        TypeSchema::String => TypeNode::Keyword("string"),
        TypeSchema::Null => TypeNode::Keyword("null"),
        TypeSchema::Array { items } => TypeNode::Array(Box::new(compile_type(ctx, items))),
        TypeSchema::Reference { name } => ctx.structure(name),
        TypeSchema::Nullable { inner } => {
            TypeNode::Union(vec![compile_type(ctx, inner), TypeNode::Keyword("null")])
        }
    }
}
