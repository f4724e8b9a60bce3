//! Calls, operators, arrow functions, and array higher-order operations.
//!
//! Array operations run through the e2e library's `ArrayUtil` so that async
//! callbacks are awaited in order; the call itself is always awaited.

use super::{compile_block, compile_expression, compile_expressions, CompileContext};
use crate::e2e::ast::{ArrowBody, Expr};
use crate::e2e::ir::{ArrowFunction, BinaryOperator, Expression, PostfixOperator, PrefixOperator};

pub fn call(ctx: &mut CompileContext<'_>, expression: &Expression, arguments: &[Expression]) -> Expr {
    let callee = compile_expression(ctx, expression);
    callee.call(compile_expressions(ctx, arguments))
}

pub fn new(ctx: &mut CompileContext<'_>, expression: &Expression, arguments: &[Expression]) -> Expr {
    Expr::New {
        callee: Box::new(compile_expression(ctx, expression)),
        args: compile_expressions(ctx, arguments),
    }
}

pub fn conditional(
    ctx: &mut CompileContext<'_>,
    condition: &Expression,
    when_true: &Expression,
    when_false: &Expression,
) -> Expr {
    Expr::Conditional {
        condition: Box::new(compile_expression(ctx, condition)),
        when_true: Box::new(compile_expression(ctx, when_true)),
        when_false: Box::new(compile_expression(ctx, when_false)),
    }
}

pub fn binary(
    ctx: &mut CompileContext<'_>,
    left: &Expression,
    operator: BinaryOperator,
    right: &Expression,
) -> Expr {
    Expr::Binary {
        left: Box::new(compile_expression(ctx, left)),
        op: operator.as_str(),
        right: Box::new(compile_expression(ctx, right)),
    }
}

pub fn prefix(ctx: &mut CompileContext<'_>, operator: PrefixOperator, operand: &Expression) -> Expr {
    Expr::Prefix {
        op: operator.as_str(),
        operand: Box::new(compile_expression(ctx, operand)),
    }
}

pub fn postfix(ctx: &mut CompileContext<'_>, operand: &Expression, operator: PostfixOperator) -> Expr {
    Expr::Postfix {
        operand: Box::new(compile_expression(ctx, operand)),
        op: operator.as_str(),
    }
}

/// Every IR arrow becomes an `async` arrow with a block body.
pub fn arrow(ctx: &mut CompileContext<'_>, function: &ArrowFunction) -> Expr {
    Expr::Arrow {
        is_async: true,
        params: function.parameters.clone(),
        body: ArrowBody::Block(compile_block(ctx, &function.body)),
    }
}

pub fn array_map(ctx: &mut CompileContext<'_>, array: &Expression, function: &ArrowFunction) -> Expr {
    array_utility(ctx, "asyncMap", array, function)
}

pub fn array_filter(ctx: &mut CompileContext<'_>, array: &Expression, function: &ArrowFunction) -> Expr {
    array_utility(ctx, "asyncFilter", array, function)
}

pub fn array_for_each(ctx: &mut CompileContext<'_>, array: &Expression, function: &ArrowFunction) -> Expr {
    array_utility(ctx, "asyncForEach", array, function)
}

pub fn array_repeat(ctx: &mut CompileContext<'_>, count: &Expression, function: &ArrowFunction) -> Expr {
    array_utility(ctx, "asyncRepeat", count, function)
}

// `await ArrayUtil.<method>(operand, async (...) => { ... })`
fn array_utility(
    ctx: &mut CompileContext<'_>,
    method: &str,
    operand: &Expression,
    function: &ArrowFunction,
) -> Expr {
    let utility = ctx.e2e("ArrayUtil");
    let operand = compile_expression(ctx, operand);
    let callback = arrow(ctx, function);
    utility.member(method).call(vec![operand, callback]).awaited()
}

#[cfg(test)]
mod tests {
    use super::super::fixture::Fixture;
    use super::*;
    use crate::e2e::ast::Expr;
    use crate::e2e::ir::{Block, Statement};
    use crate::test_utils::{ident, number, string};

    fn callback(parameters: &[&str], statements: Vec<Statement>) -> ArrowFunction {
        ArrowFunction {
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            body: Block { statements },
        }
    }

    #[test]
    fn test_array_map_is_awaited() {
        let function = callback(
            &["unit"],
            vec![Statement::ReturnStatement {
                expression: Some(Expression::PropertyAccessExpression {
                    expression: Box::new(ident("unit")),
                    name: "id".to_string(),
                    question_dot: false,
                }),
            }],
        );
        let expression = Expression::ArrayMapExpression {
            array: Box::new(ident("units")),
            function,
        };

        let mut fixture = Fixture::new();
        let mut ctx = fixture.context();
        let compiled = super::super::compile_expression(&mut ctx, &expression);
        assert!(matches!(compiled, Expr::Await(_)));

        assert_eq!(
            fixture.print(&expression),
            "await ArrayUtil.asyncMap(units, async (unit) => {\n  return unit.id;\n})"
        );
        assert_eq!(fixture.imports(), vec!["import { ArrayUtil } from \"@nestia/e2e\";"]);
    }

    #[test]
    fn test_array_repeat_and_for_each() {
        let mut fixture = Fixture::new();
        let repeat = Expression::ArrayRepeatExpression {
            count: Box::new(number(3.0)),
            function: callback(&["i"], vec![]),
        };
        assert_eq!(fixture.print(&repeat), "await ArrayUtil.asyncRepeat(3, async (i) => {})");

        let for_each = Expression::ArrayForEachExpression {
            array: Box::new(ident("list")),
            function: callback(&["x"], vec![]),
        };
        assert_eq!(fixture.print(&for_each), "await ArrayUtil.asyncForEach(list, async (x) => {})");
    }

    #[test]
    fn test_operators() {
        let mut fixture = Fixture::new();
        let expression = Expression::ConditionalExpression {
            condition: Box::new(Expression::BinaryExpression {
                left: Box::new(ident("a")),
                operator: BinaryOperator::Greater,
                right: Box::new(number(0.0)),
            }),
            when_true: Box::new(Expression::PrefixUnaryExpression {
                operator: PrefixOperator::Not,
                operand: Box::new(ident("flag")),
            }),
            when_false: Box::new(Expression::PostfixUnaryExpression {
                operand: Box::new(ident("count")),
                operator: PostfixOperator::Increment,
            }),
        };
        assert_eq!(fixture.print(&expression), "a > 0 ? !flag : count++");
    }

    #[test]
    fn test_call_and_new() {
        let mut fixture = Fixture::new();
        let call = Expression::CallExpression {
            expression: Box::new(Expression::PropertyAccessExpression {
                expression: Box::new(ident("list")),
                name: "includes".to_string(),
                question_dot: false,
            }),
            arguments: vec![string("x")],
        };
        assert_eq!(fixture.print(&call), "list.includes(\"x\")");

        let new = Expression::NewExpression {
            expression: Box::new(ident("Date")),
            arguments: vec![],
        };
        assert_eq!(fixture.print(&new), "new Date()");
    }
}
