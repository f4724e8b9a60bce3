//! Test IR validation.
//!
//! Walks every statement and expression of a function and collects each API
//! reference problem. Nothing is fixed up and nothing short-circuits.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use super::document::{Document, Endpoint, HttpMethod};
use super::ir::{ArrowFunction, Block, Expression, Function, Statement};

/// One problem in a test function, addressed by its IR path.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{path}: {message}")]
pub struct TestError {
    pub path: String,
    pub message: String,
}

/// Check every API reference in `function`.
///
/// `endpoints` restricts which operations may be called; an empty slice
/// allows every operation in the document. Returns `None` when clean.
pub fn validate_test_function(
    function: &Function,
    document: &Document,
    endpoints: &[Endpoint],
) -> Option<Vec<TestError>> {
    let mut walker = Walker {
        known: document.operations.iter().map(|o| o.endpoint()).collect(),
        allowed: endpoints,
        errors: Vec::new(),
    };
    walker.statements(&function.statements, "$input.function.statements");

    tracing::debug!(
        statements = function.statements.len(),
        errors = walker.errors.len(),
        "validated test function"
    );
    if walker.errors.is_empty() {
        None
    } else {
        Some(walker.errors)
    }
}

struct Walker<'a> {
    known: HashSet<Endpoint>,
    allowed: &'a [Endpoint],
    errors: Vec<TestError>,
}

impl Walker<'_> {
    fn report(&mut self, path: String, message: String) {
        self.errors.push(TestError { path, message });
    }

    fn statements(&mut self, statements: &[Statement], path: &str) {
        for (i, statement) in statements.iter().enumerate() {
            self.statement(statement, &format!("{}[{}]", path, i));
        }
    }

    fn block(&mut self, block: &Block, path: &str) {
        self.statements(&block.statements, &format!("{}.statements", path));
    }

    fn arrow(&mut self, function: &ArrowFunction, path: &str) {
        self.block(&function.body, &format!("{}.body", path));
    }

    fn statement(&mut self, statement: &Statement, path: &str) {
        match statement {
            Statement::Block(block) => self.block(block, path),
            Statement::ExpressionStatement { expression }
            | Statement::ThrowStatement { expression } => {
                self.expression(expression, &format!("{}.expression", path))
            }
            Statement::VariableDeclaration { initializer, .. } => {
                if let Some(initializer) = initializer {
                    self.expression(initializer, &format!("{}.initializer", path));
                }
            }
            Statement::IfStatement {
                condition,
                then_statement,
                else_statement,
            } => {
                self.expression(condition, &format!("{}.condition", path));
                self.block(then_statement, &format!("{}.thenStatement", path));
                if let Some(else_statement) = else_statement {
                    self.statement(else_statement, &format!("{}.elseStatement", path));
                }
            }
            Statement::ReturnStatement { expression } => {
                if let Some(expression) = expression {
                    self.expression(expression, &format!("{}.expression", path));
                }
            }
            Statement::ApiOperateStatement {
                endpoint, argument, ..
            } => self.api_reference(endpoint, argument.as_ref(), path),
        }
    }

    fn expression(&mut self, expression: &Expression, path: &str) {
        let child = |field: &str| format!("{}.{}", path, field);
        match expression {
            Expression::BooleanLiteral { .. }
            | Expression::NumericLiteral { .. }
            | Expression::StringLiteral { .. }
            | Expression::NullLiteral
            | Expression::UndefinedKeyword
            | Expression::Identifier { .. }
            | Expression::BooleanRandom
            | Expression::IntegerRandom { .. }
            | Expression::NumberRandom { .. }
            | Expression::StringRandom { .. }
            | Expression::PatternRandom { .. }
            | Expression::FormatRandom { .. }
            | Expression::KeywordRandom { .. } => {}

            Expression::ArrayLiteralExpression { elements } => {
                for (i, element) in elements.iter().enumerate() {
                    self.expression(element, &format!("{}.elements[{}]", path, i));
                }
            }
            Expression::ObjectLiteralExpression { properties } => {
                for (i, property) in properties.iter().enumerate() {
                    self.expression(&property.value, &format!("{}.properties[{}].value", path, i));
                }
            }
            Expression::PropertyAccessExpression { expression, .. } => {
                self.expression(expression, &child("expression"))
            }
            Expression::ElementAccessExpression {
                expression,
                argument_expression,
                ..
            } => {
                self.expression(expression, &child("expression"));
                self.expression(argument_expression, &child("argumentExpression"));
            }
            Expression::ApiCallExpression { endpoint, argument } => {
                self.api_reference(endpoint, argument.as_deref(), path)
            }
            Expression::CallExpression {
                expression,
                arguments,
            }
            | Expression::NewExpression {
                expression,
                arguments,
            } => {
                self.expression(expression, &child("expression"));
                for (i, argument) in arguments.iter().enumerate() {
                    self.expression(argument, &format!("{}.arguments[{}]", path, i));
                }
            }
            Expression::ConditionalExpression {
                condition,
                when_true,
                when_false,
            } => {
                self.expression(condition, &child("condition"));
                self.expression(when_true, &child("whenTrue"));
                self.expression(when_false, &child("whenFalse"));
            }
            Expression::BinaryExpression { left, right, .. } => {
                self.expression(left, &child("left"));
                self.expression(right, &child("right"));
            }
            Expression::PrefixUnaryExpression { operand, .. }
            | Expression::PostfixUnaryExpression { operand, .. } => {
                self.expression(operand, &child("operand"))
            }
            Expression::ArrowFunction(function) => self.arrow(function, path),
            Expression::ArrayMapExpression { array, function }
            | Expression::ArrayFilterExpression { array, function }
            | Expression::ArrayForEachExpression { array, function } => {
                self.expression(array, &child("array"));
                self.arrow(function, &child("function"));
            }
            Expression::ArrayRepeatExpression { count, function } => {
                self.expression(count, &child("count"));
                self.arrow(function, &child("function"));
            }
            Expression::PickRandom { expression } | Expression::SampleRandom { expression, .. } => {
                self.expression(expression, &child("expression"))
            }
            Expression::EqualPredicate { x, y, .. } | Expression::NotEqualPredicate { x, y, .. } => {
                self.expression(x, &child("x"));
                self.expression(y, &child("y"));
            }
            Expression::ConditionalPredicate { expression, .. } => {
                self.expression(expression, &child("expression"))
            }
            Expression::ErrorPredicate { function, .. } => self.arrow(function, &child("function")),
        }
    }

    fn api_reference(&mut self, endpoint: &Endpoint, argument: Option<&Expression>, path: &str) {
        if !self.known.contains(endpoint) {
            self.report(
                format!("{}.endpoint", path),
                format!("Endpoint \"{}\" does not exist in the API document.", endpoint),
            );
        }
        if !self.allowed.is_empty() && !self.allowed.contains(endpoint) {
            let allowed: Vec<String> = self.allowed.iter().map(|e| e.to_string()).collect();
            self.report(
                format!("{}.endpoint", path),
                format!(
                    "Endpoint \"{}\" is not allowed in this scenario. Allowed endpoints: {}",
                    endpoint,
                    allowed.join(", ")
                ),
            );
        }
        let Some(argument) = argument else {
            return;
        };
        self.expression(argument, &format!("{}.argument", path));
        if endpoint.method != HttpMethod::Get {
            return;
        }
        if let Expression::ObjectLiteralExpression { properties } = argument {
            if let Some(i) = properties.iter().position(|p| p.name == "body") {
                self.report(
                    format!("{}.argument.properties[{}]", path, i),
                    format!(
                        "GET operation \"{}\" does not take a request body. Remove the \"body\" property.",
                        endpoint
                    ),
                );
            }
        }
    }
}
