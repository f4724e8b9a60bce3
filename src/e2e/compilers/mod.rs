//! Test IR to syntax tree lowering.
//!
//! `compile_expression` is the single dispatch point: one exhaustive match
//! over every `Expression` variant, handing each node to the sub-compiler of
//! its group. Sub-compilers are plain functions of the context and the node's
//! fields; the only state they touch is the shared importer.
//!
//! | Group      | Module          | Runtime symbols                      |
//! |------------|-----------------|--------------------------------------|
//! | literal    | `literal.rs`    | -                                    |
//! | accessor   | `accessor.rs`   | `api` (default, API package)         |
//! | functional | `functional.rs` | `ArrayUtil` (`@nestia/e2e`)          |
//! | random     | `random.rs`     | `typia`, `tags`, `RandomGenerator`   |
//! | predicate  | `predicate.rs`  | `TestValidator` (`@nestia/e2e`)      |

use std::collections::HashMap;

use super::ast::{Expr, TypeNode};
use super::document::{Document, Endpoint, Route};
use super::importer::{ImportKind, Importer};
use super::ir::Expression;

pub mod accessor;
pub mod functional;
pub mod literal;
pub mod predicate;
pub mod random;
pub mod statement;

pub use statement::{compile_block, compile_statement, compile_statements, compile_type};

/// Runtime e2e utilities (`ArrayUtil`, `RandomGenerator`, `TestValidator`).
pub const E2E_LIBRARY: &str = "@nestia/e2e";
/// Runtime type validator and random generator.
pub const TYPIA_LIBRARY: &str = "typia";
/// Package of the generated SDK when none is configured.
pub const DEFAULT_API_PACKAGE: &str = "@ORGANIZATION/PROJECT-api";
/// Name of the connection parameter every test function receives.
pub const CONNECTION: &str = "connection";

/// Shared state threaded through every sub-compiler.
pub struct CompileContext<'a> {
    pub importer: &'a mut Importer,
    pub document: &'a Document,
    pub accessors: &'a HashMap<Endpoint, Route>,
    pub api_package: &'a str,
}

impl CompileContext<'_> {
    /// The SDK root object (`api`).
    pub fn api(&mut self) -> Expr {
        self.importer
            .value(self.api_package, ImportKind::Default, "api")
    }

    pub fn typia(&mut self) -> Expr {
        self.importer
            .value(TYPIA_LIBRARY, ImportKind::Default, "typia")
    }

    /// Qualified name inside the `tags` namespace, e.g. `tags.Minimum`.
    pub fn tag(&mut self, name: &str) -> String {
        let tags = self
            .importer
            .external(TYPIA_LIBRARY, ImportKind::Named, "tags");
        format!("{}.{}", tags, name)
    }

    /// Named export of the e2e utility library.
    pub fn e2e(&mut self, name: &str) -> Expr {
        self.importer.value(E2E_LIBRARY, ImportKind::Named, name)
    }

    /// DTO type from the SDK's structures directory, imported type-only.
    pub fn structure(&mut self, type_name: &str) -> TypeNode {
        let root = type_name.split('.').next().unwrap_or(type_name);
        let library = format!("{}/lib/structures/{}", self.api_package, root);
        self.importer.type_reference(&library, type_name)
    }
}

/// Lower one expression.
pub fn compile_expression(ctx: &mut CompileContext<'_>, expression: &Expression) -> Expr {
    match expression {
        // literals
        Expression::BooleanLiteral { value } => literal::boolean(*value),
        Expression::NumericLiteral { value } => literal::numeric(*value),
        Expression::StringLiteral { value } => literal::string(value),
        Expression::ArrayLiteralExpression { elements } => literal::array(ctx, elements),
        Expression::ObjectLiteralExpression { properties } => literal::object(ctx, properties),
        Expression::NullLiteral => literal::null(),
        Expression::UndefinedKeyword => literal::undefined(),

        // accessors
        Expression::Identifier { text } => accessor::identifier(text),
        Expression::PropertyAccessExpression {
            expression,
            name,
            question_dot,
        } => accessor::property_access(ctx, expression, name, *question_dot),
        Expression::ElementAccessExpression {
            expression,
            argument_expression,
            question_dot,
        } => accessor::element_access(ctx, expression, argument_expression, *question_dot),
        Expression::ApiCallExpression { endpoint, argument } => {
            accessor::api_call(ctx, endpoint, argument.as_deref())
        }

        // functional
        Expression::CallExpression {
            expression,
            arguments,
        } => functional::call(ctx, expression, arguments),
        Expression::NewExpression {
            expression,
            arguments,
        } => functional::new(ctx, expression, arguments),
        Expression::ConditionalExpression {
            condition,
            when_true,
            when_false,
        } => functional::conditional(ctx, condition, when_true, when_false),
        Expression::BinaryExpression {
            left,
            operator,
            right,
        } => functional::binary(ctx, left, *operator, right),
        Expression::PrefixUnaryExpression { operator, operand } => {
            functional::prefix(ctx, *operator, operand)
        }
        Expression::PostfixUnaryExpression { operand, operator } => {
            functional::postfix(ctx, operand, *operator)
        }
        Expression::ArrowFunction(function) => functional::arrow(ctx, function),
        Expression::ArrayMapExpression { array, function } => {
            functional::array_map(ctx, array, function)
        }
        Expression::ArrayFilterExpression { array, function } => {
            functional::array_filter(ctx, array, function)
        }
        Expression::ArrayForEachExpression { array, function } => {
            functional::array_for_each(ctx, array, function)
        }
        Expression::ArrayRepeatExpression { count, function } => {
            functional::array_repeat(ctx, count, function)
        }

        // random generators
        Expression::BooleanRandom => random::boolean(ctx),
        Expression::IntegerRandom {
            minimum,
            maximum,
            multiple_of,
        } => random::integer(ctx, *minimum, *maximum, *multiple_of),
        Expression::NumberRandom {
            minimum,
            maximum,
            multiple_of,
        } => random::number(ctx, *minimum, *maximum, *multiple_of),
        Expression::StringRandom {
            min_length,
            max_length,
        } => random::string(ctx, *min_length, *max_length),
        Expression::PatternRandom { pattern } => random::pattern(ctx, pattern),
        Expression::FormatRandom { format } => random::format(ctx, format),
        Expression::KeywordRandom { keyword } => random::keyword(ctx, *keyword),
        Expression::PickRandom { expression } => random::pick(ctx, expression),
        Expression::SampleRandom { expression, count } => random::sample(ctx, expression, *count),

        // predicates
        Expression::EqualPredicate { title, x, y } => predicate::equal(ctx, title, x, y),
        Expression::NotEqualPredicate { title, x, y } => predicate::not_equal(ctx, title, x, y),
        Expression::ConditionalPredicate { title, expression } => {
            predicate::conditional(ctx, title, expression)
        }
        Expression::ErrorPredicate { title, function } => predicate::error(ctx, title, function),
    }
}

pub fn compile_expressions(ctx: &mut CompileContext<'_>, expressions: &[Expression]) -> Vec<Expr> {
    expressions
        .iter()
        .map(|expression| compile_expression(ctx, expression))
        .collect()
}
