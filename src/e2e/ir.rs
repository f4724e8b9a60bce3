//! Test scenario IR.
//!
//! Tagged unions produced by the test-writing agents. Every node carries a
//! `"type"` discriminant in camelCase (`"arrayMapExpression"`, `"ifStatement"`),
//! and field names are camelCase as well.

use serde::{Deserialize, Serialize};

use super::document::Endpoint;
use crate::dedup::deduplicate_retain;

/// Scenario metadata: what the function is called and what it is meant to test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub function_name: String,
    /// Natural-language description; becomes the function's doc comment
    #[serde(default)]
    pub draft: String,
    /// Endpoint under test
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    /// Other endpoints the scenario may call (setup, prerequisites)
    #[serde(default)]
    pub dependencies: Vec<Endpoint>,
}

impl Scenario {
    /// Endpoints the function is allowed to call, first occurrence kept.
    pub fn allowed_endpoints(&self) -> Vec<Endpoint> {
        let mut endpoints: Vec<Endpoint> = self
            .endpoint
            .iter()
            .chain(self.dependencies.iter())
            .cloned()
            .collect();
        deduplicate_retain(&mut endpoints, |e| e.clone());
        endpoints
    }
}

/// Body of a test function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    pub statements: Vec<Statement>,
}

/// A scenario together with its function body, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub scenario: Scenario,
    pub function: Function,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    #[default]
    Const,
    Let,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Statement {
    Block(Block),
    ExpressionStatement {
        expression: Expression,
    },
    VariableDeclaration {
        name: String,
        #[serde(default, rename = "schema")]
        type_schema: Option<TypeSchema>,
        #[serde(default)]
        initializer: Option<Expression>,
        #[serde(default)]
        mutability: Mutability,
    },
    IfStatement {
        condition: Expression,
        then_statement: Block,
        #[serde(default)]
        else_statement: Option<Box<Statement>>,
    },
    ReturnStatement {
        #[serde(default)]
        expression: Option<Expression>,
    },
    ThrowStatement {
        expression: Expression,
    },
    /// Call an API operation, optionally binding its asserted response.
    ApiOperateStatement {
        endpoint: Endpoint,
        #[serde(default)]
        argument: Option<Expression>,
        #[serde(default)]
        variable_name: Option<String>,
    },
}

/// Declared type of a variable, JSON-schema flavoured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypeSchema {
    Boolean,
    Integer,
    Number,
    String,
    Null,
    Array { items: Box<TypeSchema> },
    /// Named DTO type such as `IShoppingSale` or `IShoppingSale.ICreate`
    Reference { name: String },
    Nullable { inner: Box<TypeSchema> },
}

/// Function literal; compiled as an `async` arrow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrowFunction {
    #[serde(default)]
    pub parameters: Vec<String>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAssignment {
    pub name: String,
    pub value: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "===")]
    Equal,
    #[serde(rename = "!==")]
    NotEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Modulo,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "??")]
    Coalesce,
    #[serde(rename = "instanceof")]
    InstanceOf,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Equal => "===",
            BinaryOperator::NotEqual => "!==",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::Coalesce => "??",
            BinaryOperator::InstanceOf => "instanceof",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrefixOperator {
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

impl PrefixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixOperator::Not => "!",
            PrefixOperator::Minus => "-",
            PrefixOperator::Plus => "+",
            PrefixOperator::Increment => "++",
            PrefixOperator::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostfixOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

impl PostfixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostfixOperator::Increment => "++",
            PostfixOperator::Decrement => "--",
        }
    }
}

/// Named random string generators of the e2e utility library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RandomKeyword {
    Alphabets,
    AlphaNumeric,
    Name,
    Paragraph,
    Content,
    Mobile,
}

impl RandomKeyword {
    pub fn method(&self) -> &'static str {
        match self {
            RandomKeyword::Alphabets => "alphabets",
            RandomKeyword::AlphaNumeric => "alphaNumeric",
            RandomKeyword::Name => "name",
            RandomKeyword::Paragraph => "paragraph",
            RandomKeyword::Content => "content",
            RandomKeyword::Mobile => "mobile",
        }
    }

    /// Length argument for generators that require one.
    pub fn default_length(&self) -> Option<u32> {
        match self {
            RandomKeyword::Alphabets | RandomKeyword::AlphaNumeric => Some(8),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Expression {
    // literals
    BooleanLiteral {
        value: bool,
    },
    NumericLiteral {
        value: f64,
    },
    StringLiteral {
        value: String,
    },
    ArrayLiteralExpression {
        elements: Vec<Expression>,
    },
    ObjectLiteralExpression {
        properties: Vec<PropertyAssignment>,
    },
    NullLiteral,
    UndefinedKeyword,

    // accessors
    Identifier {
        text: String,
    },
    PropertyAccessExpression {
        expression: Box<Expression>,
        name: String,
        #[serde(default)]
        question_dot: bool,
    },
    ElementAccessExpression {
        expression: Box<Expression>,
        argument_expression: Box<Expression>,
        #[serde(default)]
        question_dot: bool,
    },
    ApiCallExpression {
        endpoint: Endpoint,
        #[serde(default)]
        argument: Option<Box<Expression>>,
    },

    // functional
    CallExpression {
        expression: Box<Expression>,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    NewExpression {
        expression: Box<Expression>,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    ConditionalExpression {
        condition: Box<Expression>,
        when_true: Box<Expression>,
        when_false: Box<Expression>,
    },
    BinaryExpression {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    PrefixUnaryExpression {
        operator: PrefixOperator,
        operand: Box<Expression>,
    },
    PostfixUnaryExpression {
        operand: Box<Expression>,
        operator: PostfixOperator,
    },
    ArrowFunction(ArrowFunction),
    ArrayMapExpression {
        array: Box<Expression>,
        function: ArrowFunction,
    },
    ArrayFilterExpression {
        array: Box<Expression>,
        function: ArrowFunction,
    },
    ArrayForEachExpression {
        array: Box<Expression>,
        function: ArrowFunction,
    },
    ArrayRepeatExpression {
        count: Box<Expression>,
        function: ArrowFunction,
    },

    // random generators
    BooleanRandom,
    IntegerRandom {
        #[serde(default)]
        minimum: Option<i64>,
        #[serde(default)]
        maximum: Option<i64>,
        #[serde(default)]
        multiple_of: Option<i64>,
    },
    NumberRandom {
        #[serde(default)]
        minimum: Option<f64>,
        #[serde(default)]
        maximum: Option<f64>,
        #[serde(default)]
        multiple_of: Option<f64>,
    },
    StringRandom {
        #[serde(default)]
        min_length: Option<u32>,
        #[serde(default)]
        max_length: Option<u32>,
    },
    PatternRandom {
        pattern: String,
    },
    FormatRandom {
        format: String,
    },
    KeywordRandom {
        keyword: RandomKeyword,
    },
    PickRandom {
        expression: Box<Expression>,
    },
    SampleRandom {
        expression: Box<Expression>,
        count: u32,
    },

    // predicates
    EqualPredicate {
        title: String,
        x: Box<Expression>,
        y: Box<Expression>,
    },
    NotEqualPredicate {
        title: String,
        x: Box<Expression>,
        y: Box<Expression>,
    },
    ConditionalPredicate {
        title: String,
        expression: Box<Expression>,
    },
    ErrorPredicate {
        title: String,
        function: ArrowFunction,
    },
}
