//! Concrete syntax tree for the emitted test source.
//!
//! The compilers lower IR nodes into these types; `printer` renders them.
//! Only the constructs the lowerings need are modelled.

/// Expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
    Undefined,
    Array(Vec<Expr>),
    Object(Vec<(String, Expr)>),
    Member {
        object: Box<Expr>,
        property: String,
        optional: bool,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
        optional: bool,
    },
    Call {
        callee: Box<Expr>,
        type_args: Vec<TypeNode>,
        args: Vec<Expr>,
    },
    New {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        when_true: Box<Expr>,
        when_false: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: &'static str,
        right: Box<Expr>,
    },
    Prefix {
        op: &'static str,
        operand: Box<Expr>,
    },
    Postfix {
        operand: Box<Expr>,
        op: &'static str,
    },
    Arrow {
        is_async: bool,
        params: Vec<String>,
        body: ArrowBody,
    },
    Await(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Block(Vec<Stmt>),
    Expr(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Const,
    Let,
}

impl VarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VarKind::Const => "const",
            VarKind::Let => "let",
        }
    }
}

/// Statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    VarDecl {
        kind: VarKind,
        name: String,
        type_ann: Option<TypeNode>,
        init: Option<Expr>,
    },
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    Block(Vec<Stmt>),
    Return(Option<Expr>),
    Throw(Expr),
}

/// Type annotation node.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    /// `number`, `string`, `boolean`, `null`, `void`
    Keyword(&'static str),
    /// Possibly dotted type name, e.g. `IShoppingSale.ICreate`
    Ref(String),
    Generic {
        name: String,
        args: Vec<TypeNode>,
    },
    Array(Box<TypeNode>),
    Union(Vec<TypeNode>),
    Intersection(Vec<TypeNode>),
    NumberLiteral(f64),
    StringLiteral(String),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Str(value.into())
    }

    /// Build `a.b.c` from a dotted path.
    pub fn dotted(path: &str) -> Self {
        let mut parts = path.split('.');
        let root = Expr::ident(parts.next().unwrap_or_default());
        parts.fold(root, |object, property| object.member(property))
    }

    pub fn member(self, property: impl Into<String>) -> Self {
        Expr::Member {
            object: Box::new(self),
            property: property.into(),
            optional: false,
        }
    }

    pub fn call(self, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(self),
            type_args: vec![],
            args,
        }
    }

    pub fn call_with_types(self, type_args: Vec<TypeNode>, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(self),
            type_args,
            args,
        }
    }

    pub fn awaited(self) -> Self {
        Expr::Await(Box::new(self))
    }

    pub fn async_arrow(params: Vec<String>, body: Vec<Stmt>) -> Self {
        Expr::Arrow {
            is_async: true,
            params,
            body: ArrowBody::Block(body),
        }
    }

    pub fn thunk(body: Expr) -> Self {
        Expr::Arrow {
            is_async: false,
            params: vec![],
            body: ArrowBody::Expr(Box::new(body)),
        }
    }
}

impl TypeNode {
    pub fn generic(name: impl Into<String>, args: Vec<TypeNode>) -> Self {
        TypeNode::Generic {
            name: name.into(),
            args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_builds_member_chain() {
        let expr = Expr::dotted("api.functional.sales.at");
        assert_eq!(
            expr,
            Expr::ident("api")
                .member("functional")
                .member("sales")
                .member("at")
        );
    }

    #[test]
    fn test_dotted_single_segment() {
        assert_eq!(Expr::dotted("connection"), Expr::ident("connection"));
    }
}
