//! Text printer for the concrete syntax tree.
//!
//! Statements print to lines; expressions print to strings that may span
//! several lines, with continuation lines indented relative to the line the
//! expression starts on. Parentheses are inserted from operator precedence,
//! never copied from the input.

use super::ast::{ArrowBody, Expr, Stmt, TypeNode};
use crate::utils::{indent_lines, quote};

/// Object and array literals longer than this are broken one entry per line.
const INLINE_WIDTH: usize = 60;

const PREC_ARROW: u8 = 1;
const PREC_CONDITIONAL: u8 = 2;
const PREC_PREFIX: u8 = 14;
const PREC_POSTFIX: u8 = 15;
const PREC_MEMBER: u8 = 17;
const PREC_PRIMARY: u8 = 18;

pub fn print_statements(stmts: &[Stmt]) -> Vec<String> {
    stmts.iter().flat_map(print_statement).collect()
}

pub fn print_statement(stmt: &Stmt) -> Vec<String> {
    match stmt {
        Stmt::Expr(expr) => {
            let text = print_expr(expr);
            if matches!(leftmost(expr), Expr::Object(_)) {
                split_lines(&format!("({});", text))
            } else {
                split_lines(&format!("{};", text))
            }
        }
        Stmt::VarDecl {
            kind,
            name,
            type_ann,
            init,
        } => {
            let mut text = format!("{} {}", kind.as_str(), name);
            if let Some(type_ann) = type_ann {
                text.push_str(": ");
                text.push_str(&print_type(type_ann));
            }
            if let Some(init) = init {
                text.push_str(" = ");
                text.push_str(&print_expr(init));
            }
            text.push(';');
            split_lines(&text)
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => split_lines(&print_if(condition, then_branch, else_branch.as_deref())),
        Stmt::Block(body) => split_lines(&print_block(body)),
        Stmt::Return(None) => vec!["return;".to_string()],
        Stmt::Return(Some(expr)) => split_lines(&format!("return {};", print_expr(expr))),
        Stmt::Throw(expr) => split_lines(&format!("throw {};", print_expr(expr))),
    }
}

pub fn print_expr(expr: &Expr) -> String {
    match expr {
        Expr::Ident(name) => name.clone(),
        Expr::Str(value) => quote(value),
        Expr::Num(value) => print_number(*value),
        Expr::Bool(value) => value.to_string(),
        Expr::Null => "null".to_string(),
        Expr::Undefined => "undefined".to_string(),
        Expr::Array(elements) => {
            let items = elements.iter().map(|e| operand(e, PREC_CONDITIONAL)).collect();
            print_list("[", "]", items, false)
        }
        Expr::Object(properties) => {
            let items = properties
                .iter()
                .map(|(key, value)| format!("{}: {}", property_key(key), operand(value, PREC_CONDITIONAL)))
                .collect();
            print_list("{", "}", items, true)
        }
        Expr::Member {
            object,
            property,
            optional,
        } => format!(
            "{}{}{}",
            member_object(object),
            if *optional { "?." } else { "." },
            property
        ),
        Expr::Index {
            object,
            index,
            optional,
        } => format!(
            "{}{}[{}]",
            member_object(object),
            if *optional { "?." } else { "" },
            print_expr(index)
        ),
        Expr::Call {
            callee,
            type_args,
            args,
        } => {
            let type_args = if type_args.is_empty() {
                String::new()
            } else {
                let types: Vec<String> = type_args.iter().map(print_type).collect();
                format!("<{}>", types.join(", "))
            };
            format!("{}{}({})", member_object(callee), type_args, print_args(args))
        }
        Expr::New { callee, args } => {
            let callee_text = if matches!(**callee, Expr::Call { .. }) {
                format!("({})", print_expr(callee))
            } else {
                member_object(callee)
            };
            format!("new {}({})", callee_text, print_args(args))
        }
        Expr::Conditional {
            condition,
            when_true,
            when_false,
        } => format!(
            "{} ? {} : {}",
            operand(condition, PREC_CONDITIONAL + 1),
            operand(when_true, PREC_CONDITIONAL),
            operand(when_false, PREC_CONDITIONAL)
        ),
        Expr::Binary { left, op, right } => {
            let precedence = binary_precedence(op);
            format!(
                "{} {} {}",
                binary_side(left, op, precedence),
                op,
                binary_side(right, op, precedence + 1)
            )
        }
        Expr::Prefix { op, operand: inner } => {
            let text = operand(inner, PREC_PREFIX);
            let clashes = (op.ends_with('+') && text.starts_with('+'))
                || (op.ends_with('-') && text.starts_with('-'));
            if clashes {
                format!("{}({})", op, text)
            } else {
                format!("{}{}", op, text)
            }
        }
        Expr::Postfix { operand: inner, op } => format!("{}{}", operand(inner, PREC_MEMBER), op),
        Expr::Arrow {
            is_async,
            params,
            body,
        } => {
            let body = match body {
                ArrowBody::Block(stmts) => print_block(stmts),
                ArrowBody::Expr(expr) if matches!(**expr, Expr::Object(_)) => {
                    format!("({})", print_expr(expr))
                }
                ArrowBody::Expr(expr) => operand(expr, PREC_ARROW),
            };
            format!(
                "{}({}) => {}",
                if *is_async { "async " } else { "" },
                params.join(", "),
                body
            )
        }
        Expr::Await(inner) => format!("await {}", operand(inner, PREC_PREFIX)),
    }
}

pub fn print_type(node: &TypeNode) -> String {
    match node {
        TypeNode::Keyword(keyword) => keyword.to_string(),
        TypeNode::Ref(name) => name.clone(),
        TypeNode::Generic { name, args } => {
            let args: Vec<String> = args.iter().map(print_type).collect();
            format!("{}<{}>", name, args.join(", "))
        }
        TypeNode::Array(inner) => match **inner {
            TypeNode::Union(_) | TypeNode::Intersection(_) => format!("({})[]", print_type(inner)),
            _ => format!("{}[]", print_type(inner)),
        },
        TypeNode::Union(members) => members
            .iter()
            .map(print_type)
            .collect::<Vec<_>>()
            .join(" | "),
        TypeNode::Intersection(members) => members
            .iter()
            .map(|member| match member {
                TypeNode::Union(_) => format!("({})", print_type(member)),
                _ => print_type(member),
            })
            .collect::<Vec<_>>()
            .join(" & "),
        TypeNode::NumberLiteral(value) => print_number(*value),
        TypeNode::StringLiteral(value) => quote(value),
    }
}

fn print_if(condition: &Expr, then_branch: &[Stmt], else_branch: Option<&Stmt>) -> String {
    let mut text = format!("if ({}) {}", print_expr(condition), print_block(then_branch));
    match else_branch {
        None => {}
        Some(Stmt::If {
            condition,
            then_branch,
            else_branch,
        }) => {
            text.push_str(" else ");
            text.push_str(&print_if(condition, then_branch, else_branch.as_deref()));
        }
        Some(Stmt::Block(body)) => {
            text.push_str(" else ");
            text.push_str(&print_block(body));
        }
        Some(other) => {
            text.push_str(" else ");
            text.push_str(&print_block(std::slice::from_ref(other)));
        }
    }
    text
}

fn print_block(body: &[Stmt]) -> String {
    if body.is_empty() {
        return "{}".to_string();
    }
    let inner = indent_lines(&print_statements(body), 1);
    format!("{{\n{}\n}}", inner.join("\n"))
}

fn print_args(args: &[Expr]) -> String {
    args.iter()
        .map(|arg| operand(arg, PREC_CONDITIONAL))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_list(open: &str, close: &str, items: Vec<String>, padded: bool) -> String {
    if items.is_empty() {
        return format!("{}{}", open, close);
    }
    let inline = if padded {
        format!("{} {} {}", open, items.join(", "), close)
    } else {
        format!("{}{}{}", open, items.join(", "), close)
    };
    if inline.len() <= INLINE_WIDTH && !inline.contains('\n') {
        return inline;
    }
    let body: Vec<String> = items
        .iter()
        .map(|item| format!("  {},", indent_continuation(item)))
        .collect();
    format!("{}\n{}\n{}", open, body.join("\n"), close)
}

// Indent every line after the first, leaving blank lines bare.
fn indent_continuation(text: &str) -> String {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.is_empty() {
                line.to_string()
            } else {
                format!("  {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

fn print_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn property_key(key: &str) -> String {
    let valid = key
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if valid { key.to_string() } else { quote(key) }
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Arrow { .. } => PREC_ARROW,
        Expr::Conditional { .. } => PREC_CONDITIONAL,
        Expr::Binary { op, .. } => binary_precedence(op),
        Expr::Prefix { .. } | Expr::Await(_) => PREC_PREFIX,
        Expr::Num(value) if *value < 0.0 => PREC_PREFIX,
        Expr::Postfix { .. } => PREC_POSTFIX,
        Expr::Call { .. } | Expr::Member { .. } | Expr::Index { .. } | Expr::New { .. } => {
            PREC_MEMBER
        }
        _ => PREC_PRIMARY,
    }
}

fn binary_precedence(op: &str) -> u8 {
    match op {
        "??" | "||" => 3,
        "&&" => 4,
        "===" | "!==" | "==" | "!=" => 8,
        "<" | "<=" | ">" | ">=" | "instanceof" | "in" => 9,
        "+" | "-" => 11,
        "*" | "/" | "%" => 12,
        _ => 3,
    }
}

fn operand(expr: &Expr, min: u8) -> String {
    let text = print_expr(expr);
    if precedence(expr) < min {
        format!("({})", text)
    } else {
        text
    }
}

// `??` cannot be mixed with `||` or `&&` without parentheses.
fn binary_side(expr: &Expr, op: &str, min: u8) -> String {
    let mixes = match expr {
        Expr::Binary { op: inner, .. } => {
            let logical = |o: &str| matches!(o, "??" | "||" | "&&");
            logical(op) && logical(inner) && ((*inner == "??") != (op == "??"))
        }
        _ => false,
    };
    if mixes {
        format!("({})", print_expr(expr))
    } else {
        operand(expr, min)
    }
}

// Object of a member access or callee of a call.
fn member_object(expr: &Expr) -> String {
    if matches!(expr, Expr::Num(_)) {
        return format!("({})", print_expr(expr));
    }
    operand(expr, PREC_MEMBER)
}

fn leftmost(expr: &Expr) -> &Expr {
    match expr {
        Expr::Member { object, .. } | Expr::Index { object, .. } => leftmost(object),
        Expr::Call { callee, .. } => leftmost(callee),
        Expr::Binary { left, .. } => leftmost(left),
        Expr::Postfix { operand, .. } => leftmost(operand),
        Expr::Conditional { condition, .. } => leftmost(condition),
        _ => expr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::e2e::ast::VarKind;

    fn binary(left: Expr, op: &'static str, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    #[test]
    fn test_precedence_parenthesizes_lower_operands() {
        let sum = binary(Expr::ident("a"), "+", Expr::ident("b"));
        let product = binary(sum.clone(), "*", Expr::ident("c"));
        assert_eq!(print_expr(&product), "(a + b) * c");

        let left_assoc = binary(sum.clone(), "-", Expr::ident("c"));
        assert_eq!(print_expr(&left_assoc), "a + b - c");

        let right_nested = binary(Expr::ident("c"), "-", sum);
        assert_eq!(print_expr(&right_nested), "c - (a + b)");
    }

    #[test]
    fn test_coalesce_mixed_with_logical_or() {
        let or = binary(Expr::ident("a"), "||", Expr::ident("b"));
        let expr = binary(or, "??", Expr::ident("c"));
        assert_eq!(print_expr(&expr), "(a || b) ?? c");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(print_expr(&Expr::Num(3.0)), "3");
        assert_eq!(print_expr(&Expr::Num(0.25)), "0.25");
        assert_eq!(print_expr(&Expr::Num(-2.0)), "-2");
        assert_eq!(print_expr(&Expr::Num(2.0).member("toFixed").call(vec![])), "(2).toFixed()");
        let negate = Expr::Prefix {
            op: "-",
            operand: Box::new(Expr::Num(-1.0)),
        };
        assert_eq!(print_expr(&negate), "-(-1)");
    }

    #[test]
    fn test_await_call_with_async_arrow() {
        let callback = Expr::async_arrow(
            vec!["item".to_string()],
            vec![Stmt::Return(Some(Expr::ident("item")))],
        );
        let expr = Expr::dotted("ArrayUtil.asyncMap")
            .call(vec![Expr::ident("items"), callback])
            .awaited();
        let lines = print_statement(&Stmt::Expr(expr));
        assert_eq!(
            lines,
            vec![
                "await ArrayUtil.asyncMap(items, async (item) => {",
                "  return item;",
                "});",
            ]
        );
    }

    #[test]
    fn test_object_inline_and_broken() {
        let short = Expr::Object(vec![("name".to_string(), Expr::string("x"))]);
        assert_eq!(print_expr(&short), "{ name: \"x\" }");

        let long = Expr::Object(vec![
            ("title".to_string(), Expr::string("a fairly long product title")),
            ("content-type".to_string(), Expr::string("text/plain; charset=utf-8")),
        ]);
        assert_eq!(
            print_expr(&long),
            "{\n  title: \"a fairly long product title\",\n  \"content-type\": \"text/plain; charset=utf-8\",\n}"
        );
    }

    #[test]
    fn test_var_decl_with_type() {
        let stmt = Stmt::VarDecl {
            kind: VarKind::Const,
            name: "sale".to_string(),
            type_ann: Some(TypeNode::Union(vec![
                TypeNode::Ref("IShoppingSale".to_string()),
                TypeNode::Keyword("null"),
            ])),
            init: Some(Expr::Null),
        };
        assert_eq!(print_statement(&stmt), vec!["const sale: IShoppingSale | null = null;"]);
    }

    #[test]
    fn test_type_intersection_with_generics() {
        let node = TypeNode::Intersection(vec![
            TypeNode::Keyword("number"),
            TypeNode::generic("tags.Type", vec![TypeNode::StringLiteral("int32".to_string())]),
            TypeNode::generic("tags.Minimum", vec![TypeNode::NumberLiteral(1.0)]),
        ]);
        assert_eq!(print_type(&node), "number & tags.Type<\"int32\"> & tags.Minimum<1>");
        let array = TypeNode::Array(Box::new(TypeNode::Union(vec![
            TypeNode::Keyword("string"),
            TypeNode::Keyword("null"),
        ])));
        assert_eq!(print_type(&array), "(string | null)[]");
    }

    #[test]
    fn test_if_else_chain() {
        let stmt = Stmt::If {
            condition: Expr::ident("a"),
            then_branch: vec![Stmt::Return(None)],
            else_branch: Some(Box::new(Stmt::If {
                condition: Expr::ident("b"),
                then_branch: vec![],
                else_branch: Some(Box::new(Stmt::Throw(Expr::ident("error")))),
            })),
        };
        assert_eq!(
            print_statement(&stmt),
            vec![
                "if (a) {",
                "  return;",
                "} else if (b) {} else {",
                "  throw error;",
                "}",
            ]
        );
    }

    #[test]
    fn test_arrow_returning_object_is_wrapped() {
        let arrow = Expr::thunk(Expr::Object(vec![("a".to_string(), Expr::Num(1.0))]));
        assert_eq!(print_expr(&arrow), "() => ({ a: 1 })");
    }

    #[test]
    fn test_optional_chaining() {
        let expr = Expr::Index {
            object: Box::new(Expr::Member {
                object: Box::new(Expr::ident("sale")),
                property: "units".to_string(),
                optional: true,
            }),
            index: Box::new(Expr::Num(0.0)),
            optional: true,
        };
        assert_eq!(print_expr(&expr), "sale?.units?.[0]");
    }
}
