/// Method-body lowering and throws discovery.
///
/// Method bodies are lowered once into a small recursive tree that keeps
/// only what the throws scan cares about: blocks, conditionals, `try`
/// statements and `throw`s.  Everything else collapses to
/// [`BodyNode::Other`].  [`collect_throws`] is then a plain fold over that
/// tree.
use mago_syntax::ast::*;

use super::hints::hint_to_union;

/// What a `throw` statement throws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thrown {
    /// `throw new Foo(...)`: the class name as written.
    New(String),
    /// `throw $e`: the variable name including `$`.
    Variable(String),
    /// Any other expression (`throw self::error()`, `throw $a ?: $b`).
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchNode {
    /// Caught exception types in declaration order.
    pub types: Vec<String>,
    /// Bound variable including `$`, absent for `catch (Foo)`.
    pub variable: Option<String>,
    pub body: Vec<BodyNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyNode {
    /// Plain `{ ... }` blocks and loop bodies.
    Block(Vec<BodyNode>),
    /// `if` with its `elseif` / `else` branches in source order.
    If {
        then: Vec<BodyNode>,
        alternates: Vec<Vec<BodyNode>>,
    },
    Try {
        block: Vec<BodyNode>,
        catches: Vec<CatchNode>,
        finally: Vec<BodyNode>,
    },
    Throw(Thrown),
    Other,
}

/// Lower a sequence of statements.
pub fn lower_statements<'s, 'a: 's>(
    statements: impl Iterator<Item = &'s Statement<'a>>,
) -> Vec<BodyNode> {
    statements.map(lower_statement).collect()
}

fn lower_one(statement: &Statement<'_>) -> Vec<BodyNode> {
    vec![lower_statement(statement)]
}

fn lower_statement(statement: &Statement<'_>) -> BodyNode {
    match statement {
        Statement::Expression(expr_stmt) => match expr_stmt.expression {
            Expression::Throw(throw) => BodyNode::Throw(lower_thrown(throw.exception)),
            _ => BodyNode::Other,
        },
        Statement::Block(block) => BodyNode::Block(lower_statements(block.statements.iter())),
        Statement::If(if_stmt) => match &if_stmt.body {
            IfBody::Statement(body) => {
                let mut alternates: Vec<Vec<BodyNode>> = body
                    .else_if_clauses
                    .iter()
                    .map(|else_if| lower_one(else_if.statement))
                    .collect();
                if let Some(else_clause) = &body.else_clause {
                    alternates.push(lower_one(else_clause.statement));
                }
                BodyNode::If {
                    then: lower_one(body.statement),
                    alternates,
                }
            }
            IfBody::ColonDelimited(body) => {
                let mut alternates: Vec<Vec<BodyNode>> = body
                    .else_if_clauses
                    .iter()
                    .map(|else_if| lower_statements(else_if.statements.iter()))
                    .collect();
                if let Some(else_clause) = &body.else_clause {
                    alternates.push(lower_statements(else_clause.statements.iter()));
                }
                BodyNode::If {
                    then: lower_statements(body.statements.iter()),
                    alternates,
                }
            }
        },
        Statement::Try(try_stmt) => BodyNode::Try {
            block: lower_statements(try_stmt.block.statements.iter()),
            catches: try_stmt
                .catch_clauses
                .iter()
                .map(|catch| CatchNode {
                    types: hint_to_union(&catch.hint).members,
                    variable: catch.variable.as_ref().map(|v| v.name.to_string()),
                    body: lower_statements(catch.block.statements.iter()),
                })
                .collect(),
            finally: try_stmt
                .finally_clause
                .as_ref()
                .map(|finally| lower_statements(finally.block.statements.iter()))
                .unwrap_or_default(),
        },
        Statement::Foreach(foreach) => {
            BodyNode::Block(lower_statements(foreach.body.statements().iter()))
        }
        Statement::For(for_stmt) => match &for_stmt.body {
            ForBody::Statement(inner) => BodyNode::Block(lower_one(inner)),
            ForBody::ColonDelimited(body) => {
                BodyNode::Block(lower_statements(body.statements.iter()))
            }
        },
        Statement::While(while_stmt) => match &while_stmt.body {
            WhileBody::Statement(inner) => BodyNode::Block(lower_one(inner)),
            WhileBody::ColonDelimited(body) => {
                BodyNode::Block(lower_statements(body.statements.iter()))
            }
        },
        Statement::DoWhile(dw) => BodyNode::Block(lower_one(dw.statement)),
        _ => BodyNode::Other,
    }
}

fn lower_thrown(exception: &Expression<'_>) -> Thrown {
    match exception {
        Expression::Instantiation(inst) => match inst.class {
            Expression::Identifier(ident) => Thrown::New(ident.value().to_string()),
            _ => Thrown::Unknown,
        },
        Expression::Variable(Variable::Direct(var)) => Thrown::Variable(var.name.to_string()),
        _ => Thrown::Unknown,
    }
}

/// Collect distinct thrown exception names in first-seen order.
///
/// Descends into blocks, every `if` branch, `try` blocks, each `catch`
/// handler and `finally`.  Re-throwing a caught variable contributes the
/// types of the `catch` that bound it.
pub fn collect_throws(body: &[BodyNode]) -> Vec<String> {
    let mut throws = Vec::new();
    let mut bindings: Vec<(&str, &[String])> = Vec::new();
    fold(body, &mut bindings, &mut throws);
    throws
}

fn fold<'n>(
    nodes: &'n [BodyNode],
    bindings: &mut Vec<(&'n str, &'n [String])>,
    throws: &mut Vec<String>,
) {
    for node in nodes {
        match node {
            BodyNode::Throw(Thrown::New(name)) => record(throws, name),
            BodyNode::Throw(Thrown::Variable(var)) => {
                let binding = bindings.iter().rev().find(|(bound, _)| *bound == var.as_str());
                if let Some((_, types)) = binding {
                    for name in types.iter() {
                        record(throws, name);
                    }
                }
            }
            BodyNode::Throw(Thrown::Unknown) | BodyNode::Other => {}
            BodyNode::Block(inner) => fold(inner, bindings, throws),
            BodyNode::If { then, alternates } => {
                fold(then, bindings, throws);
                for alternate in alternates {
                    fold(alternate, bindings, throws);
                }
            }
            BodyNode::Try {
                block,
                catches,
                finally,
            } => {
                fold(block, bindings, throws);
                for catch in catches {
                    match catch.variable.as_deref() {
                        Some(var) => {
                            bindings.push((var, catch.types.as_slice()));
                            fold(&catch.body, bindings, throws);
                            bindings.pop();
                        }
                        None => fold(&catch.body, bindings, throws),
                    }
                }
                fold(finally, bindings, throws);
            }
        }
    }
}

fn record(throws: &mut Vec<String>, name: &str) {
    if !throws.iter().any(|t| t == name) {
        throws.push(name.to_string());
    }
}
