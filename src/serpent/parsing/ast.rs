//! Syntax tree produced while validating.
//!
//!     The tree records structure only. It is what the parser saw, with parentheses folded
//!     away and operators resolved by precedence; there is no scoping, typing or evaluation.
//!
//!     Expressions render as S-expressions, which makes precedence visible at a glance:
//!
//!         sum + n * 2                         (+ sum (* n 2))
//!         (sum / count) if count != 0 else 0  (if (!= count 0) (/ sum count) 0)

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    Assign {
        target: String,
        /// `=` or an augmented form such as `+=`.
        op: String,
        value: Expr,
        line: usize,
    },
    Print {
        args: Vec<Expr>,
        line: usize,
    },
    For {
        var: String,
        iterable: Expr,
        body: Vec<Statement>,
        line: usize,
    },
    If {
        condition: Expr,
        then_body: Vec<Statement>,
        else_body: Option<Vec<Statement>>,
        line: usize,
    },
}

impl Statement {
    /// Line of the statement's first token.
    pub fn line(&self) -> usize {
        match self {
            Statement::Assign { line, .. }
            | Statement::Print { line, .. }
            | Statement::For { line, .. }
            | Statement::If { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Number(String),
    /// String literal, quotes included.
    Str(String),
    Ident(String),
    List(Vec<Expr>),
    Call {
        callee: String,
        args: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `then if condition else otherwise`
    Conditional {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }
}

fn write_spaced(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(text) | Expr::Str(text) | Expr::Ident(text) => f.write_str(text),
            Expr::List(items) => {
                f.write_str("[")?;
                write_spaced(f, items)?;
                f.write_str("]")
            }
            Expr::Call { callee, args } => {
                write!(f, "(call {callee}")?;
                if !args.is_empty() {
                    f.write_str(" ")?;
                    write_spaced(f, args)?;
                }
                f.write_str(")")
            }
            Expr::Unary { op, operand } => write!(f, "({} {operand})", op.symbol()),
            Expr::Binary { op, left, right } => write!(f, "({} {left} {right})", op.symbol()),
            Expr::Conditional {
                condition,
                then,
                otherwise,
            } => write!(f, "(if {condition} {then} {otherwise})"),
        }
    }
}

impl fmt::Display for Program {
    /// Indented outline, two spaces per block level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(f, &self.statements, 0)
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, statements: &[Statement], depth: usize) -> fmt::Result {
    for statement in statements {
        write_statement(f, statement, depth)?;
    }
    Ok(())
}

fn write_statement(f: &mut fmt::Formatter<'_>, statement: &Statement, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match statement {
        Statement::Assign {
            target, op, value, ..
        } => writeln!(f, "{indent}{target} {op} {value}"),
        Statement::Print { args, .. } => {
            write!(f, "{indent}print")?;
            for arg in args {
                write!(f, " {arg}")?;
            }
            writeln!(f)
        }
        Statement::For {
            var,
            iterable,
            body,
            ..
        } => {
            writeln!(f, "{indent}for {var} in {iterable}")?;
            write_block(f, body, depth + 1)
        }
        Statement::If {
            condition,
            then_body,
            else_body,
            ..
        } => {
            writeln!(f, "{indent}if {condition}")?;
            write_block(f, then_body, depth + 1)?;
            if let Some(else_body) = else_body {
                writeln!(f, "{indent}else")?;
                write_block(f, else_body, depth + 1)?;
            }
            Ok(())
        }
    }
}
