use std::fmt;

use crate::token::Token;

/// The n-ary operators. Each one folds over an ordered, non-empty operand list.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Pow,
    Equal,
    NotEqual,
    And,
    Or,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
}

impl Operator {
    pub fn from_token(token: &Token) -> Option<Self> {
        let operator = match token {
            Token::Add => Operator::Add,
            Token::Subtract => Operator::Subtract,
            Token::Multiply => Operator::Multiply,
            Token::Divide => Operator::Divide,
            Token::Modulo => Operator::Modulo,
            Token::Pow => Operator::Pow,
            Token::Equal => Operator::Equal,
            Token::NotEqual => Operator::NotEqual,
            Token::And => Operator::And,
            Token::Or => Operator::Or,
            Token::GreaterThan => Operator::GreaterThan,
            Token::GreaterThanEqual => Operator::GreaterThanEqual,
            Token::LessThan => Operator::LessThan,
            Token::LessThanEqual => Operator::LessThanEqual,
            _ => return None,
        };
        Some(operator)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operator::Add => write!(f, "+"),
            Operator::Subtract => write!(f, "-"),
            Operator::Multiply => write!(f, "*"),
            Operator::Divide => write!(f, "/"),
            Operator::Modulo => write!(f, "%"),
            Operator::Pow => write!(f, "^"),
            Operator::Equal => write!(f, "="),
            Operator::NotEqual => write!(f, "not="),
            Operator::And => write!(f, "and"),
            Operator::Or => write!(f, "or"),
            Operator::GreaterThan => write!(f, ">"),
            Operator::GreaterThanEqual => write!(f, ">="),
            Operator::LessThan => write!(f, "<"),
            Operator::LessThanEqual => write!(f, "<="),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Integer(i64),
    Boolean(bool),
    String(String),
    Nil,
    Identifier(String),
    Operation {
        operator: Operator,
        operands: Vec<Expression>,
    },
    Negate(Box<Expression>),
    Not(Box<Expression>),
    /// A variable binding when `parameters` is `None`, a named function otherwise.
    Let {
        name: String,
        parameters: Option<Vec<String>>,
        body: Vec<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: Box<Expression>,
        alternative: Option<Box<Expression>>,
    },
    List(Vec<Expression>),
    Call {
        function: String,
        arguments: Vec<Expression>,
    },
    WriteLn(Vec<Expression>),
    /// Module import stub. Its arguments are kept but never evaluated.
    Open(Vec<Expression>),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Integer(value) => write!(f, "{}", value),
            Expression::Boolean(value) => write!(f, "{}", value),
            Expression::String(value) => write!(f, "\"{}\"", value),
            Expression::Nil => write!(f, "nil"),
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::Operation { operator, operands } => {
                write!(f, "({} {})", operator, join(operands))
            }
            Expression::Negate(operand) => write!(f, "(- {})", operand),
            Expression::Not(operand) => write!(f, "(not {})", operand),
            Expression::Let {
                name,
                parameters: None,
                body,
            } => write!(f, "(let {} {})", name, join(body)),
            Expression::Let {
                name,
                parameters: Some(parameters),
                body,
            } => write!(
                f,
                "(let {} [{}] {})",
                name,
                parameters.join(" "),
                join(body)
            ),
            Expression::If {
                condition,
                consequence,
                alternative: Some(alternative),
            } => write!(f, "(if {} {} {})", condition, consequence, alternative),
            Expression::If {
                condition,
                consequence,
                alternative: None,
            } => write!(f, "(if {} {})", condition, consequence),
            Expression::List(elements) if elements.is_empty() => write!(f, "(list)"),
            Expression::List(elements) => write!(f, "(list {})", join(elements)),
            Expression::Call {
                function,
                arguments,
            } if arguments.is_empty() => write!(f, "({})", function),
            Expression::Call {
                function,
                arguments,
            } => write!(f, "({} {})", function, join(arguments)),
            Expression::WriteLn(expressions) if expressions.is_empty() => {
                write!(f, "(writeln)")
            }
            Expression::WriteLn(expressions) => write!(f, "(writeln {})", join(expressions)),
            Expression::Open(modules) if modules.is_empty() => write!(f, "(open)"),
            Expression::Open(modules) => write!(f, "(open {})", join(modules)),
        }
    }
}

fn join(expressions: &[Expression]) -> String {
    expressions
        .iter()
        .map(|expression| expression.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub expressions: Vec<Expression>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let lines = self
            .expressions
            .iter()
            .map(|expression| expression.to_string())
            .collect::<Vec<String>>();
        write!(f, "{}", lines.join("\n"))
    }
}
