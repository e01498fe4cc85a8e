use core::fmt;

use anyhow::Result;

use crate::ast::Expression;

pub type BuiltinFunction = fn(Vec<Object>) -> Result<Object>;

#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    List(Vec<Object>),
    Function {
        name: String,
        parameters: Vec<String>,
        body: Vec<Expression>,
    },
    Builtin(BuiltinFunction),
    Nil,
    /// Produced only by an `if` whose condition is false and which has no else branch.
    Noop,
    RuntimeError(String),
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::String(_) => "STRING",
            Object::List(_) => "LIST",
            Object::Function { .. } => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Nil => "NIL",
            Object::Noop => "NOOP",
            Object::RuntimeError(_) => "RUNTIME_ERROR",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::RuntimeError(_))
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::String(value) => write!(f, "{}", value),
            Object::List(values) => {
                let values: Vec<String> = values.iter().map(|v| format!("{}", v)).collect();
                write!(f, "{}", values.join(" "))
            }
            Object::Function {
                name, parameters, ..
            } if parameters.is_empty() => write!(f, "({})", name),
            Object::Function {
                name, parameters, ..
            } => write!(f, "({} {})", name, parameters.join(" ")),
            Object::Builtin(_) => write!(f, "builtin function"),
            Object::Nil => write!(f, "nil"),
            Object::Noop => Ok(()),
            Object::RuntimeError(message) => write!(f, "{}", message),
        }
    }
}
