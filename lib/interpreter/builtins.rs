use std::{
    collections::HashMap,
    io::{self, Write},
};

use anyhow::{bail, Result};
use lazy_static::lazy_static;

use super::object::{BuiltinFunction, Object};

lazy_static! {
    static ref BUILTINS: HashMap<&'static str, BuiltinFunction> = HashMap::from([
        ("head", Builtins::head_fn as BuiltinFunction),
        ("tail", Builtins::tail_fn as BuiltinFunction),
        ("size", Builtins::size_fn as BuiltinFunction),
        ("write", Builtins::write_fn as BuiltinFunction),
        ("writeln", Builtins::writeln_fn as BuiltinFunction),
    ]);
}

pub struct Builtins;

impl Builtins {
    pub fn lookup(name: &str) -> Option<Object> {
        BUILTINS.get(name).map(|function| Object::Builtin(*function))
    }

    fn head_fn(args: Vec<Object>) -> Result<Object> {
        match Self::single_argument("head", args)? {
            Object::List(values) => Ok(values.into_iter().next().unwrap_or(Object::Nil)),
            Object::String(value) => Ok(value
                .chars()
                .next()
                .map(|char| Object::String(char.to_string()))
                .unwrap_or(Object::Nil)),
            other => bail!("argument to `head` not supported, got {}", other.type_name()),
        }
    }

    fn tail_fn(args: Vec<Object>) -> Result<Object> {
        match Self::single_argument("tail", args)? {
            Object::List(values) => {
                if values.len() <= 1 {
                    return Ok(Object::Nil);
                }
                Ok(Object::List(values.into_iter().skip(1).collect()))
            }
            Object::String(value) => {
                let rest: String = value.chars().skip(1).collect();
                if rest.is_empty() {
                    return Ok(Object::Nil);
                }
                Ok(Object::String(rest))
            }
            other => bail!("argument to `tail` not supported, got {}", other.type_name()),
        }
    }

    fn size_fn(args: Vec<Object>) -> Result<Object> {
        match Self::single_argument("size", args)? {
            Object::List(values) => Ok(Object::Integer(values.len() as i64)),
            Object::String(value) => Ok(Object::Integer(value.chars().count() as i64)),
            other => bail!("argument to `size` not supported, got {}", other.type_name()),
        }
    }

    fn write_fn(args: Vec<Object>) -> Result<Object> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", Self::join(&args))?;
        stdout.flush()?;
        Ok(Object::Nil)
    }

    fn writeln_fn(args: Vec<Object>) -> Result<Object> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", Self::join(&args))?;
        Ok(Object::Nil)
    }

    fn single_argument(name: &str, args: Vec<Object>) -> Result<Object> {
        if args.len() != 1 {
            bail!(
                "wrong number of arguments for {}: want=1, got={}",
                name,
                args.len()
            );
        }
        match args.into_iter().next() {
            Some(arg) => Ok(arg),
            None => bail!("argument to `{}` not provided", name),
        }
    }

    fn join(args: &[Object]) -> String {
        args.iter()
            .map(|arg| arg.to_string())
            .collect::<Vec<String>>()
            .join(" ")
    }
}
