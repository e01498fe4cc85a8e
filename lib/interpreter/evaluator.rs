use std::{cell::RefCell, rc::Rc};

use crate::ast::{Expression, Operator, Program};

use super::{builtins::Builtins, environment::Environment, object::Object};

const TRUE: Object = Object::Boolean(true);
const FALSE: Object = Object::Boolean(false);

/// Pairwise step of an n-ary fold. Never sees a `RuntimeError` operand.
type Combinator = fn(Object, Object) -> Object;

pub struct Evaluator {
    env: Rc<RefCell<Environment>>,
    output: Vec<Object>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_environment(Environment::new())
    }

    pub fn with_environment(env: Rc<RefCell<Environment>>) -> Self {
        Self {
            env,
            output: Vec::new(),
        }
    }

    /// Evaluates every top-level expression in order and returns the last result.
    /// A `RuntimeError` does not stop the expressions that follow it.
    pub fn eval(&mut self, program: &Program) -> Object {
        let mut result = Object::Nil;
        for expression in &program.expressions {
            result = self.eval_expression(expression);
        }
        result
    }

    /// Takes everything the `writeln` form has buffered so far.
    pub fn drain_output(&mut self) -> Vec<Object> {
        std::mem::take(&mut self.output)
    }

    pub fn eval_expression(&mut self, expression: &Expression) -> Object {
        match expression {
            Expression::Integer(value) => Object::Integer(*value),
            Expression::Boolean(value) => native_bool_to_boolean_object(*value),
            Expression::String(value) => Object::String(value.clone()),
            Expression::Nil => Object::Nil,
            Expression::Identifier(name) => self.eval_identifier(name),
            Expression::Operation { operator, operands } => {
                self.eval_operation(*operator, operands)
            }
            Expression::Negate(operand) => match self.eval_expression(operand) {
                Object::Integer(value) => Object::Integer(value.wrapping_neg()),
                error @ Object::RuntimeError(_) => error,
                other => Object::RuntimeError(format!(
                    "operation '-' cannot be performed for type: {}",
                    other.type_name()
                )),
            },
            Expression::Not(operand) => match self.eval_expression(operand) {
                Object::Boolean(value) => native_bool_to_boolean_object(!value),
                error @ Object::RuntimeError(_) => error,
                other => Object::RuntimeError(format!(
                    "operation 'not' cannot be performed for type: {}",
                    other.type_name()
                )),
            },
            Expression::Let {
                name,
                parameters: None,
                body,
            } => {
                let value = self.eval_body(body);
                self.env.borrow_mut().set(name, value.clone());
                value
            }
            Expression::Let {
                name,
                parameters: Some(parameters),
                body,
            } => {
                let function = Object::Function {
                    name: name.clone(),
                    parameters: parameters.clone(),
                    body: body.clone(),
                };
                self.env.borrow_mut().set(name, function.clone());
                function
            }
            Expression::If {
                condition,
                consequence,
                alternative,
            } => self.eval_if(condition, consequence, alternative.as_deref()),
            Expression::List(elements) => Object::List(self.eval_all(elements)),
            Expression::Call {
                function,
                arguments,
            } => self.eval_call(function, arguments),
            Expression::WriteLn(expressions) => {
                for expression in expressions {
                    let value = self.eval_expression(expression);
                    self.output.push(value);
                }
                Object::Nil
            }
            Expression::Open(_) => Object::Nil,
        }
    }

    fn eval_all(&mut self, expressions: &[Expression]) -> Vec<Object> {
        expressions
            .iter()
            .map(|expression| self.eval_expression(expression))
            .collect()
    }

    /// Evaluates a body sequence in the current scope, keeping the last value.
    fn eval_body(&mut self, body: &[Expression]) -> Object {
        let mut result = Object::Nil;
        for expression in body {
            result = self.eval_expression(expression);
        }
        result
    }

    /// Unbound names are `nil`, not an error; only calls to unknown functions fail.
    fn eval_identifier(&mut self, name: &str) -> Object {
        self.env.borrow().get(name).unwrap_or(Object::Nil)
    }

    fn eval_operation(&mut self, operator: Operator, operands: &[Expression]) -> Object {
        match operator {
            Operator::Add => self.eval_fold(operands, add),
            Operator::Subtract => self.eval_fold(operands, subtract),
            Operator::Multiply => self.eval_fold(operands, multiply),
            Operator::Divide => self.eval_fold(operands, divide),
            Operator::Modulo => self.eval_fold(operands, modulo),
            Operator::Pow => self.eval_fold(operands, pow),
            Operator::And => self.eval_fold(operands, and),
            Operator::Or => self.eval_fold(operands, or),
            Operator::Equal => self.eval_equality(operands),
            Operator::NotEqual => match self.eval_equality(operands) {
                Object::Boolean(value) => native_bool_to_boolean_object(!value),
                other => other,
            },
            Operator::GreaterThan
            | Operator::GreaterThanEqual
            | Operator::LessThan
            | Operator::LessThanEqual => self.eval_ordering(operator, operands),
        }
    }

    /// Folds operands left to right, evaluating each one only once the
    /// accumulator so far is not an error.
    fn eval_fold(&mut self, operands: &[Expression], combinator: Combinator) -> Object {
        let Some((first, rest)) = operands.split_first() else {
            return Object::RuntimeError("operation requires at least one expression".to_string());
        };
        let mut accumulator = self.eval_expression(first);
        for operand in rest {
            if accumulator.is_error() {
                break;
            }
            let value = self.eval_expression(operand);
            accumulator = combine(accumulator, value, combinator);
        }
        accumulator
    }

    /// Compares every operand with the first one, stopping at the first mismatch.
    fn eval_equality(&mut self, operands: &[Expression]) -> Object {
        let mut values = self.eval_all(operands).into_iter();
        let Some(first) = values.next() else {
            return Object::RuntimeError("operation requires at least one expression".to_string());
        };
        if first.is_error() {
            return first;
        }
        for value in values {
            match combine(first.clone(), value, equals) {
                Object::Boolean(true) => continue,
                other => return other,
            }
        }
        TRUE
    }

    /// Walks consecutive operand pairs and fails as soon as one pair satisfies
    /// the negation of `operator`. Operands past the deciding pair are not evaluated.
    fn eval_ordering(&mut self, operator: Operator, operands: &[Expression]) -> Object {
        let Some((first, rest)) = operands.split_first() else {
            return Object::RuntimeError("operation requires at least one expression".to_string());
        };
        let mut prev = match self.eval_expression(first) {
            Object::Integer(value) => value,
            error @ Object::RuntimeError(_) => return error,
            other if rest.is_empty() => {
                return Object::RuntimeError(format!(
                    "operation '{}' cannot be performed for type: {}",
                    operator,
                    other.type_name()
                ))
            }
            other => {
                return match self.eval_expression(&rest[0]) {
                    error @ Object::RuntimeError(_) => error,
                    next => type_mismatch(operator, &other, &next),
                };
            }
        };
        for operand in rest {
            let next = match self.eval_expression(operand) {
                Object::Integer(value) => value,
                error @ Object::RuntimeError(_) => return error,
                other => return type_mismatch(operator, &Object::Integer(prev), &other),
            };
            if violates_ordering(operator, prev, next) {
                return FALSE;
            }
            prev = next;
        }
        TRUE
    }

    fn eval_if(
        &mut self,
        condition: &Expression,
        consequence: &Expression,
        alternative: Option<&Expression>,
    ) -> Object {
        match self.eval_expression(condition) {
            Object::Boolean(true) => self.eval_expression(consequence),
            Object::Boolean(false) => match alternative {
                Some(alternative) => self.eval_expression(alternative),
                None => Object::Noop,
            },
            error @ Object::RuntimeError(_) => error,
            other => Object::RuntimeError(format!(
                "condition of 'if' must be BOOLEAN, got {}",
                other.type_name()
            )),
        }
    }

    /// Resolves `name` in the environment first and the builtin table second.
    ///
    /// The call scope encloses the caller's environment rather than the one the
    /// function was defined in, so free variables in a body resolve dynamically.
    fn eval_call(&mut self, name: &str, arguments: &[Expression]) -> Object {
        let callee = self.env.borrow().get(name);
        match callee.or_else(|| Builtins::lookup(name)) {
            Some(Object::Function {
                parameters, body, ..
            }) => {
                if arguments.len() > parameters.len() {
                    return Object::RuntimeError(format!(
                        "too many arguments for function {}: expected {}, got {}",
                        name,
                        parameters.len(),
                        arguments.len()
                    ));
                }
                if arguments.len() < parameters.len() {
                    return Object::RuntimeError(format!(
                        "too few arguments for function {}: expected {}, got {}",
                        name,
                        parameters.len(),
                        arguments.len()
                    ));
                }
                let args = match self.eval_arguments(arguments) {
                    Ok(args) => args,
                    Err(error) => return error,
                };
                let scope = Environment::new_enclosed_environment(self.env.clone());
                parameters.iter().zip(args).for_each(|(param, arg)| {
                    scope.borrow_mut().set(param, arg);
                });
                let old_env = std::mem::replace(&mut self.env, scope);
                let result = self.eval_body(&body);
                self.env = old_env;
                result
            }
            Some(Object::Builtin(function)) => {
                let args = match self.eval_arguments(arguments) {
                    Ok(args) => args,
                    Err(error) => return error,
                };
                match function(args) {
                    Ok(result) => result,
                    Err(err) => Object::RuntimeError(err.to_string()),
                }
            }
            Some(value) => {
                if arguments.is_empty() {
                    value
                } else {
                    Object::RuntimeError(format!(
                        "{} is not a function, expected 0 arguments, got {}",
                        name,
                        arguments.len()
                    ))
                }
            }
            None => Object::RuntimeError(format!("function {} is undefined", name)),
        }
    }

    /// Evaluates call arguments in the caller's scope, stopping at the first error.
    fn eval_arguments(&mut self, arguments: &[Expression]) -> Result<Vec<Object>, Object> {
        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            match self.eval_expression(argument) {
                error @ Object::RuntimeError(_) => return Err(error),
                value => args.push(value),
            }
        }
        Ok(args)
    }
}

fn native_bool_to_boolean_object(input: bool) -> Object {
    if input {
        TRUE
    } else {
        FALSE
    }
}

/// Returns whichever operand is a `RuntimeError`, or hands both to `combinator`.
fn combine(left: Object, right: Object, combinator: Combinator) -> Object {
    match (left, right) {
        (error @ Object::RuntimeError(_), _) | (_, error @ Object::RuntimeError(_)) => error,
        (left, right) => combinator(left, right),
    }
}

fn type_mismatch(operator: Operator, left: &Object, right: &Object) -> Object {
    Object::RuntimeError(format!(
        "operation '{}' cannot be performed for types: {} and {}",
        operator,
        left.type_name(),
        right.type_name()
    ))
}

fn add(left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) => {
            Object::Integer(left.wrapping_add(right))
        }
        (left @ Object::String(_), right) | (left, right @ Object::String(_)) => {
            Object::String(format!("{}{}", left, right))
        }
        (left, right) => type_mismatch(Operator::Add, &left, &right),
    }
}

/// A negative right operand is added rather than subtracted.
fn subtract(left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) if right < 0 => {
            Object::Integer(left.wrapping_add(right))
        }
        (Object::Integer(left), Object::Integer(right)) => {
            Object::Integer(left.wrapping_sub(right))
        }
        (left, right) => type_mismatch(Operator::Subtract, &left, &right),
    }
}

fn multiply(left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) => {
            Object::Integer(left.wrapping_mul(right))
        }
        (left, right) => type_mismatch(Operator::Multiply, &left, &right),
    }
}

fn divide(left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(_), Object::Integer(0)) => {
            Object::RuntimeError("division by zero".to_string())
        }
        (Object::Integer(left), Object::Integer(right)) => {
            Object::Integer(left.wrapping_div(right))
        }
        (left, right) => type_mismatch(Operator::Divide, &left, &right),
    }
}

fn modulo(left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(_), Object::Integer(0)) => {
            Object::RuntimeError("division by zero".to_string())
        }
        (Object::Integer(left), Object::Integer(right)) => {
            Object::Integer(left.wrapping_rem(right))
        }
        (left, right) => type_mismatch(Operator::Modulo, &left, &right),
    }
}

fn pow(left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) => {
            Object::Integer((left as f64).powf(right as f64).round() as i64)
        }
        (left, right) => type_mismatch(Operator::Pow, &left, &right),
    }
}

fn and(left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Boolean(left), Object::Boolean(right)) => {
            native_bool_to_boolean_object(left && right)
        }
        (left, right) => type_mismatch(Operator::And, &left, &right),
    }
}

fn or(left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Boolean(left), Object::Boolean(right)) => {
            native_bool_to_boolean_object(left || right)
        }
        (left, right) => type_mismatch(Operator::Or, &left, &right),
    }
}

/// Nil equals only Nil; comparing it with anything else is `false`, not an error.
fn equals(left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) => {
            native_bool_to_boolean_object(left == right)
        }
        (Object::Boolean(left), Object::Boolean(right)) => {
            native_bool_to_boolean_object(left == right)
        }
        (Object::Nil, Object::Nil) => TRUE,
        (Object::Nil, _) | (_, Object::Nil) => FALSE,
        (left, right) => type_mismatch(Operator::Equal, &left, &right),
    }
}

fn violates_ordering(operator: Operator, prev: i64, next: i64) -> bool {
    match operator {
        Operator::GreaterThan => prev <= next,
        Operator::GreaterThanEqual => prev < next,
        Operator::LessThan => prev >= next,
        Operator::LessThanEqual => prev > next,
        _ => false,
    }
}
