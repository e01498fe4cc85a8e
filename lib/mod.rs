pub mod ast;
pub mod engine;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Expression, Operator, Program};
pub use engine::Engine;
pub use interpreter::{Environment, Evaluator, Object};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::Token;

pub fn new_interpreter() -> Box<dyn Engine> {
    interpreter::new_engine()
}
