mod builtins;
mod environment;
mod evaluator;
mod object;

use anyhow::{anyhow, Result};
pub use environment::Environment;
pub use evaluator::Evaluator;
pub use object::{BuiltinFunction, Object};

use crate::{Engine, Lexer, Parser};

pub fn new_engine() -> Box<dyn Engine> {
    Box::new(EngineImpl {
        evaluator: Evaluator::new(),
    })
}

struct EngineImpl {
    evaluator: Evaluator,
}

impl Engine for EngineImpl {
    fn run(&mut self, input: &str) -> Result<String> {
        let lexer = Lexer::new(input);
        let mut parser = Parser::new(lexer);

        let program = parser.parse_program();
        if !parser.errors().is_empty() {
            return Err(anyhow!(parser.errors().join("\n")));
        }

        let result = self.evaluator.eval(&program);

        Ok(result.to_string())
    }

    fn drain_output(&mut self) -> Vec<String> {
        self.evaluator
            .drain_output()
            .iter()
            .map(|object| object.to_string())
            .collect()
    }
}
