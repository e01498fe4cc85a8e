use std::io::{self, Write};

use anyhow::{Context, Result};

const PROMPT: &str = ">> ";

pub fn start() -> Result<()> {
    let mut engine = bell::new_interpreter();
    let stdin = io::stdin();

    println!("Welcome to Bell REPL!");

    loop {
        print!("{}", PROMPT);
        io::stdout().flush().context("could not flush stdout")?;

        let mut input = String::new();
        let read = stdin
            .read_line(&mut input)
            .context("could not read from stdin")?;
        if read == 0 {
            println!();
            return Ok(());
        }
        if input.trim().is_empty() {
            continue;
        }

        match engine.run(&input) {
            Ok(evaluated) => {
                for line in engine.drain_output() {
                    println!("{}", line);
                }
                println!("{}", evaluated);
            }
            Err(err) => println!("{}", err),
        }
    }
}
