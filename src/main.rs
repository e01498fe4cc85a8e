mod repl;

use std::{fs, path::Path, path::PathBuf, process};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// run a .bell file
    Run {
        #[arg(name = "FILE")]
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Some(Commands::Run { file }) => run_file(&file),
        None => repl::start(),
    };
    if let Err(err) = result {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}

fn run_file(file: &Path) -> Result<()> {
    let source = load_source(file)?;
    let mut engine = bell::new_interpreter();
    match engine.run(&source) {
        Ok(_) => {
            for line in engine.drain_output() {
                println!("{}", line);
            }
        }
        Err(err) => println!("{}", err),
    }
    Ok(())
}

fn load_source(file: &Path) -> Result<String> {
    if file.extension().and_then(|ext| ext.to_str()) != Some("bell") {
        bail!(
            "invalid file name {}: extension must be .bell",
            file.display()
        );
    }
    fs::read_to_string(file).with_context(|| format!("could not read {}", file.display()))
}
