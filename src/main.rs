extern crate clap;

use std::{
    collections::HashSet,
    io::{self},
    process::ExitCode,
    time::Instant,
};

use brainstep::{
    interpreter::DEFAULT_TAPE_SIZE,
    lexer::lexer::Lexer,
    stream::{ByteInput, ByteOutput, Input, LineInput, Output, Utf8Output},
    Interpreter,
};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// Step-by-step interpreter for the eight-symbol tape language
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The file to run
    #[arg(required_unless_present = "eval")]
    file: Option<String>,

    /// Run this program text instead of a file
    #[arg(short, long, conflicts_with = "file")]
    eval: Option<String>,

    /// What to do with the program, defaults to `run`
    #[arg(short = 'c', long = "command", value_enum)]
    commands: Vec<Commands>,

    #[arg(short, long, default_value_t = DEFAULT_TAPE_SIZE)]
    tape_size: usize,

    /// Abort after dispatching this many opcodes
    #[arg(long)]
    max_steps: Option<u64>,

    #[arg(long, value_enum, default_value_t = InputMode::Byte)]
    input_mode: InputMode,

    #[arg(long, value_enum, default_value_t = OutputMode::Utf8)]
    output_mode: OutputMode,

    /// More logging, repeat for more (overridden by RUST_LOG)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Hash, PartialEq, Eq)]
enum Commands {
    /// Output the filtered opcodes
    Tokens,
    /// Run the program
    Run,
    /// Output the interpreter state once finished
    State,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    /// One raw byte per `,`
    Byte,
    /// One line per `,`, only its first character is kept
    Line,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    /// Cells are written as UTF-8 encoded characters
    Utf8,
    /// Cells are written as raw bytes
    Byte,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut commands: HashSet<Commands> = HashSet::from_iter(args.commands.iter().cloned());
    if commands.is_empty() {
        commands.insert(Commands::Run);
    }

    let text = match (&args.eval, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(file)) => {
            eprintln!("Running {}", file);
            match std::fs::read_to_string(file) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("{0:}: can't read {1:}: {2:}", "Error".red(), file, e);
                    return ExitCode::FAILURE;
                }
            }
        }
        // clap makes sure one of them is there
        (None, None) => return ExitCode::FAILURE,
    };

    if commands.contains(&Commands::Tokens) {
        let tokens: String = Lexer::new(&text).map(|op| op.as_char()).collect();
        println!("{}", tokens);
    }

    let input: Box<dyn Input> = match args.input_mode {
        InputMode::Byte => Box::new(ByteInput::new(io::stdin())),
        InputMode::Line => Box::new(LineInput::new(io::stdin().lock())),
    };
    let output: Box<dyn Output> = match args.output_mode {
        OutputMode::Utf8 => Box::new(Utf8Output::new(io::stdout())),
        OutputMode::Byte => Box::new(ByteOutput::new(io::stdout())),
    };

    let mut interpreter = match Interpreter::new(args.tape_size, input, output) {
        Ok(interpreter) => interpreter,
        Err(e) => {
            eprintln!("{0:}: {1:}", "Error".red(), e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(limit) = args.max_steps {
        interpreter = interpreter.with_step_limit(limit);
    }

    let mut status = ExitCode::SUCCESS;
    if commands.contains(&Commands::Run) {
        eprintln!("{}", "Starting interpreter".blue());
        let now = Instant::now();
        match interpreter.run(&text) {
            Ok(()) => {
                eprintln!();
                eprintln!(
                    "{} {} steps in {:.2?}",
                    "Finished".green(),
                    interpreter.steps(),
                    now.elapsed()
                );
            }
            Err(e) => {
                eprintln!();
                eprintln!("{0:}: {1:}", "Error".red(), e);
                status = ExitCode::FAILURE;
            }
        }
    } else {
        interpreter.load(&text);
    }

    if commands.contains(&Commands::State) {
        println!("{}", interpreter);
    }

    status
}
