//! Interactive shell over a single session.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use console::style;

use qsketch_ir::{Example, GateKind, GateOp, QubitId};

use super::common::{print_gates, print_results, print_state};
use crate::session::Session;

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Reset(u32),
    Add(GateOp),
    Example {
        example: Example,
        qubits: Option<u32>,
    },
    Gates,
    State,
    Simulate(Option<u64>),
    Help,
    Quit,
}

/// Whether the shell keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

const HELP: &str = "\
Commands:
  reset <n>                      start an empty circuit on n qubits
  add <gate> [target] [control]  append h, x, cx, cz or measure
                                 (starts a default-size circuit if none)
  example <name> [n]             load bell or grover
  gates                          list the circuit's gates
  state                          show the pre-measurement statevector
  simulate [shots]               sample the circuit
  help                           show this message
  quit                           leave the shell";

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let args = &parts[1..];

    let command = match parts[0].to_ascii_lowercase().as_str() {
        "reset" => {
            let [n] = args else {
                bail!("usage: reset <n>");
            };
            ShellCommand::Reset(parse_number(n, "qubit count")?)
        }
        "add" => {
            let Some((gate, operands)) = args.split_first() else {
                bail!("usage: add <gate> [target] [control]");
            };
            if operands.len() > 2 {
                bail!("usage: add <gate> [target] [control]");
            }
            let kind: GateKind = gate.parse()?;
            let qubit = |i: usize| -> Result<Option<QubitId>> {
                operands
                    .get(i)
                    .map(|s| parse_number(s, "qubit index").map(QubitId))
                    .transpose()
            };
            ShellCommand::Add(GateOp::new(kind, qubit(0)?, qubit(1)?))
        }
        "example" | "load" => match args {
            [name] => ShellCommand::Example {
                example: name.parse()?,
                qubits: None,
            },
            [name, n] => ShellCommand::Example {
                example: name.parse()?,
                qubits: Some(parse_number(n, "qubit count")?),
            },
            _ => bail!("usage: example <name> [n]"),
        },
        "gates" | "show" => ShellCommand::Gates,
        "state" => ShellCommand::State,
        "simulate" | "run" => match args {
            [] => ShellCommand::Simulate(None),
            [shots] => ShellCommand::Simulate(Some(parse_number(shots, "shot count")?)),
            _ => bail!("usage: simulate [shots]"),
        },
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => bail!("Unknown command: '{other}' (type 'help')"),
    };
    Ok(Some(command))
}

fn parse_number<T: std::str::FromStr>(s: &str, what: &str) -> Result<T> {
    s.parse()
        .ok()
        .with_context(|| format!("Invalid {what}: '{s}'"))
}

/// Apply one command to the session, printing its outcome.
pub fn dispatch(session: &Session, command: ShellCommand) -> Result<Flow> {
    match command {
        ShellCommand::Reset(n) => {
            session.reset(n)?;
            println!("{} Empty circuit on {} qubits", style("✓").green(), n);
        }
        ShellCommand::Add(op) => {
            let n = session
                .num_qubits()
                .unwrap_or(session.policy().default_qubits);
            let gates = session.add_gate(n, op)?;
            println!("{} {}", style("✓").green(), op);
            print_gates(&gates);
        }
        ShellCommand::Example { example, qubits } => {
            let n = qubits
                .or_else(|| session.num_qubits())
                .unwrap_or(session.policy().default_qubits);
            let gates = session.load_example(example, n)?;
            println!(
                "{} Loaded {} on {} qubits",
                style("✓").green(),
                style(example.title()).cyan(),
                n
            );
            print_gates(&gates);
        }
        ShellCommand::Gates => match session.num_qubits() {
            Some(n) => {
                println!("Circuit on {n} qubits:");
                print_gates(&session.gates());
            }
            None => println!("No circuit defined"),
        },
        ShellCommand::State => print_state(&session.statevector()?),
        ShellCommand::Simulate(shots) => {
            let shots = session.policy().resolve_shots(shots)?;
            let result = session.simulate(shots)?;
            print_results(&result);
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

/// Execute the shell command, reading from stdin until EOF or `quit`.
pub fn execute(session: &Session, qubits: Option<u32>) -> Result<()> {
    if let Some(n) = qubits {
        session.reset(n)?;
    }

    let interactive = console::user_attended();
    if interactive {
        println!(
            "{} interactive shell, type 'help' for commands",
            style("qsketch").cyan().bold()
        );
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{} ", style("qsketch>").bold());
            io::stdout().flush().context("Failed to flush stdout")?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        let outcome = parse_command(&line).and_then(|command| match command {
            Some(command) => dispatch(session, command),
            None => Ok(Flow::Continue),
        });

        match outcome {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => eprintln!("{} {:#}", style("Error:").red().bold(), e),
        }
    }

    Ok(())
}
