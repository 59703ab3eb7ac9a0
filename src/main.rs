mod cli;
mod world;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use cli::{Cli, Request};
use std::io::{self, Write};
use world::{Outcome, Prompt, TerminalPrompt, WorldError};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let code = execute(
        &args,
        &mut TerminalPrompt,
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .unwrap_or(1);
    if code != 0 {
        std::process::exit(code);
    }
}

/// Runs one invocation and returns its exit code: 0 for success, help and
/// acknowledged no-ops, 1 for any reported error.
fn execute(
    args: &[String],
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<i32> {
    if args.len() <= 1 {
        writeln!(out, "{}", Cli::command().render_help())?;
        return Ok(0);
    }

    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(out, "{}", e.render())?;
            return Ok(0);
        }
        Err(e) => {
            writeln!(err, "Error: {}", cli::parser_message(&e))?;
            return Ok(1);
        }
    };

    match run(cli, prompt) {
        Ok(outcome) => {
            for line in outcome.report_lines() {
                writeln!(out, "{line}")?;
            }
            Ok(0)
        }
        Err(e) => {
            writeln!(err, "Error: {e}")?;
            Ok(1)
        }
    }
}

fn run(cli: Cli, prompt: &mut dyn Prompt) -> Result<Outcome, WorldError> {
    match cli.command.into_request()? {
        Request::Add(req) => world::run_add(&req, prompt),
        Request::Delete(req) => world::run_delete(&req, prompt),
    }
}
