//! Yes/no confirmation

use anyhow::Result;
use std::io::{self, BufRead, IsTerminal, Write};

/// Whether an answer confirms: `y` or `yes`, any case
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Ask a question on stdout and read one answer line from `input`
pub fn ask<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "{question} (y/N): ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

/// Confirm with the user; `auto_accept` skips the prompt.
///
/// Declines without asking when stdin is not a terminal.
pub fn confirm(question: &str, auto_accept: bool) -> Result<bool> {
    if auto_accept {
        return Ok(true);
    }

    if !io::stdin().is_terminal() {
        println!("Not a terminal; pass --yes to proceed without a prompt.");
        return Ok(false);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    ask(question, &mut input, &mut io::stdout())
}
