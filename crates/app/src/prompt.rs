//! Line-based stdin prompt.

use std::io::{self, BufRead, Write};

use spaceport_application::Prompt;

/// Asks questions on stderr and reads answers from stdin.
///
/// The read blocks, so it is moved off the async worker with
/// `block_in_place`; this needs the multi-threaded runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&self, question: &str) -> Option<String> {
        tokio::task::block_in_place(|| {
            prompt_line(&mut io::stdin().lock(), &mut io::stderr().lock(), question)
        })
    }
}

/// Writes `question` and returns the trimmed answer, `None` on EOF or blank.
fn prompt_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Option<String> {
    write!(output, "{question} ").ok()?;
    output.flush().ok()?;

    let mut line = String::new();
    if input.read_line(&mut line).ok()? == 0 {
        return None;
    }
    let answer = line.trim();
    (!answer.is_empty()).then(|| answer.to_string())
}
