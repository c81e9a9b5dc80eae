//! Blocking operator prompt port.

/// Asks the operator for a single line of input.
pub trait Prompt {
    /// Shows `question` and waits for an answer.
    ///
    /// Returns `None` if the operator dismissed the prompt or answered with
    /// an empty line.
    fn ask(&self, question: &str) -> Option<String>;
}
