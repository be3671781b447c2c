//! Interactive prompts
//!
//! A fixed sequence of blocking questions over any `BufRead`/`Write` pair.
//! An invalid answer repeats only the question it was given for.

use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::memory::{split_list, EntryType};
use crate::ops::NewEntry;

/// Shown when a required answer is blank
pub const REQUIRED_MESSAGE: &str = "This field is required";
const INVALID_CHOICE_MESSAGE: &str = "Please choose one of the listed options";

/// Prompt error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Input ended while a question was waiting for an answer
    #[error("Input closed before all questions were answered")]
    Closed,
    #[error("Prompt IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Prompt result type
pub type Result<T> = std::result::Result<T, PromptError>;

/// Question/answer driver
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Ask once and return the raw answer without its line ending
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "? {} ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask until a non-blank answer is given; the answer is trimmed
    pub fn required(&mut self, question: &str) -> Result<String> {
        loop {
            let answer = self.ask(question)?;
            let answer = answer.trim();
            if !answer.is_empty() {
                return Ok(answer.to_string());
            }
            writeln!(self.output, ">> {}", REQUIRED_MESSAGE)?;
        }
    }

    /// Ask once; blank answers are accepted
    pub fn optional(&mut self, question: &str) -> Result<String> {
        Ok(self.ask(question)?.trim().to_string())
    }

    /// Pick one of `choices` by 1-based number or by name
    pub fn select<T: Copy + Display>(&mut self, question: &str, choices: &[T]) -> Result<T> {
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, choice)?;
        }

        let question = format!("{} (1-{})", question, choices.len());
        loop {
            let answer = self.ask(&question)?;
            if let Some(choice) = match_choice(answer.trim(), choices) {
                return Ok(choice);
            }
            writeln!(self.output, ">> {}", INVALID_CHOICE_MESSAGE)?;
        }
    }
}

fn match_choice<T: Copy + Display>(answer: &str, choices: &[T]) -> Option<T> {
    if let Ok(index) = answer.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| choices.get(i)).copied();
    }
    choices
        .iter()
        .find(|c| c.to_string().eq_ignore_ascii_case(answer))
        .copied()
}

/// Ask the questions for a new memory entry, in order: type, description,
/// context, impact, tags
pub fn collect_entry<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<NewEntry> {
    let entry_type = prompter.select("What type of memory is this?", &EntryType::ALL)?;
    let description = prompter.required("Description:")?;
    let context = prompter.required("Context (what led to this?):")?;
    let impact = prompter.required("Impact:")?;
    let tags = split_list(&prompter.optional("Tags (comma-separated):")?);

    Ok(NewEntry {
        entry_type,
        description,
        context,
        impact,
        tags,
    })
}
