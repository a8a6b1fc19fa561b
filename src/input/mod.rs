//! Interactive input: where the album URL and output directory come from.
//!
//! The prompt loops only talk to an [`InputProvider`], so they can be driven
//! by the console in production and by a scripted list of answers in tests.

mod validate;

pub use validate::{check_album_url, validate_album_url};

#[cfg(test)]
pub(crate) use tests::ScriptedInput;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::app::{AppError, Result};
use crate::config::AlbumConfig;

/// Source of line-oriented user input.
pub trait InputProvider {
    /// Show `prompt` and read one line. `Ok(None)` means input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Tell the user their last answer was rejected.
    fn reject(&mut self, message: &str);
}

/// Blocking stdin/stdout prompts.
#[derive(Debug, Default)]
pub struct ConsoleInput;

impl InputProvider for ConsoleInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn reject(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Ask for the album URL until a valid one is entered.
pub fn prompt_album_url(input: &mut dyn InputProvider, rules: &AlbumConfig) -> Result<String> {
    loop {
        let answer = next_answer(input, "Enter the album URL: ")?;
        if validate_album_url(&answer, rules) {
            return Ok(answer);
        }
        input.reject("Invalid URL, please enter an album URL");
    }
}

/// Ask for the output directory until an absolute path is entered.
pub fn prompt_output_dir(input: &mut dyn InputProvider) -> Result<PathBuf> {
    loop {
        let answer = next_answer(input, "Enter the output directory: ")?;
        let path = PathBuf::from(&answer);
        if path.is_absolute() {
            return Ok(path);
        }
        input.reject("Please enter an absolute path");
    }
}

fn next_answer(input: &mut dyn InputProvider, prompt: &str) -> Result<String> {
    input
        .read_line(prompt)?
        .map(|line| line.trim().to_string())
        .ok_or_else(|| AppError::InvalidInput("input closed before a valid answer was given".into()))
}
