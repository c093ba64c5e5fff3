//! Interactive prompting
//!
//! The orchestrator asks questions through the [`Prompter`] trait so the
//! whole flow can be driven from tests with canned answers.

use std::io::IsTerminal;

use console::{Key, Term};
use inquire::{Confirm, Text};

use crate::error::{InstallerError, Result};

/// Capability for asking the user questions
pub trait Prompter {
    /// Ask a free-form question; an empty answer yields `default`
    fn ask(&self, question: &str, default: &str) -> Result<String>;

    /// Ask a yes/no question
    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        let fallback = if default { "y" } else { "n" };
        let answer = self.ask(question, fallback)?;
        Ok(parse_yes_no(&answer).unwrap_or(default))
    }

    /// Wait until the user acknowledges `message`
    fn pause(&self, message: &str) -> Result<()> {
        self.ask(message, "").map(|_| ())
    }
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Prompter backed by the real terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&self, question: &str, default: &str) -> Result<String> {
        let mut text = Text::new(question);
        if !default.is_empty() {
            text = text.with_default(default);
        }
        Ok(text.prompt()?)
    }

    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(question)
            .with_default(default)
            .with_help_message("Press Enter to accept the default")
            .prompt()?)
    }

    fn pause(&self, message: &str) -> Result<()> {
        let term = Term::stderr();
        term.write_line(message)?;
        match term.read_key() {
            Ok(Key::CtrlC) => Err(InstallerError::InstallCancelled),
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                Err(InstallerError::InstallCancelled)
            }
            Err(e) => Err(InstallerError::PromptFailed {
                message: e.to_string(),
            }),
        }
    }
}

/// Whether stdin and stderr are attached to a terminal
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && console::user_attended_stderr()
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Answers questions from a queue and records what was asked.
    ///
    /// An exhausted queue answers with the question's default.
    #[derive(Default)]
    pub struct ScriptedPrompter {
        answers: RefCell<VecDeque<String>>,
        pub asked: RefCell<Vec<String>>,
    }

    impl ScriptedPrompter {
        pub fn new<I, S>(answers: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
                asked: RefCell::default(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&self, question: &str, default: &str) -> Result<String> {
            self.asked.borrow_mut().push(question.to_string());
            let answer = self.answers.borrow_mut().pop_front().unwrap_or_default();
            if answer.is_empty() {
                Ok(default.to_string())
            } else {
                Ok(answer)
            }
        }
    }
}
