use console::Term;
use nono_common::ui::{Confirm, ConfirmPrompt};
use tracing::warn;

use crate::terminal::print;

/// Asks the operator on the console. Blocks until a line is entered.
pub struct ConsolePrompt {
    term: Term,
}

impl ConsolePrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Confirm for ConsolePrompt {
    fn confirm(&self, prompt: &ConfirmPrompt<'_>) -> bool {
        print::header("is this a mobile?");
        print::aligned_line("Contact", prompt.contact_name);
        print::aligned_line("Number", prompt.original);
        if let Some(label) = prompt.label {
            print::aligned_line("Label", label);
        }
        print::aligned_line("After change", prompt.candidate);

        let answer = self
            .term
            .write_str("Insert the digit anyway? [y/N] ")
            .and_then(|_| self.term.read_line());

        match answer {
            Ok(answer) => is_yes(&answer),
            Err(err) => {
                warn!(error = %err, "could not read the answer, keeping the number");
                false
            }
        }
    }
}

/// English or Portuguese yes. Anything else, including an empty line, is no.
pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    )
}
