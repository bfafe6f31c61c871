use std::io::{self, BufRead, Write};

use shared_utils::interaction::{Interaction, Notice};

/// Notices on the terminal, confirmations from stdin.
pub struct Terminal {
    assume_yes: bool,
}

impl Terminal {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Interaction for Terminal {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Info(message) => println!("{}", message),
            Notice::Error(message) => eprintln!("error: {}", message),
        }
    }
}
