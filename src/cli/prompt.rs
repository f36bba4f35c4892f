//! Console prompting
//!
//! Wraps any `BufRead`/`Write` pair so the menus can be driven by a real
//! terminal or by an in-memory script. Every read returns `None` at end of
//! input.

use std::io::{BufRead, Write};

use crate::crypto::SecureString;
use crate::error::{SonnicError, SonnicResult};

/// Line-oriented console used by the menus
pub struct Console<R, W> {
    input: R,
    output: W,
    /// Read passwords from the terminal without echo
    hide_passwords: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, hide_passwords: bool) -> Self {
        Self {
            input,
            output,
            hide_passwords,
        }
    }

    /// Print a line
    pub fn say(&mut self, text: &str) -> SonnicResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print text as-is (no trailing newline added)
    pub fn write(&mut self, text: &str) -> SonnicResult<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Prompt and read one trimmed line
    pub fn read_line(&mut self, prompt: &str) -> SonnicResult<Option<String>> {
        self.write(prompt)?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    /// Prompt for a password
    ///
    /// Hidden input goes through the terminal directly; otherwise the
    /// password is read as an ordinary line.
    pub fn read_password(&mut self, prompt: &str) -> SonnicResult<Option<SecureString>> {
        if self.hide_passwords {
            self.output.flush()?;
            let password = rpassword::prompt_password(prompt)
                .map_err(|e| SonnicError::Io(format!("Failed to read password: {}", e)))?;
            return Ok(Some(SecureString::from(password)));
        }

        self.write(prompt)?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let password = SecureString::from(line.trim_end_matches(['\r', '\n']));
        line.clear();
        Ok(Some(password))
    }

    /// Prompt for a whole-number amount
    pub fn read_amount(&mut self, prompt: &str) -> SonnicResult<Option<i64>> {
        let Some(text) = self.read_line(prompt)? else {
            return Ok(None);
        };

        parse_amount(&text).map(Some)
    }
}

/// Parse user input as a whole number of currency units
pub fn parse_amount(text: &str) -> SonnicResult<i64> {
    text.trim().parse::<i64>().map_err(|_| {
        SonnicError::Validation(format!("'{}' is not a whole number", text.trim()))
    })
}
