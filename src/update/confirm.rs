//! Interactive yes/no confirmation.

use std::io::{self, BufRead, Write};
use std::path::Path;

/// Asks whether one binary should be updated.
///
/// Injected into the orchestrator so the resolution pipeline never touches a
/// terminal; tests substitute a scripted implementation.
pub trait Confirm {
    /// # Errors
    /// I/O failure on the underlying streams, including end of input.
    fn confirm(&mut self, binary: &Path) -> io::Result<bool>;
}

impl<C: Confirm + ?Sized> Confirm for &mut C {
    fn confirm(&mut self, binary: &Path) -> io::Result<bool> {
        (**self).confirm(binary)
    }
}

/// Prompts on stdout and reads answers from stdin, re-prompting until one of
/// the accepted tokens arrives. `y`/`yes` and `n`/`no` match
/// case-insensitively.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, binary: &Path) -> io::Result<bool> {
        let stdin = io::stdin();
        prompt_loop(&mut stdin.lock(), &mut io::stdout(), binary)
    }
}

fn prompt_loop<R, W>(input: &mut R, output: &mut W, binary: &Path) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "Do you want to update '{}'? (y/n): ", binary.display())?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no answer on stdin"));
        }
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => {} // anything else re-prompts
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> (io::Result<bool>, String) {
        let mut output = Vec::new();
        let result = prompt_loop(&mut Cursor::new(input), &mut output, Path::new("/go/bin/tool"));
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_affirmative_tokens() {
        for input in ["y\n", "Y\n", "yes\n", "YES\n", "  yes  \n"] {
            let (result, _) = run(input);
            assert!(result.unwrap(), "input {input:?}");
        }
    }

    #[test]
    fn test_negative_tokens() {
        for input in ["n\n", "N\n", "no\n", "No\n"] {
            let (result, _) = run(input);
            assert!(!result.unwrap(), "input {input:?}");
        }
    }

    #[test]
    fn test_unrecognized_answer_reprompts() {
        let (result, output) = run("maybe\nYES\n");
        assert!(result.unwrap());
        assert_eq!(output.matches("Do you want to update").count(), 2);
        assert!(output.contains("/go/bin/tool"));
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let (result, _) = run("");
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }
}
