use std::io::{self, BufRead, Write};

/// Asks `question` on `writer` and reads one answer line from `reader`.
///
/// Only `y` (any case, surrounding whitespace ignored) confirms. End of
/// input and answers that are not valid UTF-8 count as a refusal.
pub fn read_confirmation<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
) -> io::Result<bool> {
    write!(writer, "{} (y/n): ", question)?;
    writer.flush()?;

    let mut answer = Vec::new();
    reader.read_until(b'\n', &mut answer)?;
    Ok(String::from_utf8_lossy(&answer)
        .trim()
        .eq_ignore_ascii_case("y"))
}

#[derive(Debug, Default, Clone)]
pub struct StdinPrompt;

#[cfg_attr(test, mockall::automock)]
impl Prompt for StdinPrompt {
    fn confirm(&self, question: &str) -> io::Result<bool> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        read_confirmation(&mut stdin.lock(), &mut stdout.lock(), question)
    }
}

pub trait Prompt: Send + Sync {
    fn confirm(&self, question: &str) -> io::Result<bool>;
}
