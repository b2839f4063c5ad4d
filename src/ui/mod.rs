mod progress;
mod prompt;

pub use progress::FetchProgress;
pub use prompt::{Prompt, StdinPrompt};

#[cfg(test)]
pub use prompt::MockStdinPrompt;
