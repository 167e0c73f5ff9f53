use std::future::Future;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::{Arc, Mutex};

type SharedInput = Arc<Mutex<Box<dyn BufRead + Send>>>;
type SharedOutput = Arc<Mutex<Box<dyn Write + Send>>>;

/// Asks a single question and returns the first line of the answer.
pub trait Prompter: Send + Sync {
    /// Show `question` and read one line, without its line ending.
    ///
    /// I/O failures yield an empty answer, which every caller treats as "no".
    fn prompt(&self, question: &str) -> impl Future<Output = String> + Send;
}

/// [`Prompter`] reading from a line-oriented input and writing to an output.
///
/// The blocking terminal I/O runs on tokio's blocking pool.
pub struct TtyPrompter {
    input: SharedInput,
    output: SharedOutput,
}

impl TtyPrompter {
    /// Prompt on arbitrary streams.
    pub fn new(input: impl BufRead + Send + 'static, output: impl Write + Send + 'static) -> Self {
        Self {
            input: Arc::new(Mutex::new(Box::new(input))),
            output: Arc::new(Mutex::new(Box::new(output))),
        }
    }

    /// Prompt on the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl std::fmt::Debug for TtyPrompter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtyPrompter").finish_non_exhaustive()
    }
}

impl Prompter for TtyPrompter {
    async fn prompt(&self, question: &str) -> String {
        let input = Arc::clone(&self.input);
        let output = Arc::clone(&self.output);
        let question = question.to_string();
        tokio::task::spawn_blocking(move || ask(&input, &output, &question))
            .await
            .unwrap_or_default()
    }
}

fn ask(input: &SharedInput, output: &SharedOutput, question: &str) -> String {
    {
        let Ok(mut output) = output.lock() else {
            return String::new();
        };
        if output.write_all(question.as_bytes()).and_then(|()| output.flush()).is_err() {
            return String::new();
        }
    }

    let Ok(mut input) = input.lock() else {
        return String::new();
    };
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(n) if n > 0 && answer.ends_with('\n') => answer.trim_matches(['\n', '\r']).to_string(),
        _ => String::new(),
    }
}

/// Whether both stdin and stdout are attached to a terminal.
///
/// Self-update never prompts otherwise, so scripts and CI jobs cannot block on input.
#[must_use]
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// `y` or `yes`, ignoring case.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}
