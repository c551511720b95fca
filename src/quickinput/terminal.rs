use super::{InputOptions, QuickInputService, QuickPickItem};
use crate::{Result, TrustgateError};
use async_trait::async_trait;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::{Arc, Mutex};

struct Console {
    reader: Box<dyn BufRead + Send>,
    writer: Box<dyn Write + Send>,
}

impl Console {
    /// Read one trimmed line; `None` on end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.writer, "{text}")?;
        self.writer.flush()?;
        self.read_line()
    }
}

/// Numbered menus over a line-oriented console
///
/// Reads block, so every prompt runs on tokio's blocking pool.
pub struct TerminalQuickInput {
    prompter: Arc<Prompter>,
}

impl TerminalQuickInput {
    /// Prompt on the process stdin/stdout
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }

    pub fn new(reader: impl BufRead + Send + 'static, writer: impl Write + Send + 'static) -> Self {
        Self {
            prompter: Arc::new(Prompter {
                console: Mutex::new(Console {
                    reader: Box::new(reader),
                    writer: Box::new(writer),
                }),
            }),
        }
    }

    async fn run_blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Prompter) -> Result<T> + Send + 'static,
    {
        let prompter = self.prompter.clone();
        tokio::task::spawn_blocking(move || f(&prompter))
            .await
            .map_err(|e| TrustgateError::QuickInput(format!("prompt task failed: {e}")))?
    }
}

struct Prompter {
    console: Mutex<Console>,
}

impl Prompter {
    fn with_console<T>(&self, f: impl FnOnce(&mut Console) -> Result<T>) -> Result<T> {
        let mut console = self
            .console
            .lock()
            .map_err(|_| TrustgateError::QuickInput("console lock poisoned".to_string()))?;
        f(&mut console)
    }

    fn pick_blocking(&self, items: Vec<QuickPickItem>) -> Result<Option<QuickPickItem>> {
        if items.is_empty() {
            return Ok(None);
        }

        self.with_console(|console| {
            for (index, item) in items.iter().enumerate() {
                writeln!(console.writer, "  {}) {}", index + 1, item.label)?;
            }

            loop {
                let answer = console.prompt(&format!(
                    "Select [1-{}] (empty to cancel): ",
                    items.len()
                ))?;
                let Some(answer) = answer.filter(|a| !a.is_empty()) else {
                    return Ok(None);
                };

                match answer.parse::<usize>() {
                    Ok(n) if (1..=items.len()).contains(&n) => {
                        return Ok(Some(items[n - 1].clone()));
                    }
                    _ => writeln!(console.writer, "Not a choice: {answer}")?,
                }
            }
        })
    }

    fn pick_many_blocking(
        &self,
        mut items: Vec<QuickPickItem>,
    ) -> Result<Option<Vec<QuickPickItem>>> {
        self.with_console(|console| loop {
            for (index, item) in items.iter().enumerate() {
                let mark = if item.picked { "x" } else { " " };
                writeln!(console.writer, "  [{mark}] {}) {}", index + 1, item.label)?;
            }

            let Some(answer) = console.prompt(
                "Toggle numbers (space or comma separated), Enter to accept, q to cancel: ",
            )?
            else {
                return Ok(None);
            };

            if answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            if answer.is_empty() {
                return Ok(Some(items.into_iter().filter(|i| i.picked).collect()));
            }

            for token in answer.split(|c: char| c == ',' || c.is_whitespace()) {
                if token.is_empty() {
                    continue;
                }
                match token.parse::<usize>() {
                    Ok(n) if (1..=items.len()).contains(&n) => {
                        let item = &mut items[n - 1];
                        item.picked = !item.picked;
                    }
                    _ => writeln!(console.writer, "Not a choice: {token}")?,
                }
            }
        })
    }

    fn input_blocking(&self, options: InputOptions) -> Result<Option<String>> {
        self.with_console(|console| {
            let hint = if options.placeholder.is_empty() {
                String::new()
            } else {
                format!(" (e.g. {})", options.placeholder)
            };

            let Some(text) = console.prompt(&format!("Value{hint}, empty to cancel: "))? else {
                return Ok(None);
            };
            if text.is_empty() {
                return Ok(None);
            }

            if !options.validate(&text).valid {
                if let Some(message) = &options.validation_message {
                    writeln!(console.writer, "Note: {message}")?;
                }
            }

            Ok(Some(text))
        })
    }
}

#[async_trait]
impl QuickInputService for TerminalQuickInput {
    async fn pick(&self, items: Vec<QuickPickItem>) -> Result<Option<QuickPickItem>> {
        self.run_blocking(move |prompter| prompter.pick_blocking(items)).await
    }

    async fn pick_many(&self, items: Vec<QuickPickItem>) -> Result<Option<Vec<QuickPickItem>>> {
        self.run_blocking(move |prompter| prompter.pick_many_blocking(items)).await
    }

    async fn input(&self, options: InputOptions) -> Result<Option<String>> {
        self.run_blocking(move |prompter| prompter.input_blocking(options)).await
    }
}
