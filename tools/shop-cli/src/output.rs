//! Output formatting for the CLI.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use shop_data::{Outcome, ProgressSink, RequestInfo};
use shop_state::LoadingIndicator;
use tokio::task::JoinHandle;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Drives a terminal spinner from HTTP progress events.
///
/// One spinner is shown while any request is in flight; its message tracks
/// the most recently started request. Visibility goes through a
/// [`LoadingIndicator`], so once shown the spinner stays up for the
/// configured minimum display time. Must be created inside a tokio runtime.
pub struct SpinnerProgress {
    output: Output,
    indicator: LoadingIndicator,
    state: Arc<Mutex<SpinnerState>>,
    clear_task: JoinHandle<()>,
}

#[derive(Default)]
struct SpinnerState {
    bar: Option<ProgressBar>,
    in_flight: usize,
}

impl SpinnerState {
    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl SpinnerProgress {
    pub fn new(output: Output, indicator: LoadingIndicator) -> Self {
        let state = Arc::new(Mutex::new(SpinnerState::default()));
        let mut visible = indicator.subscribe();
        let clear_task = tokio::spawn({
            let state = Arc::clone(&state);
            async move {
                while visible.changed().await.is_ok() {
                    if *visible.borrow_and_update() {
                        continue;
                    }
                    let mut state = lock(&state);
                    if state.in_flight == 0 {
                        state.clear();
                    }
                }
            }
        });
        Self {
            output,
            indicator,
            state,
            clear_task,
        }
    }
}

impl ProgressSink for SpinnerProgress {
    fn started(&self, request: &RequestInfo) {
        let msg = format!("{} {}", request.method, request.url);
        let mut state = lock(&self.state);
        state.in_flight += 1;
        match &state.bar {
            Some(bar) => bar.set_message(msg),
            None => state.bar = Some(self.output.spinner(&msg)),
        }
        drop(state);
        self.indicator.show();
    }

    fn finished(&self, request: &RequestInfo, outcome: Outcome) {
        let mut state = lock(&self.state);
        state.in_flight = state.in_flight.saturating_sub(1);
        let idle = state.in_flight == 0;
        drop(state);
        if idle {
            self.indicator.hide();
        }

        self.output.debug(&format!(
            "{} {} -> {}",
            request.method,
            request.url,
            outcome_label(outcome)
        ));
    }
}

impl Drop for SpinnerProgress {
    fn drop(&mut self) {
        self.clear_task.abort();
        lock(&self.state).clear();
    }
}

fn lock(state: &Mutex<SpinnerState>) -> MutexGuard<'_, SpinnerState> {
    state.lock().unwrap_or_else(|p| p.into_inner())
}

fn outcome_label(outcome: Outcome) -> String {
    match outcome {
        Outcome::Status(code) if outcome.is_success() => style(code).green().to_string(),
        Outcome::Status(code) => style(code).red().to_string(),
        Outcome::Failed => style("failed").red().to_string(),
        Outcome::Cancelled => style("cancelled").dim().to_string(),
    }
}

/// Badge for a done/open checklist entry.
pub fn check_badge(done: bool) -> String {
    if done {
        style("✓").green().to_string()
    } else {
        style("○").dim().to_string()
    }
}

/// Format a signed amount to two decimals, red when negative.
pub fn signed_amount(amount: f64) -> String {
    let text = format!("{:.2}", amount);
    if amount < 0.0 {
        style(text).red().to_string()
    } else {
        text
    }
}
