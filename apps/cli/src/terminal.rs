use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};
use tubesum_core::{
    Captions, Notice, RunSink, RunState, VideoMetadata, format_duration, format_metadata_readable,
    preview,
};

pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ");
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn print_banner() {
    println!(
        "\n{}  {}\n",
        style("tubesum").cyan().bold(),
        style("YouTube Summarizer").dim()
    );
}

pub fn rule() -> String {
    style("─".repeat(60)).dim().to_string()
}

/// Renders a run on the terminal: spinners while waiting, deltas printed as
/// they arrive
pub struct TerminalSink {
    spinner: Option<ProgressBar>,
    step_start: Instant,
    run_start: Instant,
    verbose: bool,
}

impl TerminalSink {
    pub fn new(verbose: bool) -> Self {
        Self {
            spinner: None,
            step_start: Instant::now(),
            run_start: Instant::now(),
            verbose,
        }
    }

    fn start_step(&mut self, msg: &str) {
        self.clear_spinner();
        self.step_start = Instant::now();
        self.spinner = Some(create_spinner(msg));
    }

    fn finish_step(&mut self, msg: String) {
        let line = format!(
            "{} {} {}",
            style("✓").green().bold(),
            msg,
            style(format!("[{}]", format_duration(self.step_start.elapsed()))).dim()
        );
        match self.spinner.take() {
            Some(spinner) => spinner.finish_with_message(line),
            None => println!("{line}"),
        }
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn write_delta(&mut self, delta: &str) {
        self.clear_spinner();
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(delta.as_bytes());
        let _ = stdout.flush();
    }
}

impl RunSink for TerminalSink {
    fn state_changed(&mut self, state: RunState) {
        match state {
            RunState::Idle => self.clear_spinner(),
            RunState::FetchingVideo => {
                self.run_start = Instant::now();
                println!("{}", rule());
                self.start_step("Parsing video...");
            }
            RunState::FetchingCaptions => self.start_step("Reading captions..."),
            RunState::Chunking => self.step_start = Instant::now(),
            RunState::SummarizingChunks { index, total } => {
                println!(
                    "\n{}",
                    style(format!("Chunk {}/{}", index + 1, total)).yellow().bold()
                );
                self.start_step(&format!("{state}..."));
            }
            RunState::SummarizingFinal => {
                println!("\n{}\n", rule());
                self.start_step("Generating summary...");
            }
        }
    }

    fn video_fetched(&mut self, _url: &str, metadata: &VideoMetadata) {
        let title = metadata.title().unwrap_or("untitled");
        let msg = match metadata.channel() {
            Some(channel) => format!("Video: {} {}", style(title).bold(), style(channel).dim()),
            None => format!("Video: {}", style(title).bold()),
        };
        self.finish_step(msg);

        if self.verbose {
            println!("{}", style(format_metadata_readable(metadata)).dim());
        }
    }

    fn captions_fetched(&mut self, captions: &Captions) {
        self.finish_step(format!(
            "Captions: {} words, {}",
            captions.word_count(),
            style(captions.language()).yellow()
        ));

        if self.verbose {
            println!("{}", style(preview(captions.text(), 40)).dim());
        }
    }

    fn chunked(&mut self, words: usize, chunks: usize) {
        let noun = if chunks == 1 { "chunk" } else { "chunks" };
        self.finish_step(format!("Chunked: {words} words into {chunks} {noun}"));
    }

    fn chunk_delta(&mut self, _index: usize, delta: &str) {
        self.write_delta(delta);
    }

    fn chunk_finished(&mut self, _index: usize, _summary: &str) {
        println!();
    }

    fn summary_delta(&mut self, delta: &str) {
        self.write_delta(delta);
    }

    fn summary_finished(&mut self, _summary: &str) {
        println!(
            "\n\n{} {}\n",
            style("Total time:").dim(),
            style(format_duration(self.run_start.elapsed())).cyan().bold()
        );
    }

    fn notice(&mut self, notice: &Notice) {
        self.clear_spinner();
        println!("{} {}", style("!").yellow().bold(), style(notice).yellow());
    }

    fn reset(&mut self) {
        self.clear_spinner();
        let _ = Term::stdout().clear_screen();
        print_banner();
    }
}
