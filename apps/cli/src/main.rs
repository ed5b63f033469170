use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::Result;
use clap::Parser;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use tubesum_core::{
    ChunkLimit, GroqClient, Model, Pipeline, RunOutcome, Session, TRENDING_VIDEOS,
    TubesumError, VideoSource, YouTubeSource,
};

use crate::{
    commands::{Command, HELP},
    terminal::{TerminalSink, print_banner},
};

mod commands;
mod logging;
mod terminal;

#[derive(Parser)]
#[command(name = "tubesum")]
#[command(about = "Summarize YouTube videos from their captions with Groq-hosted LLMs")]
struct Cli {
    /// Video URL. Starts an interactive session when omitted.
    url: Option<String>,

    /// Model used for chunk and final summaries
    #[arg(short, long, default_value_t = Model::default())]
    model: Model,

    /// Words per chunk (1000-10000, steps of 500)
    #[arg(short, long = "chunk-size", default_value_t = ChunkLimit::default())]
    chunk_size: ChunkLimit,

    /// Caption languages in order of preference (e.g., "en,de")
    #[arg(short, long, value_delimiter = ',', default_value = "en")]
    lang: Vec<String>,

    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Override the chat completions endpoint
    #[arg(long, env = "GROQ_API_URL")]
    api_url: Option<String>,

    /// yt-dlp executable used to read captions
    #[arg(long, env = "YTDLP_PATH", default_value = "yt-dlp")]
    ytdlp: PathBuf,

    /// Print the full video metadata
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing_subscriber();
    let cli = Cli::parse();

    // Validate API key early
    let mut client = match GroqClient::from_key(cli.api_key.clone().unwrap_or_default()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };
    if let Some(api_url) = &cli.api_url {
        client = client.with_api_url(api_url);
    }
    tracing::debug!(api_url = client.api_url(), model = %cli.model, "Configured completion client");

    let pipeline = Pipeline::new(YouTubeSource::new().with_ytdlp(cli.ytdlp.clone()));
    let mut session = Session::new(Arc::new(client), cli.model)
        .with_chunk_limit(cli.chunk_size)
        .with_languages(cli.lang.clone());
    let mut sink = TerminalSink::new(cli.verbose);

    print_banner();

    match cli.url {
        Some(url) => {
            session.submit_url(url);
            if !run_once(&pipeline, &mut session, &mut sink).await {
                std::process::exit(1);
            }
            Ok(())
        }
        None => interactive(&pipeline, &mut session, &mut sink).await,
    }
}

async fn interactive<V: VideoSource>(
    pipeline: &Pipeline<V>,
    session: &mut Session,
    sink: &mut TerminalSink,
) -> Result<()> {
    println!(
        "{}\n",
        style("Paste a YouTube URL, pick a trending video, or type `help`.").dim()
    );
    print_trending();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n{} ", style(">").cyan().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{} {}", style("Error:").red().bold(), e);
                continue;
            }
        };

        match command {
            Command::Empty => {}
            Command::Generate(url) => {
                if let Some(url) = url {
                    session.submit_url(url);
                }
                run_once(pipeline, session, sink).await;
            }
            Command::ListTrending => print_trending(),
            Command::Trending(number) => {
                if let Some(video) = session.select_trending(number) {
                    println!("{} {}", style("▶").cyan(), style(video.title).bold());
                    run_once(pipeline, session, sink).await;
                }
            }
            Command::ListModels => print_models(session.model()),
            Command::Model(model) => {
                if session.select_model(model, sink) {
                    println!("{} Model: {}", style("✓").green().bold(), model.name());
                } else {
                    println!("{}", style(format!("Already using {}", model.name())).dim());
                }
            }
            Command::Chunk(limit) => {
                session.set_chunk_limit(limit);
                println!("{} Chunk size: {} words", style("✓").green().bold(), limit);
            }
            Command::Restart => session.restart(sink),
            Command::Status => print_status(session),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}

/// Returns whether the run produced a summary
async fn run_once<V: VideoSource>(
    pipeline: &Pipeline<V>,
    session: &mut Session,
    sink: &mut TerminalSink,
) -> bool {
    match pipeline.run(session, sink).await {
        Ok(RunOutcome::Completed(_)) => true,
        Ok(_) => false,
        Err(e) => {
            report_error(&e);
            false
        }
    }
}

fn report_error(e: &TubesumError) {
    eprintln!("\n{} {}", style("Error:").red().bold(), e);
    if e.is_transient() {
        eprintln!(
            "{}",
            style("This looks temporary, try again in a moment.").dim()
        );
    }
}

fn print_trending() {
    println!("{}", style("Trending videos").bold());
    for (i, video) in TRENDING_VIDEOS.iter().enumerate() {
        println!(
            "  {} {} {}",
            style(format!("{}.", i + 1)).cyan(),
            video.title,
            style(video.url).dim()
        );
    }
}

fn print_models(current: Model) {
    for model in Model::ALL {
        let marker = if model == current { "*" } else { " " };
        println!(
            "{} {:<20} {} {}",
            style(marker).green().bold(),
            model.id(),
            model.name(),
            style(format!("({} tokens)", model.context_window())).dim()
        );
    }
}

fn print_status(session: &Session) {
    let url = session.last_url().unwrap_or("none");
    println!("{} {}", style("Video:").dim(), style(url).cyan());
    println!(
        "{} {} ({})",
        style("Model:").dim(),
        session.model().name(),
        session.model()
    );
    println!("{} {} words", style("Chunk size:").dim(), session.chunk_limit());
    println!("{} {}", style("Languages:").dim(), session.languages().join(", "));
    println!("{} {}", style("State:").dim(), session.state());
}
