mod logging;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use answer_client::HttpAnswerClient;
use chat_core::copy::{HEADER_SUBTITLE, HEADER_TITLE, INPUT_PLACEHOLDER};
use chat_core::WidgetConfig;
use chat_widget::{ChatWidget, WidgetHandle};
use clap::Parser;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::Renderer;

#[derive(Parser)]
#[command(name = "widget-term")]
#[command(about = "Terminal front-end for the chat widget")]
#[command(version)]
struct Cli {
    /// Answering service URL
    #[arg(long, env = "CHAT_WIDGET_ENDPOINT")]
    endpoint: Option<String>,

    /// Config file (defaults to ./chat_widget.toml when present)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, default_value = "false")]
    debug: bool,
}

/// What a line typed at the prompt means.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Focus,
    Blur,
    Quit,
    /// Change the input box without submitting.
    Draft(&'a str),
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    match line.trim_end_matches(['\r', '\n']) {
        "/focus" => Input::Focus,
        "/blur" => Input::Blur,
        "/quit" | "/exit" => Input::Quit,
        "/type" => Input::Draft(""),
        other => match other.strip_prefix("/type ") {
            Some(draft) => Input::Draft(draft),
            None => Input::Message(other),
        },
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<WidgetConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = WidgetConfig::load_from(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            config.apply_env();
            config
        }
        None => WidgetConfig::new(),
    };
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    Ok(config)
}

fn apply_input(handle: &WidgetHandle, input: Input<'_>) -> anyhow::Result<bool> {
    match input {
        Input::Quit => return Ok(false),
        Input::Focus => handle.focus()?,
        Input::Blur => handle.blur()?,
        Input::Draft(text) => handle.text_changed(text)?,
        Input::Message(text) => {
            handle.text_changed(text)?;
            handle.submit(text)?;
            handle.text_changed("")?;
        }
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.debug);

    let config = load_config(&cli)?;
    log::debug!("using answering service at {}", config.endpoint);

    let client = HttpAnswerClient::from_config(&config).context("failed to build HTTP client")?;
    let handle = ChatWidget::spawn(config, Arc::new(client));

    println!("{}", HEADER_TITLE.cyan().bold());
    println!("{}", HEADER_SUBTITLE.dimmed());
    println!(
        "{}",
        format!("{} (/focus, /blur, /type <text>, /quit)", INPUT_PLACEHOLDER).dimmed()
    );
    println!();

    let mut renderer = Renderer::new();
    let mut updates = handle.subscribe();
    renderer.render(&updates.borrow_and_update());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !apply_input(&handle, parse_input(&line))? {
                    break;
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                renderer.render(&snapshot);
            }
        }
    }

    handle.shutdown().await;
    println!("{}", "👋 Goodbye!".cyan());
    Ok(())
}
