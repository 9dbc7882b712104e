use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use serde_json::Value;
use textscope_lib::api::{handle, AppState, Tool};
use textscope_lib::models::ToolRequest;
use textscope_lib::services::{score_text, ConfigStore, ProviderClient};
use tracing::info;

const USAGE: &str = "Usage:
  textscope <humanize|detect|plagiarism> [--text <text> | --file <path> | --event <json_path>] [--config <path>]
  textscope score [--text <text> | --file <path>]

Notes:
  - Without --text/--file/--event the text is read from stdin.
  - `score` runs the local human-likeness and readability scorers only (no model call).
  - API key: TEXTSCOPE_API_KEY, ANTHROPIC_API_KEY, or `apiKey` in the config file.";

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn read_input_text(args: &[String]) -> anyhow::Result<String> {
    if let Some(text) = parse_arg_value(args, "--text") {
        return Ok(text);
    }
    if let Some(path) = parse_arg_value(args, "--file") {
        return std::fs::read_to_string(&path).with_context(|| format!("read file failed: {}", path));
    }
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("read stdin failed")?;
    Ok(input)
}

fn read_event(args: &[String]) -> anyhow::Result<Value> {
    if let Some(path) = parse_arg_value(args, "--event") {
        let raw = std::fs::read_to_string(&path).with_context(|| format!("read event failed: {}", path))?;
        return serde_json::from_str(&raw).with_context(|| format!("event is not JSON: {}", path));
    }
    let request = ToolRequest {
        text: read_input_text(args)?,
    };
    Ok(serde_json::to_value(request)?)
}

fn config_store(args: &[String]) -> anyhow::Result<ConfigStore> {
    if let Some(path) = parse_arg_value(args, "--config") {
        return Ok(ConfigStore::with_file(PathBuf::from(path)));
    }
    let dir = ConfigStore::default_config_dir().context("no config directory on this platform")?;
    Ok(ConfigStore::new(dir))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        eprintln!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    };
    if command == "-h" || command == "--help" {
        println!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    }

    // dropped when main returns, which flushes the log file
    let _log_guard = textscope_lib::init_logging();

    if command == "score" {
        let text = read_input_text(&args)?;
        let scores = score_text(&text).context("cannot score text")?;
        println!("{}", serde_json::to_string_pretty(&scores)?);
        return Ok(ExitCode::SUCCESS);
    }

    let tool: Tool = match command.parse() {
        Ok(tool) => tool,
        Err(e) => bail!("{}\n\n{}", e, USAGE),
    };

    let store = config_store(&args)?;
    let config = store
        .load_with_env()
        .with_context(|| format!("load config failed: {}", store.config_file().display()))?;
    let client = ProviderClient::from_config(&config).context("provider client setup failed")?;
    info!(model = client.model(), url = client.url(), "provider.ready");

    let state = AppState::new(client, config.tools.clone());
    let event = read_event(&args)?;
    let response = handle(&state, tool, &event).await;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
