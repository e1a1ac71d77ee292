mod rules;

use anyhow::{Context, Result, bail};
use marginalia_config::Config;
use marginalia_engine::EditorSession;
use std::{env, path::PathBuf, process};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("marginalia-cli", String::as_str);

    let (text_path, config) = match args.as_slice() {
        [_, text] => {
            log::info!("Config path: {}", Config::config_path().display());
            (PathBuf::from(text), Config::load()?)
        }
        [_, text, config_path] => {
            let Some(config) = Config::load_from_path(config_path)? else {
                bail!("Config file not found: {config_path}");
            };
            (PathBuf::from(text), Some(config))
        }
        _ => {
            eprintln!("Usage: {program} <text-file> [config-file]");
            process::exit(1);
        }
    };

    let text = std::fs::read_to_string(&text_path)
        .with_context(|| format!("Failed to read {}", text_path.display()))?;

    let pipeline = rules::build_pipeline(config.as_ref())?;
    let layout = config
        .as_ref()
        .map(|c| rules::layout(&c.layout))
        .unwrap_or_default();
    let session = EditorSession::new(&text, pipeline, layout);
    log::info!(
        "{} highlights in {}",
        session.highlights().len(),
        text_path.display()
    );

    for line in render(&session) {
        println!("{line}");
    }
    Ok(())
}

/// One line per highlight: rule id, span and the covered text.
fn render(session: &EditorSession) -> Vec<String> {
    session
        .highlights()
        .iter()
        .map(|h| {
            let covered = session.span_text(h.span).unwrap_or_default();
            format!("{} {} {covered:?}", h.rule_id, h.span)
        })
        .collect()
}
