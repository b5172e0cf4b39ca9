use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use dialog_dbpedia::cli::{AskCli, AskConfig, render};
use dialog_dbpedia::{DbpediaClient, MicrosoftTranslator};
use dialog_qa::{IdentityTranslator, QaService, Translator};
use tracing_subscriber::EnvFilter;

pub fn main() -> Result<()> {
    let cli = AskCli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let config = match &cli.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => AskConfig::default(),
    };
    let config = cli.apply(config);

    let graph = DbpediaClient::new(config.dbpedia)?;
    let translator: Box<dyn Translator> = if config.translator.subscription_key.is_empty() {
        tracing::warn!("no translator key; questions are answered untranslated");
        Box::new(IdentityTranslator)
    } else {
        Box::new(MicrosoftTranslator::new(config.translator)?)
    };
    let service = QaService::with_config(config.qa, graph, translator)?;

    let mut stdout = std::io::stdout().lock();
    match &cli.question {
        Some(question) => {
            let response = service.ask(question, &cli.language);
            writeln!(stdout, "{}", render(&response, cli.json)?)?;
        }
        None => {
            for line in std::io::stdin().lock().lines() {
                let line = line?;
                let question = line.trim();
                if question.is_empty() {
                    continue;
                }
                let response = service.ask(question, &cli.language);
                writeln!(stdout, "{}", render(&response, cli.json)?)?;
            }
        }
    }

    Ok(())
}
