use std::path::PathBuf;

use clap::Parser;
use dialog_qa::{AskResponse, QaConfig};
use serde::{Deserialize, Serialize};

use crate::config::{DbpediaConfig, TranslatorConfig};

#[derive(Debug, Parser)]
#[command(name = "dialog-ask")]
#[command(bin_name = "dialog-ask")]
#[command(about = "Ask questions about DBpedia entities", long_about = None)]
pub struct AskCli {
    /// The question; when omitted, questions are read from stdin one per line
    pub question: Option<String>,

    /// Language to answer in
    #[arg(short, long, default_value = "ru")]
    pub language: String,

    /// Print each response as a JSON object
    #[arg(long)]
    pub json: bool,

    /// JSON configuration file with `qa`, `dbpedia` and `translator` sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON file of property URI to description, loaded into the cache
    #[arg(long)]
    pub descriptions: Option<PathBuf>,

    /// Microsoft Translator subscription key; without one, text is not
    /// translated and questions must be asked in English
    #[arg(long, env = "DIALOG_TRANSLATOR_KEY", hide_env_values = true)]
    pub translator_key: Option<String>,

    /// Microsoft Translator resource region
    #[arg(long, env = "DIALOG_TRANSLATOR_REGION")]
    pub translator_region: Option<String>,

    /// Log filter, used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Contents of the `--config` file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AskConfig {
    pub qa: QaConfig,
    pub dbpedia: DbpediaConfig,
    pub translator: TranslatorConfig,
}

impl AskCli {
    /// Apply command-line overrides to `config`.
    pub fn apply(&self, mut config: AskConfig) -> AskConfig {
        if let Some(path) = &self.descriptions {
            config.dbpedia.descriptions_file = Some(path.clone());
        }
        if let Some(key) = &self.translator_key {
            config.translator.subscription_key = key.clone();
        }
        if let Some(region) = &self.translator_region {
            config.translator.region = Some(region.clone());
        }
        config
    }
}

/// Render a response for the terminal.
pub fn render(response: &AskResponse, json: bool) -> Result<String, serde_json::Error> {
    if json {
        return serde_json::to_string(response);
    }
    Ok(if response.image.is_empty() {
        response.answer.clone()
    } else {
        format!("{}\n{}", response.answer, response.image)
    })
}
