// Configuration loading via the 'config' crate and 'dotenv'.

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server_address: String,
    // Endpoint returning the full catalog as a JSON array.
    pub catalog_url: String,
    #[serde(default)]
    pub vocabulary: Vocabulary,
}

// The word lists the query compiler recognizes. These are configuration, not
// code: operators can extend them without touching the extraction rules.
#[derive(Debug, Deserialize, Clone)]
pub struct Vocabulary {
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,
    #[serde(default = "default_companies")]
    pub companies: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary {
            colors: default_colors(),
            companies: default_companies(),
        }
    }
}

fn default_colors() -> Vec<String> {
    ["red", "blue", "black", "white", "green", "yellow", "silver", "grey"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_companies() -> Vec<String> {
    [
        "Honda",
        "Yamaha",
        "Suzuki",
        "Hero",
        "Bajaj",
        "TVS",
        "KTM",
        "Royal Enfield",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Config::builder()
            // Add default values
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("catalog_url", "http://localhost:3001/bikes")?
            // Load from a configuration file (e.g., config.toml)
            .add_source(File::with_name("config").required(false))
            // Load from environment variables (e.g., APP_CATALOG_URL)
            .add_source(Environment::with_prefix("APP").separator("_"));

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}
