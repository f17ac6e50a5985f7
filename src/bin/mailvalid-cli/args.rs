use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use mailvalid_lib::{ApiDeliverOptions, EmailPattern, RegexPattern, UriPattern};

#[derive(Parser)]
#[command(name = "mailvalid-cli")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// lit des adresses depuis stdin (une par ligne) et les valide
    #[arg(long)]
    pub stdin: bool,

    /// stratégie de validation: regex|uri
    #[arg(long, default_value = "regex")]
    pub pattern: String,

    /// format: human|json
    #[arg(long, default_value = "human")]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// valide le format et propose des domaines si invalide
    Check { email: String },
    /// complète une saisie partielle (`alex@g`)
    Suggest { partial: String },
    /// valide puis vérifie la délivrabilité
    Deliver {
        email: String,
        /// vérificateur: api|dns
        #[arg(long, default_value = "api")]
        checker: String,
        /// clé de l'API de vérification
        #[arg(long = "api-key", default_value = "")]
        api_key: String,
        /// endpoint de l'API de vérification
        #[arg(long)]
        endpoint: Option<String>,
        /// timeout HTTP (ms), 0 = aucun
        #[arg(long = "timeout", default_value_t = 0)]
        timeout_ms: u64,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }
}

pub fn pattern_from_str(s: &str) -> Result<Box<dyn EmailPattern>> {
    match s {
        "regex" => Ok(Box::new(RegexPattern::default())),
        "uri" => Ok(Box::new(UriPattern)),
        other => bail!("unknown --pattern '{other}', use: regex|uri"),
    }
}

pub fn api_options(api_key: &str, endpoint: Option<&str>, timeout_ms: u64) -> ApiDeliverOptions {
    let mut options = ApiDeliverOptions::with_api_key(api_key);
    if let Some(endpoint) = endpoint {
        options.endpoint = endpoint.to_string();
    }
    options.timeout_ms = timeout_ms;
    options
}
