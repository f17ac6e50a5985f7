mod args;
mod output;

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use async_trait::async_trait;
use mailvalid_lib::{
    ApiDeliver, CachedDeliver, Deliverable, Delivery, EmailPattern, EmailValidator, HostLiveness,
    PresetSuggester,
};

use crate::args::{Cli, Commands, api_options, pattern_from_str};
use crate::output::{CheckRow, DeliverRow, Format};

/// Pas de vérification réseau demandée (check/suggest).
struct Offline;

#[async_trait]
impl Deliverable for Offline {
    async fn deliver(&self, email: &str) -> Delivery {
        Delivery::new(false, email)
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn check(validator: &EmailValidator, email: &str) -> CheckRow {
    CheckRow {
        email: email.to_string(),
        result: validator.verify(email),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let format = Format::parse(&cli.format)?;
    let pattern = pattern_from_str(&cli.pattern)?;

    // codes de sortie : 0 OK, 2 invalide/non délivrable, 1 fatal
    let ok = if cli.stdin {
        let validator = EmailValidator::new(pattern, PresetSuggester::default(), Offline);
        let mut rows = Vec::new();
        for line in io::stdin().lock().lines() {
            let email = line.context("read stdin")?;
            let email = email.trim();
            if email.is_empty() {
                continue;
            }
            rows.push(check(&validator, email));
        }
        output::print_checks(&rows, format)?;
        rows.iter().all(|r| r.result.valid)
    } else {
        match cli.cmd {
            Some(Commands::Check { email }) => {
                let validator = EmailValidator::new(pattern, PresetSuggester::default(), Offline);
                let row = check(&validator, &email);
                output::print_checks(std::slice::from_ref(&row), format)?;
                row.result.valid
            }
            Some(Commands::Suggest { partial }) => {
                let completions = PresetSuggester::default().complete(&partial);
                output::print_completions(&partial, &completions, format)?;
                !completions.is_empty()
            }
            Some(Commands::Deliver {
                email,
                checker,
                api_key,
                endpoint,
                timeout_ms,
            }) => {
                let deliver: Box<dyn Deliverable> = match checker.as_str() {
                    "api" => {
                        let options = api_options(&api_key, endpoint.as_deref(), timeout_ms);
                        Box::new(ApiDeliver::new(options).context("build HTTP client")?)
                    }
                    "dns" => Box::new(HostLiveness::new().context("load system resolver")?),
                    other => anyhow::bail!("unknown --checker '{other}', use: api|dns"),
                };
                let validator = EmailValidator::new(
                    pattern,
                    PresetSuggester::default(),
                    CachedDeliver::new(deliver),
                );
                let valid = validator.is_valid(&email);
                let deliverable = validator.satisfy(&email).await;
                output::print_delivery(
                    &DeliverRow {
                        email,
                        valid,
                        deliverable,
                    },
                    format,
                )?;
                deliverable
            }
            None => {
                Cli::clap_command().print_help()?;
                println!();
                return Ok(());
            }
        }
    };

    if !ok {
        std::process::exit(2);
    }
    Ok(())
}
