use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use itinera_agents::{GenerationOutcome, GeneratorSettings, ItineraryAgent, TokioPacer};
use itinera_core::{
    build_tips, group_for, render_error_html, render_html, render_text, resolve, BudgetTier,
    Locale, RngSource, TravelRequest,
};
use itinera_observability::{init_tracing, AppMetrics};

#[derive(Debug, Parser)]
#[command(name = "itinera")]
#[command(about = "Travel itinerary generator")]
struct Cli {
    #[arg(long, env = "ITINERA_LOCALE", default_value = "ko", global = true)]
    locale: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a full itinerary.
    Plan {
        #[arg(long)]
        destination: String,
        #[arg(long, default_value_t = 3)]
        days: u32,
        #[arg(long, default_value_t = 1)]
        people: u32,
        #[arg(long, default_value = "")]
        gender: String,
        #[arg(long, default_value = "")]
        age: String,
        #[arg(long, default_value = "1-2M")]
        budget: String,
        #[arg(long = "style")]
        styles: Vec<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
        /// Skip the simulated backend latency.
        #[arg(long)]
        no_delay: bool,
    },
    /// Show the destination profile a text resolves to.
    Resolve { destination: String },
    /// Sample travel tips for a budget.
    Tips {
        #[arg(long, default_value = "1-2M")]
        budget: String,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Html,
    Text,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("itinera_cli");
    let cli = Cli::parse();
    let locale = Locale::from_optional_str(Some(&cli.locale));

    match cli.command {
        Command::Plan {
            destination,
            days,
            people,
            gender,
            age,
            budget,
            styles,
            format,
            seed,
            no_delay,
        } => {
            let mut settings = GeneratorSettings::from_env();
            if no_delay {
                settings = settings.without_delay();
            }
            let agent = ItineraryAgent::new(TokioPacer, settings, AppMetrics::shared());

            let request = TravelRequest {
                destination,
                party_size: people,
                gender,
                age_bracket: age,
                days,
                budget,
                styles,
                locale,
            };

            if !no_delay {
                eprintln!("generating itinerary...");
            }

            let outcome = match seed {
                Some(seed) => {
                    agent
                        .generate_with(request, &mut RngSource::seeded(seed))
                        .await
                }
                None => agent.generate(request).await,
            };

            print_outcome(&outcome, format)?;
            if let GenerationOutcome::Failed { reason, .. } = outcome {
                bail!("itinerary generation failed: {reason}");
            }
        }
        Command::Resolve { destination } => {
            let profile = resolve(&destination, locale);
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "group": group_for(&destination),
                    "profile": profile,
                }))?
            );
        }
        Command::Tips { budget, seed } => {
            let tier = BudgetTier::parse(&budget);
            let mut rng = match seed {
                Some(seed) => RngSource::seeded(seed),
                None => RngSource::from_entropy(),
            };
            let tips = build_tips(tier, locale, &mut rng);
            println!("{}", serde_json::to_string_pretty(&tips)?);
        }
    }

    Ok(())
}

fn print_outcome(outcome: &GenerationOutcome, format: OutputFormat) -> Result<()> {
    match (format, outcome) {
        (OutputFormat::Json, _) => println!("{}", serde_json::to_string_pretty(outcome)?),
        (OutputFormat::Html, GenerationOutcome::Ready { itinerary, .. }) => {
            print!("{}", render_html(itinerary))
        }
        (OutputFormat::Html, GenerationOutcome::Failed { notice, .. }) => {
            print!("{}", render_error_html(notice))
        }
        (OutputFormat::Text, GenerationOutcome::Ready { itinerary, .. }) => {
            print!("{}", render_text(itinerary))
        }
        (OutputFormat::Text, GenerationOutcome::Failed { notice, .. }) => {
            eprintln!("{}\n{}\n[{}]", notice.title, notice.message, notice.retry_label)
        }
    }
    Ok(())
}
