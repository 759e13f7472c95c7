pub mod clients;
pub mod clock;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod models;
pub mod services;

use anyhow::Context;
use clap::{Parser, Subcommand};
pub use config::{Config, GeneralConfig};
pub use error::LookupError;
pub use services::LookupServices;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "portal-lookup", about = "Inspect the portal's cached reference data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List active class time slots
    TimeSlots,
    /// List active payment plan types
    PlanTypes,
    /// Resolve a payment plan (e.g. `one_time`) to its plan-type id
    PlanId { plan: String },
}

pub fn init_tracing(general: &GeneralConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if general.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

pub async fn run(config: Config, cli: Cli) -> anyhow::Result<()> {
    config.validate()?;

    let services =
        LookupServices::from_config(&config).context("Failed to set up lookup services")?;

    match cli.command {
        Command::TimeSlots => {
            let slots = services
                .time_slots
                .get_all()
                .await
                .context("Failed to load time slots")?;
            for slot in slots.iter() {
                println!(
                    "{:<8} {:>4}  {} -> {}  {}",
                    slot.code(),
                    slot.id().value(),
                    slot.start_time(),
                    slot.end_time(),
                    slot.display_time()
                );
            }
        }
        Command::PlanTypes => {
            let plans = services
                .plan_types
                .get_all()
                .await
                .context("Failed to load plan types")?;
            for plan in plans.iter() {
                println!("{:<12} {:>4}  {}", plan.code, plan.id.value(), plan.name);
            }
        }
        Command::PlanId { plan } => {
            let id = services.plan_types.get_plan_type_id(&plan).await?;
            println!("{id}");
        }
    }

    Ok(())
}
