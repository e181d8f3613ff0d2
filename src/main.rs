use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use grindstone::settings::Settings;

mod cli;

#[derive(Parser)]
#[command(name = "grindstone")]
#[command(about = "Turn focused work into XP, cash, and an idle empire")]
#[command(version)]
struct Cli {
    /// Path to the profile file (defaults to ~/.grindstone/profile.json)
    #[arg(short, long, global = true)]
    profile: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level, cash, streak, and everything pending
    Status,

    /// Record a completed focus session
    Study {
        /// Session length in minutes
        minutes: u32,

        /// Session kind: pomodoro, stopwatch, countdown, or manual
        #[arg(long, default_value = "pomodoro")]
        kind: String,
    },

    /// Inspect and unlock skills
    Skill {
        #[command(subcommand)]
        command: SkillCommands,
    },

    /// Manage idle businesses
    Biz {
        #[command(subcommand)]
        command: BizCommands,
    },

    /// Browse and buy this hour's bonds
    Bonds {
        #[command(subcommand)]
        command: BondCommands,
    },

    /// Spend cash on skins and utilities
    Shop {
        #[command(subcommand)]
        command: ShopCommands,
    },

    /// Daily challenges and offers
    Daily {
        #[command(subcommand)]
        command: DailyCommands,
    },

    /// Request or cancel a full profile wipe
    Reset {
        #[command(subcommand)]
        command: ResetCommands,
    },

    /// Prestige at level 100: wipe the economy, keep your legend
    Infamy,

    /// Write the profile as JSON to stdout
    Export,

    /// Replace the profile from a JSON file
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum SkillCommands {
    /// List every skill and its status
    List,
    /// Unlock a skill by name
    Unlock { name: String },
}

#[derive(Subcommand)]
enum BizCommands {
    /// List businesses with pending income
    List,
    /// Buy a business by name
    Unlock { name: String },
    /// Upgrade a business by name
    Upgrade { name: String },
    /// Collect one business's income
    Collect { name: String },
    /// Collect every unlocked business
    CollectAll,
}

#[derive(Subcommand)]
enum BondCommands {
    /// Show this cycle's bonds and any maturing holdings
    List,
    /// Buy a bond by id prefix
    Buy { id: String },
}

#[derive(Subcommand)]
enum ShopCommands {
    /// List skins and utilities with effective prices
    List,
    /// Buy a skin by name
    BuySkin { name: String },
    /// Equip an owned skin (or "none" to unequip)
    Equip { name: String },
    /// Buy and trigger a utility by name
    BuyUtility { name: String },
}

#[derive(Subcommand)]
enum DailyCommands {
    /// Show today's challenges and offers
    Show,
    /// Claim a completed challenge by kind
    Claim { kind: String },
    /// Activate one of today's offers by id
    Offer { id: String },
}

#[derive(Subcommand)]
enum ResetCommands {
    /// Request a hard reset (executes after a 10 minute grace period)
    Request,
    /// Cancel a pending hard reset
    Cancel,
    /// Show whether a reset is pending and when it fires
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().unwrap_or_default();

    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        settings.log_filter.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let ctx = cli::Context::new(cli.profile, settings)?;

    match cli.command {
        Commands::Status => cli::status::status_command(&ctx)?,
        Commands::Study { minutes, kind } => cli::study::study_command(&ctx, minutes, &kind)?,
        Commands::Skill { command } => match command {
            SkillCommands::List => cli::skill::list_command(&ctx)?,
            SkillCommands::Unlock { name } => cli::skill::unlock_command(&ctx, &name)?,
        },
        Commands::Biz { command } => match command {
            BizCommands::List => cli::business::list_command(&ctx)?,
            BizCommands::Unlock { name } => cli::business::unlock_command(&ctx, &name)?,
            BizCommands::Upgrade { name } => cli::business::upgrade_command(&ctx, &name)?,
            BizCommands::Collect { name } => cli::business::collect_command(&ctx, &name)?,
            BizCommands::CollectAll => cli::business::collect_all_command(&ctx)?,
        },
        Commands::Bonds { command } => match command {
            BondCommands::List => cli::bonds::list_command(&ctx)?,
            BondCommands::Buy { id } => cli::bonds::buy_command(&ctx, &id)?,
        },
        Commands::Shop { command } => match command {
            ShopCommands::List => cli::shop::list_command(&ctx)?,
            ShopCommands::BuySkin { name } => cli::shop::buy_skin_command(&ctx, &name)?,
            ShopCommands::Equip { name } => cli::shop::equip_command(&ctx, &name)?,
            ShopCommands::BuyUtility { name } => cli::shop::buy_utility_command(&ctx, &name)?,
        },
        Commands::Daily { command } => match command {
            DailyCommands::Show => cli::daily::show_command(&ctx)?,
            DailyCommands::Claim { kind } => cli::daily::claim_command(&ctx, &kind)?,
            DailyCommands::Offer { id } => cli::daily::offer_command(&ctx, &id)?,
        },
        Commands::Reset { command } => match command {
            ResetCommands::Request => cli::reset::request_command(&ctx)?,
            ResetCommands::Cancel => cli::reset::cancel_command(&ctx)?,
            ResetCommands::Status => cli::reset::status_command(&ctx)?,
        },
        Commands::Infamy => cli::reset::infamy_command(&ctx)?,
        Commands::Export => cli::profile::export_command(&ctx)?,
        Commands::Import { file } => cli::profile::import_command(&ctx, &file)?,
    }

    Ok(())
}
