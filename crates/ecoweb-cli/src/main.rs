use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use ecoweb_core::config::API_URL_ENV;
use ecoweb_core::conversation::WorkflowAction;
use ecoweb_core::material::MaterialStatusChange;
use ecoweb_infrastructure::{ConfigService, EcowebPaths};
use std::path::PathBuf;

mod bootstrap;
mod commands;

#[derive(Parser)]
#[command(name = "ecoweb")]
#[command(about = "EcoWeb - corporate dashboard for material donations", long_about = None)]
struct Cli {
    /// Configuration directory (defaults to $ECOWEB_CONFIG_DIR or the platform config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Backend base URL, overriding config.toml and $ECOWEB_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with e-mail or CNPJ
    Login {
        #[arg(long)]
        email_or_cnpj: String,
        #[arg(long)]
        password: String,
    },
    /// End the session
    Logout,
    /// Show session and configuration
    Status,
    /// Register a new company
    Register(RegisterArgs),
    /// Overview: metrics, newest listings and recent activity
    Dashboard,
    /// Conversations with interested parties
    Inbox {
        #[command(subcommand)]
        action: InboxAction,
    },
    /// Material listings
    Materials {
        #[command(subcommand)]
        action: MaterialsAction,
    },
    /// Impact reports
    Reports {
        #[command(subcommand)]
        action: ReportsAction,
    },
    /// Show or change config.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Change settings in config.toml
    Set {
        #[arg(long)]
        api_url: Option<String>,
        #[arg(long)]
        timeout_secs: Option<u64>,
        #[arg(long)]
        log_level: Option<String>,
    },
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub cnpj: String,
    #[arg(long)]
    pub responsible_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub cep: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
}

#[derive(Subcommand)]
enum InboxAction {
    /// List conversations
    List {
        /// Only conversations about this material
        #[arg(long)]
        material: Option<String>,
        /// all, unread or archived
        #[arg(long, default_value = "all")]
        view: String,
    },
    /// Show a conversation with its messages
    Show { id: String },
    /// Reply to a conversation
    Send {
        id: String,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Schedule the pickup
    Schedule { id: String },
    /// Confirm the donation
    Confirm { id: String },
    /// Reject the proposal
    Reject { id: String },
    /// Archive the conversation
    Archive { id: String },
}

#[derive(Args)]
pub struct MaterialArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub quantity: String,
    #[arg(long, default_value = "kg")]
    pub unit: String,
    #[arg(long)]
    pub location: String,
    #[arg(long, default_value = "")]
    pub instructions: String,
    /// Photo file to upload (repeatable)
    #[arg(long = "photo")]
    pub photos: Vec<PathBuf>,
    /// Photo already stored by the backend (repeatable)
    #[arg(long = "existing-photo")]
    pub existing_photos: Vec<String>,
}

#[derive(Subcommand)]
enum MaterialsAction {
    /// List materials
    List {
        #[arg(long)]
        search: Option<String>,
        /// publicado, em-negociacao, pausado or doado
        #[arg(long)]
        status: Option<String>,
    },
    /// Show one material
    Show { id: String },
    /// Publish a new material
    Create(MaterialArgs),
    /// Replace a material's details
    Update {
        id: String,
        #[command(flatten)]
        form: MaterialArgs,
    },
    /// Delete a material
    Delete { id: String },
    /// Publish a paused material
    Publish { id: String },
    /// Pause a published material
    Pause { id: String },
    /// Mark a material as donated
    Donate { id: String },
}

#[derive(Subcommand)]
enum ReportsAction {
    /// Show the impact report
    Show {
        #[arg(long, default_value = "ultimo-trimestre")]
        period: String,
    },
    /// Export the impact report as PDF
    Export {
        #[arg(long, default_value = "ultimo-trimestre")]
        period: String,
        /// Output file or directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = EcowebPaths::new(cli.config_dir.as_deref())?;
    let api_url = cli
        .api_url
        .or_else(|| std::env::var(API_URL_ENV).ok())
        .filter(|url| !url.trim().is_empty());
    let config_service = ConfigService::with_api_url_override(&paths, api_url);
    let config = config_service.get_config()?;
    init_tracing(&config.log_level);

    // Runs before bootstrap so a broken API URL can still be fixed.
    let command = match cli.command {
        Commands::Config { action } => {
            return match action {
                ConfigAction::Show => commands::config::show(&config, &paths),
                ConfigAction::Set {
                    api_url,
                    timeout_secs,
                    log_level,
                } => commands::config::set(&config_service, api_url, timeout_secs, log_level),
            };
        }
        other => other,
    };

    let ctx = bootstrap::bootstrap(paths, config).await?;

    match command {
        Commands::Login {
            email_or_cnpj,
            password,
        } => commands::auth::login(&ctx, email_or_cnpj, password).await?,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Status => commands::auth::status(&ctx).await,
        Commands::Register(args) => commands::auth::register(&ctx, args).await?,
        Commands::Dashboard => commands::dashboard::show(&ctx).await?,
        Commands::Inbox { action } => match action {
            InboxAction::List { material, view } => {
                commands::inbox::list(&ctx, material, &view).await?
            }
            InboxAction::Show { id } => commands::inbox::show(&ctx, &id).await?,
            InboxAction::Send { id, text } => {
                commands::inbox::send(&ctx, &id, &text.join(" ")).await?
            }
            InboxAction::Schedule { id } => {
                commands::inbox::transition(&ctx, &id, WorkflowAction::SchedulePickup).await?
            }
            InboxAction::Confirm { id } => {
                commands::inbox::transition(&ctx, &id, WorkflowAction::ConfirmDonation).await?
            }
            InboxAction::Reject { id } => {
                commands::inbox::transition(&ctx, &id, WorkflowAction::RejectProposal).await?
            }
            InboxAction::Archive { id } => {
                commands::inbox::transition(&ctx, &id, WorkflowAction::Archive).await?
            }
        },
        Commands::Materials { action } => match action {
            MaterialsAction::List { search, status } => {
                commands::materials::list(&ctx, search, status.as_deref()).await?
            }
            MaterialsAction::Show { id } => commands::materials::show(&ctx, &id).await?,
            MaterialsAction::Create(form) => commands::materials::create(&ctx, form).await?,
            MaterialsAction::Update { id, form } => {
                commands::materials::update(&ctx, &id, form).await?
            }
            MaterialsAction::Delete { id } => commands::materials::delete(&ctx, &id).await?,
            MaterialsAction::Publish { id } => {
                commands::materials::change_status(&ctx, &id, MaterialStatusChange::Publish).await?
            }
            MaterialsAction::Pause { id } => {
                commands::materials::change_status(&ctx, &id, MaterialStatusChange::Pause).await?
            }
            MaterialsAction::Donate { id } => {
                commands::materials::change_status(&ctx, &id, MaterialStatusChange::MarkDonated).await?
            }
        },
        Commands::Reports { action } => match action {
            ReportsAction::Show { period } => commands::reports::show(&ctx, &period).await?,
            ReportsAction::Export { period, out } => {
                commands::reports::export(&ctx, &period, &out).await?
            }
        },
        Commands::Config { .. } => unreachable!("handled before bootstrap"),
    }

    Ok(())
}
