//! SEM Studio: plan search-engine-marketing campaigns from the command line,
//! or serve plan generation over HTTP.

mod render;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sem_api::ApiServer;
use sem_core::config::AppConfig;
use sem_core::types::{BudgetAllocation, Competition, ThemeCategory};
use sem_planner::KeywordFilter;
use sem_wizard::{PlanBackend, SetupForm, TracingNotifier, Wizard, WizardStep};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "sem-studio")]
#[command(about = "SEM campaign planning: keyword research, ad groups, PMax themes and bids")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the planning wizard once and print the result
    Plan(PlanArgs),
    /// Serve plan generation over HTTP
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Brand website URL
    #[arg(long)]
    brand: String,

    /// Competitor website URL
    #[arg(long, default_value = "")]
    competitor: String,

    /// Comma-separated target locations
    #[arg(long, default_value = "Mumbai, Delhi")]
    locations: String,

    /// Monthly Shopping budget
    #[arg(long, default_value_t = 1000.0)]
    shopping: f64,

    /// Monthly Search budget
    #[arg(long, default_value_t = 2000.0)]
    search: f64,

    /// Monthly Performance Max budget
    #[arg(long, default_value_t = 1500.0)]
    pmax: f64,

    /// Theme category to include (repeatable; all when omitted)
    #[arg(long = "category", value_parser = parse_category)]
    categories: Vec<ThemeCategory>,

    /// Seed theme sent to the remote service (repeatable)
    #[arg(long = "theme")]
    themes: Vec<String>,

    /// Generate through the remote service instead of the local generator
    #[arg(long, default_value_t = false)]
    remote: bool,

    /// Remote service base URL (overrides config)
    #[arg(long, env = "SEM_STUDIO__REMOTE__BASE_URL")]
    base_url: Option<String>,

    /// Mock generation delay in milliseconds (overrides config)
    #[arg(long, env = "SEM_STUDIO__PLANNER__MOCK_DELAY_MS")]
    mock_delay_ms: Option<u64>,

    /// Last wizard step to run
    #[arg(long, value_enum, default_value_t = StopAt::Campaigns)]
    stop_at: StopAt,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Minimum monthly searches shown in the keyword table
    #[arg(long, default_value_t = 500)]
    min_volume: u64,

    /// Only show keywords with this competition level
    #[arg(long, value_parser = parse_competition)]
    competition: Option<Competition>,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Bind address (overrides config)
    #[arg(long, env = "SEM_STUDIO__API__HOST")]
    host: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "SEM_STUDIO__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Metrics port (overrides config)
    #[arg(long, env = "SEM_STUDIO__METRICS__PORT")]
    metrics_port: Option<u16>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StopAt {
    Keywords,
    Campaigns,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_category(raw: &str) -> Result<ThemeCategory, String> {
    ThemeCategory::from_label(raw).ok_or_else(|| {
        let labels: Vec<_> = ThemeCategory::ALL.iter().map(|c| c.label()).collect();
        format!("unknown theme category '{raw}', expected one of: {}", labels.join(", "))
    })
}

fn parse_competition(raw: &str) -> Result<Competition, String> {
    Competition::parse_label(raw).ok_or_else(|| format!("unknown competition level '{raw}'"))
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "sem_studio=info,sem_wizard=info,sem_api=info,tower_http=info".into()
    });

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config() -> AppConfig {
    AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Plan(args) => {
            init_tracing(false);
            run_plan(args).await
        }
        Command::Serve(args) => {
            init_tracing(true);
            run_serve(args).await
        }
    }
}

async fn run_plan(args: PlanArgs) -> anyhow::Result<()> {
    let mut config = load_config();

    // Apply CLI overrides
    if let Some(base_url) = args.base_url {
        config.remote.base_url = base_url;
    }
    if let Some(delay) = args.mock_delay_ms {
        config.planner.mock_delay_ms = delay;
    }

    let mut form = SetupForm {
        brand_website: args.brand,
        competitor_website: args.competitor,
        target_locations: args.locations,
        budgets: BudgetAllocation::new(args.shopping, args.search, args.pmax),
        ..Default::default()
    };
    for category in args.categories {
        form.toggle_category(category, true);
    }
    if !args.themes.is_empty() {
        form.seed_themes = args.themes;
    }

    let backend = PlanBackend::from_config(&config, args.remote)?;
    info!(
        backend = backend.name(),
        locations = form.locations().len(),
        "Configuration loaded"
    );

    let mut wizard = Wizard::new();
    wizard.submit(&form, &backend, &TracingNotifier).await?;

    if args.stop_at == StopAt::Campaigns {
        wizard.proceed()?;
    }

    let filter = KeywordFilter {
        min_volume: args.min_volume,
        competition: args.competition,
    };
    let output = match args.format {
        OutputFormat::Json => {
            let report = render::PlanReport::new(&wizard, &filter)?;
            serde_json::to_string_pretty(&report)?
        }
        OutputFormat::Text => {
            let plan = render::plan_of(&wizard)?;
            let mut out = render::stepper(wizard.step());
            out.push_str(&render::keyword_research(plan, &filter));
            if wizard.step() == WizardStep::CampaignStructure {
                out.push_str(&render::campaign_structure(plan));
            }
            out
        }
    };

    println!("{output}");
    Ok(())
}

async fn run_serve(args: ServeArgs) -> anyhow::Result<()> {
    info!("SEM Studio starting up");

    let mut config = load_config();

    // Apply CLI overrides
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.http_port {
        config.api.http_port = port;
    }
    if let Some(port) = args.metrics_port {
        config.metrics.port = port;
    }

    info!(
        host = %config.api.host,
        http_port = config.api.http_port,
        metrics_port = config.metrics.port,
        "Configuration loaded"
    );

    let metrics_enabled = config.metrics.enabled;
    let api_server = ApiServer::new(config);

    // Start metrics exporter
    if metrics_enabled {
        if let Err(e) = api_server.start_metrics().await {
            error!(error = %e, "Failed to start metrics exporter");
        }
    }

    info!("SEM Studio is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_plan_defaults() {
        let cli = Cli::try_parse_from(["sem-studio", "plan", "--brand", "https://brand.example"])
            .unwrap();
        let Command::Plan(args) = cli.command else {
            panic!("expected plan");
        };
        assert_eq!(args.locations, "Mumbai, Delhi");
        assert_eq!(args.min_volume, 500);
        assert_eq!(args.stop_at, StopAt::Campaigns);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.remote);
    }

    #[test]
    fn test_plan_categories() {
        let cli = Cli::try_parse_from([
            "sem-studio",
            "plan",
            "--brand",
            "https://brand.example",
            "--category",
            "demographic",
            "--category",
            "Seasonal/Event-Based",
            "--stop-at",
            "keywords",
        ])
        .unwrap();
        let Command::Plan(args) = cli.command else {
            panic!("expected plan");
        };
        assert_eq!(
            args.categories,
            vec![ThemeCategory::Demographic, ThemeCategory::SeasonalEventBased]
        );
        assert_eq!(args.stop_at, StopAt::Keywords);

        assert!(Cli::try_parse_from([
            "sem-studio",
            "plan",
            "--brand",
            "x",
            "--category",
            "Nonsense",
        ])
        .is_err());
    }
}
