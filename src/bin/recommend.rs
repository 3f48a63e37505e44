use clap::Parser;
use uni_finder::api::ApiResponse;
use uni_finder::config::AppConfig;
use uni_finder::utils::logger::{self, LogFormat};
use uni_finder::utils::validation::Validate;
use uni_finder::{build_source, FinderError, RecommendationEngine, RecommendationRequest};

#[derive(Parser)]
#[command(name = "recommend")]
#[command(about = "Print degree program recommendations for one student as JSON")]
struct Args {
    /// Path to TOML configuration file; environment variables are used when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Subject stream label, e.g. "Mathematics"
    #[arg(long, required_unless_present = "catalog")]
    stream: Option<String>,

    /// Student z-score
    #[arg(
        long,
        allow_hyphen_values = true,
        required_unless_present = "catalog",
        value_parser = parse_zscore
    )]
    zscore: Option<f64>,

    /// Preferred district
    #[arg(long, required_unless_present = "catalog")]
    district: Option<String>,

    /// List every program across the catalog tracks instead
    #[arg(long)]
    catalog: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_zscore(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(score),
        _ => Err(format!("Invalid zscore: {}", raw)),
    }
}

fn load_config(args: &Args) -> uni_finder::Result<AppConfig> {
    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

fn fail(e: &FinderError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(if e.is_upstream() { 2 } else { 1 });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_logger(LogFormat::Compact, args.verbose);

    let config = load_config(&args).unwrap_or_else(|e| fail(&e));
    let source = build_source(&config.source).unwrap_or_else(|e| fail(&e));
    let engine =
        RecommendationEngine::with_settings(source, config.recommendations.engine_settings());

    if args.catalog {
        let programs = engine.list_all_programs().await;
        println!(
            "{}",
            serde_json::to_string_pretty(&ApiResponse::Success(programs))?
        );
        return Ok(());
    }

    // clap guarantees these when --catalog is absent
    let (Some(track), Some(score), Some(region)) = (args.stream, args.zscore, args.district)
    else {
        anyhow::bail!("--stream, --zscore and --district are required");
    };

    let request = RecommendationRequest {
        track,
        score,
        region,
    };

    match engine.recommend(&request).await {
        Ok(set) => {
            println!("{}", serde_json::to_string_pretty(&ApiResponse::Success(set))?);
            Ok(())
        }
        Err(e) => fail(&e),
    }
}
