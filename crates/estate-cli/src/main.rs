//! Command-line interface for estate-rs
//!
//! ```bash
//! # Dataset location (defaults to data/locations.json)
//! export ESTATE_DATA_PATH="data/locations.json"
//!
//! estate top --criteria investment --limit 3
//! estate analyze "prahlad nagar" --amount 5000000
//!
//! # Narrative commands need a text-generation key
//! export DEEPSEEK_API_KEY="..."
//! estate ai bopal --focus family
//! ```

mod render;

use anyhow::Context;
use clap::{Parser, Subcommand};
use estate_analysis::search::parse_growth_filter;
use estate_analysis::{
    AnalysisConfig, AnalysisError, Analyzer, Attribute, InsightService, PromptKind, RankCriteria,
    RecordStore, SearchFilters,
};
use estate_llm::providers::{ChatConfig, ChatProvider};
use estate_utils::EnvConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "estate")]
#[command(about = "Score, rank and compare real-estate locations", long_about = None)]
struct Cli {
    /// JSON dataset of location records
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List loaded locations
    Locations {
        #[arg(long)]
        city: Option<String>,
    },
    /// Show everything known about one location
    Lookup { location: String },
    /// Project rental income, appreciation and risk for an investment
    Analyze {
        location: String,
        /// Capital in rupees (defaults to the configured amount)
        #[arg(long)]
        amount: Option<f64>,
    },
    /// Compare two or more locations side by side
    Compare {
        #[arg(required = true)]
        locations: Vec<String>,
    },
    /// Best locations by a criteria
    Top {
        /// investment, safety, affordability, lifestyle, connectivity or overall
        #[arg(long, default_value = "overall")]
        criteria: String,
        #[arg(long)]
        limit: Option<usize>,
        /// Maximum price per sqft
        #[arg(long)]
        budget: Option<f64>,
        #[arg(long)]
        city: Option<String>,
    },
    /// Filter locations on several criteria at once
    Search(SearchArgs),
    /// Market overview, optionally for one city
    Market {
        #[arg(long)]
        city: Option<String>,
    },
    /// Whole-dataset statistics
    Stats,
    /// Write a full analysis report as JSON
    Report {
        location: String,
        #[arg(long)]
        amount: Option<f64>,
        /// Directory for the report file
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
    /// Narrative analysis of one location
    Ai {
        location: String,
        /// detailed, investment or family
        #[arg(long, default_value = "detailed")]
        focus: String,
        /// Free-form focus; overrides --focus
        #[arg(long)]
        custom: Option<String>,
    },
    /// Narrative comparison of two or more locations
    AiCompare {
        #[arg(required = true)]
        locations: Vec<String>,
    },
    /// Narrative market insights
    AiMarket {
        #[arg(long)]
        city: Option<String>,
    },
    /// Investment strategy advice for a budget
    AiStrategy {
        /// Budget in rupees
        budget: f64,
        #[arg(long, default_value = "")]
        goals: String,
    },
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    #[arg(long)]
    min_safety: Option<f64>,
    #[arg(long)]
    max_traffic: Option<f64>,
    #[arg(long)]
    min_schools: Option<u32>,
    #[arg(long)]
    min_hospitals: Option<u32>,
    #[arg(long)]
    max_price: Option<f64>,
    #[arg(long)]
    min_yield: Option<f64>,
    /// High, Medium, Low or Any
    #[arg(long)]
    growth: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    metro: bool,
    /// Attribute to sort on, highest first
    #[arg(long)]
    sort_by: Option<String>,
    #[arg(long)]
    limit: Option<usize>,
}

impl SearchArgs {
    fn filters(self) -> anyhow::Result<SearchFilters> {
        let future_growth = match self.growth.as_deref() {
            Some(g) => parse_growth_filter(g)?,
            None => None,
        };
        let sort_by = self
            .sort_by
            .as_deref()
            .map(str::parse::<Attribute>)
            .transpose()?;

        Ok(SearchFilters {
            min_safety_score: self.min_safety,
            max_traffic_score: self.max_traffic,
            min_schools: self.min_schools,
            min_hospitals: self.min_hospitals,
            max_price_per_sqft: self.max_price,
            min_rental_yield: self.min_yield,
            future_growth,
            city: self.city,
            metro_required: self.metro,
            sort_by,
            limit: self.limit,
        })
    }
}

fn emit<T: Serialize>(
    json: bool,
    value: &T,
    table: impl FnOnce(&T) -> comfy_table::Table,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", table(value));
    }
    Ok(())
}

fn load(path: &Path, config: AnalysisConfig) -> anyhow::Result<Analyzer> {
    let store = RecordStore::from_path(path, &config.weights)
        .with_context(|| format!("failed to load dataset from {}", path.display()))?;
    Ok(Analyzer::new(Arc::new(store), Arc::new(config)))
}

fn chat_provider<F>(lookup: F) -> estate_analysis::Result<ChatProvider>
where
    F: Fn(&str) -> Option<String>,
{
    ChatConfig::from_lookup(lookup)
        .and_then(ChatProvider::with_config)
        .map_err(AnalysisError::from)
}

fn insight_service(analyzer: &Analyzer) -> anyhow::Result<InsightService> {
    let provider = chat_provider(|key| std::env::var(key).ok())?;
    Ok(InsightService::with_default_prompts(
        Arc::new(provider),
        analyzer.config().insight.clone(),
    )?)
}

fn write_report(dir: &Path, report: &estate_analysis::AnalysisReport) -> anyhow::Result<PathBuf> {
    let path = dir.join(report.file_name());
    let body = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

async fn run(cli: Cli, analyzer: Analyzer) -> anyhow::Result<()> {
    let json = cli.json;
    match cli.command {
        Commands::Locations { city } => {
            emit(json, &analyzer.locations(city.as_deref()), render::listing)
        }
        Commands::Lookup { location } => emit(json, &analyzer.profile(&location)?, render::profile),
        Commands::Analyze { location, amount } => emit(
            json,
            &analyzer.analyze_investment(&location, amount)?,
            render::investment,
        ),
        Commands::Compare { locations } => {
            let result = analyzer.compare(&locations)?;
            if !result.unresolved.is_empty() {
                eprintln!("Skipped: {}", result.unresolved.join(", "));
            }
            emit(json, &result, render::comparison)
        }
        Commands::Top {
            criteria,
            limit,
            budget,
            city,
        } => {
            let mut query = analyzer.top_query(criteria.parse::<RankCriteria>()?);
            if let Some(limit) = limit {
                query.limit = limit;
            }
            if let Some(budget) = budget {
                query = query.budget_max(budget);
            }
            if let Some(city) = city {
                query = query.city(city);
            }
            emit(json, &analyzer.top(&query)?, render::top)
        }
        Commands::Search(args) => emit(json, &analyzer.search(&args.filters()?)?, render::search),
        Commands::Market { city } => {
            emit(json, &analyzer.market_trends(city.as_deref())?, render::market)
        }
        Commands::Stats => emit(json, &analyzer.statistics()?, render::statistics),
        Commands::Report {
            location,
            amount,
            output,
        } => {
            let report = analyzer.report(&location, amount)?;
            let path = write_report(&output, &report)?;
            info!(path = %path.display(), "Report written");
            println!("{}", path.display());
            Ok(())
        }
        Commands::Ai {
            location,
            focus,
            custom,
        } => {
            let service = insight_service(&analyzer)?;
            let kind = custom.map_or_else(|| PromptKind::parse(&focus), PromptKind::Custom);
            let scorecard = service.scorecard(analyzer.resolve(&location)?, kind).await?;
            debug!(stats = ?service.stats(), "Insight call finished");
            if json {
                println!("{}", serde_json::to_string_pretty(&scorecard)?);
            } else {
                println!("{}", scorecard.analysis);
            }
            Ok(())
        }
        Commands::AiCompare { locations } => {
            let service = insight_service(&analyzer)?;
            let selected = analyzer.resolve_distinct(&locations)?;
            print_text(json, &service.comparative(&selected).await?)
        }
        Commands::AiMarket { city } => {
            let service = insight_service(&analyzer)?;
            print_text(json, &service.market_insights(city.as_deref()).await?)
        }
        Commands::AiStrategy { budget, goals } => {
            let service = insight_service(&analyzer)?;
            print_text(json, &service.investment_strategy(budget, &goals).await?)
        }
    }
}

fn print_text(json: bool, text: &str) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::json!({ "analysis": text }));
    } else {
        println!("{text}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = EnvConfig::from_env();
    if env.is_production() {
        estate_utils::init_json_tracing("warn,estate_analysis=info");
    } else {
        estate_utils::init_tracing("warn,estate_analysis=info");
    }

    let cli = Cli::parse();
    let config = AnalysisConfig::builder().with_env().build()?;
    let data_path = cli.data.clone().unwrap_or(env.data_path);

    info!(app = %env.app_name, environment = %env.environment, "Starting estate");
    let analyzer = load(&data_path, config)?;
    run(cli, analyzer).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["estate", "top", "--criteria", "safety", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Top { ref criteria, .. } if criteria == "safety"));
    }

    #[test]
    fn test_search_args_to_filters() {
        let cli = Cli::try_parse_from([
            "estate", "search", "--min-safety", "8", "--growth", "Any", "--sort-by", "price",
            "--metro",
        ])
        .unwrap();
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        let filters = args.filters().unwrap();
        assert_eq!(filters.min_safety_score, Some(8.0));
        assert_eq!(filters.future_growth, None);
        assert_eq!(filters.sort_by, Some(Attribute::Price));
        assert!(filters.metro_required);
    }

    #[test]
    fn test_search_args_reject_unknown_growth() {
        let cli = Cli::try_parse_from(["estate", "search", "--growth", "Explosive"]).unwrap();
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert!(args.filters().is_err());
    }

    #[test]
    fn test_missing_api_key_is_collaborator_error() {
        let err = chat_provider(|_| None).err().unwrap();
        match err {
            AnalysisError::CollaboratorUnavailable { reason } => {
                assert!(reason.contains("DEEPSEEK_API_KEY"));
            }
            other => panic!("Expected CollaboratorUnavailable, got {other:?}"),
        }

        let blank = chat_provider(|key| (key == "DEEPSEEK_API_KEY").then(|| "  ".to_string()));
        assert!(matches!(
            blank,
            Err(AnalysisError::CollaboratorUnavailable { .. })
        ));
    }

    #[test]
    fn test_write_report() {
        let json = r#"[
            { "location": "Bopal, Ahmedabad", "city": "Ahmedabad", "area": "Bopal",
              "safety_score": 8.0, "traffic_score": 5.0, "investment_score": 8.0,
              "avg_price_per_sqft": 4800, "rental_yield": 3.8, "appreciation_rate": 12.0,
              "schools": 12, "hospitals": 5, "future_growth": "High" }
        ]"#;
        let config = AnalysisConfig::default();
        let store = RecordStore::from_json_str(json, &config.weights).unwrap();
        let analyzer = Analyzer::new(Arc::new(store), Arc::new(config));
        let report = analyzer.report("bopal", None).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = write_report(dir.path(), &report).unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("analysis_report_"));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["report_metadata"]["report_version"], "1.0");
        assert_eq!(written["investment_analysis"]["location"], "Bopal, Ahmedabad");
    }
}
