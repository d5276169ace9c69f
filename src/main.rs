use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use life_pricing::config::AppConfig;
use life_pricing::error::AppError;
use life_pricing::telemetry;
use life_pricing::underwriting::summary::format_currency;
use life_pricing::underwriting::{
    ApplicantIntake, DatasetStats, EstimateSource, HistoricalDataset, PricingReport,
    PricingResult, RiskScoringEngine,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "life-pricing",
    about = "Score life insurance applicants and explain their premium bands",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score an applicant CSV (default command)
    Score(ScoreArgs),
    /// Summarise the historical outcomes dataset
    History(HistoryArgs),
}

#[derive(Args, Debug, Default)]
struct ScoreArgs {
    /// Applicant CSV to score (defaults to NEW_APPLICANTS_PATH)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Historical outcomes CSV (defaults to HISTORICAL_DATA_PATH)
    #[arg(long, conflicts_with = "no_history")]
    historical: Option<PathBuf>,
    /// Score without cohort comparisons or historical duration estimates
    #[arg(long)]
    no_history: bool,
    /// Date policy tenure is measured against (YYYY-MM-DD, defaults to PRICING_AS_OF or today)
    #[arg(long, value_parser = parse_date)]
    as_of: Option<NaiveDate>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Score only the first N applicant rows
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Args, Debug)]
struct HistoryArgs {
    /// Historical outcomes CSV (defaults to HISTORICAL_DATA_PATH)
    #[arg(long)]
    historical: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct BatchResponse {
    total_customers: usize,
    results: Vec<PricingReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rejected: Vec<RejectedApplicant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct RejectedApplicant {
    row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_id: Option<String>,
    error: String,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Score(ScoreArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Score(args) => run_score(&config, args),
        Command::History(args) => run_history(&config, args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn resolve_historical_path(
    config: &AppConfig,
    explicit: Option<PathBuf>,
    disabled: bool,
) -> Option<PathBuf> {
    if disabled {
        return None;
    }
    explicit.or_else(|| config.data.historical_path().map(PathBuf::from))
}

fn load_history(path: Option<PathBuf>) -> Result<Option<HistoricalDataset>, AppError> {
    match path {
        Some(path) if path.exists() => Ok(Some(HistoricalDataset::from_path(&path)?)),
        Some(path) => {
            warn!(
                path = %path.display(),
                "historical dataset not found, scoring without cohort data"
            );
            Ok(None)
        }
        None => Ok(None),
    }
}

fn run_score(config: &AppConfig, args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        historical,
        no_history,
        as_of,
        format,
        limit,
    } = args;

    let history_path = resolve_historical_path(config, historical, no_history);
    let history = load_history(history_path)?.map(Arc::new);
    let as_of = as_of.unwrap_or_else(|| config.pricing.as_of_or_today());
    let engine = RiskScoringEngine::new(history).with_as_of(as_of);

    let input = input.unwrap_or_else(|| config.data.applicants_path.clone());
    let rows = ApplicantIntake::from_path(&input)?;
    info!(
        path = %input.display(),
        rows = rows.len(),
        %as_of,
        history = engine.history().is_some(),
        "scoring applicants"
    );

    let mut scored = Vec::new();
    let mut rejected = Vec::new();
    for row in rows.into_iter().take(limit.unwrap_or(usize::MAX)) {
        let customer_id = row
            .applicant
            .as_ref()
            .ok()
            .map(|applicant| applicant.customer_id.0.clone());
        match row.applicant.and_then(|applicant| engine.score(&applicant)) {
            Ok(result) => scored.push(result),
            Err(error) => {
                warn!(row = row.row, customer_id = ?customer_id, %error, "applicant rejected");
                rejected.push(RejectedApplicant {
                    row: row.row,
                    customer_id,
                    error: error.to_string(),
                });
            }
        }
    }

    match format {
        OutputFormat::Json => {
            let response = BatchResponse {
                total_customers: scored.len(),
                results: scored.iter().map(PricingResult::to_view).collect(),
                rejected,
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            for result in &scored {
                print!("{}", render_result(result));
            }
            print!("{}", render_rejections(scored.len(), &rejected));
        }
    }

    Ok(())
}

fn run_history(config: &AppConfig, args: HistoryArgs) -> Result<(), AppError> {
    let path = args
        .historical
        .or_else(|| config.data.historical_path().map(PathBuf::from));
    let Some(path) = path else {
        println!("Historical data is disabled (HISTORICAL_DATA_PATH is empty)");
        return Ok(());
    };

    let dataset = HistoricalDataset::from_path(&path)?;
    print!("{}", render_stats(&path, &dataset.stats()));
    Ok(())
}

fn rule(ch: char) -> String {
    ch.to_string().repeat(70)
}

fn percent(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:.1}%", rate * 100.0),
        None => "n/a".to_string(),
    }
}

fn render_result(result: &PricingResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", rule('=')));
    out.push_str(&format!("PROCESSING CUSTOMER: {}\n", result.customer_id()));
    out.push_str(&format!("{}\n\n", rule('=')));

    let mut cumulative = 0.0;
    for (index, step) in result.steps.iter().enumerate() {
        cumulative += step.weighted_score;
        out.push_str(&format!(
            "{}. {} ({})\n",
            index + 1,
            step.factor.label(),
            step.category.label()
        ));
        out.push_str(&format!("   Value: {}\n", step.value));
        out.push_str(&format!("   Risk Contribution: {:.3}\n", step.risk));
        out.push_str(&format!("   Weight: {:.0}%\n", step.weight * 100.0));
        out.push_str(&format!("   Weighted Score: +{:.4}\n", step.weighted_score));
        out.push_str(&format!("   Cumulative Risk: {cumulative:.4}\n"));
        out.push_str(&format!("\n   Explanation: {}\n", step.explanation));
        if let Some(summary) = &step.comparison {
            out.push_str("\n   Supporting Data:\n");
            out.push_str(&format!("     - cohort_size: {}\n", summary.cohort_size));
            out.push_str(&format!("     - avg_risk_score: {:.2}\n", summary.avg_risk_score));
            if let Some(rate) = summary.claim_rate {
                out.push_str(&format!("     - claim_rate: {rate:.2}%\n"));
            }
            if let Some(premium) = summary.avg_premium {
                out.push_str(&format!("     - avg_premium: {}\n", format_currency(premium, 2)));
            }
            if let Some(rate) = summary.chronic_condition_rate {
                out.push_str(&format!("     - chronic_condition_rate: {rate:.2}%\n"));
            }
            if let Some(bmi) = summary.avg_bmi {
                out.push_str(&format!("     - avg_bmi: {bmi:.1}\n"));
            }
        }
        out.push_str(&format!("\n{}\n\n", rule('-')));
    }

    let outlook_source = match result.outlook.source {
        EstimateSource::Cohort {
            tier, cohort_size, ..
        } => format!("cohort of {cohort_size} ({})", tier.label()),
        EstimateSource::ClosedForm => "risk-based approximation".to_string(),
    };

    out.push_str("FINAL RESULTS\n");
    out.push_str(&format!("{}\n", rule('=')));
    out.push_str(&format!("Final Risk Score: {:.4}\n", result.risk_score));
    out.push_str(&format!("Confidence Level: {}\n", result.confidence.label()));
    out.push_str("\nPricing Recommendation:\n");
    out.push_str(&format!("  - Low Boundary:  {}\n", format_currency(result.band.low, 2)));
    out.push_str(&format!(
        "  - Recommended:   {}\n",
        format_currency(result.band.recommended, 2)
    ));
    out.push_str(&format!("  - High Boundary: {}\n", format_currency(result.band.high, 2)));
    out.push_str("\nPolicy Outlook:\n");
    out.push_str(&format!(
        "  - Predicted Duration: {:.1} years\n",
        result.outlook.predicted_duration_years
    ));
    out.push_str(&format!(
        "  - Attrition Likelihood: {:.1}%\n",
        result.outlook.attrition_likelihood * 100.0
    ));
    out.push_str(&format!("  - Based on: {outlook_source}\n"));
    out.push_str(&format!("\n{}\n", rule('=')));
    out.push_str("EXECUTIVE SUMMARY\n");
    out.push_str(&format!("{}\n", rule('=')));
    out.push_str(&result.summary);
    out.push_str("\n\n");
    out
}

fn render_rejections(scored: usize, rejected: &[RejectedApplicant]) -> String {
    let mut out = format!("Scored {scored} applicant(s)");
    if rejected.is_empty() {
        out.push('\n');
        return out;
    }

    out.push_str(&format!(", rejected {}\n", rejected.len()));
    for entry in rejected {
        let id = entry.customer_id.as_deref().unwrap_or("unknown customer");
        out.push_str(&format!("- row {} ({id}): {}\n", entry.row, entry.error));
    }
    out
}

fn render_stats(path: &std::path::Path, stats: &DatasetStats) -> String {
    let mut out = format!("Historical dataset: {}\n", path.display());
    out.push_str(&format!("- Records: {}\n", stats.records));
    out.push_str(&format!("- Acceptance rate: {}\n", percent(stats.acceptance_rate)));
    out.push_str(&format!("- Active rate: {}\n", percent(stats.active_rate)));
    out.push_str(&format!(
        "- Claims filed: {} ({})\n",
        stats.claims_filed,
        percent(stats.claim_rate)
    ));
    out
}
