use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use asesor_core::domain::contract::{AnswersPayload, ListOrText, MapOrText};

mod report;

#[derive(Debug, Parser)]
#[command(name = "asesor_cli", about = "Score a risk-profile questionnaire and suggest a portfolio")]
struct Args {
    /// Answers JSON document. Use "-" to read from stdin.
    #[arg(long)]
    answers: Option<PathBuf>,

    #[arg(long, allow_hyphen_values = true)]
    horizon: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    income_range: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    savings_percent: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    emergency_months: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    experience_level: Option<String>,

    /// e.g. "-20%"
    #[arg(long, allow_hyphen_values = true)]
    max_annual_drop: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    reaction_to_drop: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    preference_expected_return: Option<String>,

    /// Minimum % redeemable within 1-7 business days (0-100, default 30).
    #[arg(long, allow_hyphen_values = true)]
    liquidity_min_percent: Option<i64>,

    #[arg(long, allow_hyphen_values = true)]
    currency_risk: Option<String>,

    /// Current wealth split as "label:value, label:value".
    #[arg(long)]
    patrimony: Option<String>,

    /// Products already used, comma separated.
    #[arg(long)]
    products: Option<String>,

    /// Print the assessment as JSON instead of a report.
    #[arg(long)]
    json: bool,

    /// Print the accepted options for every scored question and exit.
    #[arg(long)]
    list_options: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = asesor_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if args.list_options {
        print!("{}", report::render_options());
        return Ok(());
    }

    let result = run(args);
    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
    }
    result
}

fn run(args: Args) -> anyhow::Result<()> {
    let payload = match args.answers.as_deref() {
        Some(path) => read_payload(path)?,
        None => AnswersPayload::default(),
    };
    let json = args.json;
    let payload = apply_overrides(payload, args);

    let answers = payload.validate_and_into_answers()?;
    let assessment = asesor_core::scoring::evaluate(&answers);

    tracing::info!(
        score = assessment.score.score,
        label = %assessment.score.label,
        "evaluated risk profile"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        print!("{}", report::render_report(&assessment));
    }
    Ok(())
}

fn read_payload(path: &Path) -> anyhow::Result<AnswersPayload> {
    let raw = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("read answers from stdin failed")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("read answers file {} failed", path.display()))?
    };
    serde_json::from_str(&raw).context("answers document is not valid JSON for the questionnaire")
}

fn apply_overrides(mut payload: AnswersPayload, args: Args) -> AnswersPayload {
    fn set(slot: &mut Option<String>, value: Option<String>) {
        if value.is_some() {
            *slot = value;
        }
    }

    set(&mut payload.horizon, args.horizon);
    set(&mut payload.income_range, args.income_range);
    set(&mut payload.savings_percent, args.savings_percent);
    set(&mut payload.emergency_months, args.emergency_months);
    set(&mut payload.experience_level, args.experience_level);
    set(&mut payload.max_annual_drop, args.max_annual_drop);
    set(&mut payload.reaction_to_drop, args.reaction_to_drop);
    set(&mut payload.preference_expected_return, args.preference_expected_return);
    set(&mut payload.currency_risk, args.currency_risk);

    if let Some(p) = args.liquidity_min_percent {
        payload.liquidity_min_percent = Some(p);
    }
    if let Some(s) = args.patrimony {
        payload.patrimony_distribution = Some(MapOrText::Text(s));
    }
    if let Some(s) = args.products {
        payload.products_used = Some(ListOrText::Text(s));
    }
    payload
}

fn init_sentry(settings: &asesor_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
