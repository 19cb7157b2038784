use axum::{
    Router,
    extract::{Json, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::core::{
    CapitalGrowthRow, ComparisonPoint, DEFAULT_DELAY_STEP_YEARS, DEFAULT_MAX_YEARS,
    DelayCostResult, FUNDS, Fund, MAX_AGE, Strategy, StrategySummary, StrategyTarget,
    calculate_capital_growth, calculate_delay_data_list, generate_what_if_scenarios,
    next_strategy_name, prepare_growth_data, summarize_rows,
};
use crate::error::ApiError;

const DEFAULT_NAME_PREFIX: &str = "Strategy";

#[derive(Parser, Debug)]
#[command(
    name = "nestegg",
    about = "Investment growth projections: yearly capital, delay cost and what-if scenarios"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON API.
    Serve(ServeArgs),
    /// Project a single strategy and print the result as JSON.
    Project(ProjectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "NESTEGG_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,
    #[arg(long, env = "NESTEGG_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl ServeArgs {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Report {
    Projection,
    DelayCost,
    WhatIf,
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(long, value_enum, default_value_t = Report::Projection)]
    pub report: Report,
    #[arg(long, default_value = "Strategy 1")]
    pub name: String,
    #[arg(long, default_value_t = 30)]
    pub current_age: u32,
    #[arg(long, default_value_t = 65)]
    pub goal_age: u32,
    #[arg(long, default_value_t = 10_000.0)]
    pub initial_amount: f64,
    #[arg(
        long,
        default_value_t = 500.0,
        help = "Monthly contribution; ignored when --goal is set"
    )]
    pub monthly_contribution: f64,
    #[arg(long, default_value = "SPX", help = "Fund id from the catalog, e.g. SPX")]
    pub fund: String,
    #[arg(long, default_value_t = 3.0, help = "Annual inflation in percent, e.g. 3")]
    pub inflation_rate: f64,
    #[arg(long, default_value_t = 13.0, help = "Tax on yearly gains in percent, e.g. 13")]
    pub tax_rate: f64,
    #[arg(long, help = "Target capital; makes the strategy goal-based")]
    pub goal: Option<f64>,
    #[arg(long, help = "Grow the goal with inflation when deriving contributions")]
    pub adjust_goal_for_inflation: bool,
    #[arg(long, default_value_t = DEFAULT_MAX_YEARS)]
    pub max_years: u32,
    #[arg(long, default_value_t = DEFAULT_DELAY_STEP_YEARS)]
    pub delay_step_years: u32,
    #[arg(long)]
    pub max_delay_years: Option<u32>,
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionPayload {
    strategy: Strategy,
    #[serde(default)]
    max_years: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DelayCostPayload {
    strategy: Strategy,
    #[serde(default)]
    step_years: Option<u32>,
    #[serde(default)]
    max_delay_years: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct WhatIfPayload {
    strategy: Strategy,
}

#[derive(Debug, Deserialize)]
struct ComparisonPayload {
    strategies: Vec<Strategy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DefaultStrategyPayload {
    name: Option<String>,
    prefix: Option<String>,
    existing_names: Vec<String>,
}

#[derive(Debug, Serialize)]
struct FundsResponse {
    funds: &'static [Fund],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    rows: Vec<CapitalGrowthRow>,
    summary: Option<StrategySummary>,
}

#[derive(Debug, Serialize)]
struct DelayCostResponse {
    results: Vec<DelayCostResult>,
}

#[derive(Debug, Serialize)]
struct ComparisonResponse {
    points: Vec<ComparisonPoint>,
}

/// Turns CLI flags into a validated strategy. Rates stay in percent, the
/// unit `Strategy` stores them in.
fn build_strategy(args: &ProjectArgs) -> Result<Strategy, ApiError> {
    if args.max_years == 0 {
        return Err(ApiError::BadRequest("--max-years must be > 0".to_string()));
    }
    if args.delay_step_years == 0 {
        return Err(ApiError::BadRequest(
            "--delay-step-years must be > 0".to_string(),
        ));
    }
    if args.max_delay_years.is_some_and(|years| years > MAX_AGE) {
        return Err(ApiError::BadRequest(format!(
            "--max-delay-years must be <= {MAX_AGE}"
        )));
    }
    if args.adjust_goal_for_inflation && args.goal.is_none() {
        return Err(ApiError::BadRequest(
            "--adjust-goal-for-inflation requires --goal".to_string(),
        ));
    }

    let mut strategy = Strategy::with_defaults(args.name.clone());
    strategy.current_age = args.current_age;
    strategy.goal_age = args.goal_age;
    strategy.initial_amount = args.initial_amount;
    strategy.selected_fund = args.fund.to_uppercase();
    strategy.inflation_rate = args.inflation_rate;
    strategy.tax_rate = args.tax_rate;
    match args.goal {
        Some(goal) => {
            strategy.target = StrategyTarget::GoalBased {
                goal,
                adjust_goal_for_inflation: args.adjust_goal_for_inflation,
            };
            strategy.monthly_contribution = 0.0;
        }
        None => strategy.monthly_contribution = args.monthly_contribution,
    }

    strategy.validate()?;
    Ok(strategy)
}

/// Runs the requested report and renders it as JSON.
pub fn run_project(args: &ProjectArgs) -> Result<String, ApiError> {
    let strategy = build_strategy(args)?;
    info!(
        strategy = %strategy.name,
        report = ?args.report,
        goal_based = strategy.is_goal_based(),
        "running projection"
    );

    let json = match args.report {
        Report::Projection => {
            let response = projection(&strategy, args.max_years);
            to_json(&response, args.pretty)?
        }
        Report::DelayCost => {
            let results =
                calculate_delay_data_list(&strategy, args.delay_step_years, args.max_delay_years);
            to_json(&DelayCostResponse { results }, args.pretty)?
        }
        Report::WhatIf => {
            let rows = calculate_capital_growth(&strategy, args.max_years);
            to_json(&generate_what_if_scenarios(&strategy, &rows), args.pretty)?
        }
    };
    Ok(json)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, ApiError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn projection(strategy: &Strategy, max_years: u32) -> ProjectionResponse {
    let rows = calculate_capital_growth(strategy, max_years);
    let summary = summarize_rows(strategy, &rows);
    ProjectionResponse { rows, summary }
}

pub fn router() -> Router {
    Router::new()
        .route("/api/funds", get(funds_handler))
        .route("/api/projection", post(projection_handler))
        .route("/api/delay-cost", post(delay_cost_handler))
        .route("/api/what-if", post(what_if_handler))
        .route("/api/comparison", post(comparison_handler))
        .route("/api/strategies/default", post(default_strategy_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "nestegg HTTP API listening");

    axum::serve(listener, router()).await
}

async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

async fn funds_handler() -> Response {
    json_response(StatusCode::OK, FundsResponse { funds: &FUNDS })
}

async fn projection_handler(
    payload: Result<Json<ProjectionPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload.map_err(bad_json)?;
    payload.strategy.validate()?;
    let max_years = match payload.max_years {
        Some(0) => return Err(ApiError::BadRequest("maxYears must be > 0".to_string())),
        Some(years) => years,
        None => DEFAULT_MAX_YEARS,
    };

    let response = projection(&payload.strategy, max_years);
    debug!(strategy = %payload.strategy.id, rows = response.rows.len(), "projection");
    Ok(json_response(StatusCode::OK, response))
}

async fn delay_cost_handler(
    payload: Result<Json<DelayCostPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload.map_err(bad_json)?;
    payload.strategy.validate()?;
    let step_years = payload.step_years.unwrap_or(DEFAULT_DELAY_STEP_YEARS);
    if step_years == 0 {
        return Err(ApiError::BadRequest("stepYears must be > 0".to_string()));
    }
    if payload.max_delay_years.is_some_and(|years| years > MAX_AGE) {
        return Err(ApiError::BadRequest(format!(
            "maxDelayYears must be <= {MAX_AGE}"
        )));
    }

    let results = calculate_delay_data_list(&payload.strategy, step_years, payload.max_delay_years);
    Ok(json_response(StatusCode::OK, DelayCostResponse { results }))
}

async fn what_if_handler(
    payload: Result<Json<WhatIfPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload.map_err(bad_json)?;
    payload.strategy.validate()?;

    let rows = calculate_capital_growth(&payload.strategy, DEFAULT_MAX_YEARS);
    let report = generate_what_if_scenarios(&payload.strategy, &rows);
    Ok(json_response(StatusCode::OK, report))
}

async fn comparison_handler(
    payload: Result<Json<ComparisonPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload.map_err(bad_json)?;
    for strategy in &payload.strategies {
        strategy.validate()?;
    }

    let points = prepare_growth_data(&payload.strategies);
    Ok(json_response(StatusCode::OK, ComparisonResponse { points }))
}

async fn default_strategy_handler(
    payload: Result<Json<DefaultStrategyPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload.map_err(bad_json)?;
    let name = payload.name.unwrap_or_else(|| {
        let prefix = payload.prefix.as_deref().unwrap_or(DEFAULT_NAME_PREFIX);
        next_strategy_name(payload.existing_names.as_slice(), prefix)
    });
    Ok(json_response(StatusCode::OK, Strategy::with_defaults(name)))
}

fn bad_json(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(format!("Invalid JSON payload: {}", rejection.body_text()))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
