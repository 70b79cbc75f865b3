use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    BudgetMode, CalculatorForm, CollegePlan, ContributionMode, InvestmentStrategy,
    LifestyleAnswers, ProjectionResult, TravelStyle, ValidationError, apply_lifestyle_answers,
    apply_smart_budget, project_form,
};

const MAX_KIDS: u32 = 20;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliContributionMode {
    Absolute,
    Percent,
}

impl From<CliContributionMode> for ContributionMode {
    fn from(value: CliContributionMode) -> Self {
        match value {
            CliContributionMode::Absolute => ContributionMode::Absolute,
            CliContributionMode::Percent => ContributionMode::Percent,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliBudgetMode {
    Absolute,
    Percent,
}

impl From<CliBudgetMode> for BudgetMode {
    fn from(value: CliBudgetMode) -> Self {
        match value {
            CliBudgetMode::Absolute => BudgetMode::Absolute,
            CliBudgetMode::Percent => BudgetMode::Percent,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliInvestmentStrategy {
    Conservative,
    Moderate,
    Aggressive,
}

impl From<CliInvestmentStrategy> for InvestmentStrategy {
    fn from(value: CliInvestmentStrategy) -> Self {
        match value {
            CliInvestmentStrategy::Conservative => InvestmentStrategy::Conservative,
            CliInvestmentStrategy::Moderate => InvestmentStrategy::Moderate,
            CliInvestmentStrategy::Aggressive => InvestmentStrategy::Aggressive,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliCollegePlan {
    No,
    Partial,
    Full,
}

impl From<CliCollegePlan> for CollegePlan {
    fn from(value: CliCollegePlan) -> Self {
        match value {
            CliCollegePlan::No => CollegePlan::No,
            CliCollegePlan::Partial => CollegePlan::Partial,
            CliCollegePlan::Full => CollegePlan::Full,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliTravelStyle {
    Low,
    Moderate,
    High,
}

impl From<CliTravelStyle> for TravelStyle {
    fn from(value: CliTravelStyle) -> Self {
        match value {
            CliTravelStyle::Low => TravelStyle::Low,
            CliTravelStyle::Moderate => TravelStyle::Moderate,
            CliTravelStyle::High => TravelStyle::High,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
enum ApiContributionMode {
    #[serde(rename = "$", alias = "absolute", alias = "currency")]
    Absolute,
    #[serde(rename = "%", alias = "percent")]
    Percent,
}

impl From<ApiContributionMode> for ContributionMode {
    fn from(value: ApiContributionMode) -> Self {
        match value {
            ApiContributionMode::Absolute => ContributionMode::Absolute,
            ApiContributionMode::Percent => ContributionMode::Percent,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
enum ApiBudgetMode {
    #[serde(rename = "$", alias = "absolute", alias = "currency")]
    Absolute,
    #[serde(rename = "%", alias = "percent")]
    Percent,
}

impl From<ApiBudgetMode> for BudgetMode {
    fn from(value: ApiBudgetMode) -> Self {
        match value {
            ApiBudgetMode::Absolute => BudgetMode::Absolute,
            ApiBudgetMode::Percent => BudgetMode::Percent,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiInvestmentStrategy {
    Conservative,
    Moderate,
    Aggressive,
}

impl From<ApiInvestmentStrategy> for InvestmentStrategy {
    fn from(value: ApiInvestmentStrategy) -> Self {
        match value {
            ApiInvestmentStrategy::Conservative => InvestmentStrategy::Conservative,
            ApiInvestmentStrategy::Moderate => InvestmentStrategy::Moderate,
            ApiInvestmentStrategy::Aggressive => InvestmentStrategy::Aggressive,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiCollegePlan {
    #[serde(alias = "none")]
    No,
    Partial,
    Full,
}

impl From<ApiCollegePlan> for CollegePlan {
    fn from(value: ApiCollegePlan) -> Self {
        match value {
            ApiCollegePlan::No => CollegePlan::No,
            ApiCollegePlan::Partial => CollegePlan::Partial,
            ApiCollegePlan::Full => CollegePlan::Full,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiTravelStyle {
    Low,
    Moderate,
    High,
}

impl From<ApiTravelStyle> for TravelStyle {
    fn from(value: ApiTravelStyle) -> Self {
        match value {
            ApiTravelStyle::Low => TravelStyle::Low,
            ApiTravelStyle::Moderate => TravelStyle::Moderate,
            ApiTravelStyle::High => TravelStyle::High,
        }
    }
}

/// A form field sent either as a JSON number or as raw text. Text keeps blank
/// and malformed entries distinguishable from zero.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            FieldValue::Number(v) => v.to_string(),
            FieldValue::Text(s) => s,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    current_age: Option<FieldValue>,
    retirement_age: Option<FieldValue>,
    life_expectancy: Option<FieldValue>,
    #[serde(alias = "income")]
    annual_income: Option<FieldValue>,
    #[serde(alias = "savings")]
    current_savings: Option<FieldValue>,
    #[serde(alias = "contributions")]
    monthly_contribution: Option<FieldValue>,
    contribution_mode: Option<ApiContributionMode>,
    #[serde(alias = "budget")]
    monthly_budget: Option<FieldValue>,
    budget_mode: Option<ApiBudgetMode>,
    budget_percent_base: Option<FieldValue>,
    #[serde(alias = "otherIncome")]
    other_monthly_income: Option<FieldValue>,
    #[serde(alias = "preRetireRate")]
    pre_retirement_rate: Option<FieldValue>,
    #[serde(alias = "postRetireRate")]
    post_retirement_rate: Option<FieldValue>,
    #[serde(alias = "inflation")]
    inflation_rate: Option<FieldValue>,
    #[serde(alias = "incomeIncrease")]
    income_growth_rate: Option<FieldValue>,

    strategy: Option<ApiInvestmentStrategy>,
    smart_budget: Option<bool>,
    kids: Option<u32>,
    college: Option<ApiCollegePlan>,
    travel: Option<ApiTravelStyle>,
}

#[derive(Parser, Debug)]
#[command(
    name = "nestegg",
    about = "Deterministic retirement projection: corpus needed, required contribution and yearly balances"
)]
struct Cli {
    #[arg(long, default_value = "35")]
    current_age: String,
    #[arg(long, default_value = "67")]
    retirement_age: String,
    #[arg(long, default_value = "95", help = "Age to fund through")]
    life_expectancy: String,
    #[arg(long, default_value = "60000")]
    annual_income: String,
    #[arg(long, default_value = "30000")]
    current_savings: String,
    #[arg(
        long,
        default_value = "500",
        help = "Monthly contribution; percent of salary when --contribution-mode=percent"
    )]
    monthly_contribution: String,
    #[arg(long, value_enum, default_value_t = CliContributionMode::Absolute)]
    contribution_mode: CliContributionMode,
    #[arg(
        long,
        default_value = "2561",
        help = "Monthly retirement budget in today's money"
    )]
    monthly_budget: String,
    #[arg(long, value_enum, default_value_t = CliBudgetMode::Absolute)]
    budget_mode: CliBudgetMode,
    #[arg(
        long,
        help = "Monthly amount a percent budget applies to; without it percent mode is ignored"
    )]
    budget_percent_base: Option<String>,
    #[arg(long, default_value = "0")]
    other_monthly_income: String,
    #[arg(
        long,
        default_value = "6",
        help = "Expected annual return before retirement in percent"
    )]
    pre_retirement_rate: String,
    #[arg(
        long,
        default_value = "5",
        help = "Expected annual return during retirement in percent"
    )]
    post_retirement_rate: String,
    #[arg(long, default_value = "3", help = "Expected annual inflation in percent")]
    inflation_rate: String,
    #[arg(long, default_value = "2", help = "Annual salary growth in percent")]
    income_growth_rate: String,
    #[arg(
        long,
        value_enum,
        help = "Preset for both return rates, applied over the rate flags"
    )]
    strategy: Option<CliInvestmentStrategy>,
    #[arg(long, help = "Replace the budget with 75% of income")]
    smart_budget: bool,
    #[arg(long, help = "Number of children, for the lifestyle adjustment")]
    kids: Option<u32>,
    #[arg(long, value_enum)]
    college: Option<CliCollegePlan>,
    #[arg(long, value_enum)]
    travel: Option<CliTravelStyle>,
}

#[derive(Copy, Clone, Debug, Default)]
struct AssistOptions {
    strategy: Option<InvestmentStrategy>,
    smart_budget: bool,
    lifestyle: Option<LifestyleAnswers>,
}

#[derive(Debug)]
struct ProjectRequest {
    form: CalculatorForm,
    assists: AssistOptions,
}

impl ProjectRequest {
    fn resolved_form(self) -> CalculatorForm {
        let mut form = self.form;
        if let Some(strategy) = self.assists.strategy {
            strategy.apply(&mut form);
        }
        if self.assists.smart_budget && !apply_smart_budget(&mut form) {
            debug!("smart budget skipped: income does not parse");
        }
        if let Some(answers) = self.assists.lifestyle {
            apply_lifestyle_answers(&mut form, answers);
        }
        form
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    inputs: CalculatorForm,
    result: ProjectionResult,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

fn lifestyle_answers(
    kids: Option<u32>,
    college: Option<CollegePlan>,
    travel: Option<TravelStyle>,
) -> Result<Option<LifestyleAnswers>, String> {
    if kids.is_none() && college.is_none() && travel.is_none() {
        return Ok(None);
    }
    let defaults = LifestyleAnswers::default();
    let kids = kids.unwrap_or(defaults.kids);
    if kids > MAX_KIDS {
        return Err(format!("--kids must be <= {MAX_KIDS}"));
    }
    Ok(Some(LifestyleAnswers {
        kids,
        college: college.unwrap_or(defaults.college),
        travel: travel.unwrap_or(defaults.travel),
    }))
}

fn build_request(cli: Cli) -> Result<ProjectRequest, String> {
    let lifestyle = lifestyle_answers(
        cli.kids,
        cli.college.map(Into::into),
        cli.travel.map(Into::into),
    )?;

    Ok(ProjectRequest {
        form: CalculatorForm {
            current_age: cli.current_age,
            retirement_age: cli.retirement_age,
            life_expectancy: cli.life_expectancy,
            annual_income: cli.annual_income,
            current_savings: cli.current_savings,
            monthly_contribution: cli.monthly_contribution,
            monthly_budget: cli.monthly_budget,
            other_monthly_income: cli.other_monthly_income,
            contribution_mode: cli.contribution_mode.into(),
            budget_mode: cli.budget_mode.into(),
            budget_percent_base: cli.budget_percent_base,
            pre_retirement_rate: cli.pre_retirement_rate,
            post_retirement_rate: cli.post_retirement_rate,
            inflation_rate: cli.inflation_rate,
            income_growth_rate: cli.income_growth_rate,
        },
        assists: AssistOptions {
            strategy: cli.strategy.map(Into::into),
            smart_budget: cli.smart_budget,
            lifestyle,
        },
    })
}

/// Runs a one-shot projection from command-line flags and returns the
/// response JSON. Validation failures come back as the error message.
pub fn run_cli<I, T>(args: I) -> Result<String, String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let form = build_request(cli)?.resolved_form();
    let result = project_form(&form).map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&ProjectResponse {
        inputs: form,
        result,
    })
    .map_err(|e| format!("Failed to serialize projection: {e}"))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/defaults", get(defaults_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "projection API listening");
    info!("Local access: http://127.0.0.1:{port}/api/project");

    axum::serve(listener, app).await
}

async fn defaults_handler() -> Response {
    json_response(StatusCode::OK, CalculatorForm::default())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found", None)
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_handler_impl(payload: ProjectPayload) -> Response {
    debug!(?payload, "projection request");
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg, None),
    };

    let form = request.resolved_form();
    match project_form(&form) {
        Ok(result) => {
            info!(
                corpus_needed = result.corpus_needed,
                required_monthly = result.required_monthly_contribution,
                run_out_current = result.run_out_age_current,
                run_out_recommended = result.run_out_age_recommended,
                "projection computed"
            );
            json_response(
                StatusCode::OK,
                ProjectResponse {
                    inputs: form,
                    result,
                },
            )
        }
        Err(err) => {
            warn!(field = err.field(), "projection aborted: {err}");
            validation_error_response(&err)
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str, field: Option<&'static str>) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
            field,
        },
    )
}

fn validation_error_response(err: &ValidationError) -> Response {
    error_response(StatusCode::BAD_REQUEST, &err.to_string(), Some(err.field()))
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ProjectRequest, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: ProjectPayload) -> Result<ProjectRequest, String> {
    let mut form = CalculatorForm::default();

    if let Some(v) = payload.current_age {
        form.current_age = v.into_text();
    }
    if let Some(v) = payload.retirement_age {
        form.retirement_age = v.into_text();
    }
    if let Some(v) = payload.life_expectancy {
        form.life_expectancy = v.into_text();
    }
    if let Some(v) = payload.annual_income {
        form.annual_income = v.into_text();
    }
    if let Some(v) = payload.current_savings {
        form.current_savings = v.into_text();
    }
    if let Some(v) = payload.monthly_contribution {
        form.monthly_contribution = v.into_text();
    }
    if let Some(v) = payload.contribution_mode {
        form.contribution_mode = v.into();
    }
    if let Some(v) = payload.monthly_budget {
        form.monthly_budget = v.into_text();
    }
    if let Some(v) = payload.budget_mode {
        form.budget_mode = v.into();
    }
    if let Some(v) = payload.budget_percent_base {
        form.budget_percent_base = Some(v.into_text());
    }
    if let Some(v) = payload.other_monthly_income {
        form.other_monthly_income = v.into_text();
    }
    if let Some(v) = payload.pre_retirement_rate {
        form.pre_retirement_rate = v.into_text();
    }
    if let Some(v) = payload.post_retirement_rate {
        form.post_retirement_rate = v.into_text();
    }
    if let Some(v) = payload.inflation_rate {
        form.inflation_rate = v.into_text();
    }
    if let Some(v) = payload.income_growth_rate {
        form.income_growth_rate = v.into_text();
    }

    let lifestyle = lifestyle_answers(
        payload.kids,
        payload.college.map(Into::into),
        payload.travel.map(Into::into),
    )?;

    Ok(ProjectRequest {
        form,
        assists: AssistOptions {
            strategy: payload.strategy.map(Into::into),
            smart_budget: payload.smart_budget.unwrap_or(false),
            lifestyle,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    fn sample_cli() -> Cli {
        Cli::parse_from(["nestegg"])
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    #[test]
    fn cli_defaults_match_default_form() {
        let request = build_request(sample_cli()).expect("defaults are valid");
        assert_eq!(request.form, CalculatorForm::default());
        assert!(request.assists.strategy.is_none());
        assert!(!request.assists.smart_budget);
        assert!(request.assists.lifestyle.is_none());
    }

    #[test]
    fn cli_flags_override_defaults_and_apply_assists() {
        let cli = Cli::parse_from([
            "nestegg",
            "--current-age",
            "40",
            "--contribution-mode",
            "percent",
            "--monthly-contribution",
            "12",
            "--strategy",
            "aggressive",
            "--smart-budget",
            "--kids",
            "1",
            "--travel",
            "low",
        ]);
        let form = build_request(cli).expect("valid").resolved_form();

        assert_eq!(form.current_age, "40");
        assert_eq!(form.contribution_mode, ContributionMode::Percent);
        assert_eq!(form.monthly_contribution, "12");
        assert_eq!(form.pre_retirement_rate, "9");
        assert_eq!(form.post_retirement_rate, "7");
        // 3750 smart budget + 200 travel + 200 family visits
        assert_eq!(form.monthly_budget, "4150");
    }

    #[test]
    fn cli_rejects_too_many_kids() {
        let mut cli = sample_cli();
        cli.kids = Some(MAX_KIDS + 1);
        let err = build_request(cli).expect_err("must reject kid count");
        assert!(err.contains("--kids"));
    }

    #[test]
    fn run_cli_prints_projection_json() {
        let json = run_cli(["nestegg"]).expect("defaults project");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value["result"]["corpusNeeded"], 1_647_500.0);
        assert_eq!(value["result"]["yearlySeries"].as_array().map(Vec::len), Some(61));
        assert_eq!(value["inputs"]["contributionMode"], "absolute");
    }

    #[test]
    fn run_cli_reports_validation_errors() {
        let err = run_cli(["nestegg", "--annual-income", ""]).expect_err("blank income aborts");
        assert!(err.contains("annualIncome"));
    }

    #[test]
    fn api_request_from_json_parses_numbers_text_and_legacy_keys() {
        let json = r#"{
          "currentAge": 40,
          "retirementAge": "65",
          "income": "75000",
          "savings": 12500.5,
          "contributions": 8,
          "contributionMode": "%",
          "budget": 3000,
          "budgetMode": "percent",
          "budgetPercentBase": 5000,
          "otherIncome": "250",
          "preRetireRate": 7,
          "postRetireRate": "4",
          "inflation": 2.5,
          "incomeIncrease": "1"
        }"#;
        let request = api_request_from_json(json).expect("json should parse");
        let form = request.form;

        assert_eq!(form.current_age, "40");
        assert_eq!(form.retirement_age, "65");
        assert_eq!(form.life_expectancy, "95");
        assert_eq!(form.annual_income, "75000");
        assert_eq!(form.current_savings, "12500.5");
        assert_eq!(form.monthly_contribution, "8");
        assert_eq!(form.contribution_mode, ContributionMode::Percent);
        assert_eq!(form.monthly_budget, "3000");
        assert_eq!(form.budget_mode, BudgetMode::Percent);
        assert_eq!(form.budget_percent_base.as_deref(), Some("5000"));
        assert_eq!(form.other_monthly_income, "250");
        assert_eq!(form.pre_retirement_rate, "7");
        assert_eq!(form.post_retirement_rate, "4");
        assert_eq!(form.inflation_rate, "2.5");
        assert_eq!(form.income_growth_rate, "1");
    }

    #[test]
    fn api_request_from_json_parses_assists() {
        let json = r#"{
          "strategy": "conservative",
          "smartBudget": true,
          "kids": 2,
          "college": "partial"
        }"#;
        let request = api_request_from_json(json).expect("json should parse");
        assert_eq!(
            request.assists.strategy,
            Some(InvestmentStrategy::Conservative)
        );
        assert!(request.assists.smart_budget);
        assert_eq!(
            request.assists.lifestyle,
            Some(LifestyleAnswers {
                kids: 2,
                college: CollegePlan::Partial,
                travel: TravelStyle::Moderate,
            })
        );

        let form = request.resolved_form();
        assert_eq!(form.pre_retirement_rate, "4");
        assert_eq!(form.monthly_contribution, "100");
        // 3750 smart budget + 800 travel + 200 family visits
        assert_eq!(form.monthly_budget, "4750");
    }

    #[test]
    fn api_request_rejects_unknown_mode() {
        let err = api_request_from_json(r#"{"contributionMode": "ratio"}"#)
            .expect_err("unknown mode must fail");
        assert!(err.contains("Invalid API JSON payload"));
    }

    #[test]
    fn query_string_keeps_blank_fields_as_text() {
        let uri: Uri = "http://localhost/api/project?currentAge=&contributionMode=percent&kids=1&college=full"
            .parse()
            .expect("valid uri");
        let Query(payload) = Query::<ProjectPayload>::try_from_uri(&uri).expect("query parses");
        let request = api_request_from_payload(payload).expect("valid request");

        assert_eq!(request.form.current_age, "");
        assert_eq!(request.form.contribution_mode, ContributionMode::Percent);
        assert_eq!(
            request.assists.lifestyle.map(|answers| answers.college),
            Some(CollegePlan::Full)
        );
    }

    #[tokio::test]
    async fn project_handler_returns_projection() {
        let payload = serde_json::from_str::<ProjectPayload>(r#"{"currentAge": 35}"#)
            .expect("payload parses");
        let response = project_handler_impl(payload).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );

        let body = body_json(response).await;
        let result = &body["result"];
        assert_eq!(result["corpusNeeded"], 1_647_500.0);
        assert_eq!(result["corpusHaveAtRetirement"], 738_940.0);
        assert_eq!(result["requiredMonthlyContribution"], 1_061.0);
        assert_eq!(result["runOutAgeRecommended"], 95);
        assert_eq!(result["yearlySeries"][0]["age"], 35);
        assert_eq!(result["yearlySeries"][0]["currentBalance"], 30_000.0);
        assert_eq!(body["inputs"]["monthlyBudget"], "2561");
    }

    #[tokio::test]
    async fn project_handler_rejects_blank_current_age() {
        let payload = serde_json::from_str::<ProjectPayload>(r#"{"currentAge": ""}"#)
            .expect("payload parses");
        let response = project_handler_impl(payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["field"], "currentAge");
        assert!(
            body["error"]
                .as_str()
                .is_some_and(|msg| msg.contains("must be a number"))
        );
    }

    #[tokio::test]
    async fn project_handler_rejects_ages_out_of_range() {
        let payload = serde_json::from_str::<ProjectPayload>(
            r#"{"currentAge": -2000000000, "lifeExpectancy": "2000000000"}"#,
        )
        .expect("payload parses");
        let response = project_handler_impl(payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["field"], "currentAge");
        assert!(
            body["error"]
                .as_str()
                .is_some_and(|msg| msg.contains("between 0 and 150"))
        );
    }

    #[tokio::test]
    async fn defaults_handler_serves_default_form() {
        let body = body_json(defaults_handler().await).await;
        assert_eq!(body["currentAge"], "35");
        assert_eq!(body["preRetirementRate"], "6");
        assert_eq!(body["budgetMode"], "absolute");
        assert!(body["budgetPercentBase"].is_null());
    }
}
