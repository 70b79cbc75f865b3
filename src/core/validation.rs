use thiserror::Error;
use tracing::debug;

use super::types::{BudgetMode, CalculatorForm, CalculatorInputs};

pub const MAX_AGE: i32 = 150;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },
    #[error("{field} must be a whole number of years, got {value:?}")]
    FractionalAge { field: &'static str, value: String },
    #[error("{field} must be between 0 and {max}, got {value:?}", max = MAX_AGE)]
    AgeOutOfRange { field: &'static str, value: String },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NotANumber { field, .. } => field,
            ValidationError::FractionalAge { field, .. } => field,
            ValidationError::AgeOutOfRange { field, .. } => field,
        }
    }
}

/// Only ages, income and savings are required; other fields fall back to `NaN`.
pub fn validate(form: &CalculatorForm) -> Result<CalculatorInputs, ValidationError> {
    let current_age = required_age("currentAge", &form.current_age)?;
    let retirement_age = required_age("retirementAge", &form.retirement_age)?;
    let life_expectancy = required_age("lifeExpectancy", &form.life_expectancy)?;
    let annual_income = required_number("annualIncome", &form.annual_income)?;
    let current_savings = required_number("currentSavings", &form.current_savings)?;

    Ok(CalculatorInputs {
        current_age,
        retirement_age,
        life_expectancy,
        annual_income,
        current_savings,
        monthly_contribution: parse_number(&form.monthly_contribution),
        contribution_mode: form.contribution_mode,
        monthly_budget: resolve_monthly_budget(form),
        other_monthly_income: parse_number(&form.other_monthly_income),
        pre_retirement_rate: parse_number(&form.pre_retirement_rate) / 100.0,
        post_retirement_rate: parse_number(&form.post_retirement_rate) / 100.0,
        inflation_rate: parse_number(&form.inflation_rate) / 100.0,
        income_growth_rate: parse_number(&form.income_growth_rate) / 100.0,
    })
}

pub(crate) fn parse_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn required_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let value = parse_number(raw);
    if value.is_nan() {
        return Err(ValidationError::NotANumber {
            field,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

fn required_age(field: &'static str, raw: &str) -> Result<i32, ValidationError> {
    let value = required_number(field, raw)?;
    if !(0.0..=MAX_AGE as f64).contains(&value) {
        return Err(ValidationError::AgeOutOfRange {
            field,
            value: raw.to_string(),
        });
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::FractionalAge {
            field,
            value: raw.to_string(),
        });
    }
    Ok(value as i32)
}

fn resolve_monthly_budget(form: &CalculatorForm) -> f64 {
    let budget = parse_number(&form.monthly_budget);
    match (form.budget_mode, form.budget_percent_base.as_deref()) {
        (BudgetMode::Absolute, _) => budget,
        (BudgetMode::Percent, Some(base)) => parse_number(base) * (budget / 100.0),
        (BudgetMode::Percent, None) => {
            debug!(
                budget,
                "percent budget without a base amount; using the value as currency"
            );
            budget
        }
    }
}
