use super::engine::floor_at_zero;
use super::types::CalculatorInputs;

#[derive(Debug, Clone, Copy)]
pub struct ShortfallPlan {
    pub annual_today: f64,
    pub annual_at_retirement: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ContributionSolve {
    pub future_value_of_savings: f64,
    pub gap: f64,
    pub accumulation_factor: f64,
    pub required_annual: f64,
}

pub fn shortfall_plan(inputs: &CalculatorInputs) -> ShortfallPlan {
    let monthly_today = floor_at_zero(inputs.monthly_budget - inputs.other_monthly_income);
    let annual_today = monthly_today * 12.0;
    let annual_at_retirement =
        annual_today * (1.0 + inputs.inflation_rate).powf(inputs.years_until_retirement() as f64);
    ShortfallPlan {
        annual_today,
        annual_at_retirement,
    }
}

pub fn solve_corpus(
    annual_at_retirement: f64,
    years_post: i32,
    inflation_rate: f64,
    post_retirement_rate: f64,
) -> f64 {
    let mut balance = 0.0;
    for i in 0..years_post.max(0) {
        let payout = annual_at_retirement * (1.0 + inflation_rate).powf((years_post - 1 - i) as f64);
        balance = (balance + payout) / (1.0 + post_retirement_rate);
    }
    balance
}

pub fn accumulation_factor(years_pre: i32, pre_retirement_rate: f64, income_growth_rate: f64) -> f64 {
    let mut factor = 0.0;
    for k in 0..years_pre.max(0) {
        factor += (1.0 + income_growth_rate).powf(k as f64)
            * (1.0 + pre_retirement_rate).powf((years_pre - 1 - k) as f64);
    }
    factor
}

pub fn solve_contribution(inputs: &CalculatorInputs, corpus: f64) -> ContributionSolve {
    let years_pre = inputs.years_until_retirement();
    let future_value_of_savings =
        inputs.current_savings * (1.0 + inputs.pre_retirement_rate).powf(years_pre as f64);
    let gap = corpus - future_value_of_savings;
    let factor = accumulation_factor(
        years_pre,
        inputs.pre_retirement_rate,
        inputs.income_growth_rate,
    );
    let required_annual = if factor > 0.0 { gap / factor } else { 0.0 };

    ContributionSolve {
        future_value_of_savings,
        gap,
        accumulation_factor: factor,
        required_annual,
    }
}
