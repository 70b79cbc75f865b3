use super::solver::{shortfall_plan, solve_contribution, solve_corpus};
use super::types::{
    CalculatorForm, CalculatorInputs, ContributionMode, ProjectionResult, YearBalance,
};
use super::validation::{ValidationError, validate};

// Half a cent.
const DEPLETION_TOLERANCE: f64 = 0.005;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Phase {
    Accumulating,
    DrawingDown { years_retired: i32 },
}

impl Phase {
    fn at(age: i32, retirement_age: i32) -> Self {
        if age >= retirement_age {
            Phase::DrawingDown {
                years_retired: age - retirement_age,
            }
        } else {
            Phase::Accumulating
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ContributionPolicy {
    Level,
    PercentOfSalary { percent: f64 },
    IncomeIndexed,
}

impl ContributionPolicy {
    fn next_contribution(self, contribution: f64, salary: f64, income_growth_rate: f64) -> f64 {
        match self {
            ContributionPolicy::Level => contribution,
            ContributionPolicy::PercentOfSalary { percent } => salary * (percent / 100.0),
            ContributionPolicy::IncomeIndexed => contribution * (1.0 + income_growth_rate),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct MarketAssumptions {
    pre_retirement_rate: f64,
    post_retirement_rate: f64,
    inflation_rate: f64,
    income_growth_rate: f64,
    shortfall_at_retirement: f64,
}

impl MarketAssumptions {
    fn payout(&self, years_retired: i32) -> f64 {
        self.shortfall_at_retirement * (1.0 + self.inflation_rate).powf(years_retired as f64)
    }
}

#[derive(Debug, Clone, Copy)]
struct Scenario {
    balance: f64,
    annual_contribution: f64,
    salary: f64,
    policy: ContributionPolicy,
    run_out_age: Option<i32>,
}

impl Scenario {
    fn new(balance: f64, annual_contribution: f64, salary: f64, policy: ContributionPolicy) -> Self {
        Self {
            balance,
            annual_contribution,
            salary,
            policy,
            run_out_age: None,
        }
    }

    fn step(&mut self, age: i32, phase: Phase, market: &MarketAssumptions) {
        match phase {
            Phase::Accumulating => self.accumulate(market),
            Phase::DrawingDown { years_retired } => {
                self.draw_down(age, market.payout(years_retired), market.post_retirement_rate)
            }
        }
    }

    fn accumulate(&mut self, market: &MarketAssumptions) {
        self.balance = self.balance * (1.0 + market.pre_retirement_rate) + self.annual_contribution;
        self.salary *= 1.0 + market.income_growth_rate;
        self.annual_contribution = self.policy.next_contribution(
            self.annual_contribution,
            self.salary,
            market.income_growth_rate,
        );
    }

    fn draw_down(&mut self, age: i32, payout: f64, post_retirement_rate: f64) {
        // A depleted (or NaN) balance is never stepped again.
        if self.balance.is_nan() || self.balance <= 0.0 {
            return;
        }
        self.balance = self.balance * (1.0 + post_retirement_rate) - payout;
        if self.balance < 0.0 {
            if self.balance < -DEPLETION_TOLERANCE && self.run_out_age.is_none() {
                self.run_out_age = Some(age);
            }
            self.balance = 0.0;
        }
    }
}

pub fn project_form(form: &CalculatorForm) -> Result<ProjectionResult, ValidationError> {
    let inputs = validate(form)?;
    Ok(project(&inputs))
}

pub fn project(inputs: &CalculatorInputs) -> ProjectionResult {
    let shortfall = shortfall_plan(inputs);
    let corpus_needed = solve_corpus(
        shortfall.annual_at_retirement,
        inputs.years_in_retirement(),
        inputs.inflation_rate,
        inputs.post_retirement_rate,
    );
    let contribution = solve_contribution(inputs, corpus_needed);

    let market = MarketAssumptions {
        pre_retirement_rate: inputs.pre_retirement_rate,
        post_retirement_rate: inputs.post_retirement_rate,
        inflation_rate: inputs.inflation_rate,
        income_growth_rate: inputs.income_growth_rate,
        shortfall_at_retirement: shortfall.annual_at_retirement,
    };

    let (current_policy, current_annual) = match inputs.contribution_mode {
        ContributionMode::Absolute => (
            ContributionPolicy::Level,
            inputs.monthly_contribution * 12.0,
        ),
        ContributionMode::Percent => (
            ContributionPolicy::PercentOfSalary {
                percent: inputs.monthly_contribution,
            },
            (inputs.annual_income / 12.0) * (inputs.monthly_contribution / 100.0) * 12.0,
        ),
    };
    let mut current = Scenario::new(
        inputs.current_savings,
        current_annual,
        inputs.annual_income,
        current_policy,
    );
    let mut recommended = Scenario::new(
        inputs.current_savings,
        floor_at_zero(contribution.required_annual),
        inputs.annual_income,
        ContributionPolicy::IncomeIndexed,
    );

    let span =
        (i64::from(inputs.life_expectancy) - i64::from(inputs.current_age) + 1).max(0) as usize;
    let mut yearly_series = Vec::with_capacity(span);
    for age in inputs.current_age..=inputs.life_expectancy {
        yearly_series.push(YearBalance {
            age,
            current_balance: round_currency(current.balance),
            recommended_balance: round_currency(recommended.balance),
        });

        let phase = Phase::at(age, inputs.retirement_age);
        current.step(age, phase, &market);
        recommended.step(age, phase, &market);
    }

    // A NaN balance at retirement reports as zero, like an absent age.
    let corpus_have_at_retirement = yearly_series
        .iter()
        .find(|point| point.age == inputs.retirement_age)
        .map(|point| point.current_balance)
        .filter(|balance| !balance.is_nan())
        .unwrap_or(0.0);

    ProjectionResult {
        corpus_needed: round_currency(corpus_needed),
        corpus_have_at_retirement,
        required_monthly_contribution: round_currency(contribution.required_annual / 12.0),
        current_monthly_contribution: round_currency(current.annual_contribution / 12.0),
        run_out_age_current: current.run_out_age.unwrap_or(inputs.life_expectancy),
        run_out_age_recommended: recommended.run_out_age.unwrap_or(inputs.life_expectancy),
        yearly_series,
    }
}

pub(crate) fn floor_at_zero(value: f64) -> f64 {
    if value.is_nan() { value } else { value.max(0.0) }
}

// Halves round up, NaN passes through.
pub(crate) fn round_currency(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
