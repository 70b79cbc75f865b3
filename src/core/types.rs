use serde::Serialize;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionMode {
    #[default]
    Absolute,
    Percent,
}

impl ContributionMode {
    pub fn toggled(self) -> Self {
        match self {
            ContributionMode::Absolute => ContributionMode::Percent,
            ContributionMode::Percent => ContributionMode::Absolute,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetMode {
    #[default]
    Absolute,
    Percent,
}

impl BudgetMode {
    pub fn toggled(self) -> Self {
        match self {
            BudgetMode::Absolute => BudgetMode::Percent,
            BudgetMode::Percent => BudgetMode::Absolute,
        }
    }
}

/// Raw calculator fields as entered. Rates are whole percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorForm {
    pub current_age: String,
    pub retirement_age: String,
    pub life_expectancy: String,
    pub annual_income: String,
    pub current_savings: String,
    /// Monthly currency amount, or a percentage of salary in percent mode.
    pub monthly_contribution: String,
    pub monthly_budget: String,
    pub other_monthly_income: String,
    pub contribution_mode: ContributionMode,
    pub budget_mode: BudgetMode,
    /// Monthly amount that a percent-mode budget is a percentage of.
    pub budget_percent_base: Option<String>,
    pub pre_retirement_rate: String,
    pub post_retirement_rate: String,
    pub inflation_rate: String,
    pub income_growth_rate: String,
}

impl Default for CalculatorForm {
    fn default() -> Self {
        Self {
            current_age: "35".to_string(),
            retirement_age: "67".to_string(),
            life_expectancy: "95".to_string(),
            annual_income: "60000".to_string(),
            current_savings: "30000".to_string(),
            monthly_contribution: "500".to_string(),
            monthly_budget: "2561".to_string(),
            other_monthly_income: "0".to_string(),
            contribution_mode: ContributionMode::Absolute,
            budget_mode: BudgetMode::Absolute,
            budget_percent_base: None,
            pre_retirement_rate: "6".to_string(),
            post_retirement_rate: "5".to_string(),
            inflation_rate: "3".to_string(),
            income_growth_rate: "2".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalculatorInputs {
    pub current_age: i32,
    pub retirement_age: i32,
    pub life_expectancy: i32,
    pub annual_income: f64,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub contribution_mode: ContributionMode,
    pub monthly_budget: f64,
    pub other_monthly_income: f64,
    pub pre_retirement_rate: f64,
    pub post_retirement_rate: f64,
    pub inflation_rate: f64,
    pub income_growth_rate: f64,
}

impl CalculatorInputs {
    pub fn years_until_retirement(&self) -> i32 {
        self.retirement_age.saturating_sub(self.current_age)
    }

    pub fn years_in_retirement(&self) -> i32 {
        self.life_expectancy.saturating_sub(self.retirement_age)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBalance {
    pub age: i32,
    pub current_balance: f64,
    pub recommended_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub corpus_needed: f64,
    pub corpus_have_at_retirement: f64,
    pub required_monthly_contribution: f64,
    pub current_monthly_contribution: f64,
    pub run_out_age_current: i32,
    pub run_out_age_recommended: i32,
    pub yearly_series: Vec<YearBalance>,
}
