mod assist;
mod engine;
mod solver;
mod types;
mod validation;

pub use assist::{
    CollegePlan, InvestmentStrategy, LifestyleAnswers, TravelStyle, apply_lifestyle_answers,
    apply_smart_budget, equivalent_contribution_percent, equivalent_monthly_contribution,
    suggested_monthly_budget,
};
pub use engine::{project, project_form};
pub use solver::{
    ContributionSolve, ShortfallPlan, accumulation_factor, shortfall_plan, solve_contribution,
    solve_corpus,
};
pub use types::{
    BudgetMode, CalculatorForm, CalculatorInputs, ContributionMode, ProjectionResult, YearBalance,
};
pub use validation::{MAX_AGE, ValidationError, validate};
