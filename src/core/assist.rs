//! Form helpers that nudge inputs before a projection. None of them touch the
//! projection arithmetic; each rewrites fields of a [`CalculatorForm`].

use super::engine::round_currency;
use super::types::CalculatorForm;
use super::validation::parse_number;

/// Share of pre-retirement income assumed to be spent in retirement.
const INCOME_REPLACEMENT_RATE: f64 = 0.75;
const FAMILY_VISIT_MONTHLY_COST: f64 = 200.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InvestmentStrategy {
    Conservative,
    Moderate,
    Aggressive,
}

impl InvestmentStrategy {
    pub fn rates(self) -> (u32, u32) {
        match self {
            InvestmentStrategy::Conservative => (4, 3),
            InvestmentStrategy::Moderate => (7, 5),
            InvestmentStrategy::Aggressive => (9, 7),
        }
    }

    pub fn apply(self, form: &mut CalculatorForm) {
        let (pre, post) = self.rates();
        form.pre_retirement_rate = pre.to_string();
        form.post_retirement_rate = post.to_string();
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum CollegePlan {
    #[default]
    No,
    Partial,
    Full,
}

impl CollegePlan {
    fn monthly_cost_per_child(self) -> f64 {
        match self {
            CollegePlan::No => 0.0,
            CollegePlan::Partial => 200.0,
            CollegePlan::Full => 500.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum TravelStyle {
    Low,
    #[default]
    Moderate,
    High,
}

impl TravelStyle {
    fn monthly_cost(self) -> f64 {
        match self {
            TravelStyle::Low => 200.0,
            TravelStyle::Moderate => 800.0,
            TravelStyle::High => 2_500.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct LifestyleAnswers {
    pub kids: u32,
    pub college: CollegePlan,
    pub travel: TravelStyle,
}

pub fn suggested_monthly_budget(annual_income: f64) -> f64 {
    round_currency(annual_income * INCOME_REPLACEMENT_RATE / 12.0)
}

/// Replaces the budget with the replacement-rate suggestion. Returns `false`
/// and leaves the form alone when income does not parse.
pub fn apply_smart_budget(form: &mut CalculatorForm) -> bool {
    let income = parse_number(&form.annual_income);
    if income.is_nan() {
        return false;
    }
    form.monthly_budget = format_amount(suggested_monthly_budget(income));
    true
}

pub fn apply_lifestyle_answers(form: &mut CalculatorForm, answers: LifestyleAnswers) {
    let per_child = answers.college.monthly_cost_per_child();
    if per_child > 0.0 {
        let contribution = parse_number(&form.monthly_contribution);
        if !contribution.is_nan() {
            let reduced = (contribution - answers.kids as f64 * per_child).max(0.0);
            form.monthly_contribution = format_amount(reduced);
        }
    }

    let budget = parse_number(&form.monthly_budget);
    if !budget.is_nan() {
        let mut extra = answers.travel.monthly_cost();
        if answers.kids > 0 {
            extra += FAMILY_VISIT_MONTHLY_COST;
        }
        form.monthly_budget = format_amount(round_currency(budget + extra));
    }
}

pub fn equivalent_contribution_percent(monthly_amount: f64, annual_income: f64) -> f64 {
    monthly_amount * 12.0 * 100.0 / annual_income
}

pub fn equivalent_monthly_contribution(percent: f64, annual_income: f64) -> f64 {
    (annual_income / 12.0) * (percent / 100.0)
}

fn format_amount(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smart_budget_uses_three_quarters_of_income() {
        assert_eq!(suggested_monthly_budget(60_000.0), 3_750.0);
        assert_eq!(suggested_monthly_budget(50_001.0), 3_125.0);

        let mut form = CalculatorForm::default();
        assert!(apply_smart_budget(&mut form));
        assert_eq!(form.monthly_budget, "3750");
    }

    #[test]
    fn smart_budget_skips_unparseable_income() {
        let mut form = CalculatorForm::default();
        form.annual_income = "lots".to_string();
        assert!(!apply_smart_budget(&mut form));
        assert_eq!(form.monthly_budget, "2561");
    }

    #[test]
    fn strategies_set_both_return_rates() {
        let mut form = CalculatorForm::default();
        InvestmentStrategy::Conservative.apply(&mut form);
        assert_eq!(form.pre_retirement_rate, "4");
        assert_eq!(form.post_retirement_rate, "3");

        InvestmentStrategy::Aggressive.apply(&mut form);
        assert_eq!(
            (form.pre_retirement_rate.as_str(), form.post_retirement_rate.as_str()),
            ("9", "7")
        );
        assert_eq!(InvestmentStrategy::Moderate.rates(), (7, 5));
    }

    #[test]
    fn full_college_cuts_contribution_per_child_and_floors_at_zero() {
        let mut form = CalculatorForm::default();
        form.monthly_contribution = "1200".to_string();
        apply_lifestyle_answers(
            &mut form,
            LifestyleAnswers {
                kids: 2,
                college: CollegePlan::Full,
                travel: TravelStyle::Low,
            },
        );
        assert_eq!(form.monthly_contribution, "200");
        // 2561 + 200 travel + 200 family visits
        assert_eq!(form.monthly_budget, "2961");

        apply_lifestyle_answers(
            &mut form,
            LifestyleAnswers {
                kids: 3,
                college: CollegePlan::Partial,
                travel: TravelStyle::High,
            },
        );
        assert_eq!(form.monthly_contribution, "0");
        assert_eq!(form.monthly_budget, "5661");
    }

    #[test]
    fn default_answers_only_add_moderate_travel() {
        let mut form = CalculatorForm::default();
        apply_lifestyle_answers(&mut form, LifestyleAnswers::default());
        assert_eq!(form.monthly_contribution, "500");
        assert_eq!(form.monthly_budget, "3361");
    }

    #[test]
    fn lifestyle_rounds_fractional_budget() {
        let mut form = CalculatorForm::default();
        form.monthly_budget = "1000.5".to_string();
        apply_lifestyle_answers(&mut form, LifestyleAnswers::default());
        assert_eq!(form.monthly_budget, "1801");
    }

    #[test]
    fn lifestyle_leaves_unparseable_fields_alone() {
        let mut form = CalculatorForm::default();
        form.monthly_contribution = String::new();
        form.monthly_budget = "?".to_string();
        apply_lifestyle_answers(
            &mut form,
            LifestyleAnswers {
                kids: 1,
                college: CollegePlan::Full,
                travel: TravelStyle::High,
            },
        );
        assert_eq!(form.monthly_contribution, "");
        assert_eq!(form.monthly_budget, "?");
    }

    #[test]
    fn contribution_equivalents_invert_each_other() {
        assert_eq!(equivalent_contribution_percent(500.0, 60_000.0), 10.0);
        assert_eq!(equivalent_monthly_contribution(10.0, 60_000.0), 500.0);
        assert!(equivalent_contribution_percent(500.0, 0.0).is_infinite());
    }
}
