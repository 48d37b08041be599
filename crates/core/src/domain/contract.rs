use crate::domain::answers::{
    Choice, CurrencyRisk, EmergencyMonths, ExperienceLevel, Horizon, IncomeRange,
    LiquidityMinPercent, MaxAnnualDrop, PatrimonyDistribution, PreferredReturn,
    QuestionnaireAnswers, ReactionToDrop, SavingsPercent,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire shape of a questionnaire submission, as produced by forms and JSON files.
///
/// Every multiple-choice answer is a raw string here; mapping onto the closed
/// option sets happens in [`AnswersPayload::validate_and_into_answers`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswersPayload {
    pub objectives: Option<String>,
    pub horizon: Option<String>,
    pub objective_priority: Option<String>,
    pub objective_admit_drop: Option<String>,

    pub income_range: Option<String>,
    pub savings_percent: Option<String>,
    pub emergency_months: Option<String>,
    pub debt_description: Option<String>,
    pub withdraw_next_36: Option<String>,
    pub initial_investment: Option<String>,
    pub periodic_contribution: Option<String>,

    pub products_used: Option<ListOrText>,
    pub experience_level: Option<String>,
    pub invested_intl: Option<String>,
    pub prefer_managed: Option<String>,

    pub reaction_to_drop: Option<String>,
    pub max_annual_drop: Option<String>,
    pub monthly_volatility_discomfort: Option<String>,
    pub preference_expected_return: Option<String>,
    pub crisis_reaction: Option<String>,
    pub percent_equity_in_crisis: Option<String>,
    pub illiquidity_acceptance: Option<String>,

    pub liquidity_min_percent: Option<i64>,
    pub esg_preference: Option<String>,
    pub allowed_currencies: Option<String>,
    pub currency_risk: Option<String>,
    pub income_preference: Option<String>,
    pub tax_preferences: Option<String>,
    pub legal_restrictions: Option<String>,
    pub sector_preferences: Option<String>,
    pub interest_in_real_estate: Option<String>,
    pub interest_alternatives: Option<String>,
    pub min_ticket_size: Option<String>,

    pub patrimony_distribution: Option<MapOrText>,
    pub intermediaries: Option<String>,
    pub total_costs_percent: Option<String>,

    pub management_preference: Option<String>,
    pub involvement_frequency: Option<String>,
    pub report_format: Option<String>,
    pub benchmark: Option<String>,
    pub milestone_date: Option<String>,
    pub other_notes: Option<String>,
}

/// Either a JSON list or the comma-separated text typed into the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListOrText {
    List(Vec<String>),
    Text(String),
}

/// Either a JSON object or `"label:value, label:value"` text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapOrText {
    Map(PatrimonyDistribution),
    Text(String),
}

/// A submission that cannot be turned into [`QuestionnaireAnswers`].
#[derive(Debug, Clone)]
pub struct AnswersValidationError {
    pub field: &'static str,
    pub detail: String,
}

impl fmt::Display for AnswersValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid answer for {}: {}", self.field, self.detail)
    }
}

impl std::error::Error for AnswersValidationError {}

impl AnswersPayload {
    pub fn validate_and_into_answers(self) -> anyhow::Result<QuestionnaireAnswers> {
        let liquidity_min_percent = match self.liquidity_min_percent {
            None => LiquidityMinPercent::default(),
            Some(v) => LiquidityMinPercent::try_from(v).map_err(|detail| AnswersValidationError {
                field: "liquidity_min_percent",
                detail,
            })?,
        };

        Ok(QuestionnaireAnswers {
            objectives: text(self.objectives),
            horizon: choice::<Horizon>("horizon", self.horizon),
            objective_priority: text(self.objective_priority),
            objective_admit_drop: text(self.objective_admit_drop),

            income_range: choice::<IncomeRange>("income_range", self.income_range),
            savings_percent: choice::<SavingsPercent>("savings_percent", self.savings_percent),
            emergency_months: choice::<EmergencyMonths>("emergency_months", self.emergency_months),
            debt_description: text(self.debt_description),
            withdraw_next_36: text(self.withdraw_next_36),
            initial_investment: text(self.initial_investment),
            periodic_contribution: text(self.periodic_contribution),

            products_used: match self.products_used {
                None => Vec::new(),
                Some(ListOrText::List(items)) => items
                    .into_iter()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                Some(ListOrText::Text(s)) => parse_products_used(&s),
            },
            experience_level: choice::<ExperienceLevel>("experience_level", self.experience_level),
            invested_intl: text(self.invested_intl),
            prefer_managed: text(self.prefer_managed),

            reaction_to_drop: choice::<ReactionToDrop>("reaction_to_drop", self.reaction_to_drop),
            max_annual_drop: choice::<MaxAnnualDrop>("max_annual_drop", self.max_annual_drop),
            monthly_volatility_discomfort: text(self.monthly_volatility_discomfort),
            preference_expected_return: choice::<PreferredReturn>(
                "preference_expected_return",
                self.preference_expected_return,
            ),
            crisis_reaction: text(self.crisis_reaction),
            percent_equity_in_crisis: text(self.percent_equity_in_crisis),
            illiquidity_acceptance: text(self.illiquidity_acceptance),

            liquidity_min_percent,
            esg_preference: text(self.esg_preference),
            allowed_currencies: text(self.allowed_currencies),
            currency_risk: choice::<CurrencyRisk>("currency_risk", self.currency_risk),
            income_preference: text(self.income_preference),
            tax_preferences: text(self.tax_preferences),
            legal_restrictions: text(self.legal_restrictions),
            sector_preferences: text(self.sector_preferences),
            interest_in_real_estate: text(self.interest_in_real_estate),
            interest_alternatives: text(self.interest_alternatives),
            min_ticket_size: text(self.min_ticket_size),

            patrimony_distribution: match self.patrimony_distribution {
                None => PatrimonyDistribution::new(),
                Some(MapOrText::Map(m)) => m
                    .iter()
                    .map(|(k, v)| (k.trim(), v))
                    .filter(|(k, _)| !k.is_empty())
                    .collect(),
                Some(MapOrText::Text(s)) => parse_patrimony_distribution(&s),
            },
            intermediaries: text(self.intermediaries),
            total_costs_percent: text(self.total_costs_percent),

            management_preference: text(self.management_preference),
            involvement_frequency: text(self.involvement_frequency),
            report_format: text(self.report_format),
            benchmark: text(self.benchmark),
            milestone_date: text(self.milestone_date),
            other_notes: text(self.other_notes),
        })
    }
}

fn text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// Unrecognized options degrade to "unanswered" so the question scores its default.
fn choice<C: Choice>(field: &'static str, value: Option<String>) -> Option<C> {
    let raw = text(value)?;
    let parsed = C::parse(&raw);
    if parsed.is_none() {
        tracing::debug!(field, value = %raw, "unrecognized option; treating as unanswered");
    }
    parsed
}

/// Parses `"efectivo:30, renta fija:40"` into a label → percent map.
///
/// Items without exactly one `:` or with a blank label are skipped; a value
/// that is not an integer counts as 0. A repeated label keeps the last value
/// at its first position.
pub fn parse_patrimony_distribution(s: &str) -> PatrimonyDistribution {
    let mut out = PatrimonyDistribution::new();
    if s.trim().is_empty() {
        return out;
    }

    for item in s.split(',') {
        let parts: Vec<&str> = item.split(':').map(str::trim).collect();
        let [key, value] = parts.as_slice() else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        out.insert((*key).to_string(), value.parse::<i64>().unwrap_or(0));
    }
    out
}

/// Parses `"CDT, FIC, acciones"` into a list, dropping empty items.
pub fn parse_products_used(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
