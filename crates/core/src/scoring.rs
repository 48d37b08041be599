//! Weighted risk-profile score.
//!
//! Five sub-scores are built from per-question point tables, weighted, summed
//! and clamped to `[0, 100]`. The label comes from fixed thresholds on the
//! clamped score and the suggestion from the static portfolio catalogue.

use crate::domain::answers::{
    points_or_default, CurrencyRisk, LiquidityMinPercent, QuestionnaireAnswers,
};
use crate::domain::portfolio::{suggestion_for, PortfolioSuggestion};
use crate::domain::profile::ProfileLabel;
use serde::Serialize;

pub const HORIZON_WEIGHT: f64 = 0.20;
pub const FINANCIAL_WEIGHT: f64 = 0.25;
pub const EXPERIENCE_WEIGHT: f64 = 0.10;
pub const RISK_TOLERANCE_WEIGHT: f64 = 0.30;
pub const RESTRICTIONS_WEIGHT: f64 = 0.15;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

const EXPLANATION_TAIL: &str = "Horizonte, situación financiera, experiencia y tolerancia determinan la capacidad y disposición al riesgo.";

/// Weighted contribution of each dimension, before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub horizon: f64,
    pub financial_situation: f64,
    pub experience: f64,
    pub risk_tolerance: f64,
    pub restrictions: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.horizon + self.financial_situation + self.experience + self.risk_tolerance + self.restrictions
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileScore {
    pub score: f64,
    #[serde(rename = "profile")]
    pub label: ProfileLabel,
    pub explanation: String,
    pub breakdown: ScoreBreakdown,
}

/// A scored profile together with its portfolio template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    #[serde(flatten)]
    pub score: ProfileScore,
    pub suggestion: &'static PortfolioSuggestion,
}

pub fn horizon_score(answers: &QuestionnaireAnswers) -> f64 {
    points_or_default(answers.horizon) * HORIZON_WEIGHT
}

pub fn financial_situation_score(answers: &QuestionnaireAnswers) -> f64 {
    let income = points_or_default(answers.income_range);
    let savings = points_or_default(answers.savings_percent);
    let emergency = points_or_default(answers.emergency_months);
    ((income + savings + emergency) / 3.0) * FINANCIAL_WEIGHT
}

pub fn experience_score(answers: &QuestionnaireAnswers) -> f64 {
    points_or_default(answers.experience_level) * EXPERIENCE_WEIGHT
}

pub fn risk_tolerance_score(answers: &QuestionnaireAnswers) -> f64 {
    let drop = points_or_default(answers.max_annual_drop);
    let reaction = points_or_default(answers.reaction_to_drop);
    let preferred = points_or_default(answers.preference_expected_return);
    ((drop + reaction + preferred) / 3.0) * RISK_TOLERANCE_WEIGHT
}

/// Summed, not averaged: the liquidity penalty plus the currency adjustment.
pub fn restrictions_score(answers: &QuestionnaireAnswers) -> f64 {
    let liquidity = liquidity_penalty(answers.liquidity_min_percent);
    let currency = currency_adjustment(answers.currency_risk);
    (liquidity + currency) * RESTRICTIONS_WEIGHT
}

/// Signed bonus for exchange-rate tolerance; unanswered counts as neutral.
pub fn currency_adjustment(risk: Option<CurrencyRisk>) -> f64 {
    points_or_default(risk)
}

pub fn liquidity_penalty(min_percent: LiquidityMinPercent) -> f64 {
    match min_percent.get() {
        50.. => -10.0,
        20.. => -5.0,
        _ => 0.0,
    }
}

pub fn breakdown(answers: &QuestionnaireAnswers) -> ScoreBreakdown {
    ScoreBreakdown {
        horizon: horizon_score(answers),
        financial_situation: financial_situation_score(answers),
        experience: experience_score(answers),
        risk_tolerance: risk_tolerance_score(answers),
        restrictions: restrictions_score(answers),
    }
}

pub fn score(answers: &QuestionnaireAnswers) -> ProfileScore {
    let breakdown = breakdown(answers);
    let score = breakdown.total().clamp(MIN_SCORE, MAX_SCORE);
    let label = ProfileLabel::from_score(score);

    tracing::debug!(score, %label, "scored questionnaire");

    ProfileScore {
        score,
        label,
        explanation: format!("Score: {}. {EXPLANATION_TAIL}", score.round() as i64),
        breakdown,
    }
}

pub fn evaluate(answers: &QuestionnaireAnswers) -> Assessment {
    let score = score(answers);
    let suggestion = suggestion_for(score.label);
    Assessment { score, suggestion }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::answers::{
        EmergencyMonths, ExperienceLevel, Horizon, IncomeRange, MaxAnnualDrop,
        PreferredReturn, ReactionToDrop, SavingsPercent,
    };
    use crate::domain::contract::AnswersPayload;
    use serde_json::json;

    const EPS: f64 = 1e-9;

    fn liquidity(p: u8) -> LiquidityMinPercent {
        LiquidityMinPercent::new(p).unwrap()
    }

    fn most_willing() -> QuestionnaireAnswers {
        QuestionnaireAnswers {
            horizon: Some(Horizon::OverTen),
            income_range: Some(IncomeRange::Over20M),
            savings_percent: Some(SavingsPercent::Over30),
            emergency_months: Some(EmergencyMonths::OverSix),
            experience_level: Some(ExperienceLevel::Advanced),
            max_annual_drop: Some(MaxAnnualDrop::Minus35),
            reaction_to_drop: Some(ReactionToDrop::Buy),
            preference_expected_return: Some(PreferredReturn::Fifteen),
            liquidity_min_percent: liquidity(0),
            currency_risk: Some(CurrencyRisk::High),
            ..Default::default()
        }
    }

    fn least_willing() -> QuestionnaireAnswers {
        QuestionnaireAnswers {
            horizon: Some(Horizon::Short),
            income_range: Some(IncomeRange::UpTo3M),
            savings_percent: Some(SavingsPercent::From5To10),
            emergency_months: Some(EmergencyMonths::Zero),
            experience_level: Some(ExperienceLevel::Basic),
            max_annual_drop: Some(MaxAnnualDrop::Minus5),
            reaction_to_drop: Some(ReactionToDrop::Sell),
            preference_expected_return: Some(PreferredReturn::Six),
            liquidity_min_percent: liquidity(100),
            currency_risk: Some(CurrencyRisk::Low),
            ..Default::default()
        }
    }

    #[test]
    fn all_defaults_score_matches_formula() {
        let s = score(&QuestionnaireAnswers::default());
        // 15*.2 + ((10+8+5)/3)*.25 + 8*.1 + ((12+10+12)/3)*.3 + (-5+0)*.15
        let expected = 3.0 + (23.0 / 3.0) * 0.25 + 0.8 + (34.0 / 3.0) * 0.3 - 0.75;
        assert!((s.score - expected).abs() < EPS);
        assert_eq!(s.label, ProfileLabel::Conservative);
        assert!(s.explanation.starts_with("Score: 8. "));
    }

    #[test]
    fn most_willing_answers_reach_moderate() {
        let s = score(&most_willing());
        // 40*.2 + (85/3)*.25 + 25*.1 + (95/3)*.3 + 4*.15
        let expected = 8.0 + (85.0 / 3.0) * 0.25 + 2.5 + 9.5 + 0.6;
        assert!((s.score - expected).abs() < EPS);
        assert_eq!(s.label, ProfileLabel::Moderate);
        assert_eq!(s.explanation, format!("Score: 28. {EXPLANATION_TAIL}"));
    }

    #[test]
    fn score_stays_within_bounds_at_both_extremes() {
        for answers in [most_willing(), least_willing(), QuestionnaireAnswers::default()] {
            let s = score(&answers);
            assert!((MIN_SCORE..=MAX_SCORE).contains(&s.score), "{}", s.score);
        }
        let low = score(&least_willing());
        // 1 + (10/3)*.25 + .4 + (12/3)*.3 - 1.8
        let expected = 1.0 + (10.0 / 3.0) * 0.25 + 0.4 + 1.2 - 1.8;
        assert!((low.score - expected).abs() < EPS);
    }

    #[test]
    fn scoring_is_deterministic() {
        let answers = most_willing();
        let first = evaluate(&answers);
        for _ in 0..10 {
            assert_eq!(evaluate(&answers), first);
        }
    }

    #[test]
    fn each_unanswered_question_scores_its_default() {
        let empty = QuestionnaireAnswers::default();
        assert!((horizon_score(&empty) - 15.0 * HORIZON_WEIGHT).abs() < EPS);
        assert!((experience_score(&empty) - 8.0 * EXPERIENCE_WEIGHT).abs() < EPS);

        let only_income_missing = QuestionnaireAnswers {
            savings_percent: Some(SavingsPercent::From10To20),
            emergency_months: Some(EmergencyMonths::ThreeToSix),
            ..Default::default()
        };
        let expected = ((10.0 + 12.0 + 12.0) / 3.0) * FINANCIAL_WEIGHT;
        assert!((financial_situation_score(&only_income_missing) - expected).abs() < EPS);

        let only_savings_missing = QuestionnaireAnswers {
            income_range: Some(IncomeRange::From12To20M),
            emergency_months: Some(EmergencyMonths::ThreeToSix),
            ..Default::default()
        };
        let expected = ((26.0 + 8.0 + 12.0) / 3.0) * FINANCIAL_WEIGHT;
        assert!((financial_situation_score(&only_savings_missing) - expected).abs() < EPS);

        let only_emergency_missing = QuestionnaireAnswers {
            income_range: Some(IncomeRange::From12To20M),
            savings_percent: Some(SavingsPercent::From10To20),
            ..Default::default()
        };
        let expected = ((26.0 + 12.0 + 5.0) / 3.0) * FINANCIAL_WEIGHT;
        assert!((financial_situation_score(&only_emergency_missing) - expected).abs() < EPS);

        let only_drop_missing = QuestionnaireAnswers {
            reaction_to_drop: Some(ReactionToDrop::Hold),
            preference_expected_return: Some(PreferredReturn::Ten),
            ..Default::default()
        };
        let expected = ((12.0 + 12.0 + 18.0) / 3.0) * RISK_TOLERANCE_WEIGHT;
        assert!((risk_tolerance_score(&only_drop_missing) - expected).abs() < EPS);

        let only_reaction_missing = QuestionnaireAnswers {
            max_annual_drop: Some(MaxAnnualDrop::Minus20),
            preference_expected_return: Some(PreferredReturn::Ten),
            ..Default::default()
        };
        let expected = ((25.0 + 10.0 + 18.0) / 3.0) * RISK_TOLERANCE_WEIGHT;
        assert!((risk_tolerance_score(&only_reaction_missing) - expected).abs() < EPS);

        let only_return_missing = QuestionnaireAnswers {
            max_annual_drop: Some(MaxAnnualDrop::Minus20),
            reaction_to_drop: Some(ReactionToDrop::Hold),
            ..Default::default()
        };
        let expected = ((25.0 + 12.0 + 12.0) / 3.0) * RISK_TOLERANCE_WEIGHT;
        assert!((risk_tolerance_score(&only_return_missing) - expected).abs() < EPS);

        let no_currency = QuestionnaireAnswers {
            liquidity_min_percent: liquidity(0),
            ..Default::default()
        };
        assert!(restrictions_score(&no_currency).abs() < EPS);
    }

    #[test]
    fn unrecognized_options_score_like_unanswered() {
        let payload: AnswersPayload = serde_json::from_value(json!({
            "horizon": "largo",
            "income_range": "mucho",
            "savings_percent": "50%",
            "emergency_months": "12",
            "experience_level": "experto",
            "max_annual_drop": "-50%",
            "reaction_to_drop": "espero",
            "preference_expected_return": "25%",
            "currency_risk": "ninguna",
        }))
        .unwrap();
        let answers = payload.validate_and_into_answers().unwrap();
        assert_eq!(score(&answers), score(&QuestionnaireAnswers::default()));
    }

    #[test]
    fn liquidity_penalty_boundaries() {
        assert_eq!(liquidity_penalty(liquidity(0)), 0.0);
        assert_eq!(liquidity_penalty(liquidity(19)), 0.0);
        assert_eq!(liquidity_penalty(liquidity(20)), -5.0);
        assert_eq!(liquidity_penalty(liquidity(49)), -5.0);
        assert_eq!(liquidity_penalty(liquidity(50)), -10.0);
        assert_eq!(liquidity_penalty(liquidity(100)), -10.0);

        let at_49 = most_willing().update(|a| a.liquidity_min_percent = liquidity(49));
        let at_50 = most_willing().update(|a| a.liquidity_min_percent = liquidity(50));
        let diff = restrictions_score(&at_49) - restrictions_score(&at_50);
        assert!((diff - 5.0 * RESTRICTIONS_WEIGHT).abs() < EPS);
    }

    #[test]
    fn currency_adjustment_is_summed_with_liquidity() {
        let answers = QuestionnaireAnswers {
            liquidity_min_percent: liquidity(60),
            currency_risk: Some(CurrencyRisk::Low),
            ..Default::default()
        };
        assert!((restrictions_score(&answers) - (-12.0 * RESTRICTIONS_WEIGHT)).abs() < EPS);
    }

    #[test]
    fn breakdown_total_equals_unclamped_score() {
        let answers = most_willing();
        let s = score(&answers);
        assert!((s.breakdown.total() - s.score).abs() < EPS);
    }

    #[test]
    fn non_scored_fields_do_not_affect_score() {
        let plain = most_willing();
        let decorated = most_willing().update(|a| {
            a.objectives = Some("retiro".to_string());
            a.benchmark = Some("MSCI ACWI".to_string());
            a.products_used = vec!["CDT".to_string(), "ETFs".to_string()];
            a.patrimony_distribution.insert("efectivo".to_string(), 250);
        });
        assert_eq!(score(&plain), score(&decorated));
    }

    #[test]
    fn evaluate_pairs_score_with_matching_suggestion() {
        let a = evaluate(&most_willing());
        assert_eq!(a.suggestion.profile, a.score.label);
        assert_eq!(a.suggestion.total_percent(), 100);

        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["profile"], "Moderado");
        assert_eq!(v["suggestion"]["profile"], "Moderado");
        assert!(v["breakdown"]["horizon"].is_number());
    }

    #[test]
    fn assessment_json_uses_profile_key() {
        let v = serde_json::to_value(evaluate(&QuestionnaireAnswers::default())).unwrap();
        let mut keys: Vec<_> = v.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["breakdown", "explanation", "profile", "score", "suggestion"]);
        assert_eq!(v["profile"], "Conservador");
    }

    #[test]
    fn currency_adjustment_per_option() {
        assert_eq!(currency_adjustment(Some(CurrencyRisk::Low)), -2.0);
        assert_eq!(currency_adjustment(Some(CurrencyRisk::Medium)), 0.0);
        assert_eq!(currency_adjustment(Some(CurrencyRisk::High)), 4.0);
        assert_eq!(currency_adjustment(None), 0.0);
    }
}
