use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A closed set of answers to one multiple-choice question.
///
/// The textual form returned by [`Choice::as_str`] is the external vocabulary
/// the questionnaire has always used; it is matched verbatim (after trimming)
/// by [`Choice::parse`].
pub trait Choice: Copy + Sized + 'static {
    /// Points contributed when the question is unanswered.
    const DEFAULT_POINTS: f64;

    fn options() -> &'static [Self];

    fn as_str(self) -> &'static str;

    fn points(self) -> f64;

    fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::options().iter().copied().find(|c| c.as_str() == s)
    }
}

pub fn points_or_default<C: Choice>(choice: Option<C>) -> f64 {
    choice.map_or(C::DEFAULT_POINTS, Choice::points)
}

macro_rules! choice {
    (
        $(#[$meta:meta])*
        pub enum $name:ident (default = $default:expr) {
            $($variant:ident => $text:literal : $points:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Choice for $name {
            const DEFAULT_POINTS: f64 = $default;

            fn options() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }

            fn points(self) -> f64 {
                match self {
                    $(Self::$variant => $points),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::parse(&s).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "unknown {} option {s:?}",
                        stringify!($name)
                    ))
                })
            }
        }
    };
}

choice! {
    /// Main investment horizon.
    pub enum Horizon (default = 15.0) {
        Short => "corto": 5.0,
        Medium => "medio": 12.0,
        ThreeToFive => "3-5": 20.0,
        FiveToTen => "5-10": 30.0,
        OverTen => ">10": 40.0,
    }
}

choice! {
    /// Net monthly income range (COP).
    pub enum IncomeRange (default = 10.0) {
        UpTo3M => "≤3M": 5.0,
        From3To6M => "3-6M": 10.0,
        From6To12M => "6-12M": 18.0,
        From12To20M => "12-20M": 26.0,
        Over20M => ">20M": 35.0,
    }
}

choice! {
    /// Share of income that can be saved or invested.
    pub enum SavingsPercent (default = 8.0) {
        From5To10 => "5-10%": 5.0,
        From10To20 => "10-20%": 12.0,
        From20To30 => "20-30%": 22.0,
        Over30 => ">30%": 30.0,
    }
}

choice! {
    /// Months of expenses covered by the emergency fund.
    pub enum EmergencyMonths (default = 5.0) {
        Zero => "0": 0.0,
        OneToThree => "1-3": 5.0,
        ThreeToSix => "3-6": 12.0,
        OverSix => ">6": 20.0,
    }
}

choice! {
    pub enum ExperienceLevel (default = 8.0) {
        Basic => "básico": 4.0,
        Intermediate => "intermedio": 12.0,
        Advanced => "avanzado": 25.0,
    }
}

choice! {
    /// Largest tolerable loss over one year.
    pub enum MaxAnnualDrop (default = 12.0) {
        Minus5 => "-5%": 5.0,
        Minus10 => "-10%": 12.0,
        Minus20 => "-20%": 25.0,
        Minus35 => "-35%": 35.0,
    }
}

choice! {
    /// What the investor does when 100 falls to 85 within a month.
    pub enum ReactionToDrop (default = 10.0) {
        Sell => "vendes": 2.0,
        Hold => "mantienes": 12.0,
        Buy => "compras": 30.0,
    }
}

choice! {
    /// Preferred expected annual return.
    pub enum PreferredReturn (default = 12.0) {
        Six => "6%": 5.0,
        Ten => "10%": 18.0,
        Fifteen => "15%": 30.0,
    }
}

choice! {
    /// Tolerance to exchange-rate risk. Contributes a signed adjustment.
    pub enum CurrencyRisk (default = 0.0) {
        Low => "baja": -2.0,
        Medium => "media": 0.0,
        High => "alta": 4.0,
    }
}

/// Minimum share of the portfolio that must be redeemable within 1-7 business days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct LiquidityMinPercent(u8);

impl LiquidityMinPercent {
    pub const DEFAULT: Self = Self(30);

    pub fn new(percent: u8) -> Option<Self> {
        (percent <= 100).then_some(Self(percent))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for LiquidityMinPercent {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for LiquidityMinPercent {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| format!("liquidity minimum percent must be 0..=100 (got {value})"))
    }
}

impl From<LiquidityMinPercent> for u8 {
    fn from(value: LiquidityMinPercent) -> Self {
        value.0
    }
}

/// Current wealth split, label → percent, in the order the investor entered it.
///
/// Values are not required to sum to 100. Re-inserting a label replaces its
/// value and keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatrimonyDistribution(Vec<(String, i64)>);

impl PatrimonyDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, percent: i64) -> Option<i64> {
        let label = label.into();
        match self.0.iter_mut().find(|(l, _)| *l == label) {
            Some((_, v)) => Some(std::mem::replace(v, percent)),
            None => {
                self.0.push((label, percent));
                None
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&i64> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(l, v)| (l.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.0.iter().map(|(_, v)| v).sum()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for PatrimonyDistribution {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (label, percent) in iter {
            out.insert(label, percent);
        }
        out
    }
}

impl Serialize for PatrimonyDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, percent) in &self.0 {
            map.serialize_entry(label, percent)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PatrimonyDistribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = PatrimonyDistribution;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of label to integer percent")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = PatrimonyDistribution::new();
                while let Some((label, percent)) = access.next_entry::<String, i64>()? {
                    out.insert(label, percent);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Every answer collected by the risk-profile questionnaire.
///
/// Only the typed multiple-choice fields plus `liquidity_min_percent` feed the
/// score; the rest are carried along for display and export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionnaireAnswers {
    // Objectives and horizon
    pub objectives: Option<String>,
    pub horizon: Option<Horizon>,
    pub objective_priority: Option<String>,
    pub objective_admit_drop: Option<String>,

    // Current financial situation
    pub income_range: Option<IncomeRange>,
    pub savings_percent: Option<SavingsPercent>,
    pub emergency_months: Option<EmergencyMonths>,
    pub debt_description: Option<String>,
    pub withdraw_next_36: Option<String>,
    pub initial_investment: Option<String>,
    pub periodic_contribution: Option<String>,

    // Experience
    pub products_used: Vec<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub invested_intl: Option<String>,
    pub prefer_managed: Option<String>,

    // Risk tolerance
    pub reaction_to_drop: Option<ReactionToDrop>,
    pub max_annual_drop: Option<MaxAnnualDrop>,
    pub monthly_volatility_discomfort: Option<String>,
    pub preference_expected_return: Option<PreferredReturn>,
    pub crisis_reaction: Option<String>,
    pub percent_equity_in_crisis: Option<String>,
    pub illiquidity_acceptance: Option<String>,

    // Restrictions and preferences
    pub liquidity_min_percent: LiquidityMinPercent,
    pub esg_preference: Option<String>,
    pub allowed_currencies: Option<String>,
    pub currency_risk: Option<CurrencyRisk>,
    pub income_preference: Option<String>,
    pub tax_preferences: Option<String>,
    pub legal_restrictions: Option<String>,
    pub sector_preferences: Option<String>,
    pub interest_in_real_estate: Option<String>,
    pub interest_alternatives: Option<String>,
    pub min_ticket_size: Option<String>,

    // Current wealth structure
    pub patrimony_distribution: PatrimonyDistribution,
    pub intermediaries: Option<String>,
    pub total_costs_percent: Option<String>,

    // Operations and servicing
    pub management_preference: Option<String>,
    pub involvement_frequency: Option<String>,
    pub report_format: Option<String>,
    pub benchmark: Option<String>,
    pub milestone_date: Option<String>,
    pub other_notes: Option<String>,
}

impl QuestionnaireAnswers {
    /// Returns a copy with `transform` applied; the original value is consumed.
    pub fn update(mut self, transform: impl FnOnce(&mut Self)) -> Self {
        transform(&mut self);
        self
    }
}
