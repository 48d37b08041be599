use asesor_core::domain::answers::{
    Choice, CurrencyRisk, EmergencyMonths, ExperienceLevel, Horizon, IncomeRange, MaxAnnualDrop,
    PreferredReturn, ReactionToDrop, SavingsPercent,
};
use asesor_core::domain::portfolio::{INSTRUMENT_DISCLAIMER, INSTRUMENT_EXAMPLES};
use asesor_core::scoring::Assessment;
use std::fmt::Write;

pub fn render_report(assessment: &Assessment) -> String {
    let score = &assessment.score;
    let suggestion = assessment.suggestion;

    let mut out = String::new();
    let _ = writeln!(out, "Resultado: {}", score.label);
    let _ = writeln!(out, "{}", score.explanation);
    let _ = writeln!(out);

    let _ = writeln!(out, "Sugerencia de portafolio");
    let width = suggestion
        .allocation
        .iter()
        .map(|e| e.category.chars().count())
        .max()
        .unwrap_or(0);
    for entry in suggestion.allocation {
        let pad = width - entry.category.chars().count();
        let _ = writeln!(
            out,
            "  {}{}  {:>3}%",
            entry.category,
            " ".repeat(pad),
            entry.percent
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Liquidez: {}", suggestion.liquidity);
    let _ = writeln!(out, "Rango de retorno esperado: {}", suggestion.expected_return_range);
    let _ = writeln!(out, "Notas: {}", suggestion.notes);
    let _ = writeln!(out);

    let _ = writeln!(out, "Instrumentos (ejemplos generales):");
    for line in INSTRUMENT_EXAMPLES {
        let _ = writeln!(out, "  - {line}");
    }
    let _ = writeln!(out, "{INSTRUMENT_DISCLAIMER}");
    out
}

pub fn render_options() -> String {
    fn line<C: Choice>(out: &mut String, flag: &str) {
        let options: Vec<_> = C::options().iter().map(|c| c.as_str()).collect();
        let _ = writeln!(
            out,
            "--{flag}: {} (unanswered scores {})",
            options.join(" | "),
            C::DEFAULT_POINTS
        );
    }

    let mut out = String::new();
    line::<Horizon>(&mut out, "horizon");
    line::<IncomeRange>(&mut out, "income-range");
    line::<SavingsPercent>(&mut out, "savings-percent");
    line::<EmergencyMonths>(&mut out, "emergency-months");
    line::<ExperienceLevel>(&mut out, "experience-level");
    line::<MaxAnnualDrop>(&mut out, "max-annual-drop");
    line::<ReactionToDrop>(&mut out, "reaction-to-drop");
    line::<PreferredReturn>(&mut out, "preference-expected-return");
    line::<CurrencyRisk>(&mut out, "currency-risk");
    let _ = writeln!(out, "--liquidity-min-percent: 0-100 (default 30)");
    out
}
