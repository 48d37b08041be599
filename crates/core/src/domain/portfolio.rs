use crate::domain::profile::ProfileLabel;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocationEntry {
    pub category: &'static str,
    pub percent: u8,
}

/// Static portfolio template for one profile. Allocation entries keep their
/// presentation order and sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortfolioSuggestion {
    pub profile: ProfileLabel,
    pub allocation: &'static [AllocationEntry],
    pub liquidity: &'static str,
    pub expected_return_range: &'static str,
    pub notes: &'static str,
}

impl PortfolioSuggestion {
    pub fn total_percent(&self) -> u32 {
        self.allocation.iter().map(|e| u32::from(e.percent)).sum()
    }
}

const fn entry(category: &'static str, percent: u8) -> AllocationEntry {
    AllocationEntry { category, percent }
}

static CONSERVATIVE: PortfolioSuggestion = PortfolioSuggestion {
    profile: ProfileLabel::Conservative,
    allocation: &[
        entry("Efectivo / CDT / liquidez", 50),
        entry("Renta fija (FIC, TES cortos)", 30),
        entry("Fondos mixtos conservadores / FVP", 10),
        entry("Renta variable local/internacional", 5),
        entry("Alternativos / inmobiliario", 5),
    ],
    liquidity: "Alta: gran parte en instrumentos rescatables en 1-7 días (≥40%).",
    expected_return_range: "2% - 6% anual (esperanza conservadora).",
    notes: "Baja tolerancia a drawdowns. Priorizar fondos con baja volatilidad, cuentas AFC si hay ventajas fiscales.",
};

static MODERATE: PortfolioSuggestion = PortfolioSuggestion {
    profile: ProfileLabel::Moderate,
    allocation: &[
        entry("Efectivo / liquidez", 25),
        entry("Renta fija (TES, bonos corporativos)", 35),
        entry("Fondos mixtos / FIC", 20),
        entry("Renta variable (acciones/ETFs)", 15),
        entry("Alternativos", 5),
    ],
    liquidity: "Moderada: parte en instrumentos con 7-30 días de rescate y vencimientos cortos.",
    expected_return_range: "4% - 8% anual.",
    notes: "Mantener fondo de emergencia 3-6 meses. Balance entre protección y crecimiento.",
};

static BALANCED: PortfolioSuggestion = PortfolioSuggestion {
    profile: ProfileLabel::Balanced,
    allocation: &[
        entry("Efectivo", 10),
        entry("Renta fija", 30),
        entry("Renta variable (COLCAP y ETFs internacionales)", 40),
        entry("FIC / FVP", 10),
        entry("Inmobiliario / alternativos", 10),
    ],
    liquidity: "Equilibrada: algunas posiciones con lockups (90-365 días) aceptables.",
    expected_return_range: "6% - 12% anual.",
    notes: "Diversificación internacional recomendada (ETFs USD). Considerar cobertura cambiaria según tolerancia.",
};

static AGGRESSIVE: PortfolioSuggestion = PortfolioSuggestion {
    profile: ProfileLabel::Aggressive,
    allocation: &[
        entry("Renta variable local e internacional", 60),
        entry("ETFs y acciones directas", 25),
        entry("Renta fija (alto rendimiento)", 5),
        entry("Alternativos / private", 10),
    ],
    liquidity: "Baja aceptación de reembolsos inmediatos; hay posiciones con lockups largos.",
    expected_return_range: "10% - 20%+ anual (alto riesgo).",
    notes: "Alto drawdown posible. Recomendable experiencia previa y uso de cuentas internacionales si procede.",
};

/// General instrument examples shown alongside every suggestion.
pub const INSTRUMENT_EXAMPLES: [&str; 4] = [
    "Renta fija local: TES, bonos corporativos, CDT; fondos FIC de renta fija.",
    "Renta variable local: acciones incluidas en COLCAP, fondos indexados locales.",
    "Internacional: ETFs (S&P500, MSCI), REITs, bonos internacionales; cuentas/brokers internacionales.",
    "Vehículos de ahorro con beneficios fiscales: cuentas AFC, FVP según disponibilidad.",
];

pub const INSTRUMENT_DISCLAIMER: &str = "Ten en cuenta: debes revisar emisores concretos, comisiones y condiciones de liquidez antes de invertir.";

pub fn suggestion_for(label: ProfileLabel) -> &'static PortfolioSuggestion {
    match label {
        ProfileLabel::Conservative => &CONSERVATIVE,
        ProfileLabel::Moderate => &MODERATE,
        ProfileLabel::Balanced => &BALANCED,
        ProfileLabel::Aggressive => &AGGRESSIVE,
    }
}

pub fn all_suggestions() -> [&'static PortfolioSuggestion; 4] {
    ProfileLabel::ALL.map(suggestion_for)
}
