//! Preventive-health indicator interpretation: a numeric reading maps
//! to a threshold-bounded zone (status, color, tip). Pure functions;
//! the live cards and the history table must agree on every reading.

/// Display color of a zone, mapped to the terminal palette by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneColor {
    Green,
    Yellow,
    Orange,
    Red,
    Neutral,
}

/// One interpretation bucket, open at the bottom, bounded by `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub to: f64,
    pub status: &'static str,
    pub tip: &'static str,
    pub color: ZoneColor,
}

const fn zone(to: f64, status: &'static str, tip: &'static str, color: ZoneColor) -> Zone {
    Zone {
        to,
        status,
        tip,
        color,
    }
}

/// Static configuration of one indicator. `zones` is always ascending
/// by bound; "higher is better" indicators set `reversed` instead of
/// storing a reversed list.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub reversed: bool,
    pub zones: &'static [Zone],
}

#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation {
    Zone {
        status: &'static str,
        tip: &'static str,
        color: ZoneColor,
    },
    /// Absent or non-numeric reading; distinct from every real zone.
    NotAvailable,
}

impl Interpretation {
    pub fn status(&self) -> &'static str {
        match self {
            Interpretation::Zone { status, .. } => status,
            Interpretation::NotAvailable => "N/A",
        }
    }

    pub fn tip(&self) -> &'static str {
        match self {
            Interpretation::Zone { tip, .. } => tip,
            Interpretation::NotAvailable => "Insira um valor.",
        }
    }

    pub fn color(&self) -> ZoneColor {
        match self {
            Interpretation::Zone { color, .. } => *color,
            Interpretation::NotAvailable => ZoneColor::Neutral,
        }
    }
}

/// Maps a value to its zone by direction-aware scan over the
/// ascending zone list. Forward: first zone with `value <= to`.
/// Reversed: scan from the highest bound down, first zone with
/// `value >= to`. No match falls into the last zone of the effective
/// order (the open-ended bucket). The direction lives in the
/// comparison, never in a reversed copy of the data.
pub fn interpret(value: Option<f64>, zones: &[Zone], reversed: bool) -> Interpretation {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return Interpretation::NotAvailable;
    };
    if zones.is_empty() {
        return Interpretation::NotAvailable;
    }

    let hit = if reversed {
        zones.iter().rev().find(|z| v >= z.to)
    } else {
        zones.iter().find(|z| v <= z.to)
    };
    // Fallback: the last zone in scan order.
    let zone = hit.unwrap_or(if reversed { &zones[0] } else { &zones[zones.len() - 1] });
    Interpretation::Zone {
        status: zone.status,
        tip: zone.tip,
        color: zone.color,
    }
}

/// Marker position on the indicator bar as a percentage of the
/// configured range, clamped to `[0, 100]`.
pub fn marker_percent(value: Option<f64>, spec: &IndicatorSpec) -> Option<f64> {
    let v = value.filter(|v| v.is_finite())?;
    let span = spec.max - spec.min;
    if span <= 0.0 {
        return None;
    }
    Some(((v - spec.min) / span * 100.0).clamp(0.0, 100.0))
}

use ZoneColor::{Green, Orange, Red, Yellow};

/// The fourteen tracked indicators, bounds and tips as shipped.
pub const CATALOG: &[IndicatorSpec] = &[
    IndicatorSpec {
        id: "glicemia",
        name: "Glicemia em Jejum",
        unit: "mg/dL",
        min: 50.0,
        max: 150.0,
        reversed: false,
        zones: &[
            zone(69.0, "Atenção", "Hipoglicemia", Yellow),
            zone(99.0, "Normal", "Normal", Green),
            zone(125.0, "Atenção", "Pré-Diabetes", Yellow),
            zone(150.0, "Alerta", "Diabetes", Red),
        ],
    },
    IndicatorSpec {
        id: "hdl",
        name: "HDL Colesterol",
        unit: "mg/dL",
        min: 20.0,
        max: 100.0,
        reversed: true,
        zones: &[
            zone(39.0, "Alerta", "Baixo", Red),
            zone(59.0, "Atenção", "Normal", Yellow),
            zone(100.0, "Ótimo", "Ótimo", Green),
        ],
    },
    IndicatorSpec {
        id: "ldl",
        name: "LDL Colesterol",
        unit: "mg/dL",
        min: 50.0,
        max: 200.0,
        reversed: false,
        zones: &[
            zone(99.0, "Ótimo", "Ótimo", Green),
            zone(129.0, "Atenção", "Normal", Yellow),
            zone(159.0, "Alerta", "Elevado", Orange),
            zone(200.0, "Alerta", "Muito Elevado", Red),
        ],
    },
    IndicatorSpec {
        id: "colesterol",
        name: "Colesterol Total",
        unit: "mg/dL",
        min: 100.0,
        max: 300.0,
        reversed: false,
        zones: &[
            zone(199.0, "Ótimo", "Ótimo", Green),
            zone(239.0, "Atenção", "Limítrofe", Yellow),
            zone(300.0, "Alerta", "Elevado", Red),
        ],
    },
    IndicatorSpec {
        id: "triglicerideos",
        name: "Triglicerídeos",
        unit: "mg/dL",
        min: 50.0,
        max: 500.0,
        reversed: false,
        zones: &[
            zone(149.0, "Ótimo", "Ótimo", Green),
            zone(199.0, "Atenção", "Limítrofe", Yellow),
            zone(499.0, "Alerta", "Elevado", Orange),
            zone(500.0, "Alerta", "Muito Elevado", Red),
        ],
    },
    IndicatorSpec {
        id: "vitd",
        name: "Vitamina D",
        unit: "ng/mL",
        min: 10.0,
        max: 100.0,
        reversed: false,
        zones: &[
            zone(19.0, "Alerta", "Deficiência", Red),
            zone(29.0, "Atenção", "Insuficiência", Yellow),
            zone(60.0, "Ótimo", "Normal", Green),
            zone(100.0, "Atenção", "Elevado", Yellow),
        ],
    },
    IndicatorSpec {
        id: "tsh",
        name: "TSH",
        unit: "µUI/mL",
        min: 0.1,
        max: 10.0,
        reversed: false,
        zones: &[
            zone(0.39, "Atenção", "Baixo", Yellow),
            zone(4.0, "Normal", "Normal", Green),
            zone(10.0, "Atenção", "Elevado", Yellow),
        ],
    },
    IndicatorSpec {
        id: "creatinina",
        name: "Creatinina",
        unit: "mg/dL",
        min: 0.4,
        max: 1.5,
        reversed: false,
        zones: &[
            zone(0.59, "Atenção", "Baixo", Yellow),
            zone(1.2, "Normal", "Normal", Green),
            zone(1.5, "Atenção", "Elevado", Yellow),
        ],
    },
    IndicatorSpec {
        id: "acidourico",
        name: "Ácido Úrico",
        unit: "mg/dL",
        min: 2.0,
        max: 10.0,
        reversed: false,
        zones: &[
            zone(2.4, "Atenção", "Baixo", Yellow),
            zone(6.0, "Normal", "Normal", Green),
            zone(10.0, "Alerta", "Elevado", Red),
        ],
    },
    IndicatorSpec {
        id: "pcr",
        name: "PCR Ultrassensível",
        unit: "mg/L",
        min: 0.0,
        max: 10.0,
        reversed: false,
        zones: &[
            zone(0.9, "Normal", "Risco Baixo", Green),
            zone(2.9, "Atenção", "Risco Médio", Yellow),
            zone(10.0, "Alerta", "Risco Alto", Red),
        ],
    },
    IndicatorSpec {
        id: "ferritina",
        name: "Ferritina",
        unit: "ng/mL",
        min: 10.0,
        max: 400.0,
        reversed: false,
        zones: &[
            zone(49.0, "Atenção", "Baixo", Yellow),
            zone(150.0, "Normal", "Normal", Green),
            zone(400.0, "Atenção", "Elevado", Yellow),
        ],
    },
    IndicatorSpec {
        id: "b12",
        name: "Vitamina B12",
        unit: "pg/mL",
        min: 100.0,
        max: 1000.0,
        reversed: false,
        zones: &[
            zone(399.0, "Atenção", "Baixo", Yellow),
            zone(900.0, "Normal", "Normal", Green),
            zone(1000.0, "Atenção", "Elevado", Yellow),
        ],
    },
    IndicatorSpec {
        id: "gordura_bio",
        name: "Gordura Corporal",
        unit: "%",
        min: 5.0,
        max: 50.0,
        reversed: false,
        zones: &[
            zone(9.0, "Ótimo", "Atleta", Green),
            zone(20.0, "Normal", "Saudável", Green),
            zone(25.0, "Atenção", "Levemente Elevado", Yellow),
            zone(50.0, "Alerta", "Elevado", Red),
        ],
    },
    IndicatorSpec {
        id: "massamagra_bio",
        name: "Massa Magra",
        unit: "kg",
        min: 30.0,
        max: 90.0,
        reversed: true,
        zones: &[
            zone(49.0, "Alerta", "Baixa", Red),
            zone(80.0, "Normal", "Normal", Green),
            zone(90.0, "Ótimo", "Elevada", Green),
        ],
    },
];

pub fn spec_by_id(id: &str) -> Option<&'static IndicatorSpec> {
    CATALOG.iter().find(|s| s.id == id)
}
