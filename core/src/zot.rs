//! Zots — the need/complaint markers buildings accumulate.
//!
//! A zot has no identity beyond its kind. The simulation that produces and
//! retires zots lives outside this crate; the renderer only ever reads a
//! building's current set.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Zot {
    TooMuchTraffic,
    NoGoods,
    NoWorkers,
    NoPower,
    NoCustomers,
    NoDemand,
    HighCrime,
    Pollution,
}

impl Zot {
    /// Stable string name, used for sprite lookup keys and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TooMuchTraffic => "too_much_traffic",
            Self::NoGoods => "no_goods",
            Self::NoWorkers => "no_workers",
            Self::NoPower => "no_power",
            Self::NoCustomers => "no_customers",
            Self::NoDemand => "no_demand",
            Self::HighCrime => "high_crime",
            Self::Pollution => "pollution",
        }
    }

    pub const ALL: [Zot; 8] = [
        Self::TooMuchTraffic,
        Self::NoGoods,
        Self::NoWorkers,
        Self::NoPower,
        Self::NoCustomers,
        Self::NoDemand,
        Self::HighCrime,
        Self::Pollution,
    ];
}
