//! Station identifiers

use serde::{Deserialize, Serialize};

/// A preparation station with its own view of current orders.
///
/// The kitchen skips direct (no-preparation) products and hides `READY`
/// orders; the bar sees everything up to hand-over.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Station {
    Kitchen,
    Bar,
}

impl Station {
    pub const ALL: [Station; 2] = [Station::Kitchen, Station::Bar];

    /// Whether this station's fetch includes direct (no-preparation)
    /// products.
    pub fn includes_direct_products(self) -> bool {
        matches!(self, Station::Bar)
    }

    /// Whether `READY` orders remain visible on this station.
    pub fn shows_ready(self) -> bool {
        matches!(self, Station::Bar)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Station::Kitchen => "kitchen",
            Station::Bar => "bar",
        }
    }
}

impl std::fmt::Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Station {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kitchen" => Ok(Station::Kitchen),
            "bar" => Ok(Station::Bar),
            other => Err(format!("unknown station: {other}")),
        }
    }
}
