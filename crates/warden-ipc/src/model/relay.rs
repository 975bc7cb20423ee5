// ── Relay list ──
//
// Just enough structure for location pickers and connection display. Relay
// selection itself happens in the daemon.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayCity {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayCountry {
    pub name: String,
    pub code: String,
    pub cities: Vec<RelayCity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelayList {
    pub countries: Vec<RelayCountry>,
}
