//! Returning-guest record model shared by every extraction backend.

use serde::{Deserialize, Serialize};

/// Sentinel for a guest name that could not be resolved.
pub const UNKNOWN_GUEST: &str = "Unknown Guest";

/// Sentinel for an absent fixed charge or accompanying-guest field.
pub const NONE_SENTINEL: &str = "None";

/// Sentinel for an absent or unparseable charge amount.
pub const AMOUNT_NA: &str = "N/A";

/// Stay count reported when the previous-stays signal did not fire.
pub const ZERO_STAYS: &str = "0";

/// Which detection signal qualified the guest as returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentifiedBy {
    /// A qualifying fixed-charge line was present.
    #[serde(rename = "Fixed Charge")]
    FixedCharge,
    /// The previous-stay counter was 1 or greater.
    #[serde(rename = "Previous Stays")]
    PreviousStays,
    /// Both signals fired.
    Both,
}

impl IdentifiedBy {
    /// Wire and display form of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifiedBy::FixedCharge => "Fixed Charge",
            IdentifiedBy::PreviousStays => "Previous Stays",
            IdentifiedBy::Both => "Both",
        }
    }
}

impl std::fmt::Display for IdentifiedBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A returning guest extracted from one reservation section.
///
/// Wire names are camelCase so the rule engine and the generative backend
/// serialize to the same JSON shape. Records are built fresh per parse
/// call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    /// Primary guest name, `"Unknown Guest"` when unresolved.
    pub guest_name: String,

    /// Reservation confirmation number.
    pub confirmation_number: String,

    /// Arrival date; only the generative backend reports dates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<String>,

    /// Departure date; only the generative backend reports dates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<String>,

    /// Detection signal(s) that admitted this record.
    pub identified_by: IdentifiedBy,

    /// Previous-stay counter, `"0"` when the signal did not fire.
    pub number_of_previous_stays: String,

    /// Qualifying fixed-charge line, `"None"` when absent.
    pub fixed_charge_description: String,

    /// Unsigned two-decimal amount, `"N/A"` when absent or unparseable.
    pub fixed_charge_amount: String,

    /// Accompanying guest name(s), `"None"` when absent.
    pub accompanying_guests: String,
}
