use serde::{Deserialize, Serialize};

/// Customer contact details attached to a booking. Bookings are looked up
/// by exact phone match, so phone is the customer's identity for our
/// purposes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
