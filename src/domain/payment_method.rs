use serde::{Deserialize, Serialize};

/// A tokenized payment method reported by the payment UI.
///
/// The fields every method shares live here; method-specific data lives in
/// [`PaymentMethodDetails`], which is a closed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodResult {
    pub nonce: String,
    pub type_label: String,
    pub description: String,
    #[serde(flatten)]
    pub details: PaymentMethodDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentMethodDetails {
    Card(CardDetails),
    PayPalAccount(PayPalAccountDetails),
    VenmoAccount(VenmoAccountDetails),
    /// Any method without extra data, including ones added after this crate.
    #[serde(other)]
    Generic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDetails {
    pub last_two_digits: String,
    pub network: String,
    #[serde(default)]
    pub three_d_secure: Option<ThreeDSecureInfo>,
}

/// Outcome of a 3-D Secure authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeDSecureInfo {
    pub liability_shifted: bool,
    pub liability_shift_possible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayPalAccountDetails {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub client_metadata_id: Option<String>,
    pub payer_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenmoAccountDetails {
    pub username: String,
}

impl PaymentMethodResult {
    pub fn new(
        nonce: impl Into<String>,
        type_label: impl Into<String>,
        description: impl Into<String>,
        details: PaymentMethodDetails,
    ) -> Self {
        Self {
            nonce: nonce.into(),
            type_label: type_label.into(),
            description: description.into(),
            details,
        }
    }

    /// Card data, if this method carries any.
    pub fn card(&self) -> Option<&CardDetails> {
        match &self.details {
            PaymentMethodDetails::Card(card) => Some(card),
            _ => None,
        }
    }

    pub fn pay_pal_account(&self) -> Option<&PayPalAccountDetails> {
        match &self.details {
            PaymentMethodDetails::PayPalAccount(account) => Some(account),
            _ => None,
        }
    }
}
