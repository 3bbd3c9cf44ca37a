//! Wire shapes delivered back to the command issuer.
//!
//! Key placement follows the established response contract: PayPal account
//! fields sit flat at the top level next to an always-empty `payPalAccount`
//! object, and 3-D Secure data is a sibling of `card` rather than nested in it.

use serde::Serialize;

/// Normalized view of any payment method result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalResponse {
    pub nonce: String,
    #[serde(rename = "type")]
    pub type_label: String,
    pub localized_description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub three_d_secure_card: Option<ThreeDSecureCardResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venmo_account: Option<VenmoAccountResponse>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_pal_account: Option<PayPalAccountResponse>,
    #[serde(flatten)]
    pub pay_pal: Option<PayPalFields>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    pub last_two_digits: String,
    pub network: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeDSecureCardResponse {
    pub liability_shifted: bool,
    pub liability_shift_possible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenmoAccountResponse {
    pub username: String,
}

/// Serializes as `{}`; the account data itself is emitted as [`PayPalFields`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PayPalAccountResponse {}

/// PayPal account keys emitted at the top level. Absent values become `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayPalFields {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub client_metadata_id: Option<String>,
    pub payer_id: Option<String>,
}

/// Payload for nonces reported through the out-of-band listener channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceCreatedResponse {
    #[serde(flatten)]
    pub canonical: CanonicalResponse,
    pub device_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCancelled {
    pub user_cancelled: bool,
}

/// A successful terminal outcome for one command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    /// Synchronous acknowledgement with no body, e.g. `initialize`.
    Ack,
    UserCancelled(UserCancelled),
    Nonce(CanonicalResponse),
    NonceCreated(NonceCreatedResponse),
}

impl ResponsePayload {
    pub fn user_cancelled() -> Self {
        Self::UserCancelled(UserCancelled {
            user_cancelled: true,
        })
    }
}
