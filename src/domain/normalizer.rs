use super::payment_method::{PaymentMethodDetails, PaymentMethodResult};
use super::response::{
    CanonicalResponse, CardResponse, NonceCreatedResponse, PayPalAccountResponse, PayPalFields,
    ThreeDSecureCardResponse, VenmoAccountResponse,
};

/// Maps any payment method result onto the canonical response shape.
///
/// Never fails: methods without extra data only populate the common fields.
pub fn normalize(result: &PaymentMethodResult) -> CanonicalResponse {
    let mut response = CanonicalResponse {
        nonce: result.nonce.clone(),
        type_label: result.type_label.clone(),
        localized_description: result.description.clone(),
        ..Default::default()
    };

    match &result.details {
        PaymentMethodDetails::Card(card) => {
            response.card = Some(CardResponse {
                last_two_digits: card.last_two_digits.clone(),
                network: card.network.clone(),
            });
        }
        PaymentMethodDetails::PayPalAccount(account) => {
            response.pay_pal_account = Some(PayPalAccountResponse {});
            response.pay_pal = Some(PayPalFields {
                email: account.email.clone(),
                first_name: account.first_name.clone(),
                last_name: account.last_name.clone(),
                phone: account.phone.clone(),
                client_metadata_id: account.client_metadata_id.clone(),
                payer_id: account.payer_id.clone(),
            });
        }
        PaymentMethodDetails::VenmoAccount(venmo) => {
            response.venmo_account = Some(VenmoAccountResponse {
                username: venmo.username.clone(),
            });
        }
        PaymentMethodDetails::Generic => {}
    }

    // Evaluated on its own, not as part of the card arm above.
    if let Some(info) = result.card().and_then(|card| card.three_d_secure) {
        response.three_d_secure_card = Some(ThreeDSecureCardResponse {
            liability_shifted: info.liability_shifted,
            liability_shift_possible: info.liability_shift_possible,
        });
    }

    response
}

/// Normalizes a nonce reported by the listener channel and attaches device data.
pub fn normalize_nonce_created(
    result: &PaymentMethodResult,
    device_data: String,
) -> NonceCreatedResponse {
    let account = result.pay_pal_account();
    NonceCreatedResponse {
        canonical: normalize(result),
        device_data,
        forename: account.and_then(|a| a.first_name.clone()),
        surname: account.and_then(|a| a.last_name.clone()),
    }
}
