use paybridge::domain::normalizer::normalize;
use paybridge::domain::payment_method::{
    CardDetails, PayPalAccountDetails, PaymentMethodDetails, PaymentMethodResult,
    ThreeDSecureInfo, VenmoAccountDetails,
};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value, json};

const ROUNDS: usize = 200;

fn text(rng: &mut StdRng) -> String {
    let len = rng.gen_range(0..24);
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn maybe_text(rng: &mut StdRng) -> Option<String> {
    rng.gen_bool(0.7).then(|| text(rng))
}

fn common_fields(result: &PaymentMethodResult) -> Map<String, Value> {
    let mut expected = Map::new();
    expected.insert("nonce".into(), json!(result.nonce));
    expected.insert("type".into(), json!(result.type_label));
    expected.insert("localizedDescription".into(), json!(result.description));
    expected
}

fn random_result(rng: &mut StdRng, details: PaymentMethodDetails) -> PaymentMethodResult {
    PaymentMethodResult::new(text(rng), text(rng), text(rng), details)
}

#[test]
fn test_card_fields_are_mapped_exactly() {
    let mut rng = StdRng::seed_from_u64(0xCA4D);
    for _ in 0..ROUNDS {
        let three_d_secure = rng.gen_bool(0.5).then(|| ThreeDSecureInfo {
            liability_shifted: rng.r#gen(),
            liability_shift_possible: rng.r#gen(),
        });
        let card = CardDetails {
            last_two_digits: format!("{:02}", rng.gen_range(0..100)),
            network: text(&mut rng),
            three_d_secure,
        };
        let result = random_result(&mut rng, PaymentMethodDetails::Card(card.clone()));

        let mut expected = common_fields(&result);
        expected.insert(
            "card".into(),
            json!({ "lastTwoDigits": card.last_two_digits, "network": card.network }),
        );
        if let Some(info) = three_d_secure {
            expected.insert(
                "threeDSecureCard".into(),
                json!({
                    "liabilityShifted": info.liability_shifted,
                    "liabilityShiftPossible": info.liability_shift_possible
                }),
            );
        }

        let actual = serde_json::to_value(normalize(&result)).unwrap();
        assert_eq!(actual, Value::Object(expected));
    }
}

#[test]
fn test_pay_pal_fields_are_mapped_flat() {
    let mut rng = StdRng::seed_from_u64(0x9A7);
    for _ in 0..ROUNDS {
        let account = PayPalAccountDetails {
            email: maybe_text(&mut rng),
            first_name: maybe_text(&mut rng),
            last_name: maybe_text(&mut rng),
            phone: maybe_text(&mut rng),
            client_metadata_id: maybe_text(&mut rng),
            payer_id: maybe_text(&mut rng),
        };
        let result = random_result(&mut rng, PaymentMethodDetails::PayPalAccount(account.clone()));

        let mut expected = common_fields(&result);
        expected.insert("payPalAccount".into(), json!({}));
        expected.insert("email".into(), json!(account.email));
        expected.insert("firstName".into(), json!(account.first_name));
        expected.insert("lastName".into(), json!(account.last_name));
        expected.insert("phone".into(), json!(account.phone));
        expected.insert("clientMetadataId".into(), json!(account.client_metadata_id));
        expected.insert("payerId".into(), json!(account.payer_id));

        let actual = serde_json::to_value(normalize(&result)).unwrap();
        assert_eq!(actual, Value::Object(expected));
    }
}

#[test]
fn test_venmo_fields_are_mapped_exactly() {
    let mut rng = StdRng::seed_from_u64(0x7E7);
    for _ in 0..ROUNDS {
        let username = text(&mut rng);
        let result = random_result(
            &mut rng,
            PaymentMethodDetails::VenmoAccount(VenmoAccountDetails {
                username: username.clone(),
            }),
        );

        let mut expected = common_fields(&result);
        expected.insert("venmoAccount".into(), json!({ "username": username }));

        let actual = serde_json::to_value(normalize(&result)).unwrap();
        assert_eq!(actual, Value::Object(expected));
    }
}

#[test]
fn test_generic_has_only_common_fields() {
    let mut rng = StdRng::seed_from_u64(0x6E4);
    for _ in 0..ROUNDS {
        let result = random_result(&mut rng, PaymentMethodDetails::Generic);
        let actual = serde_json::to_value(normalize(&result)).unwrap();
        assert_eq!(actual, Value::Object(common_fields(&result)));
    }
}
