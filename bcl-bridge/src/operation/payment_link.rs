//! Payment link operations.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::{
    OperationKind,
    params::{ParameterBag, decode, empty_as_none},
};
use crate::{
    error::{BridgeError, Result},
    request::BodyBuilder,
};

/// Payment channels accepted by `payment_channel`.
///
/// Sent to the API as the numeric channel code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PaymentChannel {
    /// FPX Online Banking.
    FpxOnlineBanking = 1,
    /// FPX Line of Credit.
    FpxLineOfCredit = 4,
    /// `DuitNow` Online Banking.
    DuitNowOnlineBanking = 5,
    /// `DuitNow` QR.
    DuitNowQr = 6,
    /// `SPaylater`.
    SPaylater = 7,
    /// Boost `PayFlex`.
    BoostPayFlex = 8,
    /// QRIS online banking.
    QrisOnlineBanking = 9,
    /// QRIS wallet.
    QrisWallet = 10,
    /// NETS.
    Nets = 11,
}

/// Rejected payment channel code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownPaymentChannel(pub u8);

impl fmt::Display for UnknownPaymentChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown payment channel code {}", self.0)
    }
}

impl TryFrom<u8> for PaymentChannel {
    type Error = UnknownPaymentChannel;

    fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::FpxOnlineBanking),
            4 => Ok(Self::FpxLineOfCredit),
            5 => Ok(Self::DuitNowOnlineBanking),
            6 => Ok(Self::DuitNowQr),
            7 => Ok(Self::SPaylater),
            8 => Ok(Self::BoostPayFlex),
            9 => Ok(Self::QrisOnlineBanking),
            10 => Ok(Self::QrisWallet),
            11 => Ok(Self::Nets),
            other => Err(UnknownPaymentChannel(other)),
        }
    }
}

impl From<PaymentChannel> for u8 {
    fn from(channel: PaymentChannel) -> Self {
        channel as Self
    }
}

/// Optional fields of a new payment link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentLinkExtras {
    /// Merchant order number.
    #[serde(default)]
    pub order_number: Option<String>,
    /// Preselected payment channel.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub payment_channel: Option<PaymentChannel>,
    /// Whether the payer may pick another channel.
    #[serde(default)]
    pub let_user_choose_payment: Option<bool>,
    /// Free-text remarks.
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Parameters of `paymentLink.create`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentLink {
    /// Amount to charge, passed through as given.
    pub amount: Number,
    /// Payer name.
    pub payer_name: String,
    /// Payer email.
    pub payer_email: String,
    /// Payer telephone number.
    pub payer_telephone_number: String,
    /// Portal key of the collecting portal.
    pub portal_key: String,
    /// Optional fields.
    #[serde(default)]
    pub additional_fields: PaymentLinkExtras,
}

/// Parameters of `paymentLink.getTransaction`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTransaction {
    /// Order number of the transaction.
    pub order_number: String,
}

/// Payment link operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentLinkOperation {
    /// Create a payment link.
    Create(CreatePaymentLink),
    /// Look up a transaction by order number.
    GetTransaction(GetTransaction),
}

impl PaymentLinkOperation {
    pub(crate) fn decode(kind: OperationKind, bag: &ParameterBag) -> Result<Self> {
        match kind {
            OperationKind::PaymentLinkCreate => decode(kind, bag).map(Self::Create),
            OperationKind::PaymentLinkGetTransaction => decode(kind, bag).map(Self::GetTransaction),
            other => Err(BridgeError::UnsupportedOperation {
                resource: other.resource().as_str().to_owned(),
                operation: other.operation_name().to_owned(),
            }),
        }
    }

    /// Returns the table row of this operation.
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Create(_) => OperationKind::PaymentLinkCreate,
            Self::GetTransaction(_) => OperationKind::PaymentLinkGetTransaction,
        }
    }

    pub(crate) fn path_id(&self) -> Option<String> {
        match self {
            Self::Create(_) => None,
            Self::GetTransaction(params) => Some(params.order_number.clone()),
        }
    }

    pub(crate) fn body(&self) -> Map<String, Value> {
        match self {
            Self::Create(params) => {
                let extras = &params.additional_fields;
                BodyBuilder::new()
                    .field("amount", params.amount.clone())
                    .field("payer_name", params.payer_name.as_str())
                    .field("payer_email", params.payer_email.as_str())
                    .field("payer_telephone_number", params.payer_telephone_number.as_str())
                    .field("portal_key", params.portal_key.as_str())
                    .non_empty("order_number", extras.order_number.as_deref())
                    .optional("payment_channel", extras.payment_channel.map(u8::from))
                    .optional("let_user_choose_payment", extras.let_user_choose_payment)
                    .non_empty("remarks", extras.remarks.as_deref())
                    .build()
            }
            Self::GetTransaction(_) => Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn bag(value: Value) -> ParameterBag {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_payment_channel_codes() {
        assert_eq!(u8::from(PaymentChannel::FpxOnlineBanking), 1);
        assert_eq!(u8::from(PaymentChannel::Nets), 11);
        assert_eq!(PaymentChannel::try_from(6), Ok(PaymentChannel::DuitNowQr));
        assert_eq!(PaymentChannel::try_from(2), Err(UnknownPaymentChannel(2)));
    }

    #[test]
    fn test_create_body_without_extras() {
        let op = PaymentLinkOperation::decode(
            OperationKind::PaymentLinkCreate,
            &bag(json!({
                "amount": 100,
                "payerName": "Ali",
                "payerEmail": "a@x.com",
                "payerTelephoneNumber": "0123456789",
                "portalKey": "pk1",
            })),
        )
        .unwrap();

        assert_eq!(
            Value::Object(op.body()),
            json!({
                "amount": 100,
                "payer_name": "Ali",
                "payer_email": "a@x.com",
                "payer_telephone_number": "0123456789",
                "portal_key": "pk1",
            })
        );
    }

    #[test]
    fn test_create_body_with_extras() {
        let op = PaymentLinkOperation::decode(
            OperationKind::PaymentLinkCreate,
            &bag(json!({
                "amount": 25.5,
                "payerName": "Siti",
                "payerEmail": "s@x.com",
                "payerTelephoneNumber": "0199999999",
                "portalKey": "pk2",
                "additionalFields": {
                    "order_number": "INV-7",
                    "payment_channel": 6,
                    "let_user_choose_payment": false,
                    "remarks": "",
                },
            })),
        )
        .unwrap();

        let body = op.body();
        assert_eq!(body["amount"], json!(25.5));
        assert_eq!(body["order_number"], json!("INV-7"));
        assert_eq!(body["payment_channel"], json!(6));
        assert_eq!(body["let_user_choose_payment"], json!(false));
        assert!(!body.contains_key("remarks"));
    }

    #[test]
    fn test_create_rejects_unknown_channel() {
        let result = PaymentLinkOperation::decode(
            OperationKind::PaymentLinkCreate,
            &bag(json!({
                "amount": 1,
                "payerName": "A",
                "payerEmail": "a@x.com",
                "payerTelephoneNumber": "1",
                "portalKey": "k",
                "additionalFields": {"payment_channel": 3},
            })),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_foreign_kind() {
        let result = PaymentLinkOperation::decode(OperationKind::FormGet, &bag(json!({"formId": 1})));
        let Err(BridgeError::UnsupportedOperation { resource, operation }) = result else {
            unreachable!("expected UnsupportedOperation")
        };
        assert_eq!(resource, "form");
        assert_eq!(operation, "get");
    }

    #[test]
    fn test_get_transaction_path_id() {
        let op = PaymentLinkOperation::decode(
            OperationKind::PaymentLinkGetTransaction,
            &bag(json!({"orderNumber": "ORD-42"})),
        )
        .unwrap();
        assert_eq!(op.kind(), OperationKind::PaymentLinkGetTransaction);
        assert_eq!(op.path_id().as_deref(), Some("ORD-42"));
        assert!(op.body().is_empty());
    }
}
