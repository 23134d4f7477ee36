//! Coupon operations.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{
    OperationKind,
    params::{ListOptions, ParameterBag, QueryValue, decode, default_true},
};
use crate::{
    error::{BridgeError, Result},
    request::BodyBuilder,
};

/// Sort fields of `coupon.list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponSortField {
    /// Coupon code.
    Code,
    /// Creation time.
    CreatedAt,
    /// Last update time.
    UpdatedAt,
}

impl QueryValue for CouponSortField {
    fn as_query(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// Parameters of `coupon.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCoupons {
    /// Filtering and paging options.
    #[serde(default)]
    pub coupon_options: ListOptions<CouponSortField>,
}

/// Parameters of `coupon.get`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponRef {
    /// Coupon identifier.
    pub coupon_id: u64,
}

/// Parameters of `coupon.update`.
///
/// The update fields are forwarded unchanged as the request body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCoupon {
    /// Coupon identifier.
    pub coupon_id: u64,
    /// Fields to change, keyed by their API names.
    #[serde(default)]
    pub coupon_update_fields: Map<String, Value>,
}

/// Parameters of `coupon.updateStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCouponStatus {
    /// Coupon identifier.
    pub coupon_id: u64,
    /// Whether the coupon can be redeemed.
    #[serde(default = "default_true")]
    pub coupon_is_active: bool,
}

/// Coupon operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs, reason = "variants mirror the operation names")]
pub enum CouponOperation {
    List(ListCoupons),
    Get(CouponRef),
    Update(UpdateCoupon),
    UpdateStatus(UpdateCouponStatus),
}

impl CouponOperation {
    pub(crate) fn decode(kind: OperationKind, bag: &ParameterBag) -> Result<Self> {
        match kind {
            OperationKind::CouponList => decode(kind, bag).map(Self::List),
            OperationKind::CouponGet => decode(kind, bag).map(Self::Get),
            OperationKind::CouponUpdate => decode(kind, bag).map(Self::Update),
            OperationKind::CouponUpdateStatus => decode(kind, bag).map(Self::UpdateStatus),
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
            Self::List(_) => OperationKind::CouponList,
            Self::Get(_) => OperationKind::CouponGet,
            Self::Update(_) => OperationKind::CouponUpdate,
            Self::UpdateStatus(_) => OperationKind::CouponUpdateStatus,
        }
    }

    pub(crate) fn path_id(&self) -> Option<String> {
        match self {
            Self::List(_) => None,
            Self::Get(p) => Some(p.coupon_id.to_string()),
            Self::Update(p) => Some(p.coupon_id.to_string()),
            Self::UpdateStatus(p) => Some(p.coupon_id.to_string()),
        }
    }

    pub(crate) fn query(&self) -> Vec<(String, String)> {
        match self {
            Self::List(p) => p.coupon_options.to_query(),
            _ => Vec::new(),
        }
    }

    pub(crate) fn body(&self) -> Result<Map<String, Value>> {
        match self {
            Self::List(_) | Self::Get(_) => Ok(Map::new()),
            Self::Update(p) if p.coupon_update_fields.is_empty() => Err(BridgeError::Validation(
                "At least one update field must be provided".to_owned(),
            )),
            Self::Update(p) => Ok(p.coupon_update_fields.clone()),
            Self::UpdateStatus(p) => {
                Ok(BodyBuilder::new().flag("is_active", p.coupon_is_active).build())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn op(kind: OperationKind, value: Value) -> CouponOperation {
        CouponOperation::decode(kind, value.as_object().unwrap()).unwrap()
    }

    #[test]
    fn test_list_query_uses_coupon_options() {
        let list = op(
            OperationKind::CouponList,
            json!({"couponOptions": {"sort_by": "code", "sort_order": "desc", "per_page": 10}}),
        );
        assert_eq!(
            list.query(),
            vec![
                ("per_page".to_owned(), "10".to_owned()),
                ("sort_by".to_owned(), "code".to_owned()),
                ("sort_order".to_owned(), "desc".to_owned()),
            ]
        );
    }

    #[test]
    fn test_update_forwards_fields_verbatim() {
        let update = op(
            OperationKind::CouponUpdate,
            json!({"couponId": 9, "couponUpdateFields": {"code": "RAYA10", "discount_amount": 10}}),
        );
        assert_eq!(update.path_id().as_deref(), Some("9"));
        assert_eq!(
            Value::Object(update.body().unwrap()),
            json!({"code": "RAYA10", "discount_amount": 10})
        );
    }

    #[test]
    fn test_update_empty_is_validation_error() {
        let update = op(OperationKind::CouponUpdate, json!({"couponId": 9, "couponUpdateFields": {}}));
        let Err(BridgeError::Validation(msg)) = update.body() else {
            unreachable!("expected Validation error")
        };
        assert_eq!(msg, "At least one update field must be provided");
    }

    #[test]
    fn test_update_status() {
        let status = op(OperationKind::CouponUpdateStatus, json!({"couponId": 3, "couponIsActive": false}));
        assert_eq!(Value::Object(status.body().unwrap()), json!({"is_active": "0"}));

        let default = op(OperationKind::CouponUpdateStatus, json!({"couponId": 3}));
        assert_eq!(Value::Object(default.body().unwrap()), json!({"is_active": "1"}));
    }

    #[test]
    fn test_rejects_form_kind() {
        let result = CouponOperation::decode(OperationKind::FormGet, &ParameterBag::new());
        assert!(matches!(result, Err(BridgeError::UnsupportedOperation { .. })));
    }
}
