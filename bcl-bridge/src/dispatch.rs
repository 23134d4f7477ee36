//! Request dispatch table.
//!
//! Maps every [`OperationKind`] to its HTTP method and endpoint template, and turns one
//! item's parameters into a [`RequestDescriptor`]. Dispatch is pure: it performs no I/O
//! and the same inputs always produce the same descriptor.
//!
//! Templates contain at most one `{id}` placeholder, filled from
//! [`Operation::path_id`] and percent-encoded as a single path segment.

use tracing::debug;

use crate::{
    credentials::Credentials,
    error::Result,
    operation::{Operation, OperationKind, OperationSelector, ParameterBag},
    request::{HttpMethod, RequestDescriptor, encode_path_segment},
};

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Operation this row serves.
    pub kind: OperationKind,
    /// HTTP method.
    pub method: HttpMethod,
    /// Endpoint path template relative to the base URL.
    pub template: &'static str,
}

impl Route {
    const fn new(kind: OperationKind, method: HttpMethod, template: &'static str) -> Self {
        Self { kind, method, template }
    }

    /// Resolves the template against an identifier, encoded as one path segment.
    #[must_use]
    pub fn path(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => self.template.replace("{id}", &encode_path_segment(id)),
            None => self.template.to_owned(),
        }
    }
}

/// The dispatch table, in [`OperationKind::ALL`] order.
pub const ROUTES: [Route; 20] = {
    use HttpMethod::{Get, Patch, Post};
    use OperationKind as K;

    [
        Route::new(K::PaymentLinkCreate, Post, "/payment-link"),
        Route::new(K::PaymentLinkGetTransaction, Get, "/transaction/{id}"),
        Route::new(K::FormList, Get, "/forms"),
        Route::new(K::FormGet, Get, "/forms/{id}"),
        Route::new(K::FormUpdateStatus, Patch, "/forms/{id}/status"),
        Route::new(K::FormDuplicate, Post, "/forms/duplicate"),
        Route::new(K::FormUpdateHomepage, Patch, "/forms/{id}/homepage"),
        Route::new(K::FormUpdateSlug, Patch, "/forms/{id}/slug"),
        Route::new(K::FormUpdateTitle, Patch, "/forms/{id}/title"),
        Route::new(K::FormUpdateContent, Patch, "/forms/{id}/content"),
        Route::new(K::FormUpdateStock, Patch, "/forms/{id}/stock"),
        Route::new(K::FormUpdateAffiliate, Patch, "/forms/{id}/affiliate"),
        Route::new(K::FormUpdateRedirectUrls, Patch, "/forms/{id}/redirect-urls"),
        Route::new(K::FormUpdateWebhook, Patch, "/forms/{id}/webhook"),
        Route::new(K::FormUpdateFacebookPixel, Patch, "/forms/{id}/facebook-pixel"),
        Route::new(K::FormUpdateTiktokPixel, Patch, "/forms/{id}/tiktok-pixel"),
        Route::new(K::CouponList, Get, "/coupons"),
        Route::new(K::CouponGet, Get, "/coupons/{id}"),
        Route::new(K::CouponUpdate, Patch, "/coupons/{id}"),
        Route::new(K::CouponUpdateStatus, Patch, "/coupons/{id}/status"),
    ]
};

/// Returns the table row for an operation.
#[must_use]
pub fn route(kind: OperationKind) -> Route {
    // ROUTES is indexed in OperationKind::ALL order.
    ROUTES[kind as usize]
}

/// Builds the request for an already decoded operation.
///
/// # Errors
///
/// Returns [`BridgeError::Validation`](crate::error::BridgeError::Validation) when a
/// required collection is empty.
pub fn build_request(operation: &Operation) -> Result<RequestDescriptor> {
    let route = route(operation.kind());
    let path = route.path(operation.path_id().as_deref());

    let request = if route.method.has_body() {
        RequestDescriptor::with_body(route.method, path, operation.body()?)
    } else {
        RequestDescriptor { method: route.method, path, query: Vec::new(), body: None }
    };
    Ok(request.with_query(operation.query()))
}

/// Builds the request for one item.
///
/// # Errors
///
/// - [`BridgeError::UnsupportedOperation`](crate::error::BridgeError::UnsupportedOperation)
///   if the selector is not in the table
/// - [`BridgeError::InvalidParameters`](crate::error::BridgeError::InvalidParameters) if
///   the parameter bag does not fit the operation
/// - [`BridgeError::Validation`](crate::error::BridgeError::Validation) for an empty stock
///   list or coupon update
pub fn dispatch(
    selector: &OperationSelector,
    item: &ParameterBag,
    credentials: &Credentials,
) -> Result<RequestDescriptor> {
    let kind = selector.kind()?;
    let operation = Operation::decode(kind, item)?;
    let request = build_request(&operation)?;

    debug!(
        operation = %kind,
        method = %request.method,
        url = %request.url(credentials),
        "built request descriptor"
    );

    Ok(request)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::{error::BridgeError, operation::Resource};

    fn bag(value: Value) -> ParameterBag {
        value.as_object().cloned().unwrap()
    }

    fn credentials() -> Credentials {
        Credentials::new("token", "https://bcl.my/api")
    }

    #[test]
    fn test_routes_follow_kind_order() {
        for (index, kind) in OperationKind::ALL.into_iter().enumerate() {
            assert_eq!(ROUTES[index].kind, kind, "row {index}");
            assert_eq!(route(kind).kind, kind);
        }
    }

    #[test]
    fn test_every_template_starts_with_slash() {
        for row in ROUTES {
            assert!(row.template.starts_with('/'), "{}", row.kind);
        }
    }

    #[test]
    fn test_route_path_substitution() {
        let row = route(OperationKind::FormUpdateStock);
        assert_eq!(row.path(Some("12")), "/forms/12/stock");
        assert_eq!(route(OperationKind::FormList).path(None), "/forms");
    }

    #[test]
    fn test_identifier_stays_one_segment() {
        let selector = OperationSelector::new(Resource::PaymentLink, "getTransaction");
        let request =
            dispatch(&selector, &bag(json!({"orderNumber": "ORD?x#1/2"})), &credentials()).unwrap();
        assert_eq!(request.path, "/transaction/ORD%3Fx%231%2F2");
        assert!(request.query.is_empty());
        assert_eq!(request.url(&credentials()), "https://bcl.my/api/transaction/ORD%3Fx%231%2F2");
    }

    #[test]
    fn test_dispatch_get_has_no_body() {
        let selector = OperationSelector::new(Resource::Form, "get");
        let request = dispatch(&selector, &bag(json!({"formId": 7})), &credentials()).unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "/forms/7");
        assert!(request.body.is_none());
    }

    #[test]
    fn test_dispatch_list_query() {
        let selector = OperationSelector::new(Resource::Form, "list");
        let request = dispatch(
            &selector,
            &bag(json!({"options": {"page": 2, "status": "active", "search": ""}})),
            &credentials(),
        )
        .unwrap();
        assert_eq!(request.path_and_query(), "/forms?page=2&status=active");
        assert_eq!(request.url(&credentials()), "https://bcl.my/api/forms?page=2&status=active");
    }

    #[test]
    fn test_dispatch_patch_body() {
        let selector = OperationSelector::new(Resource::Coupon, "updateStatus");
        let request =
            dispatch(&selector, &bag(json!({"couponId": 4, "couponIsActive": true})), &credentials())
                .unwrap();
        assert_eq!(request.method, HttpMethod::Patch);
        assert_eq!(request.path, "/coupons/4/status");
        assert_eq!(request.body.map(Value::Object), Some(json!({"is_active": "1"})));
    }

    #[test]
    fn test_dispatch_unknown_operation() {
        let selector = OperationSelector::new(Resource::PaymentLink, "refund");
        let result = dispatch(&selector, &ParameterBag::new(), &credentials());
        assert!(matches!(result, Err(BridgeError::UnsupportedOperation { .. })));
    }

    #[test]
    fn test_dispatch_validation_error() {
        let selector = OperationSelector::new(Resource::Coupon, "update");
        let result = dispatch(
            &selector,
            &bag(json!({"couponId": 1, "couponUpdateFields": {}})),
            &credentials(),
        );
        assert!(matches!(result, Err(BridgeError::Validation(_))));
    }

    #[test]
    fn test_dispatch_is_deterministic() {
        let selector = OperationSelector::new(Resource::Form, "updateWebhook");
        let item = bag(json!({"formId": 2, "webhookSettings": {"enabled": false}}));
        let first = dispatch(&selector, &item, &credentials()).unwrap();
        let second = dispatch(&selector, &item, &credentials()).unwrap();
        assert_eq!(first, second);
    }
}
