//! Typed operation selection.
//!
//! The host hands the bridge a loosely typed selection (`resource` plus an `operation`
//! string) and one [`ParameterBag`] per item. This module turns them into:
//!
//! - an [`OperationKind`]: a fieldless tag naming one row of the dispatch table, parsed once
//!   per batch from the [`OperationSelector`]
//! - an [`Operation`]: the typed parameters of one item, a sum type over the resource kind
//!
//! ```text
//! OperationSelector ──kind()──► OperationKind ──Operation::decode(bag)──► Operation
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{BridgeError, Result};

pub mod coupon;
pub mod form;
pub mod params;
pub mod payment_link;

pub use coupon::CouponOperation;
pub use form::FormOperation;
pub use params::{ListOptions, ParameterBag, SortOrder, StatusFilter};
pub use payment_link::{PaymentChannel, PaymentLinkOperation};

/// Top-level category of remote entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    /// Payment links and their transactions.
    PaymentLink,
    /// Payment forms.
    Form,
    /// Discount coupons.
    Coupon,
}

impl Resource {
    /// Returns the host-facing resource name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PaymentLink => "paymentLink",
            Self::Form => "form",
            Self::Coupon => "coupon",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "paymentLink" => Ok(Self::PaymentLink),
            "form" => Ok(Self::Form),
            "coupon" => Ok(Self::Coupon),
            other => Err(BridgeError::UnsupportedOperation {
                resource: other.to_owned(),
                operation: String::new(),
            }),
        }
    }
}

/// The resource/operation pair chosen for a whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSelector {
    /// Selected resource.
    pub resource: Resource,
    /// Selected operation name, e.g. `updateStatus`.
    pub operation: String,
}

impl OperationSelector {
    /// Creates a selector.
    #[must_use]
    pub fn new(resource: Resource, operation: impl Into<String>) -> Self {
        Self { resource, operation: operation.into() }
    }

    /// Parses a selector from host-facing names.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::UnsupportedOperation`] if the resource is unknown.
    pub fn parse(resource: &str, operation: &str) -> Result<Self> {
        let resource = resource.parse::<Resource>().map_err(|_| {
            BridgeError::UnsupportedOperation {
                resource: resource.to_owned(),
                operation: operation.to_owned(),
            }
        })?;
        Ok(Self::new(resource, operation))
    }

    /// Resolves the dispatch-table row for this selector.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::UnsupportedOperation`] if the pair is not in the table.
    pub fn kind(&self) -> Result<OperationKind> {
        OperationKind::from_parts(self.resource, &self.operation).ok_or_else(|| {
            BridgeError::UnsupportedOperation {
                resource: self.resource.as_str().to_owned(),
                operation: self.operation.clone(),
            }
        })
    }
}

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs, reason = "variant names mirror the resource.operation they tag")]
pub enum OperationKind {
    PaymentLinkCreate,
    PaymentLinkGetTransaction,
    FormList,
    FormGet,
    FormUpdateStatus,
    FormDuplicate,
    FormUpdateHomepage,
    FormUpdateSlug,
    FormUpdateTitle,
    FormUpdateContent,
    FormUpdateStock,
    FormUpdateAffiliate,
    FormUpdateRedirectUrls,
    FormUpdateWebhook,
    FormUpdateFacebookPixel,
    FormUpdateTiktokPixel,
    CouponList,
    CouponGet,
    CouponUpdate,
    CouponUpdateStatus,
}

impl OperationKind {
    /// Every supported operation, in table order.
    pub const ALL: [Self; 20] = [
        Self::PaymentLinkCreate,
        Self::PaymentLinkGetTransaction,
        Self::FormList,
        Self::FormGet,
        Self::FormUpdateStatus,
        Self::FormDuplicate,
        Self::FormUpdateHomepage,
        Self::FormUpdateSlug,
        Self::FormUpdateTitle,
        Self::FormUpdateContent,
        Self::FormUpdateStock,
        Self::FormUpdateAffiliate,
        Self::FormUpdateRedirectUrls,
        Self::FormUpdateWebhook,
        Self::FormUpdateFacebookPixel,
        Self::FormUpdateTiktokPixel,
        Self::CouponList,
        Self::CouponGet,
        Self::CouponUpdate,
        Self::CouponUpdateStatus,
    ];

    /// Returns the resource this operation acts on.
    #[must_use]
    pub const fn resource(self) -> Resource {
        match self {
            Self::PaymentLinkCreate | Self::PaymentLinkGetTransaction => Resource::PaymentLink,
            Self::CouponList | Self::CouponGet | Self::CouponUpdate | Self::CouponUpdateStatus => {
                Resource::Coupon
            }
            _ => Resource::Form,
        }
    }

    /// Returns the host-facing operation name.
    #[must_use]
    pub const fn operation_name(self) -> &'static str {
        match self {
            Self::PaymentLinkCreate => "create",
            Self::PaymentLinkGetTransaction => "getTransaction",
            Self::FormList | Self::CouponList => "list",
            Self::FormGet | Self::CouponGet => "get",
            Self::FormUpdateStatus | Self::CouponUpdateStatus => "updateStatus",
            Self::FormDuplicate => "duplicate",
            Self::FormUpdateHomepage => "updateHomepage",
            Self::FormUpdateSlug => "updateSlug",
            Self::FormUpdateTitle => "updateTitle",
            Self::FormUpdateContent => "updateContent",
            Self::FormUpdateStock => "updateStock",
            Self::FormUpdateAffiliate => "updateAffiliate",
            Self::FormUpdateRedirectUrls => "updateRedirectUrls",
            Self::FormUpdateWebhook => "updateWebhook",
            Self::FormUpdateFacebookPixel => "updateFacebookPixel",
            Self::FormUpdateTiktokPixel => "updateTiktokPixel",
            Self::CouponUpdate => "update",
        }
    }

    /// Looks up the operation for a resource and operation name.
    #[must_use]
    pub fn from_parts(resource: Resource, operation: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.resource() == resource && kind.operation_name() == operation)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource(), self.operation_name())
    }
}

/// Typed parameters of one item, grouped by resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Payment link operations.
    PaymentLink(PaymentLinkOperation),
    /// Form operations.
    Form(FormOperation),
    /// Coupon operations.
    Coupon(CouponOperation),
}

impl Operation {
    /// Decodes an item's parameter bag for the given operation.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidParameters`] if a required parameter is missing or
    /// has the wrong type.
    pub fn decode(kind: OperationKind, bag: &ParameterBag) -> Result<Self> {
        match kind.resource() {
            Resource::PaymentLink => PaymentLinkOperation::decode(kind, bag).map(Self::PaymentLink),
            Resource::Form => FormOperation::decode(kind, bag).map(Self::Form),
            Resource::Coupon => CouponOperation::decode(kind, bag).map(Self::Coupon),
        }
    }

    /// Returns the table row of this operation.
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::PaymentLink(op) => op.kind(),
            Self::Form(op) => op.kind(),
            Self::Coupon(op) => op.kind(),
        }
    }

    /// Returns the identifier substituted into the endpoint template, if any.
    #[must_use]
    pub fn path_id(&self) -> Option<String> {
        match self {
            Self::PaymentLink(op) => op.path_id(),
            Self::Form(op) => op.path_id(),
            Self::Coupon(op) => op.path_id(),
        }
    }

    /// Returns the query parameters of list operations.
    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        match self {
            Self::PaymentLink(_) => Vec::new(),
            Self::Form(op) => op.query(),
            Self::Coupon(op) => op.query(),
        }
    }

    /// Builds the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Validation`] when a required collection is empty.
    pub fn body(&self) -> Result<Map<String, Value>> {
        match self {
            Self::PaymentLink(op) => Ok(op.body()),
            Self::Form(op) => op.body(),
            Self::Coupon(op) => op.body(),
        }
    }
}
