//! Form operations.
//!
//! Every operation except `list` and `duplicate` targets one form by its numeric `formId`.
//! Settings collections (affiliate, redirect, webhook, pixels) only send the keys the
//! host actually supplied.

use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{
    OperationKind,
    params::{ListOptions, ParameterBag, QueryValue, decode, default_true, null_as_default},
};
use crate::{
    error::{BridgeError, Result},
    request::BodyBuilder,
};

/// Sort fields of `form.list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormSortField {
    /// Form title.
    Title,
    /// Creation time.
    CreatedAt,
    /// Last update time.
    UpdatedAt,
    /// Form slug.
    Slug,
}

impl QueryValue for FormSortField {
    fn as_query(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Slug => "slug",
        }
    }
}

/// Events a form webhook can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WebhookEvent {
    /// `form-submit`
    FormSubmit,
    /// `payment-success`
    PaymentSuccess,
    /// `direct-debit`
    DirectDebit,
}

impl WebhookEvent {
    /// Returns the wire name of the event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FormSubmit => "form-submit",
            Self::PaymentSuccess => "payment-success",
            Self::DirectDebit => "direct-debit",
        }
    }
}

/// Parameters of `form.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListForms {
    /// Filtering and paging options.
    #[serde(default)]
    pub options: ListOptions<FormSortField>,
}

/// Parameters of operations addressing a form by id only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRef {
    /// Form identifier.
    pub form_id: u64,
}

/// Parameters of `form.updateStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFormStatus {
    /// Form identifier.
    pub form_id: u64,
    /// Whether the form accepts submissions.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Parameters of `form.duplicate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateForm {
    /// Form to copy.
    pub form_id_to_duplicate: u64,
    /// Title of the copy.
    pub duplicate_title: String,
    /// Slug of the copy.
    pub duplicate_slug: String,
}

/// Parameters of `form.updateHomepage`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHomepage {
    /// Form identifier.
    pub form_id: u64,
    /// Whether the form is listed on the homepage.
    #[serde(default = "default_true")]
    pub show_on_homepage: bool,
}

/// Parameters of `form.updateSlug`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlug {
    /// Form identifier.
    pub form_id: u64,
    /// New slug.
    pub slug: String,
}

/// Parameters of `form.updateTitle`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTitle {
    /// Form identifier.
    pub form_id: u64,
    /// New title.
    pub title: String,
}

/// Parameters of `form.updateContent`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContent {
    /// Form identifier.
    pub form_id: u64,
    /// HTML content, sent as `content_editor`.
    pub content: String,
}

/// One stock quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StockItem {
    /// Product item identifier.
    pub id: u64,
    /// New stock quantity.
    pub stock: u32,
}

/// Stock items collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StockItems {
    /// Items to update.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<StockItem>,
}

/// Parameters of `form.updateStock`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStock {
    /// Form identifier.
    pub form_id: u64,
    /// Items to update.
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock_items: StockItems,
}

/// Affiliate settings collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AffiliateSettings {
    /// Enable the affiliate programme.
    #[serde(default)]
    pub enable_affiliate: Option<bool>,
    /// Show affiliate information to payers.
    #[serde(default)]
    pub show_affiliate_info: Option<bool>,
    /// Use form-level commission settings.
    #[serde(default)]
    pub override_commission_settings: Option<bool>,
}

/// Parameters of `form.updateAffiliate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAffiliate {
    /// Form identifier.
    pub form_id: u64,
    /// Settings to change.
    #[serde(default)]
    pub affiliate_settings: AffiliateSettings,
}

/// Redirect URL collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RedirectUrls {
    /// Redirect after a successful payment.
    #[serde(default)]
    pub success_url: Option<String>,
    /// Redirect after a failed payment.
    #[serde(default)]
    pub failed_url: Option<String>,
}

/// Parameters of `form.updateRedirectUrls`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRedirectUrls {
    /// Form identifier.
    pub form_id: u64,
    /// URLs to change.
    #[serde(default)]
    pub redirect_urls: RedirectUrls,
}

/// Webhook settings collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WebhookSettings {
    /// Whether the webhook fires.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Target URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Subscribed events. Sent whenever supplied, even if empty.
    #[serde(default)]
    pub events: Option<Vec<WebhookEvent>>,
}

/// Parameters of `form.updateWebhook`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWebhook {
    /// Form identifier.
    pub form_id: u64,
    /// Webhook settings.
    #[serde(default)]
    pub webhook_settings: WebhookSettings,
}

/// Tracking pixel providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelProvider {
    /// Facebook pixel and conversions API.
    Facebook,
    /// TikTok pixel and events API.
    Tiktok,
}

impl PixelProvider {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Tiktok => "tiktok",
        }
    }
}

/// Provider-neutral pixel settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelSettings {
    /// Enable the browser pixel.
    pub enable_pixel: Option<bool>,
    /// Pixel identifier.
    pub pixel_id: Option<String>,
    /// Enable the server-side API.
    pub enable_api: Option<bool>,
    /// Server-side API token.
    pub api_token: Option<String>,
}

impl PixelSettings {
    fn body(&self, provider: PixelProvider) -> Map<String, Value> {
        let p = provider.prefix();
        BodyBuilder::new()
            .optional(&format!("enable_{p}_pixel"), self.enable_pixel)
            .non_empty(&format!("{p}_pixel_id"), self.pixel_id.as_deref())
            .optional(&format!("enable_{p}_api"), self.enable_api)
            .non_empty(&format!("{p}_api_token"), self.api_token.as_deref())
            .build()
    }
}

#[derive(Debug, Default, Deserialize)]
struct FacebookPixelSettings {
    #[serde(default)]
    enable_facebook_pixel: Option<bool>,
    #[serde(default)]
    facebook_pixel_id: Option<String>,
    #[serde(default)]
    enable_facebook_api: Option<bool>,
    #[serde(default)]
    facebook_api_token: Option<String>,
}

impl From<FacebookPixelSettings> for PixelSettings {
    fn from(s: FacebookPixelSettings) -> Self {
        Self {
            enable_pixel: s.enable_facebook_pixel,
            pixel_id: s.facebook_pixel_id,
            enable_api: s.enable_facebook_api,
            api_token: s.facebook_api_token,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct TiktokPixelSettings {
    #[serde(default)]
    enable_tiktok_pixel: Option<bool>,
    #[serde(default)]
    tiktok_pixel_id: Option<String>,
    #[serde(default)]
    enable_tiktok_api: Option<bool>,
    #[serde(default)]
    tiktok_api_token: Option<String>,
}

impl From<TiktokPixelSettings> for PixelSettings {
    fn from(s: TiktokPixelSettings) -> Self {
        Self {
            enable_pixel: s.enable_tiktok_pixel,
            pixel_id: s.tiktok_pixel_id,
            enable_api: s.enable_tiktok_api,
            api_token: s.tiktok_api_token,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FacebookPixelParams {
    form_id: u64,
    #[serde(default)]
    facebook_pixel_settings: FacebookPixelSettings,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TiktokPixelParams {
    form_id: u64,
    #[serde(default)]
    tiktok_pixel_settings: TiktokPixelSettings,
}

/// Parameters of `form.updateFacebookPixel` and `form.updateTiktokPixel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePixel {
    /// Form identifier.
    pub form_id: u64,
    /// Pixel provider.
    pub provider: PixelProvider,
    /// Settings to change.
    pub settings: PixelSettings,
}

/// Form operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs, reason = "variants mirror the operation names")]
pub enum FormOperation {
    List(ListForms),
    Get(FormRef),
    UpdateStatus(UpdateFormStatus),
    Duplicate(DuplicateForm),
    UpdateHomepage(UpdateHomepage),
    UpdateSlug(UpdateSlug),
    UpdateTitle(UpdateTitle),
    UpdateContent(UpdateContent),
    UpdateStock(UpdateStock),
    UpdateAffiliate(UpdateAffiliate),
    UpdateRedirectUrls(UpdateRedirectUrls),
    UpdateWebhook(UpdateWebhook),
    UpdatePixel(UpdatePixel),
}

impl FormOperation {
    pub(crate) fn decode(kind: OperationKind, bag: &ParameterBag) -> Result<Self> {
        use OperationKind as K;

        match kind {
            K::FormList => decode(kind, bag).map(Self::List),
            K::FormGet => decode(kind, bag).map(Self::Get),
            K::FormUpdateStatus => decode(kind, bag).map(Self::UpdateStatus),
            K::FormDuplicate => decode(kind, bag).map(Self::Duplicate),
            K::FormUpdateHomepage => decode(kind, bag).map(Self::UpdateHomepage),
            K::FormUpdateSlug => decode(kind, bag).map(Self::UpdateSlug),
            K::FormUpdateTitle => decode(kind, bag).map(Self::UpdateTitle),
            K::FormUpdateContent => decode(kind, bag).map(Self::UpdateContent),
            K::FormUpdateStock => decode(kind, bag).map(Self::UpdateStock),
            K::FormUpdateAffiliate => decode(kind, bag).map(Self::UpdateAffiliate),
            K::FormUpdateRedirectUrls => decode(kind, bag).map(Self::UpdateRedirectUrls),
            K::FormUpdateWebhook => decode(kind, bag).map(Self::UpdateWebhook),
            K::FormUpdateFacebookPixel => {
                let params: FacebookPixelParams = decode(kind, bag)?;
                Ok(Self::UpdatePixel(UpdatePixel {
                    form_id: params.form_id,
                    provider: PixelProvider::Facebook,
                    settings: params.facebook_pixel_settings.into(),
                }))
            }
            K::FormUpdateTiktokPixel => {
                let params: TiktokPixelParams = decode(kind, bag)?;
                Ok(Self::UpdatePixel(UpdatePixel {
                    form_id: params.form_id,
                    provider: PixelProvider::Tiktok,
                    settings: params.tiktok_pixel_settings.into(),
                }))
            }
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
            Self::List(_) => OperationKind::FormList,
            Self::Get(_) => OperationKind::FormGet,
            Self::UpdateStatus(_) => OperationKind::FormUpdateStatus,
            Self::Duplicate(_) => OperationKind::FormDuplicate,
            Self::UpdateHomepage(_) => OperationKind::FormUpdateHomepage,
            Self::UpdateSlug(_) => OperationKind::FormUpdateSlug,
            Self::UpdateTitle(_) => OperationKind::FormUpdateTitle,
            Self::UpdateContent(_) => OperationKind::FormUpdateContent,
            Self::UpdateStock(_) => OperationKind::FormUpdateStock,
            Self::UpdateAffiliate(_) => OperationKind::FormUpdateAffiliate,
            Self::UpdateRedirectUrls(_) => OperationKind::FormUpdateRedirectUrls,
            Self::UpdateWebhook(_) => OperationKind::FormUpdateWebhook,
            Self::UpdatePixel(p) => match p.provider {
                PixelProvider::Facebook => OperationKind::FormUpdateFacebookPixel,
                PixelProvider::Tiktok => OperationKind::FormUpdateTiktokPixel,
            },
        }
    }

    pub(crate) fn path_id(&self) -> Option<String> {
        let form_id = match self {
            Self::List(_) | Self::Duplicate(_) => return None,
            Self::Get(p) => p.form_id,
            Self::UpdateStatus(p) => p.form_id,
            Self::UpdateHomepage(p) => p.form_id,
            Self::UpdateSlug(p) => p.form_id,
            Self::UpdateTitle(p) => p.form_id,
            Self::UpdateContent(p) => p.form_id,
            Self::UpdateStock(p) => p.form_id,
            Self::UpdateAffiliate(p) => p.form_id,
            Self::UpdateRedirectUrls(p) => p.form_id,
            Self::UpdateWebhook(p) => p.form_id,
            Self::UpdatePixel(p) => p.form_id,
        };
        Some(form_id.to_string())
    }

    pub(crate) fn query(&self) -> Vec<(String, String)> {
        match self {
            Self::List(p) => p.options.to_query(),
            _ => Vec::new(),
        }
    }

    pub(crate) fn body(&self) -> Result<Map<String, Value>> {
        let body = match self {
            Self::List(_) | Self::Get(_) => Map::new(),
            Self::UpdateStatus(p) => BodyBuilder::new().flag("is_active", p.is_active).build(),
            Self::Duplicate(p) => BodyBuilder::new()
                .field("form_id", p.form_id_to_duplicate)
                .field("title", p.duplicate_title.as_str())
                .field("slug", p.duplicate_slug.as_str())
                .build(),
            Self::UpdateHomepage(p) => {
                BodyBuilder::new().flag("show_on_homepage", p.show_on_homepage).build()
            }
            Self::UpdateSlug(p) => BodyBuilder::new().field("slug", p.slug.as_str()).build(),
            Self::UpdateTitle(p) => BodyBuilder::new().field("title", p.title.as_str()).build(),
            Self::UpdateContent(p) => {
                BodyBuilder::new().field("content_editor", p.content.as_str()).build()
            }
            Self::UpdateStock(p) => {
                if p.stock_items.items.is_empty() {
                    return Err(BridgeError::Validation(
                        "At least one stock item must be provided".to_owned(),
                    ));
                }
                let items: Vec<Value> = p
                    .stock_items
                    .items
                    .iter()
                    .map(|item| json!({"id": item.id, "stock": item.stock}))
                    .collect();
                BodyBuilder::new().field("items", items).build()
            }
            Self::UpdateAffiliate(p) => {
                let s = &p.affiliate_settings;
                BodyBuilder::new()
                    .optional_flag("enable_affiliate", s.enable_affiliate)
                    .optional_flag("show_affiliate_info", s.show_affiliate_info)
                    .optional_flag("override_commission_settings", s.override_commission_settings)
                    .build()
            }
            Self::UpdateRedirectUrls(p) => BodyBuilder::new()
                .non_empty("success_url", p.redirect_urls.success_url.as_deref())
                .non_empty("failed_url", p.redirect_urls.failed_url.as_deref())
                .build(),
            Self::UpdateWebhook(p) => {
                let s = &p.webhook_settings;
                let events = s
                    .events
                    .as_ref()
                    .map(|events| events.iter().map(|e| e.as_str()).collect::<Vec<_>>());
                BodyBuilder::new()
                    .optional("enabled", s.enabled)
                    .non_empty("url", s.url.as_deref())
                    .optional("events", events)
                    .build()
            }
            Self::UpdatePixel(p) => p.settings.body(p.provider),
        };
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(kind: OperationKind, value: Value) -> FormOperation {
        FormOperation::decode(kind, value.as_object().unwrap()).unwrap()
    }

    #[test]
    fn test_list_query_from_options() {
        let list = op(
            OperationKind::FormList,
            json!({"options": {"page": 2, "status": "active", "search": ""}}),
        );
        assert_eq!(
            list.query(),
            vec![("page".to_owned(), "2".to_owned()), ("status".to_owned(), "active".to_owned())]
        );
        assert_eq!(list.path_id(), None);
    }

    #[test]
    fn test_list_without_options() {
        let list = op(OperationKind::FormList, json!({}));
        assert!(list.query().is_empty());
    }

    #[test]
    fn test_list_rejects_unknown_sort_field() {
        let bag = json!({"options": {"sort_by": "code"}});
        let result = FormOperation::decode(OperationKind::FormList, bag.as_object().unwrap());
        assert!(matches!(result, Err(BridgeError::InvalidParameters { .. })));
    }

    #[test]
    fn test_update_status_flag() {
        let inactive = op(OperationKind::FormUpdateStatus, json!({"formId": 12, "isActive": false}));
        assert_eq!(Value::Object(inactive.body().unwrap()), json!({"is_active": "0"}));
        assert_eq!(inactive.path_id().as_deref(), Some("12"));
    }

    #[test]
    fn test_boolean_selectors_default_to_true() {
        let status = op(OperationKind::FormUpdateStatus, json!({"formId": 1}));
        assert_eq!(Value::Object(status.body().unwrap()), json!({"is_active": "1"}));

        let homepage = op(OperationKind::FormUpdateHomepage, json!({"formId": 1}));
        assert_eq!(Value::Object(homepage.body().unwrap()), json!({"show_on_homepage": "1"}));
    }

    #[test]
    fn test_duplicate_body() {
        let dup = op(
            OperationKind::FormDuplicate,
            json!({"formIdToDuplicate": 5, "duplicateTitle": "Copy", "duplicateSlug": "copy"}),
        );
        assert_eq!(dup.path_id(), None);
        assert_eq!(
            Value::Object(dup.body().unwrap()),
            json!({"form_id": 5, "title": "Copy", "slug": "copy"})
        );
    }

    #[test]
    fn test_update_content_renames_key() {
        let content = op(OperationKind::FormUpdateContent, json!({"formId": 3, "content": "<p>hi</p>"}));
        assert_eq!(Value::Object(content.body().unwrap()), json!({"content_editor": "<p>hi</p>"}));
    }

    #[test]
    fn test_update_stock_items() {
        let stock = op(
            OperationKind::FormUpdateStock,
            json!({"formId": 9, "stockItems": {"items": [{"id": 1, "stock": 5}, {"id": 2, "stock": 0}]}}),
        );
        assert_eq!(
            Value::Object(stock.body().unwrap()),
            json!({"items": [{"id": 1, "stock": 5}, {"id": 2, "stock": 0}]})
        );
    }

    #[test]
    fn test_update_stock_empty_is_validation_error() {
        for bag in [
            json!({"formId": 9}),
            json!({"formId": 9, "stockItems": null}),
            json!({"formId": 9, "stockItems": {"items": null}}),
            json!({"formId": 9, "stockItems": {"items": []}}),
        ] {
            let stock = op(OperationKind::FormUpdateStock, bag);
            let Err(BridgeError::Validation(msg)) = stock.body() else {
                unreachable!("expected Validation error")
            };
            assert_eq!(msg, "At least one stock item must be provided");
        }
    }

    #[test]
    fn test_affiliate_only_present_flags() {
        let affiliate = op(
            OperationKind::FormUpdateAffiliate,
            json!({"formId": 4, "affiliateSettings": {"enable_affiliate": true, "override_commission_settings": false}}),
        );
        assert_eq!(
            Value::Object(affiliate.body().unwrap()),
            json!({"enable_affiliate": "1", "override_commission_settings": "0"})
        );
    }

    #[test]
    fn test_redirect_urls_skip_empty() {
        let redirect = op(
            OperationKind::FormUpdateRedirectUrls,
            json!({"formId": 4, "redirectUrls": {"success_url": "https://shop.my/ok", "failed_url": ""}}),
        );
        assert_eq!(
            Value::Object(redirect.body().unwrap()),
            json!({"success_url": "https://shop.my/ok"})
        );
    }

    #[test]
    fn test_webhook_body() {
        let webhook = op(
            OperationKind::FormUpdateWebhook,
            json!({"formId": 4, "webhookSettings": {
                "enabled": true,
                "url": "https://hooks.example.com/bcl",
                "events": ["form-submit", "payment-success"],
            }}),
        );
        assert_eq!(
            Value::Object(webhook.body().unwrap()),
            json!({
                "enabled": true,
                "url": "https://hooks.example.com/bcl",
                "events": ["form-submit", "payment-success"],
            })
        );
    }

    #[test]
    fn test_webhook_empty_events_are_sent() {
        let webhook = op(
            OperationKind::FormUpdateWebhook,
            json!({"formId": 4, "webhookSettings": {"url": "", "events": []}}),
        );
        assert_eq!(Value::Object(webhook.body().unwrap()), json!({"events": []}));
    }

    #[test]
    fn test_webhook_rejects_unknown_event() {
        let bag = json!({"formId": 4, "webhookSettings": {"events": ["refund"]}});
        let result = FormOperation::decode(OperationKind::FormUpdateWebhook, bag.as_object().unwrap());
        assert!(result.is_err());
    }

    #[test]
    fn test_facebook_pixel_body() {
        let pixel = op(
            OperationKind::FormUpdateFacebookPixel,
            json!({"formId": 8, "facebookPixelSettings": {
                "enable_facebook_pixel": true,
                "facebook_pixel_id": "123",
                "enable_facebook_api": false,
                "facebook_api_token": "",
            }}),
        );
        assert_eq!(pixel.kind(), OperationKind::FormUpdateFacebookPixel);
        assert_eq!(
            Value::Object(pixel.body().unwrap()),
            json!({"enable_facebook_pixel": true, "facebook_pixel_id": "123", "enable_facebook_api": false})
        );
    }

    #[test]
    fn test_tiktok_pixel_body() {
        let pixel = op(
            OperationKind::FormUpdateTiktokPixel,
            json!({"formId": 8, "tiktokPixelSettings": {"tiktok_pixel_id": "T1", "tiktok_api_token": "tok"}}),
        );
        assert_eq!(pixel.kind(), OperationKind::FormUpdateTiktokPixel);
        assert_eq!(
            Value::Object(pixel.body().unwrap()),
            json!({"tiktok_pixel_id": "T1", "tiktok_api_token": "tok"})
        );
    }

    #[test]
    fn test_missing_form_id() {
        let result = FormOperation::decode(OperationKind::FormUpdateSlug, json!({"slug": "x"}).as_object().unwrap());
        let Err(BridgeError::InvalidParameters { operation, reason }) = result else {
            unreachable!("expected InvalidParameters")
        };
        assert_eq!(operation, "form.updateSlug");
        assert!(reason.contains("formId"));
    }
}
