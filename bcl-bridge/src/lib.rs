//! BCL Bridge: typed access to the BCL payment, form and coupon API
//!
//! This library turns a loosely typed selection (resource, operation and a bag of
//! parameters per item) into HTTP requests against the BCL REST API, executes them, and
//! reduces failures to human-readable messages. It is the engine behind the `bcl`
//! command-line host.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  selector + parameter bags
//! │     Host     │──────────────────────────────┐
//! └──────▲───────┘                              │
//!        │ result records                       │
//! ┌──────┴──────────────────────────────────────▼─────┐
//! │                 BatchRunner                       │
//! │  ┌────────────┐   ┌──────────────┐   ┌──────────┐ │
//! │  │ dispatch   │──►│ HttpExecutor │──►│ classify │ │
//! │  │ (pure)     │   │ (reqwest)    │   │          │ │
//! │  └────────────┘   └──────┬───────┘   └──────────┘ │
//! └──────────────────────────┼────────────────────────┘
//!                            │ HTTPS + Bearer token
//!                     ┌──────▼──────┐
//!                     │  BCL API    │
//!                     └─────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Build a request without sending it
//!
//! ```
//! use bcl_bridge::{
//!     credentials::Credentials,
//!     dispatch::dispatch,
//!     operation::{OperationSelector, Resource},
//!     request::HttpMethod,
//! };
//! use serde_json::json;
//!
//! let credentials = Credentials::with_default_base_url("my-token");
//! let selector = OperationSelector::new(Resource::Form, "updateStatus");
//! let item = json!({"formId": 12, "isActive": false});
//!
//! let request = dispatch(&selector, item.as_object().unwrap(), &credentials).unwrap();
//! assert_eq!(request.method, HttpMethod::Patch);
//! assert_eq!(request.url(&credentials), "https://bcl.my/api/forms/12/status");
//! assert_eq!(request.body.unwrap()["is_active"], json!("0"));
//! ```
//!
//! ## Run a batch
//!
//! ```rust,no_run
//! use bcl_bridge::{
//!     batch::BatchRunner,
//!     config::BclConfig,
//!     operation::OperationSelector,
//!     transport::HttpTransport,
//! };
//! use serde_json::json;
//!
//! # async fn example() -> bcl_bridge::error::Result<()> {
//! let config = BclConfig::from_toml("continue_on_fail = true")?;
//! let runner = BatchRunner::new(HttpTransport::with_config(&config.http)?, config.credentials(None)?)
//!     .continue_on_fail(config.continue_on_fail);
//!
//! let selector = OperationSelector::parse("coupon", "list")?;
//! let items = vec![json!({"couponOptions": {"status": "active"}}).as_object().cloned().unwrap()];
//! let records = runner.run(&selector, &items).await?;
//! println!("{} records", records.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`operation`]: resources, operation kinds and typed per-item parameters
//! - [`dispatch`]: the method/path table and request construction
//! - [`request`]: request descriptors, query encoding and body building
//! - [`credentials`]: API token and base URL
//! - [`transport`]: the [`HttpExecutor`](transport::HttpExecutor) seam and its reqwest
//!   implementation
//! - [`classify`]: failure messages
//! - [`batch`]: sequential batch execution with optional failure tolerance
//! - [`config`]: TOML configuration

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(clippy::multiple_crate_versions, reason = "transitive dependencies from reqwest")]

pub mod batch;
pub mod classify;
pub mod config;
pub mod credentials;
pub mod dispatch;
pub mod error;
pub mod operation;
pub mod request;
pub mod transport;

pub use batch::{BatchRunner, ResultRecord};
pub use config::BclConfig;
pub use credentials::Credentials;
pub use error::{BridgeError, Result};
pub use operation::{OperationKind, OperationSelector, ParameterBag, Resource};
pub use request::RequestDescriptor;
