//! Batch execution.
//!
//! A [`BatchRunner`] drives one selector over a list of parameter bags, strictly in order:
//! dispatch item N, execute it, record the outcome, then move on to item N+1.
//!
//! With failure tolerance on, every item yields exactly one [`ResultRecord`]. With it off,
//! the first failure stops the batch with [`BridgeError::BatchAborted`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::{
    classify::{ClassifiedError, classify},
    credentials::Credentials,
    dispatch::dispatch,
    error::{BridgeError, Result},
    operation::{OperationSelector, ParameterBag},
    transport::HttpExecutor,
};

/// Failure entry recorded in place of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// Classified message.
    pub error: String,
    /// Classified status code.
    pub status_code: u16,
    /// Time the failure was recorded.
    pub timestamp: DateTime<Utc>,
    /// Selected resource.
    pub resource: String,
    /// Selected operation.
    pub operation: String,
}

impl ErrorRecord {
    fn new(classified: ClassifiedError, selector: &OperationSelector) -> Self {
        Self {
            error: classified.message,
            status_code: classified.status_code,
            timestamp: Utc::now(),
            resource: selector.resource.as_str().to_owned(),
            operation: selector.operation.clone(),
        }
    }
}

/// Outcome of one item.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The API's JSON response, unchanged.
    Success(Value),
    /// A classified failure.
    Failure(ErrorRecord),
}

/// One output record, paired with the input item that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    /// Zero-based index of the input item.
    pub item_index: usize,
    /// What happened.
    pub outcome: Outcome,
}

impl ResultRecord {
    /// Returns the JSON handed back to the host.
    #[must_use]
    pub fn json(&self) -> Value {
        match &self.outcome {
            Outcome::Success(value) => value.clone(),
            Outcome::Failure(record) => serde_json::json!({
                "error": record.error,
                "statusCode": record.status_code,
                "timestamp": record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
                "resource": record.resource,
                "operation": record.operation,
            }),
        }
    }

    /// Returns true for a recorded failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failure(_))
    }
}

/// Sequential batch executor.
///
/// # Examples
///
/// ```rust,no_run
/// use bcl_bridge::{
///     batch::BatchRunner,
///     credentials::Credentials,
///     operation::{OperationSelector, Resource},
///     transport::HttpTransport,
/// };
/// use serde_json::json;
///
/// # async fn example() -> bcl_bridge::error::Result<()> {
/// let runner = BatchRunner::new(HttpTransport::new()?, Credentials::with_default_base_url("token"))
///     .continue_on_fail(true);
///
/// let selector = OperationSelector::new(Resource::Form, "get");
/// let items = vec![json!({"formId": 1}), json!({"formId": 2})];
/// let items: Vec<_> = items.into_iter().filter_map(|v| v.as_object().cloned()).collect();
///
/// for record in runner.run(&selector, &items).await? {
///     println!("{}: {}", record.item_index, record.json());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BatchRunner<E> {
    executor: E,
    credentials: Credentials,
    continue_on_fail: bool,
}

impl<E: HttpExecutor> BatchRunner<E> {
    /// Creates a runner that aborts on the first failure.
    #[must_use]
    pub fn new(executor: E, credentials: Credentials) -> Self {
        Self { executor, credentials, continue_on_fail: false }
    }

    /// Sets the failure-tolerance mode.
    #[must_use]
    pub fn continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }

    /// Returns the credentials used for every request.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Runs one batch.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::UnsupportedOperation`] if the selector is not in the dispatch
    ///   table; no item is processed
    /// - [`BridgeError::BatchAborted`] on the first failing item when failure tolerance
    ///   is off
    pub async fn run(
        &self,
        selector: &OperationSelector,
        items: &[ParameterBag],
    ) -> Result<Vec<ResultRecord>> {
        let kind = selector.kind()?;
        let span = info_span!(
            "batch",
            batch_id = %Uuid::new_v4(),
            operation = %kind,
            items = items.len(),
            continue_on_fail = self.continue_on_fail,
        );

        async move {
            info!("batch started");
            let mut records = Vec::with_capacity(items.len());

            for (item_index, item) in items.iter().enumerate() {
                match self.run_item(selector, item).instrument(info_span!("item", item_index)).await
                {
                    Ok(value) => {
                        records.push(ResultRecord { item_index, outcome: Outcome::Success(value) });
                    }
                    Err(error) => {
                        let classified = classify(&error);
                        warn!(
                            item_index,
                            status_code = classified.status_code,
                            precondition = error.is_precondition(),
                            error = %classified.message,
                            "item failed"
                        );
                        if !self.continue_on_fail {
                            return Err(BridgeError::BatchAborted {
                                item_index,
                                status_code: classified.status_code,
                                message: classified.message,
                                completed: records,
                            });
                        }
                        records.push(ResultRecord {
                            item_index,
                            outcome: Outcome::Failure(ErrorRecord::new(classified, selector)),
                        });
                    }
                }
            }

            let failed = records.iter().filter(|r| r.is_failure()).count();
            info!(succeeded = records.len() - failed, failed, "batch finished");
            Ok(records)
        }
        .instrument(span)
        .await
    }

    async fn run_item(&self, selector: &OperationSelector, item: &ParameterBag) -> Result<Value> {
        let request = dispatch(selector, item, &self.credentials)?;
        self.executor.execute(&request, &self.credentials).await
    }

    /// Executes the credential self-test (`GET /user`).
    ///
    /// # Errors
    ///
    /// Returns the classified failure if the API rejects the token or cannot be reached.
    pub async fn verify_credentials(&self) -> std::result::Result<Value, ClassifiedError> {
        let request = Credentials::self_test_request();
        self.executor
            .execute(&request, &self.credentials)
            .instrument(info_span!("verify_credentials", base_url = self.credentials.base_url()))
            .await
            .map_err(|e| classify(&e))
    }
}
