// self
use crate::{
	_prelude::*,
	obs::{self, Operation, OperationOutcome},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// Lifecycle of one SDK operation: opening it counts an attempt, [`OperationSpan::finish`]
/// stamps the outcome on the span and the counter.
///
/// With `tracing` enabled the span is `privx_sdk.operation` carrying `operation`, `user`,
/// `role`, and `outcome` fields; the last three stay empty until recorded.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	operation: Operation,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Opens a span for `operation` and records an [`OperationOutcome::Attempt`].
	pub fn new(operation: Operation) -> Self {
		obs::record_operation_outcome(operation, OperationOutcome::Attempt);

		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"privx_sdk.operation",
				operation = operation.as_str(),
				user = tracing::field::Empty,
				role = tracing::field::Empty,
				outcome = tracing::field::Empty,
			);

			Self { operation, span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			Self { operation }
		}
	}

	/// Records the membership the operation is about.
	pub fn membership(self, user: &str, role: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			self.span.record("user", user);
			self.span.record("role", role);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (user, role);
		}

		self
	}

	/// Operation this span tracks.
	pub fn operation(&self) -> Operation {
		self.operation
	}

	/// Runs synchronous work inside the span.
	pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(f)
		}
		#[cfg(not(feature = "tracing"))]
		{
			f()
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Records how the operation ended.
	pub fn finish(&self, outcome: OperationOutcome) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("outcome", outcome.as_str());
		}

		obs::record_operation_outcome(self.operation, outcome);
	}
}

/// Reports a config file that was read but could not be parsed and is therefore ignored.
pub(crate) fn config_file_skipped(path: &Path, failure: &dyn StdError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(path = %path.display(), error = %failure, "ignoring unparsable config file");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (path, failure);
	}
}

/// Reports a reconciliation that found the desired membership already in place.
pub(crate) fn membership_unchanged(operation: Operation, user: &str, role: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(operation = operation.as_str(), user, role, "membership already converged");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (operation, user, role);
	}
}
