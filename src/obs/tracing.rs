// crates.io
use tracing::{Instrument, instrument::Instrumented};
// self
use crate::_prelude::*;

/// Span wrapper used around every API request.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the HTTP method and request path.
	pub fn new(method: &Method, path: &str) -> Self {
		let span = tracing::info_span!("hns.api", method = method.as_str(), path);

		Self { span }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		fut.instrument(self.span.clone())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = RequestSpan::new(&Method::GET, "/health");
		let value = RequestSpan::instrument(&span, async { 42 }).await;

		assert_eq!(value, 42);
	}
}
