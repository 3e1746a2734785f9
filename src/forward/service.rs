//! The forward operation: translate, send once, compose.

use crate::forward::composer::compose;
use crate::forward::error::ForwardError;
use crate::forward::model::{ForwardResult, InboundRequest};
use crate::forward::transport::{HttpTransport, Transport};
use crate::forward::translator::translate;

/// Stateless forwarder over a shared transport.
///
/// Any number of forwards may run concurrently; nothing here is mutated
/// after construction.
#[derive(Debug, Clone)]
pub struct Forwarder<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> Forwarder<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one request/response round trip.
    ///
    /// Downstream 4xx/5xx responses are returned as results, not errors.
    /// Transport failures propagate unchanged.
    pub async fn forward(&self, inbound: &InboundRequest) -> Result<ForwardResult, ForwardError> {
        let outbound = translate(inbound)?;

        tracing::info!(
            method = %outbound.method,
            url = %outbound.url,
            has_body = outbound.content.is_some(),
            "Forwarding request"
        );

        let response = self.transport.send(outbound).await?;

        tracing::debug!(status = response.status, "Downstream responded");

        Ok(compose(response))
    }
}
