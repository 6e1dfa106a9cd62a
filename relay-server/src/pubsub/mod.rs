//! Message queue publishing.

pub mod publisher;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{self, BoxFuture, FutureExt};

use relay_common::TopicPath;

use crate::error::GcpError;

pub use publisher::PubSubPublisher;

/// Hands message bytes to a topic.
///
/// `publish` returns once the message is handed off; the returned
/// [`PendingPublish`] resolves when the service acknowledges it.
pub trait MessagePublisher: Send + Sync {
    fn publish(&self, topic: &TopicPath, data: Vec<u8>) -> PendingPublish;
}

/// An in-flight publish resolving to the server-assigned message id.
///
/// Dropping it does not cancel the publish.
pub struct PendingPublish(BoxFuture<'static, Result<String, GcpError>>);

impl PendingPublish {
    pub fn new<F>(fut: F) -> Self
    where
        F: Future<Output = Result<String, GcpError>> + Send + 'static,
    {
        Self(fut.boxed())
    }

    /// An already-completed publish
    pub fn ready(result: Result<String, GcpError>) -> Self {
        Self::new(future::ready(result))
    }
}

impl Future for PendingPublish {
    type Output = Result<String, GcpError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.0.poll_unpin(cx)
    }
}
