use std::fmt::{Display, Formatter};
use std::sync::Arc;

use tokio::sync::{broadcast, oneshot};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CancelReason {
	Shutdown,
}

impl Display for CancelReason {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Shutdown => write!(f, "Shutdown"),
		}
	}
}

struct RawContext {
	// Dropped together with the last clone of the context, which is what
	// `Handler::cancel` waits on.
	_sender: oneshot::Sender<()>,
	cancel_receiver: broadcast::Receiver<()>,
}

/// A cloneable shutdown signal shared by every long running task of the
/// process.
#[derive(Clone)]
pub struct Context(Arc<RawContext>);

/// The owning side of a [`Context`].
pub struct Handler {
	recv: oneshot::Receiver<()>,
	cancel_sender: broadcast::Sender<()>,
}

impl Context {
	#[must_use]
	pub fn new() -> (Self, Handler) {
		let (sender, recv) = oneshot::channel();
		let (cancel_sender, cancel_receiver) = broadcast::channel(1);

		(
			Self(Arc::new(RawContext {
				_sender: sender,
				cancel_receiver,
			})),
			Handler { recv, cancel_sender },
		)
	}

	/// Resolves once the handler has been cancelled.
	pub async fn done(&self) -> CancelReason {
		let mut recv = self.0.cancel_receiver.resubscribe();
		let _ = recv.recv().await;
		CancelReason::Shutdown
	}
}

impl Handler {
	/// Resolves once every clone of the context has been dropped.
	pub async fn done(&mut self) {
		let _ = (&mut self.recv).await;
	}

	/// Signals all contexts and waits for them to be dropped.
	pub async fn cancel(self) {
		drop(self.cancel_sender);

		let _ = self.recv.await;
	}
}
