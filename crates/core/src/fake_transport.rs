//! Fake transport for exercising the flows without a portal.
//!
//! Provides an in-memory [`Transport`] whose replies are scripted per method and
//! path, and which records every request it receives.
//!
//! # Example
//!
//! ```ignore
//! let (transport, controller) = FakeTransportBuilder::new().build();
//! controller.reply(Method::Get, "/acme", FakeReply::html(token_page("T1")));
//!
//! let mut client = Client::with_transport(credentials, config, transport);
//! let err = client.login().await.unwrap_err();
//!
//! assert_eq!(controller.sent_count(), 2);
//! ```

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::transport::{Method, Request, Response, Transport};

/// Builder for creating fake transport instances.
#[derive(Default)]
pub struct FakeTransportBuilder {
	routes: HashMap<(Method, String), Route>,
}

impl FakeTransportBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Scripts a reply up front. Same semantics as [`FakeTransportController::reply`].
	#[must_use]
	pub fn reply(mut self, method: Method, path: &str, reply: FakeReply) -> Self {
		self.routes.entry((method, path.to_string())).or_default().queued.push_back(reply);
		self
	}

	/// Build the fake transport and return both the transport and a controller.
	///
	/// The transport is boxed, ready for [`Client::with_transport`]; the
	/// [`FakeTransportController`] keeps scripting replies and inspecting what
	/// was sent.
	///
	/// [`Client::with_transport`]: crate::Client::with_transport
	pub fn build(self) -> (Box<dyn Transport>, FakeTransportController) {
		let state = Arc::new(Mutex::new(FakeState {
			routes: self.routes,
			sent: Vec::new(),
		}));

		let transport = FakeTransport { state: Arc::clone(&state) };
		let controller = FakeTransportController { state };

		(Box::new(transport), controller)
	}
}

/// Scripted outcome for one request.
#[derive(Debug, Clone)]
pub enum FakeReply {
	Page { status: u16, reason: String, body: String },
	NetworkError(String),
}

impl FakeReply {
	/// `200 OK` with `body`.
	pub fn html(body: impl Into<String>) -> Self {
		FakeReply::Page {
			status: 200,
			reason: "OK".into(),
			body: body.into(),
		}
	}

	/// Empty page with the given status.
	pub fn status(status: u16, reason: impl Into<String>) -> Self {
		FakeReply::Page {
			status,
			reason: reason.into(),
			body: String::new(),
		}
	}

	/// No response at all.
	pub fn network_error(message: impl Into<String>) -> Self {
		FakeReply::NetworkError(message.into())
	}
}

/// Controller for scripting replies and inspecting sent requests.
#[derive(Clone)]
pub struct FakeTransportController {
	state: Arc<Mutex<FakeState>>,
}

impl FakeTransportController {
	/// Queues `reply` for `method` on `path` (query string ignored).
	///
	/// Queued replies are served in order; once the queue is drained the last
	/// served reply repeats. Unscripted requests get `404 Not Found`.
	pub fn reply(&self, method: Method, path: &str, reply: FakeReply) {
		self.state.lock().routes.entry((method, path.to_string())).or_default().queued.push_back(reply);
	}

	/// Every request received so far, oldest first.
	pub fn sent(&self) -> Vec<Request> {
		self.state.lock().sent.clone()
	}

	pub fn sent_count(&self) -> usize {
		self.state.lock().sent.len()
	}

	/// Take all sent requests, clearing the buffer.
	pub fn take_sent(&self) -> Vec<Request> {
		std::mem::take(&mut self.state.lock().sent)
	}

	pub fn last_sent(&self) -> Option<Request> {
		self.state.lock().sent.last().cloned()
	}
}

#[derive(Default)]
struct Route {
	queued: VecDeque<FakeReply>,
	last: Option<FakeReply>,
}

impl Route {
	fn next(&mut self) -> Option<FakeReply> {
		if let Some(reply) = self.queued.pop_front() {
			self.last = Some(reply);
		}
		self.last.clone()
	}
}

struct FakeState {
	routes: HashMap<(Method, String), Route>,
	sent: Vec<Request>,
}

impl FakeState {
	fn next_reply(&mut self, method: Method, path: &str) -> Option<FakeReply> {
		self.routes.get_mut(&(method, path.to_string()))?.next()
	}
}

struct FakeTransport {
	state: Arc<Mutex<FakeState>>,
}

impl Transport for FakeTransport {
	fn execute(&mut self, request: Request) -> Pin<Box<dyn Future<Output = Result<Response>> + Send + '_>> {
		let state = Arc::clone(&self.state);
		Box::pin(async move {
			let reply = {
				let mut state = state.lock();
				state.sent.push(request.clone());
				state.next_reply(request.method, request.url.path())
			};

			match reply.unwrap_or_else(|| FakeReply::status(404, "Not Found")) {
				FakeReply::Page { status, reason, body } => Ok(Response {
					url: request.url,
					status,
					reason,
					headers: Vec::new(),
					body,
				}),
				FakeReply::NetworkError(message) => Err(Error::Network {
					method: request.method,
					url: request.url.to_string(),
					source: message.into(),
				}),
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use url::Url;

	use super::*;

	fn get(path: &str) -> Request {
		Request {
			method: Method::Get,
			url: Url::parse(&format!("http://portal.test{path}")).unwrap(),
			user_agent: "ua".into(),
			referer: None,
			csrf_token: None,
			form: None,
		}
	}

	#[tokio::test]
	async fn scripted_replies_are_served_in_order_then_repeat() {
		let (mut transport, controller) = FakeTransportBuilder::new()
			.reply(Method::Get, "/acme", FakeReply::html("first"))
			.reply(Method::Get, "/acme", FakeReply::html("second"))
			.build();

		assert_eq!(transport.execute(get("/acme")).await.unwrap().body, "first");
		assert_eq!(transport.execute(get("/acme")).await.unwrap().body, "second");
		assert_eq!(transport.execute(get("/acme")).await.unwrap().body, "second");
		assert_eq!(controller.sent_count(), 3);
	}

	#[tokio::test]
	async fn late_replies_replace_a_drained_queue() {
		let (mut transport, controller) = FakeTransportBuilder::new().reply(Method::Get, "/acme", FakeReply::html("first")).build();

		assert_eq!(transport.execute(get("/acme")).await.unwrap().body, "first");
		controller.reply(Method::Get, "/acme", FakeReply::status(503, "Service Unavailable"));
		assert_eq!(transport.execute(get("/acme")).await.unwrap().status, 503);
		assert_eq!(transport.execute(get("/acme")).await.unwrap().status, 503);
	}

	#[tokio::test]
	async fn unscripted_paths_get_not_found() {
		let (mut transport, controller) = FakeTransportBuilder::new().build();
		let res = transport.execute(get("/missing")).await.unwrap();
		assert_eq!(res.status, 404);
		assert_eq!(controller.take_sent().len(), 1);
		assert_eq!(controller.sent_count(), 0);
	}

	#[tokio::test]
	async fn query_string_is_ignored_for_matching() {
		let (mut transport, controller) = FakeTransportBuilder::new().build();
		controller.reply(Method::Get, "/acme/login/login/", FakeReply::html("ok"));
		let res = transport.execute(get("/acme/login/login/?Length=5")).await.unwrap();
		assert_eq!(res.status, 200);
		assert_eq!(controller.last_sent().unwrap().url.query(), Some("Length=5"));
	}

	#[tokio::test]
	async fn network_errors_surface_as_network_variant() {
		let (mut transport, _controller) = FakeTransportBuilder::new()
			.reply(Method::Get, "/acme", FakeReply::network_error("connection reset"))
			.build();
		let err = transport.execute(get("/acme")).await.unwrap_err();
		assert!(matches!(err, Error::Network { .. }));
		assert!(err.to_string().contains("connection reset"));
	}
}
