//! Request transport and the browser-like navigation on top of it.
//!
//! [`Transport`] is the raw exchange: it sends a [`Request`] and returns a
//! [`Response`] for any status. [`Navigator`] layers the portal's browser
//! behavior on top: fixed user agent, `Referer` chaining, the anti-forgery
//! header on POSTs, the `200 OK` check, and the `last_url` bookkeeping.
//!
//! # Side effects
//!
//! After every request that was handed to the transport, `last_url` becomes
//! the requested URL, even when the transport failed or the status was not
//! 200. A caller that retries therefore keeps a continuous referer chain.
//!
//! Two cases leave the session untouched:
//! - the URL does not parse (nothing is sent),
//! - the cancellation token fires before or while the request is pending
//!   (the pending future is dropped and [`Error::Cancelled`] is returned).

use std::fmt::Write as _;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bugyo_protocol::{FORM_CONTENT_TYPE, Form, REQUEST_VERIFICATION_TOKEN, SENSITIVE_FIELDS, X_REQUESTED_WITH, XML_HTTP_REQUEST};
use reqwest::cookie::Jar;
use scraper::Html;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::session::Session;

/// HTTP method used by the portal flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
	Get,
	Post,
}

impl Method {
	pub fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}
}

impl std::fmt::Display for Method {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One outgoing request, fully resolved.
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub url: Url,
	pub user_agent: String,
	/// Previous request's URL; absent only for the first request.
	pub referer: Option<Url>,
	/// Anti-forgery header value; set on every POST.
	pub csrf_token: Option<String>,
	pub form: Option<Form>,
}

impl Request {
	/// Headers in the order a browser would send them.
	pub fn headers(&self) -> Vec<(&'static str, String)> {
		let mut headers = vec![("User-Agent", self.user_agent.clone())];
		if self.form.is_some() {
			headers.push(("Content-Type", FORM_CONTENT_TYPE.to_string()));
		}
		if let Some(token) = &self.csrf_token {
			headers.push((REQUEST_VERIFICATION_TOKEN, token.clone()));
			headers.push((X_REQUESTED_WITH, XML_HTTP_REQUEST.to_string()));
		}
		if let Some(referer) = &self.referer {
			headers.push(("Referer", referer.to_string()));
		}
		headers
	}

	/// Human-readable dump with sensitive form fields masked.
	pub fn dump(&self) -> String {
		let mut out = format!("{} {}\n", self.method, self.url);
		for (name, value) in self.headers() {
			let _ = writeln!(out, "{name}: {value}");
		}
		if let Some(form) = &self.form {
			let _ = write!(out, "\n{}", form.redacted(SENSITIVE_FIELDS).encode());
		}
		out
	}
}

/// Raw response for any status.
#[derive(Debug, Clone)]
pub struct Response {
	/// Final URL after redirects.
	pub url: Url,
	pub status: u16,
	pub reason: String,
	pub headers: Vec<(String, String)>,
	pub body: String,
}

impl Response {
	pub fn dump(&self) -> String {
		let mut out = format!("{} {}\n", self.status, self.reason);
		for (name, value) in &self.headers {
			let _ = writeln!(out, "{name}: {value}");
		}
		let _ = write!(out, "\n{}", self.body);
		out
	}
}

/// A successfully fetched HTML page.
///
/// Holds the raw markup; [`Document::parse`] builds the navigable tree on
/// demand so documents can cross await points.
#[derive(Debug, Clone)]
pub struct Document {
	url: Url,
	body: String,
}

impl Document {
	pub fn new(url: Url, body: String) -> Self {
		Self { url, body }
	}

	pub fn url(&self) -> &Url {
		&self.url
	}

	pub fn body(&self) -> &str {
		&self.body
	}

	pub fn parse(&self) -> Html {
		Html::parse_document(&self.body)
	}
}

/// Sends requests to the portal.
///
/// Implementations must keep cookies across calls on the same instance and
/// must not interpret the status code.
pub trait Transport: Send {
	/// Sends `request` and returns the response, or [`Error::Network`] when no
	/// response was received.
	fn execute(&mut self, request: Request) -> Pin<Box<dyn Future<Output = Result<Response>> + Send + '_>>;
}

/// [`Transport`] backed by `reqwest` with one shared cookie jar.
pub struct HttpTransport {
	client: reqwest::Client,
}

impl HttpTransport {
	/// Builds a client with a fresh cookie jar.
	///
	/// # Errors
	///
	/// Returns [`Error::Config`] if the TLS backend cannot be initialised.
	pub fn new() -> Result<Self> {
		let client = reqwest::Client::builder()
			.cookie_provider(Arc::new(Jar::default()))
			.build()
			.map_err(|e| Error::Config(format!("failed to build http client: {e}")))?;
		Ok(Self { client })
	}
}

impl Transport for HttpTransport {
	fn execute(&mut self, request: Request) -> Pin<Box<dyn Future<Output = Result<Response>> + Send + '_>> {
		Box::pin(async move {
			let mut builder = match request.method {
				Method::Get => self.client.get(request.url.clone()),
				Method::Post => self.client.post(request.url.clone()),
			};
			for (name, value) in request.headers() {
				builder = builder.header(name, value);
			}
			if let Some(form) = &request.form {
				builder = builder.body(form.encode());
			}

			let network = |source: reqwest::Error| Error::Network {
				method: request.method,
				url: request.url.to_string(),
				source: Box::new(source),
			};

			let res = builder.send().await.map_err(network)?;
			let status = res.status();
			let url = res.url().clone();
			let headers = res
				.headers()
				.iter()
				.map(|(name, value)| (name.to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned()))
				.collect();
			let body = res.text().await.map_err(network)?;

			Ok(Response {
				url,
				status: status.as_u16(),
				reason: status.canonical_reason().unwrap_or_default().to_string(),
				headers,
				body,
			})
		})
	}
}

/// Browser-like navigation over a [`Transport`].
pub struct Navigator {
	transport: Box<dyn Transport>,
	user_agent: String,
	debug: bool,
	cancellation: Option<CancellationToken>,
}

impl Navigator {
	pub fn new(transport: Box<dyn Transport>, config: &ClientConfig) -> Self {
		Self {
			transport,
			user_agent: config.user_agent.clone(),
			debug: config.debug,
			cancellation: config.cancellation.clone(),
		}
	}

	/// GETs `url` and returns the page on `200 OK`.
	///
	/// Writes `session.last_url` (see the module docs for the exceptions).
	pub async fn fetch(&mut self, session: &mut Session, url: &str) -> Result<Document> {
		self.navigate(session, Method::Get, url, None).await
	}

	/// POSTs `form` url-encoded to `url` with the session's current token in
	/// the anti-forgery header.
	///
	/// Writes `session.last_url` (see the module docs for the exceptions).
	pub async fn submit(&mut self, session: &mut Session, url: &str, form: Form) -> Result<Document> {
		self.navigate(session, Method::Post, url, Some(form)).await
	}

	async fn navigate(&mut self, session: &mut Session, method: Method, url: &str, form: Option<Form>) -> Result<Document> {
		let target = Url::parse(url).map_err(|source| Error::InvalidUrl {
			url: url.to_string(),
			source,
		})?;

		let request = Request {
			method,
			url: target.clone(),
			user_agent: self.user_agent.clone(),
			referer: session.last_url().cloned(),
			csrf_token: (method == Method::Post).then(|| session.csrf_token().to_string()),
			form,
		};

		debug!(target = "bugyo", %method, url = %target, "sending request");
		if self.debug {
			debug!(target = "bugyo", request = %request.dump(), "request dump");
		}

		let outcome = match &self.cancellation {
			Some(token) => {
				let cancelled = || Error::Cancelled {
					method,
					url: target.to_string(),
				};
				if token.is_cancelled() {
					return Err(cancelled());
				}
				tokio::select! {
					biased;
					_ = token.cancelled() => return Err(cancelled()),
					res = self.transport.execute(request) => res,
				}
			}
			None => self.transport.execute(request).await,
		};

		session.set_last_url(target.clone());
		let response = outcome?;

		if self.debug {
			debug!(target = "bugyo", response = %response.dump(), "response dump");
		}

		if response.status != 200 {
			warn!(target = "bugyo", %method, url = %target, status = response.status, reason = %response.reason, "status code error");
			return Err(Error::Status {
				method,
				url: target.to_string(),
				status: response.status,
				reason: response.reason,
			});
		}

		Ok(Document::new(response.url, response.body))
	}
}
