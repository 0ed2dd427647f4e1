//! The service callers.
//!
//! - `ServiceCaller` - the dial/call contract shared by all services.
//! - `LocalService` - resolves its host from branch/environment/namespace/version and calls it directly.
//! - `CloudService` - logs in against the API gateway and calls through it with a bearer token.
//!
//! Both variants compose the same `CallSession` (current request, bound target, last error)
//! and execute through the same request-execution helper.

// region:    --- Modules

mod auth_token;
mod call_session;
mod cloud_service;
mod local_service;
mod service_target;

pub use auth_token::*;
pub use cloud_service::*;
pub use local_service::*;
pub use service_target::*;

pub(crate) use call_session::*;

// endregion: --- Modules

use crate::resolver::Protocol;
use crate::{Error, Request, Result, webc};
use serde_json::Value;
use std::future::Future;

/// The dial-then-call contract of a service.
///
/// One instance handles one request at a time: `dial()` binds the request and the resolved
/// address, then `call()` / `call_async()` executes it. Dialing again overwrites the previous binding.
///
/// Failures of the exchange itself (transport errors, non-2xx responses) are logged, captured as
/// `last_error()`, and returned as a recoverable `Error::WebServiceCall`. Contract violations
/// (calling before dialing, missing credentials) and failed authentication are fatal
/// (see `Error::is_fatal`) and are never captured.
pub trait ServiceCaller: Send {
	/// The logical service name.
	fn name(&self) -> &str;

	/// The protocol of the resolved base URL.
	fn protocol(&self) -> Protocol;

	/// Resolves the target address and binds `request` as the current request.
	fn dial(&mut self, request: Request);

	/// The most recently dialed request.
	fn current_request(&self) -> Option<&Request>;

	/// The target the client is bound to since the last `dial()`.
	fn client(&self) -> Option<&ServiceTarget>;

	/// The most recently captured exchange failure.
	fn last_error(&self) -> Option<&webc::Error>;

	/// Executes the current request and resolves to the decoded JSON response body.
	fn call_async(&mut self) -> impl Future<Output = Result<Value>> + Send;

	/// Executes the current request, routing the outcome to one of the continuations.
	///
	/// Recoverable failures go to `on_failure`. Fatal errors are returned as `Err`
	/// without running any continuation.
	fn call_async_then<T, S, F>(&mut self, on_success: S, on_failure: F) -> impl Future<Output = Result<T>> + Send
	where
		Self: Sized,
		S: FnOnce(Value) -> T + Send,
		F: FnOnce(Error) -> T + Send,
	{
		async move {
			match self.call_async().await {
				Ok(value) => Ok(on_success(value)),
				Err(err) if err.is_fatal() => Err(err),
				Err(err) => Ok(on_failure(err)),
			}
		}
	}

	/// Executes the current request, blocking the calling thread until it completes.
	///
	/// NOTE: This drives `call_async()` on a private current-thread runtime. Called from within
	///       a tokio runtime it fails with `Error::BlockingCallInRuntime` without sending anything.
	///       Use `call_async()` there.
	fn call(&mut self) -> Result<Value>
	where
		Self: Sized,
	{
		if tokio::runtime::Handle::try_current().is_ok() {
			return Err(Error::BlockingCallInRuntime {
				service: self.name().to_string(),
			});
		}

		let runtime = tokio::runtime::Builder::new_current_thread()
			.enable_all()
			.build()
			.map_err(|err| Error::Runtime { cause: err.to_string() })?;

		runtime.block_on(self.call_async())
	}
}
