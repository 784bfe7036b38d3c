//! Admin area controllers: CRUD pages, contacts inbox, dashboard, and login.
//!
//! Controllers hold the page state a view renders from. They reach the user only through the
//! shell seams ([`Notifier`](crate::shell::Notifier), [`Navigator`](crate::shell::Navigator),
//! [`Confirm`](crate::shell::Confirm)) carried by the [`AppContext`](crate::context::AppContext).

pub mod contacts;
pub mod crud;
pub mod dashboard;
pub mod login;

pub use contacts::*;
pub use crud::*;
pub use dashboard::*;
pub use login::*;

// self
use crate::_prelude::*;

/// Toast text for a failed request: the backend's `detail` when present, else `fallback`.
pub(crate) fn failure_message(error: &Error, fallback: &str) -> String {
	match error {
		Error::Validation(e) => e.to_string(),
		_ => error.detail().unwrap_or(fallback).to_owned(),
	}
}
