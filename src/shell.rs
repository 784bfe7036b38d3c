//! Seams to the UI shell: navigation, toast notifications, and confirmation dialogs.
//!
//! Controllers never touch a browser or terminal directly. They call these traits, and the
//! embedding application decides how a redirect, a toast, or a "really delete?" prompt looks.
//! The in-memory implementations double as recorders for tests.

// self
use crate::_prelude::*;

/// How a navigation affects history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavigationMode {
	/// Adds a history entry.
	Push,
	/// Replaces the current entry (redirects).
	Replace,
}

/// Routes the shell to another view.
pub trait Navigator
where
	Self: Send + Sync,
{
	/// Navigates to `route`.
	fn navigate(&self, route: &str, mode: NavigationMode);

	/// Route currently displayed, if known.
	fn current_route(&self) -> Option<String>;
}

/// One recorded navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Visit {
	/// Destination route.
	pub route: String,
	/// History mode used.
	pub mode: NavigationMode,
}

/// In-memory navigator that keeps every visit.
#[derive(Debug, Default)]
pub struct HistoryNavigator(Mutex<Vec<Visit>>);
impl HistoryNavigator {
	/// Starts with `route` as the current view.
	pub fn starting_at(route: impl Into<String>) -> Self {
		Self(Mutex::new(vec![Visit { route: route.into(), mode: NavigationMode::Push }]))
	}

	/// All visits in order.
	pub fn visits(&self) -> Vec<Visit> {
		self.0.lock().clone()
	}

	/// Number of visits to `route`.
	pub fn count(&self, route: &str) -> usize {
		self.0.lock().iter().filter(|visit| visit.route == route).count()
	}
}
impl Navigator for HistoryNavigator {
	fn navigate(&self, route: &str, mode: NavigationMode) {
		self.0.lock().push(Visit { route: route.to_owned(), mode });
	}

	fn current_route(&self) -> Option<String> {
		self.0.lock().last().map(|visit| visit.route.clone())
	}
}

/// Toast severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToastLevel {
	/// Confirmation of a completed action.
	Success,
	/// Failure the user may retry.
	Error,
}

/// User-facing notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
	/// Severity.
	pub level: ToastLevel,
	/// Message shown to the user.
	pub message: String,
}

/// Shows toasts to the user.
pub trait Notifier
where
	Self: Send + Sync,
{
	/// Displays `toast`.
	fn notify(&self, toast: Toast);

	/// Shorthand for a success toast.
	fn success(&self, message: &str) {
		self.notify(Toast { level: ToastLevel::Success, message: message.to_owned() });
	}

	/// Shorthand for an error toast.
	fn error(&self, message: &str) {
		self.notify(Toast { level: ToastLevel::Error, message: message.to_owned() });
	}
}

/// In-memory notifier that keeps every toast.
#[derive(Debug, Default)]
pub struct NotificationLog(Mutex<Vec<Toast>>);
impl NotificationLog {
	/// All toasts in order.
	pub fn toasts(&self) -> Vec<Toast> {
		self.0.lock().clone()
	}

	/// Most recent toast.
	pub fn last(&self) -> Option<Toast> {
		self.0.lock().last().cloned()
	}

	/// Number of toasts at `level`.
	pub fn count(&self, level: ToastLevel) -> usize {
		self.0.lock().iter().filter(|toast| toast.level == level).count()
	}
}
impl Notifier for NotificationLog {
	fn notify(&self, toast: Toast) {
		self.0.lock().push(toast);
	}
}

/// Notifier that only writes toasts to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;
impl Notifier for TracingNotifier {
	fn notify(&self, toast: Toast) {
		match toast.level {
			ToastLevel::Success => tracing::info!(message = %toast.message, "toast"),
			ToastLevel::Error => tracing::warn!(message = %toast.message, "toast"),
		}
	}
}

/// Asks the user to confirm a destructive action.
pub trait Confirm
where
	Self: Send + Sync,
{
	/// Returns `true` when the user accepted `prompt`.
	fn confirm(&self, prompt: &str) -> bool;
}
impl<F> Confirm for F
where
	F: Fn(&str) -> bool + Send + Sync,
{
	fn confirm(&self, prompt: &str) -> bool {
		self(prompt)
	}
}

/// Dialog used when the shell wires none: declines every prompt and logs it.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecliningConfirm;
impl Confirm for DecliningConfirm {
	fn confirm(&self, prompt: &str) -> bool {
		tracing::warn!(prompt, "no confirmation dialog configured; declining");

		false
	}
}

/// Confirmation stand-in with a fixed answer that records every prompt.
#[derive(Debug)]
pub struct ScriptedConfirm {
	answer: Mutex<bool>,
	prompts: Mutex<Vec<String>>,
}
impl ScriptedConfirm {
	/// Creates a dialog that always answers `answer`.
	pub fn answering(answer: bool) -> Self {
		Self { answer: Mutex::new(answer), prompts: Mutex::default() }
	}

	/// Changes the answer for subsequent prompts.
	pub fn set_answer(&self, answer: bool) {
		*self.answer.lock() = answer;
	}

	/// Prompts shown so far.
	pub fn prompts(&self) -> Vec<String> {
		self.prompts.lock().clone()
	}
}
impl Default for ScriptedConfirm {
	fn default() -> Self {
		Self::answering(true)
	}
}
impl Confirm for ScriptedConfirm {
	fn confirm(&self, prompt: &str) -> bool {
		self.prompts.lock().push(prompt.to_owned());

		*self.answer.lock()
	}
}
