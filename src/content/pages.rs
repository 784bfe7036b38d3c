//! Read-only descriptive content for the public pages.

// self
use crate::{_prelude::*, content::timestamp};

/// One of the school's programs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
	/// Stable identifier, when the backend provides one.
	#[serde(default)]
	pub id: String,
	/// Program name.
	pub title: String,
	/// Summary paragraph.
	pub description: String,
	/// Illustration URL.
	#[serde(default)]
	pub image_url: String,
	/// Bullet-point components.
	#[serde(default)]
	pub components: Vec<ProgramComponent>,
}

/// A named component of a [`Program`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramComponent {
	/// Short label.
	pub name: String,
	/// Explanation.
	#[serde(default)]
	pub description: String,
}

/// A membership or partner organization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
	/// Organization name.
	pub name: String,
	/// What the partnership involves.
	pub description: String,
	/// Homepage, when published.
	#[serde(default)]
	pub website: String,
}

/// Vision, mission and core values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionContent {
	/// Vision statement.
	pub vision: String,
	/// Mission statement.
	pub mission: String,
	/// Core values in display order.
	#[serde(default)]
	pub core_values: Vec<CoreValue>,
}

/// A single core value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreValue {
	/// Value name.
	pub title: String,
	/// Explanation.
	#[serde(default)]
	pub description: String,
}

/// Governance structure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceContent {
	/// Free-form introduction block.
	#[serde(default)]
	pub intro: BTreeMap<String, serde_json::Value>,
	/// Board of directors.
	pub board: GovernanceBody,
	/// School management; its duties are published as `functions`.
	pub management: GovernanceBody,
	/// Head teacher.
	pub head_teacher: GovernanceBody,
}

/// A governance body and its duties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceBody {
	/// Role summary.
	pub description: String,
	/// Listed duties.
	#[serde(default, alias = "functions")]
	pub responsibilities: Vec<String>,
}

/// Headline figures on the home page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeStats {
	/// e.g. `100+`.
	pub children_supported: String,
	/// e.g. `Free`.
	pub education: String,
	/// e.g. `2`.
	#[serde(alias = "coreProgram")]
	pub core_programs: String,
	/// e.g. `2023`.
	pub founded: String,
}

/// About-page content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutContent {
	/// Heading.
	pub title: String,
	/// Story paragraph.
	pub description: String,
	/// Where the school operates.
	pub location: String,
	/// Objectives in display order.
	pub objectives: Vec<String>,
}

/// Collection counts on the admin dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminStats {
	/// Stored contact messages.
	pub contacts: u64,
	/// Published blog posts.
	pub blog_posts: u64,
	/// Scheduled events.
	pub events: u64,
}

/// `GET /health` response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthStatus {
	/// `healthy` or `degraded`.
	pub status: String,
	/// `connected` or `unavailable`.
	pub database: String,
	/// Server clock at response time.
	#[serde(with = "timestamp::option")]
	pub timestamp: Option<OffsetDateTime>,
	/// Service name.
	pub service: String,
}
impl HealthStatus {
	/// Whether the backend reports itself fully healthy.
	pub fn is_healthy(&self) -> bool {
		self.status == "healthy"
	}
}
