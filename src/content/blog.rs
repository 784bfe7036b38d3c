//! Blog posts.

// self
use crate::{
	_prelude::*,
	content::{Resource, ResourceForm, require, timestamp},
	error::ValidationError,
};

/// Default reading-time label assigned by the backend.
pub const DEFAULT_READ_TIME: &str = "5 min read";

/// A published blog post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
	/// Server-assigned identifier.
	pub id: String,
	/// Headline.
	pub title: String,
	/// Short summary shown in listings.
	pub excerpt: String,
	/// HTML body.
	#[serde(default)]
	pub content: String,
	/// Cover image URL.
	#[serde(default)]
	pub image_url: String,
	/// Publication timestamp.
	#[serde(with = "timestamp")]
	pub publish_date: OffsetDateTime,
	/// Reading-time label.
	#[serde(default = "default_read_time")]
	pub read_time: String,
}
impl Resource for BlogPost {
	type Form = BlogPostForm;
	type Payload = BlogPostPayload;

	const COLLECTION: &'static str = "/blog";
	const LABEL: &'static str = "blog post";
	const STORAGE_KEY: &'static str = "blogPosts";

	fn id(&self) -> &str {
		&self.id
	}

	fn from_payload(id: String, payload: Self::Payload) -> Self {
		let BlogPostPayload { title, excerpt, content, image_url, publish_date } = payload;

		Self { id, title, excerpt, content, image_url, publish_date, read_time: default_read_time() }
	}
}

/// Body of `POST /blog` and `PUT /blog/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostPayload {
	/// Headline.
	pub title: String,
	/// Short summary.
	pub excerpt: String,
	/// HTML body.
	#[serde(default)]
	pub content: String,
	/// Cover image URL.
	#[serde(default)]
	pub image_url: String,
	/// Publication timestamp.
	#[serde(with = "timestamp")]
	pub publish_date: OffsetDateTime,
}

/// Admin form state for a blog post.
///
/// `publish_date` holds the raw `YYYY-MM-DD` input and is submitted as midnight UTC.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlogPostForm {
	/// Headline input.
	pub title: String,
	/// Summary input.
	pub excerpt: String,
	/// HTML body input.
	pub content: String,
	/// Cover image URL input.
	pub image_url: String,
	/// `YYYY-MM-DD` date input.
	pub publish_date: String,
}
impl ResourceForm<BlogPost> for BlogPostForm {
	fn blank() -> Self {
		Self { publish_date: timestamp::date_input(OffsetDateTime::now_utc()), ..Default::default() }
	}

	fn from_record(record: &BlogPost) -> Self {
		Self {
			title: record.title.clone(),
			excerpt: record.excerpt.clone(),
			content: record.content.clone(),
			image_url: record.image_url.clone(),
			publish_date: timestamp::date_input(record.publish_date),
		}
	}

	fn to_payload(&self) -> Result<BlogPostPayload, ValidationError> {
		require("title", &self.title)?;
		require("excerpt", &self.excerpt)?;
		require("publishDate", &self.publish_date)?;

		Ok(BlogPostPayload {
			title: self.title.clone(),
			excerpt: self.excerpt.clone(),
			content: self.content.clone(),
			image_url: self.image_url.clone(),
			publish_date: timestamp::parse_date_input("publishDate", &self.publish_date)?,
		})
	}
}

fn default_read_time() -> String {
	DEFAULT_READ_TIME.into()
}
