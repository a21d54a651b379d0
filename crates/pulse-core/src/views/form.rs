//! Create/edit form for a single post.
//!
//! The form is a small state machine: it starts in `Editing`, moves to
//! `Submitting` while a create or update call is in flight, and ends in
//! `ClosedSuccess` or `ClosedCancel`. A failed call returns it to `Editing`
//! with an inline error so the user can correct and resubmit.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{NewPost, Platform, Post, PostStatus, UnknownVariant};
use crate::error::ApiError;
use crate::ports::PostsApi;

/// Input formats accepted for the schedule besides RFC 3339.
const SCHEDULE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

/// One editable input of the form, named like the wire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Title,
    Content,
    Platform,
    Status,
    Likes,
    Shares,
    Comments,
    Impressions,
    ScheduledTime,
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "title" => FormField::Title,
            "content" => FormField::Content,
            "platform" => FormField::Platform,
            "status" => FormField::Status,
            "likes" => FormField::Likes,
            "shares" => FormField::Shares,
            "comments" => FormField::Comments,
            "impressions" => FormField::Impressions,
            "scheduled_time" => FormField::ScheduledTime,
            other => return Err(FormError::UnknownField(other.to_string())),
        })
    }
}

/// Current values of every input.
///
/// `scheduled_time` is kept as typed text; it is parsed on submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormFields {
    pub title: String,
    pub content: String,
    pub platform: Platform,
    pub status: PostStatus,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    pub impressions: u64,
    pub scheduled_time: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            platform: Platform::Twitter,
            status: PostStatus::Draft,
            likes: 0,
            shares: 0,
            comments: 0,
            impressions: 0,
            scheduled_time: String::new(),
        }
    }
}

impl From<&Post> for FormFields {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            platform: post.platform,
            status: post.status,
            likes: post.likes,
            shares: post.shares,
            comments: post.comments,
            impressions: post.impressions,
            scheduled_time: post
                .scheduled_time
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_default(),
        }
    }
}

impl FormFields {
    fn to_new_post(&self) -> Result<NewPost, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::MissingField("title"));
        }
        if self.content.trim().is_empty() {
            return Err(FormError::MissingField("content"));
        }

        Ok(NewPost {
            title: self.title.clone(),
            content: self.content.clone(),
            platform: self.platform,
            status: self.status,
            likes: self.likes,
            shares: self.shares,
            comments: self.comments,
            impressions: self.impressions,
            scheduled_time: parse_schedule(&self.scheduled_time)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid scheduled time: {0}")]
    InvalidSchedule(String),

    #[error(transparent)]
    UnknownChoice(#[from] UnknownVariant),

    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("The form is closed")]
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", content = "post", rename_all = "snake_case")]
pub enum FormPhase {
    Editing,
    Submitting,
    ClosedSuccess(Post),
    ClosedCancel,
}

/// The single backend call a submit turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(NewPost),
    Update { id: i64, post: Post },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostForm {
    mode: FormMode,
    fields: FormFields,
    phase: FormPhase,
    error: Option<String>,
}

impl PostForm {
    /// Edit mode when `post` carries an id, create mode otherwise.
    pub fn open(post: Option<&Post>) -> Self {
        match post {
            Some(post) => Self::edit(post),
            None => Self::create(),
        }
    }

    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            fields: FormFields::default(),
            phase: FormPhase::Editing,
            error: None,
        }
    }

    /// Pre-populate from `post`. A post that was never persisted opens in
    /// create mode with its values.
    pub fn edit(post: &Post) -> Self {
        let mode = match post.id {
            Some(id) => FormMode::Edit { id },
            None => FormMode::Create,
        };
        Self {
            mode,
            fields: FormFields::from(post),
            phase: FormPhase::Editing,
            error: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create New Post",
            FormMode::Edit { .. } => "Edit Post",
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting)
    }

    pub fn is_closed(&self) -> bool {
        matches!(
            self.phase,
            FormPhase::ClosedSuccess(_) | FormPhase::ClosedCancel
        )
    }

    /// The schedule input is only shown for scheduled posts; its value is
    /// kept either way.
    pub fn scheduled_time_visible(&self) -> bool {
        self.fields.status == PostStatus::Scheduled
    }

    /// Apply one input change.
    pub fn set(&mut self, field: FormField, value: &str) -> Result<(), FormError> {
        if self.is_closed() {
            return Err(FormError::Closed);
        }

        let fields = &mut self.fields;
        match field {
            FormField::Title => fields.title = value.to_string(),
            FormField::Content => fields.content = value.to_string(),
            FormField::Platform => fields.platform = value.parse()?,
            FormField::Status => fields.status = value.parse()?,
            FormField::Likes => fields.likes = parse_counter(value),
            FormField::Shares => fields.shares = parse_counter(value),
            FormField::Comments => fields.comments = parse_counter(value),
            FormField::Impressions => fields.impressions = parse_counter(value),
            FormField::ScheduledTime => fields.scheduled_time = value.to_string(),
        }
        Ok(())
    }

    /// Start a submission.
    ///
    /// Returns `None` while another submission is in flight, after the form
    /// closed, or when local validation fails (the reason is stored as the
    /// inline error).
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.is_submitting() || self.is_closed() {
            return None;
        }

        let new_post = match self.fields.to_new_post() {
            Ok(new_post) => new_post,
            Err(err) => {
                self.error = Some(err.to_string());
                return None;
            }
        };

        self.error = None;
        self.phase = FormPhase::Submitting;

        Some(match self.mode {
            FormMode::Edit { id } => Submission::Update {
                id,
                post: new_post.with_id(id),
            },
            FormMode::Create => Submission::Create(new_post),
        })
    }

    /// Record the backend's answer to the submission in flight.
    pub fn finish_submit(&mut self, result: Result<Post, ApiError>) -> &FormPhase {
        if !self.is_submitting() {
            return &self.phase;
        }

        match result {
            Ok(post) => {
                tracing::info!(post_id = ?post.id, "Post saved");
                self.phase = FormPhase::ClosedSuccess(post);
            }
            Err(err) => {
                tracing::warn!(error = %err, "Saving post failed");
                self.error = Some(err.user_message());
                self.phase = FormPhase::Editing;
            }
        }
        &self.phase
    }

    /// Submit against `api`: exactly one create or update call.
    pub async fn submit(&mut self, api: &dyn PostsApi) -> &FormPhase {
        let Some(submission) = self.begin_submit() else {
            return &self.phase;
        };

        let result = match &submission {
            Submission::Create(new_post) => api.create_post(new_post).await,
            Submission::Update { id, post } => api.update_post(*id, post).await,
        };
        self.finish_submit(result)
    }

    /// Dismiss without saving. Ignored while a submission is in flight.
    pub fn cancel(&mut self) -> bool {
        if self.is_submitting() || self.is_closed() {
            return false;
        }
        self.phase = FormPhase::ClosedCancel;
        true
    }
}

/// Integer parse for the counter inputs: leading digits count, anything
/// unparseable (including a negative number) is 0.
pub fn parse_counter(value: &str) -> u64 {
    let digits: String = value
        .trim_start()
        .chars()
        .skip_while(|c| *c == '+')
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

fn parse_schedule(value: &str) -> Result<Option<DateTime<Utc>>, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    SCHEDULE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| FormError::InvalidSchedule(value.to_string()))
}
