//! Post list view: fetched posts, filters, the form and delete confirmation.

use serde::Serialize;

use crate::domain::{Platform, Post, PostQuery, PostStatus};
use crate::filter::{PostFilter, Selection, filter_posts};
use crate::ports::PostsApi;

use super::form::{FormMode, FormPhase, PostForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Loading,
    Ready,
    /// The fetch failed; the list shows as empty.
    Failed,
}

/// One-shot message shown after a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Serializable snapshot of what the list currently renders.
#[derive(Debug, Clone, Serialize)]
pub struct PostListPage {
    pub load_state: LoadState,
    pub search: String,
    pub platform: String,
    pub status: String,
    pub total: usize,
    pub posts: Vec<Post>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

#[derive(Debug)]
pub struct PostListView {
    posts: Vec<Post>,
    filter: PostFilter,
    load_state: LoadState,
    form: Option<PostForm>,
    pending_delete: Option<i64>,
    notice: Option<Notice>,
}

impl Default for PostListView {
    fn default() -> Self {
        Self::new()
    }
}

impl PostListView {
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            filter: PostFilter::default(),
            load_state: LoadState::Loading,
            form: None,
            pending_delete: None,
            notice: None,
        }
    }

    /// Fetch the full list. Failures are logged and leave an empty list.
    pub async fn load(&mut self, api: &dyn PostsApi) -> LoadState {
        self.load_state = LoadState::Loading;
        match api.list_posts(&PostQuery::default()).await {
            Ok(posts) => {
                tracing::debug!(count = posts.len(), "Posts loaded");
                self.posts = posts;
                self.load_state = LoadState::Ready;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Error fetching posts");
                self.posts.clear();
                self.load_state = LoadState::Failed;
            }
        }
        self.load_state
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn filter(&self) -> &PostFilter {
        &self.filter
    }

    /// Posts passing the current filter, in fetch order.
    pub fn visible(&self) -> Vec<&Post> {
        filter_posts(&self.posts, &self.filter)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
    }

    pub fn set_platform_filter(&mut self, platform: Selection<Platform>) {
        self.filter.platform = platform;
    }

    pub fn set_status_filter(&mut self, status: Selection<PostStatus>) {
        self.filter.status = status;
    }

    pub fn set_filter(&mut self, filter: PostFilter) {
        self.filter = filter;
    }

    pub fn form(&self) -> Option<&PostForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut PostForm> {
        self.form.as_mut()
    }

    pub fn open_create(&mut self) -> &mut PostForm {
        self.form.insert(PostForm::create())
    }

    /// Open the form on a listed post; `None` if it is not in the list.
    pub fn open_edit(&mut self, id: i64) -> Option<&mut PostForm> {
        let post = self.posts.iter().find(|p| p.id == Some(id))?;
        Some(self.form.insert(PostForm::edit(post)))
    }

    /// Dismiss the form. A form that saved successfully triggers a full
    /// re-fetch; a form still open is cancelled first. Returns `false` while a
    /// submission is in flight.
    pub async fn close_form(&mut self, api: &dyn PostsApi) -> bool {
        let Some(form) = self.form.as_mut() else {
            return true;
        };
        if form.is_submitting() {
            return false;
        }
        form.cancel();

        let saved = match (form.phase(), form.mode()) {
            (FormPhase::ClosedSuccess(_), FormMode::Create) => Some("Post created successfully!"),
            (FormPhase::ClosedSuccess(_), FormMode::Edit { .. }) => {
                Some("Post updated successfully!")
            }
            _ => None,
        };
        self.form = None;

        if let Some(message) = saved {
            self.notice = Some(Notice::Success(message.to_string()));
            self.load(api).await;
        }
        true
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: i64) -> bool {
        if self.posts.iter().any(|p| p.id == Some(id)) {
            self.pending_delete = Some(id);
            true
        } else {
            false
        }
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    /// The user declined: nothing is sent.
    pub fn decline_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The user confirmed: one delete call, then the post is dropped from
    /// the local list without a re-fetch.
    pub async fn confirm_delete(&mut self, api: &dyn PostsApi) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };

        match api.delete_post(id).await {
            Ok(()) => {
                self.posts.retain(|p| p.id != Some(id));
                self.notice = Some(Notice::Success("Post deleted successfully!".into()));
                true
            }
            Err(err) => {
                tracing::warn!(post_id = id, error = %err, "Error deleting post");
                self.notice = Some(Notice::Error("Failed to delete post".into()));
                false
            }
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn page(&self) -> PostListPage {
        let visible: Vec<Post> = self.visible().into_iter().cloned().collect();
        PostListPage {
            load_state: self.load_state,
            search: self.filter.search.clone(),
            platform: self.filter.platform.to_string(),
            status: self.filter.status.to_string(),
            total: self.posts.len(),
            posts: visible,
            notice: self.notice.clone(),
        }
    }
}
