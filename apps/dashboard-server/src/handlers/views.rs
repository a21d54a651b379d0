//! View handlers - mount the page shell, the dashboard and the post list,
//! and drive the post form and delete confirmation.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use pulse_core::domain::{Platform, PostStatus};
use pulse_core::views::{
    FormFields, FormMode, FormPhase, LoadState, MountedView, Notice, PostForm, PostListView, Shell,
    ShellCmd, Tab, load_dashboard, mount,
};
use pulse_core::{PostFilter, Selection};
use pulse_shared::ApiResponse;
use pulse_shared::dto::{FormSubmission, PostListQuery, ShellQuery};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Shell with the view of its active tab.
#[derive(Serialize)]
struct ShellPage {
    active: Tab,
    tabs: [Tab; 2],
    mounted: MountedView,
}

/// What the client needs to render the post form.
#[derive(Serialize)]
struct FormView<'a> {
    mode: FormMode,
    heading: &'static str,
    fields: &'a FormFields,
    phase: &'a FormPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    scheduled_time_visible: bool,
    platforms: &'static [Platform],
}

impl<'a> From<&'a PostForm> for FormView<'a> {
    fn from(form: &'a PostForm) -> Self {
        Self {
            mode: form.mode(),
            heading: form.heading(),
            fields: form.fields(),
            phase: form.phase(),
            error: form.error(),
            scheduled_time_visible: form.scheduled_time_visible(),
            platforms: &Platform::ALL,
        }
    }
}

fn success_message(notice: Option<Notice>) -> Option<String> {
    match notice {
        Some(Notice::Success(message)) => Some(message),
        _ => None,
    }
}

/// GET /api/views/shell?tab=dashboard|posts
pub async fn shell(
    state: web::Data<AppState>,
    query: web::Query<ShellQuery>,
) -> AppResult<HttpResponse> {
    let requested = match query.tab.as_deref() {
        None | Some("") => Tab::default(),
        Some(tab) => tab.parse::<Tab>()?,
    };

    let (mut shell, boot) = Shell::boot();
    let cmd = match shell.select(requested) {
        ShellCmd::None => boot,
        switched => switched,
    };
    let ShellCmd::Mount(tab) = cmd else {
        return Err(AppError::Internal("Shell produced no view to mount".to_string()));
    };

    let mounted = mount(
        tab,
        state.posts.as_ref(),
        state.feeds.as_ref(),
        state.location,
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ShellPage {
        active: shell.active(),
        tabs: [Tab::Dashboard, Tab::Posts],
        mounted,
    })))
}

/// GET /api/views/dashboard
///
/// Always 200: a failed stats fetch renders as the unavailable placeholder.
pub async fn dashboard(state: web::Data<AppState>) -> HttpResponse {
    let view = load_dashboard(state.posts.as_ref(), state.feeds.as_ref(), state.location).await;
    HttpResponse::Ok().json(ApiResponse::ok(view))
}

/// GET /api/views/posts?search=&platform=&status=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let filter = PostFilter::new(
        query.search.unwrap_or_default(),
        query
            .platform
            .as_deref()
            .unwrap_or_default()
            .parse::<Selection<Platform>>()?,
        query
            .status
            .as_deref()
            .unwrap_or_default()
            .parse::<Selection<PostStatus>>()?,
    );

    let mut list = PostListView::new();
    list.load(state.posts.as_ref()).await;
    list.set_filter(filter);

    Ok(HttpResponse::Ok().json(ApiResponse::ok(list.page())))
}

/// GET /api/views/posts/form
pub async fn create_form() -> AppResult<HttpResponse> {
    let form = PostForm::create();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(FormView::from(&form))))
}

/// GET /api/views/posts/{id}/form
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post(path.into_inner()).await?;
    let form = PostForm::open(Some(&post));
    Ok(HttpResponse::Ok().json(ApiResponse::ok(FormView::from(&form))))
}

/// POST /api/views/posts/form
///
/// Applies the submitted inputs to a fresh form (edit mode when `id` is
/// set), submits it once and answers with the re-fetched list. A rejected
/// submission answers 422 with the form and its inline error.
pub async fn submit_form(
    state: web::Data<AppState>,
    body: web::Json<FormSubmission>,
) -> AppResult<HttpResponse> {
    let submission = body.into_inner();
    let api = state.posts.as_ref();
    let mut list = PostListView::new();

    let form = match submission.id {
        None => list.open_create(),
        Some(id) => {
            if list.load(api).await == LoadState::Failed {
                return Err(AppError::Upstream {
                    detail: "Could not load posts".to_string(),
                    state: None,
                });
            }
            list.open_edit(id)
                .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?
        }
    };

    for (name, value) in &submission.fields {
        form.set(name.parse()?, value)?;
    }

    form.submit(api).await;
    if !form.is_closed() {
        let detail = form.error().unwrap_or("An error occurred").to_string();
        let view = serde_json::to_value(FormView::from(&*form))?;
        return Err(AppError::Validation {
            detail,
            errors: None,
            state: Some(view),
        });
    }
    let created = form.mode() == FormMode::Create;

    list.close_form(api).await;
    let page = match success_message(list.take_notice()) {
        Some(message) => ApiResponse::ok_with_message(list.page(), message),
        None => ApiResponse::ok(list.page()),
    };

    if created {
        Ok(HttpResponse::Created().json(page))
    } else {
        Ok(HttpResponse::Ok().json(page))
    }
}

/// DELETE /api/views/posts/{id}
///
/// Reaching this route is the confirmation; declining sends nothing.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let api = state.posts.as_ref();

    let mut list = PostListView::new();
    if list.load(api).await == LoadState::Failed {
        return Err(AppError::Upstream {
            detail: "Could not load posts".to_string(),
            state: None,
        });
    }
    if !list.request_delete(id) {
        return Err(AppError::NotFound(format!("Post {} not found", id)));
    }

    if list.confirm_delete(api).await {
        let message = success_message(list.take_notice());
        let page = list.page();
        return Ok(HttpResponse::Ok().json(match message {
            Some(message) => ApiResponse::ok_with_message(page, message),
            None => ApiResponse::ok(page),
        }));
    }

    let view = serde_json::to_value(list.page())?;
    Err(AppError::Upstream {
        detail: "Failed to delete post".to_string(),
        state: Some(view),
    })
}
