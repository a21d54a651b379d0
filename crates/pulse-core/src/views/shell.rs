//! Page shell: which of the two top-level views is mounted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinates, UnknownVariant};
use crate::ports::{ExternalFeeds, PostsApi};

use super::dashboard::{DashboardState, load_dashboard};
use super::list::{PostListPage, PostListView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Dashboard,
    Posts,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Posts => "posts",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Tab::Dashboard),
            "posts" => Ok(Tab::Posts),
            other => Err(UnknownVariant {
                kind: "tab",
                value: other.to_string(),
            }),
        }
    }
}

/// What the host has to do after a shell transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCmd {
    None,
    /// Mount `Tab`'s view, which runs its own fetch.
    Mount(Tab),
}

#[derive(Debug, Clone, Default)]
pub struct Shell {
    active: Tab,
}

impl Shell {
    /// Initial shell and the mount of the dashboard it starts on.
    pub fn boot() -> (Self, ShellCmd) {
        let shell = Self::default();
        let cmd = ShellCmd::Mount(shell.active);
        (shell, cmd)
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    /// Switch tabs. Re-selecting the active tab does nothing; switching
    /// always remounts, so coming back to a tab fetches again.
    pub fn select(&mut self, tab: Tab) -> ShellCmd {
        if tab == self.active {
            return ShellCmd::None;
        }
        tracing::debug!(from = %self.active, to = %tab, "Switching tab");
        self.active = tab;
        ShellCmd::Mount(tab)
    }
}

/// Content of a freshly mounted tab.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tab", content = "view", rename_all = "lowercase")]
pub enum MountedView {
    Dashboard(DashboardState),
    Posts(PostListPage),
}

/// Run the mount fetch of `tab`. Dropping the returned future cancels the
/// calls still in flight.
pub async fn mount(
    tab: Tab,
    posts: &dyn PostsApi,
    feeds: &dyn ExternalFeeds,
    location: Option<Coordinates>,
) -> MountedView {
    match tab {
        Tab::Dashboard => MountedView::Dashboard(load_dashboard(posts, feeds, location).await),
        Tab::Posts => {
            let mut list = PostListView::new();
            list.load(posts).await;
            MountedView::Posts(list.page())
        }
    }
}
