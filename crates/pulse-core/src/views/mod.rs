//! View state - explicit records with reducer-style transitions.
//!
//! Nothing here touches the network directly; async entry points take the
//! ports as arguments.

pub mod dashboard;
pub mod form;
pub mod list;
pub mod shell;

pub use dashboard::{ChartPoint, DashboardState, DashboardView, chart_series, excerpt, load_dashboard};
pub use form::{FormError, FormField, FormFields, FormMode, FormPhase, PostForm, Submission};
pub use list::{LoadState, Notice, PostListPage, PostListView};
pub use shell::{MountedView, Shell, ShellCmd, Tab, mount};
