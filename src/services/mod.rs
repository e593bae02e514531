pub mod group;
pub mod post;
pub mod session;

pub use group::{CreateGroup, GroupFilter, GroupService, GroupSummary};
pub use post::{CreatePost, PostService};
pub use session::{MenuItem, Session, SessionService, navigation_for};
