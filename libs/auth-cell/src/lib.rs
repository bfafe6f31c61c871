pub mod header;
pub mod login;
pub mod services;
pub mod session;
pub mod store;

pub use header::{follow, render_header, Header, HeaderOutcome, Modal, NavItem, NavTarget, Route};
pub use login::LoginController;
pub use session::SessionManager;
pub use store::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};
