pub mod input;
pub mod session;
pub mod share_coordinator;
pub mod toast;

pub use session::ShareSession;
pub use share_coordinator::ShareCoordinator;
pub use toast::TOAST_DURATION;
