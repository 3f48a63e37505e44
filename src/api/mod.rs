pub mod handlers;
pub mod response;
pub mod router;

pub use response::{ApiReply, ApiResponse};
pub use router::{build_app, router};
