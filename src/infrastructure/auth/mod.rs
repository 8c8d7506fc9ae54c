pub mod middleware;
pub mod request_id;

pub use middleware::{bearer_token_middleware, TriggerToken};
pub use request_id::{request_id_middleware, RequestId};
