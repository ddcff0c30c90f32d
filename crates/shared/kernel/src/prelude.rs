pub use crate::config::{ConfigError, load_config};
#[cfg(feature = "server")]
pub use crate::server::{ApiState, ErrorResponse};
pub use crate::request_id;
pub use fcheck_domain::config::ApiConfig;
pub use fcheck_domain::registry::{FeatureSlice, InitializedSlice};
