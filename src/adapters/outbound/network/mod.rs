/// Network adapters for the backend and public HTTP services
mod backend_client;
mod public_services_client;

pub use backend_client::{HttpBackendClient, API_BASE_ENV, DEFAULT_API_BASE};
pub use public_services_client::PublicServicesClient;
