/// Mock implementations for testing
mod mock_account_services;
mod mock_key_store;
mod mock_progress_reporter;
mod mock_results_backend;

pub use mock_account_services::MockAccountServices;
pub use mock_key_store::MockKeyStore;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_results_backend::MockResultsBackend;
