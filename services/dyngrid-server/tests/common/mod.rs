// Common test utilities and fixtures

pub mod fixtures;

// Re-export commonly used items
// Note: These may appear unused in some test binaries
#[allow(unused_imports)]
pub use fixtures::{user_documents, DataFile, USER_COLUMNS};
#[allow(unused_imports)]
pub use helpers::{create_test_adapter, create_test_services, params, FailingStore, RecordingStore};
