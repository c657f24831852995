use std::sync::Arc;
use tablemate::config::{EnvConfig, CONFIG};
use tablemate::db::memory::MemoryStore;
use tablemate::db::Store;

pub mod client;

pub const TEST_ADMIN_KEY: &str = "test-admin-key";

pub struct TestContext {
    pub store: Arc<dyn Store>,
}

impl TestContext {
    pub fn new() -> TestContext {
        init_test_config();
        TestContext {
            store: Arc::new(MemoryStore::default()),
        }
    }
}

pub fn init_test_config() {
    CONFIG.get_or_init(|| EnvConfig {
        port: 8080,
        db_url: None,
        admin_key: TEST_ADMIN_KEY.to_string(),
        public_origin: "http://test.local".to_string(),
        invite_email_binding: false,
    });
}

// Test data helpers
pub mod test_data {
    use tablemate::types::group::RGroupCreate;
    use tablemate::types::user::RUserCreate;
    use uuid::Uuid;

    pub fn sample_user() -> RUserCreate {
        sample_user_with_email(&format!("user-{}@test.com", Uuid::new_v4()))
    }

    pub fn sample_user_with_email(email: &str) -> RUserCreate {
        RUserCreate {
            name: "Test User".to_string(),
            email: email.to_string(),
        }
    }

    pub fn sample_group() -> RGroupCreate {
        RGroupCreate {
            name: "Test Supper Club".to_string(),
        }
    }
}
