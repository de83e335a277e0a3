//! Credential delivery
//!
//! Narrow interface to whatever channel hands generated credentials to a
//! new employee. Delivery is fire-and-forget: a failure is logged by the
//! caller and never fails the employee creation.

use async_trait::async_trait;

/// Generated login credentials for a new user.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[async_trait]
pub trait CredentialNotifier: Send + Sync {
    async fn send_credentials(&self, email: &str, credentials: &Credentials)
    -> anyhow::Result<()>;
}

/// Default notifier: records that credentials are ready for delivery.
/// The password itself never reaches the log.
pub struct LogNotifier;

#[async_trait]
impl CredentialNotifier for LogNotifier {
    async fn send_credentials(
        &self,
        email: &str,
        credentials: &Credentials,
    ) -> anyhow::Result<()> {
        tracing::info!(
            email,
            username = %credentials.username,
            "generated credentials ready for delivery"
        );
        Ok(())
    }
}
