use crate::domain::ports::CredentialVerifier;
use async_trait::async_trait;

// Demo credentials - in production, plug a backend-checked verifier into the
// CredentialVerifier port instead.
pub const DEMO_EMAIL: &str = "softtop@outlook.com";
pub const DEMO_PASSWORD: &str = "softtop.beijing";

/// Accepts exactly the demo pair. This is a mock, not security; it exists so
/// the flow can be exercised without a backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoCredentialVerifier;

#[async_trait]
impl CredentialVerifier for DemoCredentialVerifier {
    async fn verify(&self, email: &str, password: &str) -> bool {
        email == DEMO_EMAIL && password == DEMO_PASSWORD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_pair_accepted() {
        let verifier = DemoCredentialVerifier;
        assert!(verifier.verify(DEMO_EMAIL, DEMO_PASSWORD).await);
    }

    #[tokio::test]
    async fn test_near_misses_rejected() {
        let verifier = DemoCredentialVerifier;
        assert!(!verifier.verify(DEMO_EMAIL, "").await);
        assert!(!verifier.verify("", DEMO_PASSWORD).await);
        assert!(!verifier.verify("SOFTTOP@OUTLOOK.COM", DEMO_PASSWORD).await);
        assert!(!verifier.verify(DEMO_EMAIL, "softtop.beijing ").await);
    }
}
