use async_trait::async_trait;

/// Checks a credential pair against whatever the deployment trusts.
///
/// The session never sees how the comparison is done. This crate only ships
/// a fixed-pair demo implementation; a real deployment plugs in a
/// backend-checked verifier here.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, email: &str, password: &str) -> bool;
}

pub type CredentialVerifierBox = Box<dyn CredentialVerifier>;
