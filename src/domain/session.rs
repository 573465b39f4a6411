use crate::domain::ports::CredentialVerifierBox;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Balance every session starts with. Nothing in the flow ever credits or
/// debits it: "Pay Now" performs no settlement and a submitted recharge is
/// never credited. Known gap, preserved.
pub const STARTING_BALANCE: Decimal = dec!(105);

/// In-memory authentication and balance state for the current user.
///
/// Constructed once at application startup and lives for the whole process;
/// mutated only through `login`, `logout` and `set_balance`.
pub struct Session {
    verifier: CredentialVerifierBox,
    authenticated: bool,
    email: Option<String>,
    balance: Decimal,
}

impl Session {
    pub fn new(verifier: CredentialVerifierBox) -> Self {
        Self {
            verifier,
            authenticated: false,
            email: None,
            balance: STARTING_BALANCE,
        }
    }

    /// Attempts to authenticate. On failure the session is left untouched
    /// and the caller surfaces a generic invalid-credentials message.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        if self.verifier.verify(email, password).await {
            self.authenticated = true;
            self.email = Some(email.to_string());
            true
        } else {
            false
        }
    }

    /// Clears authentication and identity unconditionally.
    pub fn logout(&mut self) {
        self.authenticated = false;
        self.email = None;
    }

    /// Overwrites the balance directly.
    pub fn set_balance(&mut self, balance: Decimal) {
        self.balance = balance;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }
}
