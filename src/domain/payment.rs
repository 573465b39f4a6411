use rust_decimal::Decimal;

/// Fixed receiving address shown on the crypto screen. Placeholder value,
/// swapped for a real address at deployment.
pub const WALLET_ADDRESS: &str = "TXxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx";
pub const NETWORK: &str = "TRC20 (Tron)";
pub const TOKEN: &str = "USDT";

/// Shortest transaction id the form accepts. The check is purely syntactic;
/// no chain lookup or reconciliation ever happens.
pub const MIN_TXID_LEN: usize = 10;

/// Balance arithmetic behind the payment summary screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentSummary {
    pub total: Decimal,
    pub available: Decimal,
}

impl PaymentSummary {
    pub fn new(total: Decimal, available: Decimal) -> Self {
        Self { total, available }
    }

    /// How much more the order needs than the balance covers. Negative when
    /// the balance is sufficient.
    pub fn difference(&self) -> Decimal {
        self.total - self.available
    }

    pub fn needs_recharge(&self) -> bool {
        self.difference() > Decimal::ZERO
    }

    /// What would stay on the balance if the order were paid.
    pub fn remaining_after_payment(&self) -> Decimal {
        self.difference().abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoPaymentState {
    Form,
    Submitted,
}

/// Transaction-id entry form for the crypto screen.
///
/// `Form -> Submitted` is one-way; a fresh navigation gets a fresh form.
#[derive(Debug)]
pub struct CryptoPaymentForm {
    amount: Decimal,
    txid: String,
    error: Option<String>,
    state: CryptoPaymentState,
}

impl CryptoPaymentForm {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            txid: String::new(),
            error: None,
            state: CryptoPaymentState::Form,
        }
    }

    /// Replaces the transaction id and clears any previous error.
    pub fn set_txid(&mut self, txid: &str) {
        self.txid = txid.to_string();
        self.error = None;
    }

    /// Accepts the transaction id if it passes the syntactic checks.
    ///
    /// Acceptance means "submitted, pending verification" only; nothing is
    /// verified against any ledger.
    pub fn submit(&mut self) -> bool {
        let txid = self.txid.trim();
        if txid.is_empty() {
            self.error = Some("Please enter your Transaction ID (TXID)".to_string());
            return false;
        }
        if txid.len() < MIN_TXID_LEN {
            self.error = Some("Invalid TXID format. Please check and try again.".to_string());
            return false;
        }
        self.error = None;
        self.state = CryptoPaymentState::Submitted;
        true
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn txid(&self) -> &str {
        &self.txid
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn state(&self) -> CryptoPaymentState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_needs_recharge() {
        let summary = PaymentSummary::new(dec!(150), dec!(105));
        assert_eq!(summary.difference(), dec!(45));
        assert!(summary.needs_recharge());
    }

    #[test]
    fn test_summary_sufficient_balance() {
        let summary = PaymentSummary::new(dec!(80), dec!(105));
        assert_eq!(summary.difference(), dec!(-25));
        assert!(!summary.needs_recharge());
        assert_eq!(summary.remaining_after_payment(), dec!(25));
    }

    #[test]
    fn test_exact_balance_needs_no_recharge() {
        let summary = PaymentSummary::new(dec!(105), dec!(105));
        assert!(!summary.needs_recharge());
    }

    #[test]
    fn test_txid_empty_rejected() {
        let mut form = CryptoPaymentForm::new(dec!(45));
        for txid in ["", "   "] {
            form.set_txid(txid);
            assert!(!form.submit());
            assert_eq!(form.error(), Some("Please enter your Transaction ID (TXID)"));
            assert_eq!(form.state(), CryptoPaymentState::Form);
        }
    }

    #[test]
    fn test_txid_too_short_rejected() {
        let mut form = CryptoPaymentForm::new(dec!(45));
        form.set_txid("abc");
        assert!(!form.submit());
        assert_eq!(
            form.error(),
            Some("Invalid TXID format. Please check and try again.")
        );
        assert_eq!(form.state(), CryptoPaymentState::Form);
    }

    #[test]
    fn test_txid_minimum_length_accepted() {
        let mut form = CryptoPaymentForm::new(dec!(45));
        form.set_txid("abcdefghij");
        assert!(form.submit());
        assert_eq!(form.state(), CryptoPaymentState::Submitted);
        assert_eq!(form.error(), None);
    }

    #[test]
    fn test_txid_edit_clears_error() {
        let mut form = CryptoPaymentForm::new(dec!(45));
        form.set_txid("abc");
        form.submit();
        assert!(form.error().is_some());

        form.set_txid("abcd");
        assert_eq!(form.error(), None);
    }

    #[test]
    fn test_txid_trimmed_for_length_check() {
        let mut form = CryptoPaymentForm::new(dec!(45));
        form.set_txid("  abcdef    ");
        assert!(!form.submit());
        assert_eq!(
            form.error(),
            Some("Invalid TXID format. Please check and try again.")
        );
    }
}
