use crate::application::processing::{Dwells, ProcessingSimulator, Stage};
use crate::domain::link::{LinkField, LinkForm, Order};
use crate::domain::payment::{CryptoPaymentForm, PaymentSummary, WALLET_ADDRESS};
use crate::domain::ports::CredentialVerifierBox;
use crate::domain::session::Session;
use rust_decimal::Decimal;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};
use uuid::Uuid;

/// Simulated network delay on sign-in.
pub const LOGIN_DELAY: Duration = Duration::from_millis(800);

/// How long the copy-to-clipboard indicator stays on.
pub const COPY_INDICATOR_DWELL: Duration = Duration::from_secs(2);

pub const INVALID_CREDENTIALS: &str = "Invalid email or password. Please try again.";

/// Which screen the flow is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    TopUp,
    Processing,
    Payment,
    CryptoPayment,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Screen::Login => "login",
            Screen::TopUp => "topup",
            Screen::Processing => "processing",
            Screen::Payment => "payment",
            Screen::CryptoPayment => "crypto-payment",
        };
        f.write_str(name)
    }
}

/// A navigation target together with the state handed to it.
///
/// Each screen expects specific fields here; a screen entered without its
/// required data redirects to the entry form instead of rendering defaults.
#[derive(Debug, Clone)]
pub enum Route {
    Login,
    TopUp,
    Processing { order: Order },
    Payment { order: Order },
    CryptoPayment { amount: Decimal, order: Order },
}

enum ScreenState {
    Login {
        error: Option<String>,
    },
    TopUp {
        form: LinkForm,
    },
    Processing {
        order: Order,
    },
    Payment {
        order: Order,
    },
    CryptoPayment {
        form: CryptoPaymentForm,
        copied_until: Option<Instant>,
    },
}

/// Drives the linear top-up flow:
/// login -> entry -> processing -> payment -> crypto payment -> entry.
///
/// Owns the session and the state of whichever screen is current. Operations
/// for a screen the flow is not on are ignored, the way a UI simply would
/// not offer them.
pub struct FlowEngine {
    session: Session,
    dwells: Dwells,
    login_delay: Duration,
    screen: ScreenState,
}

impl FlowEngine {
    /// Engine with the contractual dwell times.
    pub fn new(verifier: CredentialVerifierBox) -> Self {
        Self::with_timing(verifier, Dwells::default(), LOGIN_DELAY)
    }

    /// Engine with custom timing, for tests and the `--no-delay` CLI mode.
    pub fn with_timing(
        verifier: CredentialVerifierBox,
        dwells: Dwells,
        login_delay: Duration,
    ) -> Self {
        Self {
            session: Session::new(verifier),
            dwells,
            login_delay,
            screen: ScreenState::Login { error: None },
        }
    }

    pub fn screen(&self) -> Screen {
        match self.screen {
            ScreenState::Login { .. } => Screen::Login,
            ScreenState::TopUp { .. } => Screen::TopUp,
            ScreenState::Processing { .. } => Screen::Processing,
            ScreenState::Payment { .. } => Screen::Payment,
            ScreenState::CryptoPayment { .. } => Screen::CryptoPayment,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Moves to a route, applying the missing-context guards: processing and
    /// payment need a non-empty link list, crypto payment needs a funding
    /// amount. A guarded route redirects to the entry form.
    pub fn navigate(&mut self, route: Route) {
        self.screen = match route {
            Route::Login => ScreenState::Login { error: None },
            Route::TopUp => ScreenState::TopUp {
                form: LinkForm::new(),
            },
            Route::Processing { order } if order.links.is_empty() => redirect("processing"),
            Route::Processing { order } => ScreenState::Processing { order },
            Route::Payment { order } if order.links.is_empty() => redirect("payment"),
            Route::Payment { order } => ScreenState::Payment { order },
            Route::CryptoPayment { amount, .. } if amount.is_zero() => redirect("crypto-payment"),
            Route::CryptoPayment { amount, .. } => ScreenState::CryptoPayment {
                form: CryptoPaymentForm::new(amount),
                copied_until: None,
            },
        };
        tracing::debug!(screen = %self.screen(), "navigated");
    }

    // --- login screen ---

    /// Attempts sign-in after the simulated network delay. Success moves to
    /// the entry form; failure records the generic error message.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        sleep(self.login_delay).await;
        if self.session.login(email, password).await {
            tracing::info!(email, "signed in");
            self.navigate(Route::TopUp);
            true
        } else {
            tracing::info!("sign-in rejected");
            if let ScreenState::Login { error } = &mut self.screen {
                *error = Some(INVALID_CREDENTIALS.to_string());
            }
            false
        }
    }

    pub fn login_error(&self) -> Option<&str> {
        match &self.screen {
            ScreenState::Login { error } => error.as_deref(),
            _ => None,
        }
    }

    /// Ends the session from any screen and returns to login.
    pub fn logout(&mut self) {
        self.session.logout();
        self.navigate(Route::Login);
    }

    // --- entry form screen ---

    pub fn link_form(&self) -> Option<&LinkForm> {
        match &self.screen {
            ScreenState::TopUp { form } => Some(form),
            _ => None,
        }
    }

    pub fn add_link(&mut self) -> Option<Uuid> {
        match &mut self.screen {
            ScreenState::TopUp { form } => Some(form.add_link()),
            _ => None,
        }
    }

    pub fn remove_link(&mut self, id: Uuid) {
        if let ScreenState::TopUp { form } = &mut self.screen {
            form.remove_link(id);
        }
    }

    pub fn update_link(&mut self, id: Uuid, field: LinkField, value: &str) {
        if let ScreenState::TopUp { form } = &mut self.screen {
            form.update_link(id, field, value);
        }
    }

    /// Commits the entry form. On success the flow moves to the processing
    /// screen with the order; otherwise per-entry errors stay on the form.
    pub fn submit_links(&mut self) -> bool {
        let ScreenState::TopUp { form } = &mut self.screen else {
            return false;
        };
        match form.submit() {
            Some(order) => {
                tracing::info!(links = order.links.len(), total = %order.total, "order submitted");
                self.navigate(Route::Processing { order });
                true
            }
            None => false,
        }
    }

    // --- processing screen ---

    /// Runs the staged status sequence for the pending order, then moves to
    /// the payment summary carrying the order forward. Each stage is
    /// reported as it is entered.
    ///
    /// The sequence runs as a task bound to this call; dropping the future
    /// aborts it, so nothing fires after the caller walks away.
    pub async fn run_processing(&mut self, mut on_stage: impl FnMut(Stage)) {
        let ScreenState::Processing { order } = &self.screen else {
            return;
        };
        let order = order.clone();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = ProcessingSimulator::new(self.dwells).spawn(tx);
        while let Some(stage) = rx.recv().await {
            tracing::debug!(%stage, "processing stage");
            on_stage(stage);
        }
        task.wait().await;

        self.navigate(Route::Payment { order });
    }

    // --- payment summary screen ---

    pub fn payment_summary(&self) -> Option<PaymentSummary> {
        match &self.screen {
            ScreenState::Payment { order } => {
                Some(PaymentSummary::new(order.total, self.session.balance()))
            }
            _ => None,
        }
    }

    pub fn order(&self) -> Option<&Order> {
        match &self.screen {
            ScreenState::Processing { order } | ScreenState::Payment { order } => Some(order),
            _ => None,
        }
    }

    /// Moves to the crypto payment screen funding the shortfall. Only
    /// offered while the balance does not cover the order.
    pub fn recharge(&mut self) -> bool {
        let ScreenState::Payment { order } = &self.screen else {
            return false;
        };
        let summary = PaymentSummary::new(order.total, self.session.balance());
        if !summary.needs_recharge() {
            return false;
        }
        let order = order.clone();
        self.navigate(Route::CryptoPayment {
            amount: summary.difference(),
            order,
        });
        true
    }

    /// Deliberately performs no state change: the source flow never settles
    /// the order or debits the balance. Known gap, preserved.
    pub fn pay_now(&self) {
        tracing::info!("pay now pressed; no settlement is wired up");
    }

    /// The "Back" action, also used by the crypto screen's confirmation.
    pub fn back_to_entry(&mut self) {
        self.navigate(Route::TopUp);
    }

    // --- crypto payment screen ---

    pub fn crypto_form(&self) -> Option<&CryptoPaymentForm> {
        match &self.screen {
            ScreenState::CryptoPayment { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Hands back the receiving address and lights the copied indicator for
    /// [`COPY_INDICATOR_DWELL`].
    pub fn copy_address(&mut self) -> Option<&'static str> {
        match &mut self.screen {
            ScreenState::CryptoPayment { copied_until, .. } => {
                *copied_until = Some(Instant::now() + COPY_INDICATOR_DWELL);
                Some(WALLET_ADDRESS)
            }
            _ => None,
        }
    }

    pub fn address_copied(&self) -> bool {
        match &self.screen {
            ScreenState::CryptoPayment { copied_until, .. } => {
                copied_until.is_some_and(|until| Instant::now() < until)
            }
            _ => false,
        }
    }

    pub fn set_txid(&mut self, txid: &str) {
        if let ScreenState::CryptoPayment { form, .. } = &mut self.screen {
            form.set_txid(txid);
        }
    }

    /// Submits the transaction id. Acceptance is syntactic only and leaves
    /// the flow on the confirmation; the balance is never credited.
    pub fn submit_txid(&mut self) -> bool {
        match &mut self.screen {
            ScreenState::CryptoPayment { form, .. } => {
                let accepted = form.submit();
                if accepted {
                    tracing::info!(txid = form.txid(), "payment submitted, pending verification");
                }
                accepted
            }
            _ => false,
        }
    }
}

fn redirect(screen: &str) -> ScreenState {
    tracing::warn!(screen, "reached without its state, redirecting to entry form");
    ScreenState::TopUp {
        form: LinkForm::new(),
    }
}
