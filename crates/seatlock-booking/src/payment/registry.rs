//! Payment kind → strategy lookup.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use seatlock_core::traits::PaymentStrategy;
use seatlock_core::types::PaymentKind;

use super::{CardPayment, UpiPayment};

/// Registry of the payment strategies a coordinator can charge through.
#[derive(Debug, Clone, Default)]
pub struct PaymentRegistry {
    strategies: HashMap<PaymentKind, Arc<dyn PaymentStrategy>>,
}

impl PaymentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in strategy for each listed kind.
    ///
    /// Kinds without a built-in strategy are skipped with a warning.
    pub fn with_builtin(kinds: &[PaymentKind]) -> Self {
        let mut registry = Self::new();
        for kind in kinds {
            match kind {
                PaymentKind::Card => registry.register(Arc::new(CardPayment)),
                PaymentKind::Upi => registry.register(Arc::new(UpiPayment)),
                PaymentKind::Wallet => {
                    warn!(kind = %kind, "No built-in strategy for payment kind, skipping");
                }
            }
        }
        registry
    }

    /// Register a strategy under its own kind, replacing any previous one.
    pub fn register(&mut self, strategy: Arc<dyn PaymentStrategy>) {
        self.strategies.insert(strategy.kind(), strategy);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, strategy: Arc<dyn PaymentStrategy>) -> Self {
        self.register(strategy);
        self
    }

    /// Strategy for `kind`, if one is registered.
    pub fn get(&self, kind: PaymentKind) -> Option<Arc<dyn PaymentStrategy>> {
        self.strategies.get(&kind).cloned()
    }
}
