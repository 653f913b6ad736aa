//! Simulated card payment.

use async_trait::async_trait;
use tracing::info;

use seatlock_core::traits::{PaymentResult, PaymentStrategy};
use seatlock_core::types::{Booking, PaymentKind};

/// Card payment that approves every charge.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardPayment;

#[async_trait]
impl PaymentStrategy for CardPayment {
    fn kind(&self) -> PaymentKind {
        PaymentKind::Card
    }

    async fn pay(&self, booking: &Booking) -> PaymentResult {
        info!(
            booking_id = %booking.id,
            user_id = %booking.user_id,
            show_id = %booking.show_id,
            amount = %booking.amount,
            "Processing card payment"
        );
        PaymentResult::Approved
    }
}
