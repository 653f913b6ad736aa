//! Simulated UPI payment.

use async_trait::async_trait;
use tracing::info;

use seatlock_core::traits::{PaymentResult, PaymentStrategy};
use seatlock_core::types::{Booking, PaymentKind};

/// UPI transfer that approves every charge.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpiPayment;

#[async_trait]
impl PaymentStrategy for UpiPayment {
    fn kind(&self) -> PaymentKind {
        PaymentKind::Upi
    }

    async fn pay(&self, booking: &Booking) -> PaymentResult {
        info!(
            booking_id = %booking.id,
            user_id = %booking.user_id,
            amount = %booking.amount,
            "Processing UPI payment"
        );
        PaymentResult::Approved
    }
}
