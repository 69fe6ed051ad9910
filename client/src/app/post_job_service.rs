//! Post job service
//!
//! The paid posting workflow: landing offer, form validation, payment,
//! job creation. The job is only created once the fee has been charged.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{JobPosting, NewJobPosting};
use crate::domain::ports::{JobApi, PaymentGateway, PaymentIntentRequest};
use crate::error::PostJobError;
use crate::routes::Route;

/// Days a paid posting stays listed
pub const LISTING_DAYS: u32 = 30;

/// What the landing page offers
#[derive(Debug, Clone, Serialize)]
pub struct PostingOffer {
    pub fee_cents: u64,
    pub listing_days: u32,
    pub included: Vec<&'static str>,
    /// Where "get started" leads
    pub next: Route,
}

impl PostingOffer {
    /// "$35" for whole dollars, "$35.50" otherwise
    pub fn fee_display(&self) -> String {
        format_cents(self.fee_cents)
    }
}

pub fn format_cents(cents: u64) -> String {
    if cents % 100 == 0 {
        format!("${}", cents / 100)
    } else {
        format!("${}.{:02}", cents / 100, cents % 100)
    }
}

/// Outcome of a successful submission
#[derive(Debug, Clone, Serialize)]
pub struct PostingReceipt {
    pub job: JobPosting,
    pub amount_cents: u64,
    pub payment_status: Option<String>,
    pub next: Route,
}

/// Resets the in-progress flag when a submission ends, however it ends.
struct SubmissionGuard<'a>(&'a AtomicBool);

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct PostJobService<J, P>
where
    J: JobApi,
    P: PaymentGateway,
{
    jobs: Arc<J>,
    payments: Arc<P>,
    fee_cents: u64,
    submitting: AtomicBool,
}

impl<J, P> PostJobService<J, P>
where
    J: JobApi,
    P: PaymentGateway,
{
    pub fn new(jobs: Arc<J>, payments: Arc<P>, fee_cents: u64) -> Self {
        Self {
            jobs,
            payments,
            fee_cents,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn landing(&self) -> PostingOffer {
        PostingOffer {
            fee_cents: self.fee_cents,
            listing_days: LISTING_DAYS,
            included: vec![
                "30-day active job listing",
                "Reach thousands of qualified candidates",
                "Multiple application methods",
                "Real-time application tracking",
                "Premium job board placement",
            ],
            next: Route::PostJobForm,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Charge the posting fee with `payment_method_id`, then create the job.
    pub async fn submit(
        &self,
        form: &NewJobPosting,
        payment_method_id: &str,
    ) -> Result<PostingReceipt, PostJobError> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!("Rejected job posting submit: one is already in progress");
            return Err(PostJobError::InProgress);
        }
        let _guard = SubmissionGuard(&self.submitting);

        form.validate()?;

        tracing::info!(
            amount = self.fee_cents,
            title = %form.job_title,
            "Charging job posting fee"
        );
        let intent = self
            .payments
            .create_payment_intent(&PaymentIntentRequest {
                amount: self.fee_cents,
                payment_method_id: payment_method_id.to_string(),
            })
            .await
            .map_err(|e| {
                tracing::warn!("Payment for job posting failed: {}", e);
                PostJobError::Payment(e.detail())
            })?;

        let job = self.jobs.create_job(form).await.map_err(|e| {
            tracing::warn!("Job creation failed after payment: {}", e);
            PostJobError::JobCreation(e.detail())
        })?;

        tracing::info!(job_id = %job.id, "Job posted");
        Ok(PostingReceipt {
            job,
            amount_cents: self.fee_cents,
            payment_status: intent.status,
            next: Route::PostJobSuccess,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::test_utils::{test_new_posting, MockJobApi, MockPaymentGateway};

    fn create_service(
        jobs: Arc<MockJobApi>,
        payments: Arc<MockPaymentGateway>,
    ) -> PostJobService<MockJobApi, MockPaymentGateway> {
        PostJobService::new(jobs, payments, 3500)
    }

    #[test]
    fn landing_offers_fee_and_listing() {
        let service = create_service(
            Arc::new(MockJobApi::new()),
            Arc::new(MockPaymentGateway::new()),
        );
        let offer = service.landing();

        assert_eq!(offer.fee_display(), "$35");
        assert_eq!(offer.listing_days, 30);
        assert_eq!(offer.next, Route::PostJobForm);
    }

    #[test]
    fn format_cents_keeps_odd_cents() {
        assert_eq!(format_cents(3500), "$35");
        assert_eq!(format_cents(3550), "$35.50");
        assert_eq!(format_cents(5), "$0.05");
    }

    #[tokio::test]
    async fn submit_charges_then_creates() {
        let jobs = Arc::new(MockJobApi::new());
        let payments = Arc::new(MockPaymentGateway::new());
        let service = create_service(jobs.clone(), payments.clone());

        let receipt = service
            .submit(&test_new_posting(), "pm_card_visa")
            .await
            .unwrap();

        assert_eq!(receipt.next, Route::PostJobSuccess);
        assert_eq!(receipt.job.job_title, "Roofing Foreman");
        assert_eq!(receipt.amount_cents, 3500);
        let requests = payments.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].amount, 3500);
        assert_eq!(requests[0].payment_method_id, "pm_card_visa");
        assert_eq!(jobs.created_jobs().len(), 1);
        assert!(!service.is_submitting());
    }

    #[tokio::test]
    async fn invalid_form_sends_nothing() {
        let jobs = Arc::new(MockJobApi::new());
        let payments = Arc::new(MockPaymentGateway::new());
        let service = create_service(jobs.clone(), payments.clone());
        let mut form = test_new_posting();
        form.postal_code = "ABCDE".to_string();

        let err = service.submit(&form, "pm_card_visa").await.unwrap_err();

        assert!(matches!(
            err,
            PostJobError::Validation(ValidationError::PostalCode(_))
        ));
        assert!(payments.requests().is_empty());
        assert_eq!(jobs.call_count(), 0);
        assert!(!service.is_submitting());
    }

    #[tokio::test]
    async fn declined_payment_creates_no_job() {
        let jobs = Arc::new(MockJobApi::new());
        let payments = Arc::new(MockPaymentGateway::new().declining("Your card was declined."));
        let service = create_service(jobs.clone(), payments);

        let err = service
            .submit(&test_new_posting(), "pm_card_declined")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Payment failed: Your card was declined.");
        assert!(jobs.created_jobs().is_empty());
        assert_eq!(jobs.call_count(), 0);
    }

    #[tokio::test]
    async fn creation_failure_carries_server_message() {
        let jobs = Arc::new(MockJobApi::new());
        jobs.reject_create("Invalid job function");
        let service = create_service(jobs, Arc::new(MockPaymentGateway::new()));

        let err = service
            .submit(&test_new_posting(), "pm_card_visa")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to create job: Invalid job function");
    }

    #[tokio::test]
    async fn second_submit_while_in_progress_is_rejected() {
        let service = create_service(
            Arc::new(MockJobApi::new()),
            Arc::new(MockPaymentGateway::new()),
        );
        service.submitting.store(true, Ordering::SeqCst);

        let err = service
            .submit(&test_new_posting(), "pm_card_visa")
            .await
            .unwrap_err();

        assert!(matches!(err, PostJobError::InProgress));
        assert!(service.is_submitting());
    }
}
