use crate::HealthRes;

/// Health service used by the REST API
///
/// This service provides a standardised way to check the health status of the kiosk service.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Check-in kiosk is alive".into(),
        }
    }
}
