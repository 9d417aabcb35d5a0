//! Plan generation pipeline
//!
//! `PlannerService` is the one operation this service exposes: validate the
//! request, compose the prompt, call the generator once under a bounded
//! deadline, and shape the response into a `TravelPlan`.

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

use crate::gemini::TextGenerator;
use crate::models::{TravelPlan, TripRequest};
use crate::parser::parse_plan;
use crate::prompt::build_plan_prompt;
use crate::{PlannerError, Result};

/// Orchestrates trip plan generation against an opaque text generator
pub struct PlannerService {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl PlannerService {
    /// Create a new planner backed by the given generator
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// Generate a travel plan for the given request
    ///
    /// Fails fast with a `Validation` error before any upstream call, and
    /// with `Timeout` when the generator exceeds the configured deadline.
    #[instrument(skip(self, request), fields(origin = %request.origin, destination = %request.destination))]
    pub async fn generate_plan(&self, request: &TripRequest) -> Result<TravelPlan> {
        request.validate()?;

        let prompt = build_plan_prompt(request);
        let start = std::time::Instant::now();

        let text = tokio::time::timeout(self.timeout, self.generator.generate(&prompt))
            .await
            .map_err(|_| PlannerError::Timeout {
                seconds: self.timeout.as_secs(),
            })??;

        let plan = parse_plan(&text);
        info!(
            complete = plan.is_complete(),
            "Generated plan in {:.3}s",
            start.elapsed().as_secs_f64()
        );

        Ok(plan)
    }
}
