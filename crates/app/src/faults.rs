//! Fault injection — synthetic delay and error selection for exercising an
//! external monitoring pipeline.
//!
//! The use-cases in [`crate::services`] never consult this module. A driving
//! adapter asks a [`FaultInjector`] for a [`FaultPlan`] before running an
//! operation and acts on it. [`NoFaults`] is the production default;
//! [`RandomFaults`] picks outcomes with fixed weights per [`Operation`].

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The operation about to be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListItems,
    CreateItem,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ListItems => "list_items",
            Self::CreateItem => "create_item",
        })
    }
}

/// What the adapter should do after waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultOutcome {
    /// Run the real operation.
    Proceed,
    /// Answer with a simulated client error carrying this HTTP status.
    ClientError { status: u16 },
    /// Fail the invocation without producing a response.
    ServerError,
}

/// A delay followed by an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultPlan {
    pub delay: Duration,
    pub outcome: FaultOutcome,
}

impl FaultPlan {
    /// No delay, run the real operation.
    pub const PROCEED: Self = Self {
        delay: Duration::ZERO,
        outcome: FaultOutcome::Proceed,
    };

    /// Sleep for the planned delay.
    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Strategy deciding, per invocation, whether to inject a fault.
pub trait FaultInjector {
    fn plan(&self, operation: Operation) -> FaultPlan;
}

impl<T: FaultInjector + ?Sized> FaultInjector for Box<T> {
    fn plan(&self, operation: Operation) -> FaultPlan {
        (**self).plan(operation)
    }
}

impl<T: FaultInjector + ?Sized> FaultInjector for std::sync::Arc<T> {
    fn plan(&self, operation: Operation) -> FaultPlan {
        (**self).plan(operation)
    }
}

/// Never delays, never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFaults;

impl FaultInjector for NoFaults {
    fn plan(&self, _operation: Operation) -> FaultPlan {
        FaultPlan::PROCEED
    }
}

/// Outcome weights (percent) and delay ranges (milliseconds) for one
/// operation.
#[derive(Debug, Clone)]
pub struct FaultProfile {
    pub success_weight: u32,
    pub client_error_weight: u32,
    pub server_error_weight: u32,
    /// Client error statuses, chosen with equal odds.
    pub client_statuses: [u16; 2],
    pub success_delay_ms: RangeInclusive<u64>,
    pub client_error_delay_ms: RangeInclusive<u64>,
    pub server_error_delay_ms: RangeInclusive<u64>,
}

impl FaultProfile {
    /// 70% success, 20% client error (400/404), 10% server error.
    #[must_use]
    pub fn list_items() -> Self {
        Self {
            success_weight: 70,
            client_error_weight: 20,
            server_error_weight: 10,
            client_statuses: [400, 404],
            ..Self::default_delays()
        }
    }

    /// 60% success, 25% client error (400/422), 15% server error.
    #[must_use]
    pub fn create_item() -> Self {
        Self {
            success_weight: 60,
            client_error_weight: 25,
            server_error_weight: 15,
            client_statuses: [400, 422],
            ..Self::default_delays()
        }
    }

    fn default_delays() -> Self {
        Self {
            success_weight: 100,
            client_error_weight: 0,
            server_error_weight: 0,
            client_statuses: [400, 400],
            success_delay_ms: 100..=500,
            client_error_delay_ms: 50..=200,
            server_error_delay_ms: 500..=2000,
        }
    }

    fn total_weight(&self) -> u32 {
        self.success_weight + self.client_error_weight + self.server_error_weight
    }
}

/// Picks outcomes at random according to a [`FaultProfile`] per operation.
pub struct RandomFaults {
    list: FaultProfile,
    create: FaultProfile,
    rng: Mutex<StdRng>,
}

impl fmt::Debug for RandomFaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomFaults")
            .field("list", &self.list)
            .field("create", &self.create)
            .finish_non_exhaustive()
    }
}

impl Default for RandomFaults {
    fn default() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl RandomFaults {
    /// Entropy-seeded injector with the standard profiles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproducible injector with the standard profiles.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            list: FaultProfile::list_items(),
            create: FaultProfile::create_item(),
            rng: Mutex::new(rng),
        }
    }

    /// Replace the profile used for `operation`.
    #[must_use]
    pub fn with_profile(mut self, operation: Operation, profile: FaultProfile) -> Self {
        match operation {
            Operation::ListItems => self.list = profile,
            Operation::CreateItem => self.create = profile,
        }
        self
    }

    fn profile(&self, operation: Operation) -> &FaultProfile {
        match operation {
            Operation::ListItems => &self.list,
            Operation::CreateItem => &self.create,
        }
    }
}

impl FaultInjector for RandomFaults {
    fn plan(&self, operation: Operation) -> FaultPlan {
        let profile = self.profile(operation);
        let total = profile.total_weight();
        if total == 0 {
            return FaultPlan::PROCEED;
        }

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let roll = rng.random_range(0..total);

        let (outcome, delay_ms) = if roll < profile.success_weight {
            (
                FaultOutcome::Proceed,
                rng.random_range(profile.success_delay_ms.clone()),
            )
        } else if roll < profile.success_weight + profile.client_error_weight {
            let status = profile.client_statuses[usize::from(rng.random_bool(0.5))];
            (
                FaultOutcome::ClientError { status },
                rng.random_range(profile.client_error_delay_ms.clone()),
            )
        } else {
            (
                FaultOutcome::ServerError,
                rng.random_range(profile.server_error_delay_ms.clone()),
            )
        };

        FaultPlan {
            delay: Duration::from_millis(delay_ms),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: usize = 10_000;

    fn tally(faults: &RandomFaults, operation: Operation) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for _ in 0..SAMPLES {
            match faults.plan(operation).outcome {
                FaultOutcome::Proceed => counts.0 += 1,
                FaultOutcome::ClientError { .. } => counts.1 += 1,
                FaultOutcome::ServerError => counts.2 += 1,
            }
        }
        counts
    }

    #[test]
    fn should_always_proceed_without_delay_when_faults_disabled() {
        for op in [Operation::ListItems, Operation::CreateItem] {
            assert_eq!(NoFaults.plan(op), FaultPlan::PROCEED);
        }
    }

    #[test]
    fn should_follow_list_weights() {
        let faults = RandomFaults::seeded(7);
        let (ok, client, server) = tally(&faults, Operation::ListItems);
        assert!((6_500..=7_500).contains(&ok), "success {ok}");
        assert!((1_600..=2_400).contains(&client), "client {client}");
        assert!((700..=1_300).contains(&server), "server {server}");
    }

    #[test]
    fn should_follow_create_weights() {
        let faults = RandomFaults::seeded(11);
        let (ok, client, server) = tally(&faults, Operation::CreateItem);
        assert!((5_500..=6_500).contains(&ok), "success {ok}");
        assert!((2_100..=2_900).contains(&client), "client {client}");
        assert!((1_100..=1_900).contains(&server), "server {server}");
    }

    #[test]
    fn should_only_pick_configured_client_statuses() {
        let faults = RandomFaults::seeded(3);
        for _ in 0..1_000 {
            if let FaultOutcome::ClientError { status } = faults.plan(Operation::CreateItem).outcome
            {
                assert!(status == 400 || status == 422, "unexpected {status}");
            }
            if let FaultOutcome::ClientError { status } = faults.plan(Operation::ListItems).outcome
            {
                assert!(status == 400 || status == 404, "unexpected {status}");
            }
        }
    }

    #[test]
    fn should_draw_delay_from_outcome_range() {
        let faults = RandomFaults::seeded(5);
        let profile = FaultProfile::list_items();
        for _ in 0..1_000 {
            let plan = faults.plan(Operation::ListItems);
            let ms = u64::try_from(plan.delay.as_millis()).unwrap();
            let range = match plan.outcome {
                FaultOutcome::Proceed => &profile.success_delay_ms,
                FaultOutcome::ClientError { .. } => &profile.client_error_delay_ms,
                FaultOutcome::ServerError => &profile.server_error_delay_ms,
            };
            assert!(range.contains(&ms), "{ms}ms outside {range:?}");
        }
    }

    #[test]
    fn should_be_reproducible_with_same_seed() {
        let a = RandomFaults::seeded(42);
        let b = RandomFaults::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.plan(Operation::ListItems), b.plan(Operation::ListItems));
        }
    }

    #[test]
    fn should_always_fail_with_server_only_profile() {
        let profile = FaultProfile {
            success_weight: 0,
            client_error_weight: 0,
            server_error_weight: 1,
            ..FaultProfile::list_items()
        };
        let faults = RandomFaults::seeded(1).with_profile(Operation::ListItems, profile);
        for _ in 0..50 {
            assert_eq!(
                faults.plan(Operation::ListItems).outcome,
                FaultOutcome::ServerError
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_return_immediately_when_delay_is_zero() {
        let start = tokio::time::Instant::now();
        FaultPlan::PROCEED.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn should_sleep_for_planned_delay() {
        let plan = FaultPlan {
            delay: Duration::from_millis(1_250),
            outcome: FaultOutcome::ServerError,
        };
        let start = tokio::time::Instant::now();
        plan.wait().await;
        assert!(start.elapsed() >= plan.delay);
    }
}
