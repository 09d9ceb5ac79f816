use async_trait::async_trait;
use dashmap::DashMap;

use mergington::data::{Activity, ActivityDirectory};
use mergington::errors::ActivityError;
use mergington::log;

/// A trait for listing activities and managing who is signed up for them.
///
/// The set of activities is fixed once the service is built; only participant
/// lists change. Implementations must make the existence and membership checks
/// of [`signup`](ActivityService::signup) and
/// [`unregister`](ActivityService::unregister) atomic with the mutation they
/// guard, so two concurrent calls for the same email cannot both succeed.
///
/// # Examples
///
/// ```rust,ignore
/// async fn example_usage<S: ActivityService>(service: &S) -> Result<(), S::Error> {
///     service.signup("Chess Club", "tester@example.com").await?;
///     let activities = service.list().await?;
///     assert!(activities.get("Chess Club").is_some());
///     service.unregister("Chess Club", "tester@example.com").await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ActivityService {
    /// The error type returned by operations on this service.
    type Error;

    /// Returns every activity with its current participants, in seed order.
    async fn list(&self) -> Result<ActivityDirectory, Self::Error>;

    /// Appends `email` to the participant list of `activity`.
    ///
    /// # Errors
    ///
    /// Fails if the activity doesn't exist or the email is already signed up.
    /// Not idempotent: repeating a successful call fails.
    async fn signup(&self, activity: &str, email: &str) -> Result<(), Self::Error>;

    /// Removes `email` from the participant list of `activity`.
    ///
    /// # Errors
    ///
    /// Fails if the activity doesn't exist or the email isn't signed up for it.
    async fn unregister(&self, activity: &str, email: &str) -> Result<(), Self::Error>;
}

/// Whether signups are refused once an activity reaches `max_participants`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CapacityPolicy {
    /// Capacity is informational only.
    #[default]
    Unenforced,
    /// Signups fail with [`ActivityError::Full`] once the list is at capacity.
    Enforced,
}

/// An in-memory implementation of the `ActivityService` trait.
///
/// Activities live in a `DashMap`; each signup or unregister holds the shard
/// write guard for its activity across the check and the mutation. The seed
/// order is kept separately so listings are stable.
pub struct ActivityServiceInMemory {
    activities: DashMap<String, Activity>,
    order: Vec<String>,
    capacity: CapacityPolicy,
}

impl ActivityServiceInMemory {
    pub fn new(directory: ActivityDirectory, capacity: CapacityPolicy) -> Self {
        let order: Vec<String> = directory.names().map(str::to_string).collect();
        let activities = directory
            .iter()
            .map(|(name, activity)| (name.to_string(), activity.clone()))
            .collect();

        Self {
            activities,
            order,
            capacity,
        }
    }

    pub fn capacity(&self) -> CapacityPolicy {
        self.capacity
    }
}

impl Default for ActivityServiceInMemory {
    fn default() -> Self {
        Self::new(super::seed::activities(), CapacityPolicy::default())
    }
}

#[async_trait]
impl ActivityService for ActivityServiceInMemory {
    type Error = ActivityError;

    async fn list(&self) -> Result<ActivityDirectory, Self::Error> {
        Ok(self
            .order
            .iter()
            .filter_map(|name| {
                self.activities
                    .get(name)
                    .map(|entry| (name.clone(), entry.value().clone()))
            })
            .collect())
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<(), Self::Error> {
        let mut entry = self
            .activities
            .get_mut(activity)
            .ok_or_else(|| ActivityError::NotFound(activity.to_string()))?;

        if entry.has_participant(email) {
            return Err(ActivityError::DuplicateRegistration {
                activity: activity.to_string(),
                email: email.to_string(),
            });
        }

        if self.capacity == CapacityPolicy::Enforced && entry.is_full() {
            return Err(ActivityError::Full {
                activity: activity.to_string(),
                max_participants: entry.max_participants,
            });
        }

        entry.add_participant(email);
        log::debug!(
            activity,
            participants = entry.participants.len(),
            spots_left = entry.spots_left(),
            "participant added"
        );
        Ok(())
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<(), Self::Error> {
        let mut entry = self
            .activities
            .get_mut(activity)
            .ok_or_else(|| ActivityError::NotFound(activity.to_string()))?;

        if !entry.remove_participant(email) {
            return Err(ActivityError::NotRegistered {
                activity: activity.to_string(),
                email: email.to_string(),
            });
        }

        log::debug!(
            activity,
            participants = entry.participants.len(),
            "participant removed"
        );
        Ok(())
    }
}
