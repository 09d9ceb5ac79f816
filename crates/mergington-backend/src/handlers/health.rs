use std::sync::Arc;

use axum::{Json, extract::State};
use mergington::data::{HealthResponse, HealthStatus, ServiceInfo, UptimeInfo};
use mergington::log;

use crate::services::ActivityService;

fn uptime_seconds(started_at: chrono::DateTime<chrono::Utc>) -> i64 {
    (chrono::Utc::now() - started_at).num_seconds()
}

fn human_readable_uptime(uptime_seconds: i64) -> String {
    let days = uptime_seconds / 86400;
    let hours = (uptime_seconds % 86400) / 3600;
    let minutes = (uptime_seconds % 3600) / 60;
    let secs = uptime_seconds % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m {secs}s")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Builds a health report from any activity service.
async fn report<S>(service: &S, started_at: chrono::DateTime<chrono::Utc>) -> HealthResponse
where
    S: ActivityService + Sync,
    S::Error: std::fmt::Display,
{
    let (status, services) = match service.list().await {
        Ok(directory) => (
            HealthStatus::Healthy,
            ServiceInfo {
                activities: "up".to_string(),
                activity_count: directory.len(),
                participant_count: directory.participant_count(),
            },
        ),
        Err(err) => {
            log::warn!("Health check could not list activities: {}", err);
            (
                HealthStatus::Degraded,
                ServiceInfo {
                    activities: "down".to_string(),
                    activity_count: 0,
                    participant_count: 0,
                },
            )
        }
    };

    let seconds = uptime_seconds(started_at);
    HealthResponse {
        status,
        timestamp: chrono::Utc::now().to_rfc3339(),
        started_at: started_at.to_rfc3339(),
        uptime: UptimeInfo {
            seconds,
            human: human_readable_uptime(seconds),
        },
        services,
    }
}

pub async fn get(State(state): State<Arc<crate::AppState>>) -> Json<HealthResponse> {
    let health_response = report(&state.activities, state.started_at).await;

    log::debug!("Health check: {:?}", health_response);

    Json(health_response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ActivityServiceInMemory, CapacityPolicy};
    use async_trait::async_trait;
    use mergington::data::{Activity, ActivityDirectory};

    struct UnavailableActivities;

    #[async_trait]
    impl ActivityService for UnavailableActivities {
        type Error = String;

        async fn list(&self) -> Result<ActivityDirectory, Self::Error> {
            Err("store unavailable".to_string())
        }

        async fn signup(&self, _activity: &str, _email: &str) -> Result<(), Self::Error> {
            Err("store unavailable".to_string())
        }

        async fn unregister(&self, _activity: &str, _email: &str) -> Result<(), Self::Error> {
            Err("store unavailable".to_string())
        }
    }

    #[test]
    fn human_uptime_formats() {
        assert_eq!(human_readable_uptime(5), "5s");
        assert_eq!(human_readable_uptime(65), "1m 5s");
        assert_eq!(human_readable_uptime(3_725), "1h 2m 5s");
        assert_eq!(human_readable_uptime(90_061), "1d 1h 1m 1s");
    }

    #[tokio::test]
    async fn reports_counts() {
        let directory: ActivityDirectory = [
            ("A", Activity::new("a", "s", 3).with_participants(["x@y.z", "w@y.z"])),
            ("B", Activity::new("b", "s", 3).with_participants(["x@y.z"])),
        ]
        .into_iter()
        .collect();
        let state = Arc::new(crate::AppState::new(ActivityServiceInMemory::new(
            directory,
            CapacityPolicy::Unenforced,
        )));

        let Json(health) = get(State(state)).await;
        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.services.activity_count, 2);
        assert_eq!(health.services.participant_count, 3);
        assert!(health.uptime.seconds >= 0);
    }

    #[tokio::test]
    async fn reports_degraded_when_listing_fails() {
        let health = report(&UnavailableActivities, chrono::Utc::now()).await;
        assert_eq!(health.status, HealthStatus::Degraded);
        assert_eq!(health.services.activities, "down");
        assert_eq!(health.services.activity_count, 0);
        assert_eq!(health.services.participant_count, 0);
    }
}
