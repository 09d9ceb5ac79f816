//! Data structures shared between the backend and its HTTP clients.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An extracurricular activity and the students signed up for it.
///
/// Participants are stored in signup order and each email appears at most once.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: Vec::new(),
        }
    }

    /// Seeds the participant list, dropping repeated emails.
    pub fn with_participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for email in participants {
            self.add_participant(email);
        }
        self
    }

    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Appends `email` to the participant list.
    ///
    /// Returns `false` without touching the list if the email is already present.
    pub fn add_participant(&mut self, email: impl Into<String>) -> bool {
        let email = email.into();
        if self.has_participant(&email) {
            return false;
        }
        self.participants.push(email);
        true
    }

    /// Removes `email` from the participant list, returning whether it was present.
    pub fn remove_participant(&mut self, email: &str) -> bool {
        match self.participants.iter().position(|p| p == email) {
            Some(index) => {
                self.participants.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants as usize
    }

    pub fn spots_left(&self) -> u32 {
        let taken = u32::try_from(self.participants.len()).unwrap_or(u32::MAX);
        self.max_participants.saturating_sub(taken)
    }
}

/// The full activity listing, keyed by activity name.
///
/// Serializes as a JSON object whose keys keep the order the activities were
/// inserted in, so clients see the same listing on every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityDirectory(Vec<(String, Activity)>);

impl ActivityDirectory {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts an activity, replacing any existing entry with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, activity: Activity) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = activity,
            None => self.0.push((name, activity)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, activity)| activity)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.0.iter().map(|(name, activity)| (name.as_str(), activity))
    }

    /// Total number of signups across every activity.
    pub fn participant_count(&self) -> usize {
        self.0
            .iter()
            .map(|(_, activity)| activity.participants.len())
            .sum()
    }
}

impl<S: Into<String>> FromIterator<(S, Activity)> for ActivityDirectory {
    fn from_iter<I: IntoIterator<Item = (S, Activity)>>(iter: I) -> Self {
        let mut directory = Self::new();
        for (name, activity) in iter {
            directory.insert(name, activity);
        }
        directory
    }
}

impl Serialize for ActivityDirectory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, activity) in &self.0 {
            map.serialize_entry(name, activity)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ActivityDirectory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DirectoryVisitor;

        impl<'de> Visitor<'de> for DirectoryVisitor {
            type Value = ActivityDirectory;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of activity names to activities")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut directory = ActivityDirectory::new();
                while let Some((name, activity)) = access.next_entry::<String, Activity>()? {
                    directory.insert(name, activity);
                }
                Ok(directory)
            }
        }

        deserializer.deserialize_map(DirectoryVisitor)
    }
}

/// Query string carried by the signup and unregister endpoints.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SignupQuery {
    pub email: String,
}

/// A confirmation returned by a successful signup or unregister call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn signed_up(email: &str, activity: &str) -> Self {
        Self {
            message: format!("Signed up {email} for {activity}"),
        }
    }

    pub fn unregistered(email: &str, activity: &str) -> Self {
        Self {
            message: format!("Unregistered {email} from {activity}"),
        }
    }
}

/// Error payload returned alongside any non-2xx status.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UptimeInfo {
    pub seconds: i64,
    pub human: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServiceInfo {
    pub activities: String,
    pub activity_count: usize,
    pub participant_count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: String,
    pub started_at: String,
    pub uptime: UptimeInfo,
    pub services: ServiceInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chess() -> Activity {
        Activity::new(
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            2,
        )
        .with_participants(["michael@mergington.edu"])
    }

    #[test]
    fn add_participant_appends_in_order() {
        let mut activity = chess();
        assert!(activity.add_participant("daniel@mergington.edu"));
        assert_eq!(
            activity.participants,
            vec!["michael@mergington.edu", "daniel@mergington.edu"]
        );
    }

    #[test]
    fn add_participant_rejects_duplicates() {
        let mut activity = chess();
        assert!(!activity.add_participant("michael@mergington.edu"));
        assert_eq!(activity.participants.len(), 1);
    }

    #[test]
    fn with_participants_drops_repeats() {
        let activity = Activity::new("d", "s", 5).with_participants(["a@x.edu", "a@x.edu"]);
        assert_eq!(activity.participants, vec!["a@x.edu"]);
    }

    #[test]
    fn remove_participant_reports_presence() {
        let mut activity = chess();
        assert!(!activity.remove_participant("nobody@example.com"));
        assert!(activity.remove_participant("michael@mergington.edu"));
        assert!(activity.participants.is_empty());
    }

    #[test]
    fn emails_are_case_sensitive() {
        let activity = chess();
        assert!(!activity.has_participant("Michael@mergington.edu"));
    }

    #[test]
    fn capacity_tracking() {
        let mut activity = chess();
        assert!(!activity.is_full());
        assert_eq!(activity.spots_left(), 1);
        activity.add_participant("daniel@mergington.edu");
        assert!(activity.is_full());
        assert_eq!(activity.spots_left(), 0);
    }

    #[test]
    fn directory_serializes_as_ordered_object() {
        let directory: ActivityDirectory = [
            ("Zumba", Activity::new("Dance", "Mondays", 10)),
            ("Chess Club", chess()),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&directory).unwrap();
        let zumba_at = json.find("\"Zumba\"").unwrap();
        let chess_at = json.find("\"Chess Club\"").unwrap();
        assert!(zumba_at < chess_at);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["Chess Club"]["participants"][0],
            "michael@mergington.edu"
        );
        assert_eq!(value["Zumba"]["max_participants"], 10);
    }

    #[test]
    fn directory_deserializes_preserving_order() {
        let json = r#"{
            "B": {"description": "b", "schedule": "s", "max_participants": 1, "participants": []},
            "A": {"description": "a", "schedule": "s", "max_participants": 2, "participants": ["x@y.z"]}
        }"#;
        let directory: ActivityDirectory = serde_json::from_str(json).unwrap();
        assert_eq!(directory.names().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(directory.participant_count(), 1);
        assert!(directory.contains("A"));
        assert!(!directory.contains("a"));
    }

    #[test]
    fn directory_insert_replaces_in_place() {
        let mut directory = ActivityDirectory::new();
        directory.insert("A", Activity::new("first", "s", 1));
        directory.insert("B", Activity::new("b", "s", 1));
        directory.insert("A", Activity::new("second", "s", 1));
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(directory.get("A").unwrap().description, "second");
    }

    #[test]
    fn confirmation_messages() {
        assert_eq!(
            MessageResponse::signed_up("tester@example.com", "Chess Club").message,
            "Signed up tester@example.com for Chess Club"
        );
        assert_eq!(
            MessageResponse::unregistered("tester@example.com", "Chess Club").message,
            "Unregistered tester@example.com from Chess Club"
        );
    }
}
