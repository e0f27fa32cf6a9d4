use serde::{Deserialize, Serialize};

/// Goal stored when a registration leaves it out.
pub const DEFAULT_GOAL: &str = "General";

/// Role given to every new registration.
pub const DEFAULT_ROLE: &str = "Member";

/// One row of the user table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Positive id, unique under sequential inserts
    pub id: u64,
    pub name: String,
    /// Unique key, compared case-insensitively
    pub email: String,
    /// Stored as plain text
    pub password: String,
    pub goal: String,
    /// Local date and time of registration, informational only
    pub registered_at: String,
    /// Client address the registration came from
    pub ip_address: String,
    pub role: String,
}

impl UserRecord {
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

/// Registration candidate, before an id is allocated
#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub goal: Option<String>,
}

impl NewUser {
    /// Build the stored record for this candidate.
    ///
    /// A missing or empty goal becomes [`DEFAULT_GOAL`]; the role is always
    /// [`DEFAULT_ROLE`].
    pub fn into_record(self, id: u64, registered_at: String, ip_address: String) -> UserRecord {
        let goal = self
            .goal
            .filter(|goal| !goal.is_empty())
            .unwrap_or_else(|| DEFAULT_GOAL.to_string());

        UserRecord {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            goal,
            registered_at,
            ip_address,
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(goal: Option<&str>) -> NewUser {
        NewUser {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            password: "cobol".to_string(),
            goal: goal.map(str::to_string),
        }
    }

    #[test]
    fn test_email_matches_ignores_case() {
        let record = candidate(None).into_record(1, String::new(), String::new());
        assert!(record.email_matches("GRACE@Example.com"));
        assert!(!record.email_matches("grace@example.org"));
    }

    #[test]
    fn test_into_record_defaults() {
        let record = candidate(None).into_record(3, "now".to_string(), "10.0.0.1".to_string());
        assert_eq!(record.id, 3);
        assert_eq!(record.goal, DEFAULT_GOAL);
        assert_eq!(record.role, DEFAULT_ROLE);
        assert_eq!(record.registered_at, "now");
        assert_eq!(record.ip_address, "10.0.0.1");

        let record = candidate(Some("")).into_record(4, String::new(), String::new());
        assert_eq!(record.goal, DEFAULT_GOAL);

        let record = candidate(Some("Cardio")).into_record(5, String::new(), String::new());
        assert_eq!(record.goal, "Cardio");
    }

    #[test]
    fn test_serializes_camel_case() {
        let record = candidate(None).into_record(1, "t".to_string(), "ip".to_string());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["registeredAt"], "t");
        assert_eq!(json["ipAddress"], "ip");
        assert_eq!(json["password"], "cobol");
    }
}
