use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::availability::AvailabilityPeriod;
use super::competence::CompetenceProfile;
use super::person::Person;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Unchecked,
    Accepted,
    Denied,
}

impl ApplicationStatus {
    /// The wire value the backend accepts in form-encoded status updates.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Unchecked => "unchecked",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Denied => "denied",
        }
    }
}

/// A submitted application as the review side sees it: the applicant
/// snapshot, the chosen profiles and periods, and the version number echoed
/// back on every status update for optimistic concurrency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: i32,
    pub applicant: Person,
    pub application_status: ApplicationStatus,
    pub application_date: Option<NaiveDate>,
    pub version_number: i64,
    #[serde(rename = "competenceProfilesForApplication")]
    pub competence_profiles: Vec<CompetenceProfile>,
    #[serde(rename = "availabilityPeriodsForApplication")]
    pub availability_periods: Vec<AvailabilityPeriod>,
}

/// The submission payload: the selection sets in the order the applicant
/// picked them, never the full candidate lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    pub person_id: i32,
    pub availability_ids: Vec<i32>,
    pub competence_profile_ids: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_lowercase_wire_values() {
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Accepted).unwrap(),
            "\"accepted\""
        );
        let status: ApplicationStatus = serde_json::from_str("\"unchecked\"").unwrap();
        assert_eq!(status, ApplicationStatus::Unchecked);
        assert_eq!(ApplicationStatus::Denied.as_str(), "denied");
    }

    #[test]
    fn submission_serializes_camel_case_id_lists() {
        let submission = ApplicationSubmission {
            person_id: 4,
            availability_ids: vec![20872],
            competence_profile_ids: vec![6488],
        };

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["personId"], 4);
        assert_eq!(json["availabilityIds"][0], 20872);
        assert_eq!(json["competenceProfileIds"][0], 6488);
    }

    #[test]
    fn deserializes_a_review_snapshot() {
        let json = r#"{
            "applicationId": 31,
            "applicant": {
                "id": 11, "name": "Jane", "surname": "Doe",
                "pnr": "19900101-1234", "email": "jane@example.com",
                "username": "jdoe", "role": { "name": "applicant" }
            },
            "applicationStatus": "unchecked",
            "applicationDate": "2026-02-14",
            "versionNumber": 2,
            "competenceProfilesForApplication": [],
            "availabilityPeriodsForApplication": []
        }"#;

        let application: Application = serde_json::from_str(json).unwrap();
        assert_eq!(application.application_id, 31);
        assert_eq!(application.application_status, ApplicationStatus::Unchecked);
        assert_eq!(application.version_number, 2);
    }
}
