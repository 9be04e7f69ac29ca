use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competence {
    pub competence_id: i32,
    pub name: String,
}

/// A person's declared skill plus years of experience.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetenceProfile {
    pub competence_profile_id: i32,
    #[serde(rename = "competenceDTO")]
    pub competence: Competence,
    pub years_of_experience: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_the_backend_wire_names() {
        let json = r#"{
            "competenceProfileId": 6488,
            "competenceDTO": { "competenceId": 2, "name": "lotteries" },
            "yearsOfExperience": 3.5
        }"#;

        let profile: CompetenceProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.competence_profile_id, 6488);
        assert_eq!(profile.competence.competence_id, 2);
        assert!((profile.years_of_experience - 3.5).abs() < f64::EPSILON);
    }
}
