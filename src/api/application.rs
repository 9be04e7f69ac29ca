use chrono::NaiveDate;

use crate::{
    api::{bearer, ApiClient},
    auth::Session,
    models::{Application, ApplicationSubmission, AvailabilityPeriod, CompetenceProfile},
    ClientResult,
};

/// GET /application/getAllCompetenceProfiles?personId=
pub async fn get_all_competence_profiles(
    client: &ApiClient,
    session: &Session,
    person_id: i32,
) -> ClientResult<Vec<CompetenceProfile>> {
    let request = bearer(client.get("/application/getAllCompetenceProfiles"), session)
        .query(&[("personId", person_id.to_string())]);
    let response = client.send("application_profiles", request).await?;

    let profiles: Vec<CompetenceProfile> = response.json().await?;
    tracing::debug!(person_id, count = profiles.len(), "Fetched competence profiles");
    Ok(profiles)
}

/// POST /application/createCompetenceProfile?personId=&competenceId=&yearsOfExperience=
pub async fn create_competence_profile(
    client: &ApiClient,
    session: &Session,
    person_id: i32,
    competence_id: i32,
    years_of_experience: f64,
) -> ClientResult<CompetenceProfile> {
    tracing::info!(
        person_id,
        competence_id,
        years_of_experience,
        "Creating competence profile"
    );

    let request = bearer(client.post("/application/createCompetenceProfile"), session).query(&[
        ("personId", person_id.to_string()),
        ("competenceId", competence_id.to_string()),
        ("yearsOfExperience", years_of_experience.to_string()),
    ]);
    let response = client.send("application_create_profile", request).await?;

    Ok(response.json().await?)
}

/// GET /application/getAllAvailability?personId=
pub async fn get_all_availability(
    client: &ApiClient,
    session: &Session,
    person_id: i32,
) -> ClientResult<Vec<AvailabilityPeriod>> {
    let request = bearer(client.get("/application/getAllAvailability"), session)
        .query(&[("personId", person_id.to_string())]);
    let response = client.send("application_availability", request).await?;

    let periods: Vec<AvailabilityPeriod> = response.json().await?;
    tracing::debug!(person_id, count = periods.len(), "Fetched availability periods");
    Ok(periods)
}

/// POST /application/createAvailability?personId=&fromDate=&toDate=
///
/// Dates go over the wire as `yyyy-mm-dd`.
pub async fn create_availability(
    client: &ApiClient,
    session: &Session,
    person_id: i32,
    from_date: NaiveDate,
    to_date: NaiveDate,
) -> ClientResult<AvailabilityPeriod> {
    tracing::info!(person_id, %from_date, %to_date, "Creating availability period");

    let request = bearer(client.post("/application/createAvailability"), session).query(&[
        ("personId", person_id.to_string()),
        ("fromDate", from_date.to_string()),
        ("toDate", to_date.to_string()),
    ]);
    let response = client.send("application_create_availability", request).await?;

    Ok(response.json().await?)
}

/// POST /application/submitApplication
pub async fn submit_application(
    client: &ApiClient,
    session: &Session,
    submission: &ApplicationSubmission,
) -> ClientResult<Application> {
    tracing::info!(
        person_id = submission.person_id,
        profiles = submission.competence_profile_ids.len(),
        periods = submission.availability_ids.len(),
        "Submitting application"
    );

    let request = bearer(client.post("/application/submitApplication"), session).json(submission);
    let response = client.send("application_submit", request).await?;

    let application: Application = response.json().await?;
    tracing::info!(
        application_id = application.application_id,
        "Application submitted"
    );
    Ok(application)
}
