use crate::{
    api::{bearer, ApiClient},
    auth::Session,
    models::{Application, ApplicationStatus},
    ClientResult,
};

/// GET /review/getApplicationsById/{id}
pub async fn get_application_by_id(
    client: &ApiClient,
    session: &Session,
    application_id: i32,
) -> ClientResult<Application> {
    let path = format!("/review/getApplicationsById/{application_id}");
    let request = bearer(client.get(&path), session);
    let response = client.send("review_application_by_id", request).await?;

    let application: Application = response.json().await?;
    tracing::debug!(
        application_id,
        version_number = application.version_number,
        "Fetched application for review"
    );
    Ok(application)
}

/// POST /review/updateApplicationStatus, form-encoded.
///
/// `version_number` must be the one read from the loaded snapshot; the
/// backend rejects updates against a stale version, which surfaces as
/// `VersionConflict`.
pub async fn update_application_status(
    client: &ApiClient,
    session: &Session,
    application_id: i32,
    status: ApplicationStatus,
    version_number: i64,
) -> ClientResult<Application> {
    tracing::info!(
        application_id,
        status = status.as_str(),
        version_number,
        "Updating application status"
    );

    let request = bearer(client.post("/review/updateApplicationStatus"), session).form(&[
        ("applicationId", application_id.to_string()),
        ("status", status.as_str().to_string()),
        ("versionNumber", version_number.to_string()),
    ]);
    let response = client.send("review_update_status", request).await?;

    Ok(response.json().await?)
}
