use std::sync::Arc;

use crate::{
    api::{self, ApiClient},
    auth::SessionStore,
    models::{Application, ApplicationStatus},
    ClientError, ClientResult,
};

/// The recruiter's pending verdict on one application.
///
/// Pressing accept or deny records the tentative status and toggles that
/// button's pressed flag while force-clearing the other, so at most one
/// flag is ever set. Submission is gated on exactly one being set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewDecision {
    status: Option<ApplicationStatus>,
    accepted_pressed: bool,
    denied_pressed: bool,
}

impl ReviewDecision {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press_accept(&mut self) {
        self.status = Some(ApplicationStatus::Accepted);
        self.accepted_pressed = !self.accepted_pressed;
        self.denied_pressed = false;
    }

    pub fn press_deny(&mut self) {
        self.status = Some(ApplicationStatus::Denied);
        self.denied_pressed = !self.denied_pressed;
        self.accepted_pressed = false;
    }

    pub fn accepted_pressed(&self) -> bool {
        self.accepted_pressed
    }

    pub fn denied_pressed(&self) -> bool {
        self.denied_pressed
    }

    /// Enabled exactly when one of the two buttons is pressed.
    pub fn can_submit(&self) -> bool {
        self.accepted_pressed ^ self.denied_pressed
    }

    pub fn status(&self) -> Option<ApplicationStatus> {
        self.status
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Loads one application snapshot and drives its status update, carrying
/// the snapshot's version number for optimistic concurrency.
pub struct ReviewFlow {
    client: ApiClient,
    store: Arc<SessionStore>,
    application: Option<Application>,
    decision: ReviewDecision,
}

impl ReviewFlow {
    pub fn new(client: ApiClient, store: Arc<SessionStore>) -> Self {
        Self {
            client,
            store,
            application: None,
            decision: ReviewDecision::new(),
        }
    }

    pub fn application(&self) -> Option<&Application> {
        self.application.as_ref()
    }

    pub fn decision(&self) -> &ReviewDecision {
        &self.decision
    }

    /// Fetch the application snapshot and reset any pending decision.
    /// Also the explicit recovery step after a `VersionConflict`.
    pub async fn load(&mut self, application_id: i32) -> ClientResult<&Application> {
        let session = self.store.ensure_active()?;

        let application =
            api::review::get_application_by_id(&self.client, &session, application_id).await?;
        self.decision.reset();

        Ok(self.application.insert(application))
    }

    pub fn press_accept(&mut self) {
        self.decision.press_accept();
    }

    pub fn press_deny(&mut self) {
        self.decision.press_deny();
    }

    pub fn can_submit(&self) -> bool {
        self.decision.can_submit()
    }

    /// Post the chosen status with the loaded snapshot's version number.
    /// On success the stored snapshot is replaced by the backend's updated
    /// record; a stale version surfaces as `VersionConflict` and the caller
    /// reloads and retries explicitly.
    pub async fn submit(&mut self) -> ClientResult<&Application> {
        let session = self.store.ensure_active()?;

        let (application_id, version_number) = match self.application.as_ref() {
            Some(application) => (application.application_id, application.version_number),
            None => {
                return Err(ClientError::Validation(
                    "Load an application before submitting a decision".to_string(),
                ))
            }
        };
        if !self.decision.can_submit() {
            return Err(ClientError::Validation(
                "Press accept or deny before submitting".to_string(),
            ));
        }
        let status = self.decision.status().ok_or_else(|| {
            ClientError::Validation("Press accept or deny before submitting".to_string())
        })?;

        let updated = api::review::update_application_status(
            &self.client,
            &session,
            application_id,
            status,
            version_number,
        )
        .await?;

        self.decision.reset();
        Ok(self.application.insert(updated))
    }
}
