use store::{RecurringMeeting, RecurringMeetingCreate, RecurringMeetingUpdate};

use crate::client::{ApiClient, Page};
use crate::error::ApiError;
use crate::transport::{HttpRequest, Transport};

impl<T: Transport> ApiClient<T> {
    pub async fn list_recurring_meetings(
        &self,
        page: Page,
    ) -> Result<Vec<RecurringMeeting>, ApiError> {
        self.fetch(page.apply(HttpRequest::get("/recurring-meetings")))
            .await
    }

    pub async fn get_recurring_meeting(&self, id: i64) -> Result<RecurringMeeting, ApiError> {
        self.fetch(HttpRequest::get(format!("/recurring-meetings/{id}")))
            .await
    }

    /// Meetings led by one person.
    pub async fn list_recurring_meetings_by_leader(
        &self,
        leader_person_id: i64,
    ) -> Result<Vec<RecurringMeeting>, ApiError> {
        self.fetch(HttpRequest::get(format!(
            "/recurring-meetings/leader/{leader_person_id}"
        )))
        .await
    }

    pub async fn create_recurring_meeting(
        &self,
        meeting: &RecurringMeetingCreate,
    ) -> Result<RecurringMeeting, ApiError> {
        self.fetch(HttpRequest::post("/recurring-meetings").json(meeting)?)
            .await
    }

    pub async fn update_recurring_meeting(
        &self,
        id: i64,
        meeting: &RecurringMeetingUpdate,
    ) -> Result<RecurringMeeting, ApiError> {
        self.fetch(HttpRequest::put(format!("/recurring-meetings/{id}")).json(meeting)?)
            .await
    }

    /// The server answers 204 with an empty body.
    pub async fn delete_recurring_meeting(&self, id: i64) -> Result<(), ApiError> {
        self.execute(HttpRequest::delete(format!("/recurring-meetings/{id}")))
            .await?;
        Ok(())
    }
}
