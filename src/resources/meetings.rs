use serde_json::Value;

use crate::client::ZoomClient;
use crate::error::ZoomError;
use crate::executor::request::QueryParams;
use crate::executor::response::ApiResponse;
use crate::pagination::paginated::Paginated;
use crate::resources::catalog::{
    CREATE_MEETING, DELETE_MEETING, MEETING, MEETING_INVITATION, PAST_MEETING_PARTICIPANTS,
    USER_MEETINGS,
};
use crate::sources::transport::HttpTransport;

/// Meetings of a host user, and past meeting participants.
pub struct Meetings<'a, T: HttpTransport> {
    client: &'a ZoomClient<T>,
}

impl<'a, T: HttpTransport> Meetings<'a, T> {
    pub(crate) fn new(client: &'a ZoomClient<T>) -> Self {
        Self { client }
    }

    /// Scheduled meetings of `user_id` (an id, an email or `me`).
    pub fn list_meetings(&self, user_id: &str, params: QueryParams) -> Paginated<T> {
        self.client.list(&USER_MEETINGS, &[user_id], params)
    }

    pub async fn get_meeting(
        &self,
        meeting_id: &str,
        params: QueryParams,
    ) -> Result<ApiResponse, ZoomError> {
        self.client.call(&MEETING, &[meeting_id], params).await
    }

    pub fn get_past_meeting_participants(
        &self,
        meeting_id: &str,
        params: QueryParams,
    ) -> Paginated<T> {
        self.client
            .list(&PAST_MEETING_PARTICIPANTS, &[meeting_id], params)
    }

    pub async fn get_meeting_invitation(&self, meeting_id: &str) -> Result<ApiResponse, ZoomError> {
        self.client
            .call(&MEETING_INVITATION, &[meeting_id], QueryParams::new())
            .await
    }

    /// Schedule a meeting for `user_id`; `meeting` is sent as the JSON body.
    pub async fn create_meeting(
        &self,
        user_id: &str,
        meeting: Value,
    ) -> Result<ApiResponse, ZoomError> {
        let descriptor = CREATE_MEETING
            .descriptor(&[user_id], QueryParams::new())
            .with_body(meeting);
        self.client.request(descriptor).await
    }

    /// Delete a meeting (`occurrence_id`, `schedule_for_reminder`, ...).
    /// The API answers 204 with an empty body.
    pub async fn delete_meeting(
        &self,
        meeting_id: &str,
        params: QueryParams,
    ) -> Result<ApiResponse, ZoomError> {
        self.client.call(&DELETE_MEETING, &[meeting_id], params).await
    }
}
