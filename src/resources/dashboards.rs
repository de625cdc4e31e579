use crate::client::ZoomClient;
use crate::error::ZoomError;
use crate::executor::request::QueryParams;
use crate::executor::response::ApiResponse;
use crate::pagination::paginated::Paginated;
use crate::resources::catalog::{
    DASHBOARD_MEETINGS, DASHBOARD_MEETING_DETAILS, DASHBOARD_MEETING_PARTICIPANTS,
};
use crate::sources::transport::HttpTransport;

/// Dashboard metrics: live and past meetings with their participants.
pub struct Dashboards<'a, T: HttpTransport> {
    client: &'a ZoomClient<T>,
}

impl<'a, T: HttpTransport> Dashboards<'a, T> {
    pub(crate) fn new(client: &'a ZoomClient<T>) -> Self {
        Self { client }
    }

    /// Meetings that occurred in a period (`type`, `from`, `to`, `page_size`, ...).
    pub fn list_meetings(&self, params: QueryParams) -> Paginated<T> {
        self.client.list(&DASHBOARD_MEETINGS, &[], params)
    }

    pub fn list_meeting_participants(&self, meeting_id: &str, params: QueryParams) -> Paginated<T> {
        self.client
            .list(&DASHBOARD_MEETING_PARTICIPANTS, &[meeting_id], params)
    }

    pub async fn get_meeting_details(
        &self,
        meeting_id: &str,
        params: QueryParams,
    ) -> Result<ApiResponse, ZoomError> {
        self.client
            .call(&DASHBOARD_MEETING_DETAILS, &[meeting_id], params)
            .await
    }
}
