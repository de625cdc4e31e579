use crate::client::ZoomClient;
use crate::executor::request::QueryParams;
use crate::pagination::paginated::Paginated;
use crate::resources::catalog::REPORT_MEETING_PARTICIPANTS;
use crate::sources::transport::HttpTransport;

pub struct Reports<'a, T: HttpTransport> {
    client: &'a ZoomClient<T>,
}

impl<'a, T: HttpTransport> Reports<'a, T> {
    pub(crate) fn new(client: &'a ZoomClient<T>) -> Self {
        Self { client }
    }

    /// Participant report of a past meeting with two or more participants.
    pub fn get_meeting_participant_reports(
        &self,
        meeting_id: &str,
        params: QueryParams,
    ) -> Paginated<T> {
        self.client
            .list(&REPORT_MEETING_PARTICIPANTS, &[meeting_id], params)
    }
}
