use crate::client::ZoomClient;
use crate::error::ZoomError;
use crate::executor::request::QueryParams;
use crate::executor::response::ApiResponse;
use crate::pagination::paginated::Paginated;
use crate::resources::catalog::{GROUP, GROUPS, GROUP_MEMBERS};
use crate::sources::transport::HttpTransport;

pub struct Groups<'a, T: HttpTransport> {
    client: &'a ZoomClient<T>,
}

impl<'a, T: HttpTransport> Groups<'a, T> {
    pub(crate) fn new(client: &'a ZoomClient<T>) -> Self {
        Self { client }
    }

    /// All groups of the account, in one response.
    pub async fn list_groups(&self) -> Result<ApiResponse, ZoomError> {
        self.client.call(&GROUPS, &[], QueryParams::new()).await
    }

    pub async fn get_group(&self, group_id: &str) -> Result<ApiResponse, ZoomError> {
        self.client.call(&GROUP, &[group_id], QueryParams::new()).await
    }

    pub fn list_group_members(&self, group_id: &str, params: QueryParams) -> Paginated<T> {
        self.client.list(&GROUP_MEMBERS, &[group_id], params)
    }
}
