//! Endpoint catalog
//!
//! Every operation exposed by the resource facades, as data: verb, path
//! template and, for list endpoints, where items and cursor live in a page.

use http::Method;

use crate::executor::request::{QueryParams, RequestDescriptor};
use crate::pagination::paginated::PaginationConfig;
use crate::utils::constants::DEFAULT_CURSOR_FIELD;

#[derive(Debug)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: Method,
    /// `{placeholder}` segments are filled in order from the caller's ids
    pub path: &'static str,
}

#[derive(Debug)]
pub struct ListEndpoint {
    pub endpoint: Endpoint,
    pub items_field: &'static str,
    pub cursor_field: &'static str,
}

impl Endpoint {
    pub fn placeholders(&self) -> usize {
        self.path.matches('{').count()
    }

    /// Ids are inserted verbatim, without percent-encoding.
    pub fn render_path(&self, ids: &[&str]) -> String {
        debug_assert_eq!(self.placeholders(), ids.len(), "ids for {}", self.name);

        let mut rendered = String::with_capacity(self.path.len());
        let mut ids = ids.iter();
        let mut rest = self.path;
        while let Some(open) = rest.find('{') {
            rendered.push_str(&rest[..open]);
            let close = match rest[open..].find('}') {
                Some(close) => open + close,
                None => break,
            };
            rendered.push_str(ids.next().copied().unwrap_or_default());
            rest = &rest[close + 1..];
        }
        rendered.push_str(rest);
        rendered
    }

    pub fn descriptor(&self, ids: &[&str], params: QueryParams) -> RequestDescriptor {
        RequestDescriptor::new(self.method.clone(), self.render_path(ids)).with_params(params)
    }
}

impl ListEndpoint {
    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig::new(self.items_field).with_cursor_field(self.cursor_field)
    }
}

const fn get(name: &'static str, path: &'static str) -> Endpoint {
    Endpoint {
        name,
        method: Method::GET,
        path,
    }
}

const fn list(name: &'static str, path: &'static str, items_field: &'static str) -> ListEndpoint {
    ListEndpoint {
        endpoint: get(name, path),
        items_field,
        cursor_field: DEFAULT_CURSOR_FIELD,
    }
}

// dashboards
pub static DASHBOARD_MEETINGS: ListEndpoint =
    list("dashboards.list_meetings", "/metrics/meetings", "meetings");
pub static DASHBOARD_MEETING_PARTICIPANTS: ListEndpoint = list(
    "dashboards.list_meeting_participants",
    "/metrics/meetings/{meetingId}/participants",
    "participants",
);
pub static DASHBOARD_MEETING_DETAILS: Endpoint =
    get("dashboards.get_meeting_details", "/metrics/meetings/{meetingId}");

// groups
pub static GROUPS: Endpoint = get("groups.list_groups", "/groups");
pub static GROUP: Endpoint = get("groups.get_group", "/groups/{groupId}");
pub static GROUP_MEMBERS: ListEndpoint =
    list("groups.list_group_members", "/groups/{groupId}/members", "members");

// meetings
pub static USER_MEETINGS: ListEndpoint =
    list("meetings.list_meetings", "/users/{userId}/meetings", "meetings");
pub static MEETING: Endpoint = get("meetings.get_meeting", "/meetings/{meetingId}");
pub static PAST_MEETING_PARTICIPANTS: ListEndpoint = list(
    "meetings.get_past_meeting_participants",
    "/past_meetings/{meetingId}/participants",
    "participants",
);
pub static MEETING_INVITATION: Endpoint = get(
    "meetings.get_meeting_invitation",
    "/meetings/{meetingId}/invitation",
);
pub static CREATE_MEETING: Endpoint = Endpoint {
    name: "meetings.create_meeting",
    method: Method::POST,
    path: "/users/{userId}/meetings",
};
pub static DELETE_MEETING: Endpoint = Endpoint {
    name: "meetings.delete_meeting",
    method: Method::DELETE,
    path: "/meetings/{meetingId}",
};

// reports
pub static REPORT_MEETING_PARTICIPANTS: ListEndpoint = list(
    "reports.get_meeting_participant_reports",
    "/report/meetings/{meetingId}/participants",
    "participants",
);

pub static SINGLE_ENDPOINTS: [&Endpoint; 7] = [
    &DASHBOARD_MEETING_DETAILS,
    &GROUPS,
    &GROUP,
    &MEETING,
    &MEETING_INVITATION,
    &CREATE_MEETING,
    &DELETE_MEETING,
];

pub static LIST_ENDPOINTS: [&ListEndpoint; 6] = [
    &DASHBOARD_MEETINGS,
    &DASHBOARD_MEETING_PARTICIPANTS,
    &GROUP_MEMBERS,
    &USER_MEETINGS,
    &PAST_MEETING_PARTICIPANTS,
    &REPORT_MEETING_PARTICIPANTS,
];
