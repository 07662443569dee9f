use dioxus::prelude::*;

mod layout;
pub use layout::Protected;

mod login;
pub use login::Login;

mod dashboard;
pub use dashboard::Dashboard;

mod persons;
pub use persons::{PersonDetail, PersonEdit, PersonNew, PersonsList};

mod recurring_meetings;
pub use recurring_meetings::{MeetingDetail, MeetingEdit, MeetingNew, MeetingsList};

mod reports;
pub use reports::{ReportDetail, ReportEdit, ReportNew, ReportsList};

/// One label/value line of a detail card.
#[component]
fn DetailRow(label: &'static str, value: String) -> Element {
    rsx! {
        div {
            class: "details__row",
            dt { {label} }
            dd { "{value}" }
        }
    }
}
