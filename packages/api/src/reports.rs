use store::{Report, ReportCreate, ReportUpdate};

use crate::client::{ApiClient, Page};
use crate::error::ApiError;
use crate::transport::{HttpRequest, Transport};

impl<T: Transport> ApiClient<T> {
    pub async fn list_reports(&self, page: Page) -> Result<Vec<Report>, ApiError> {
        self.fetch(page.apply(HttpRequest::get("/reports"))).await
    }

    /// Includes participants and attachments.
    pub async fn get_report(&self, id: i64) -> Result<Report, ApiError> {
        self.fetch(HttpRequest::get(format!("/reports/{id}"))).await
    }

    pub async fn create_report(&self, report: &ReportCreate) -> Result<Report, ApiError> {
        self.fetch(HttpRequest::post("/reports").json(report)?).await
    }

    pub async fn update_report(&self, id: i64, report: &ReportUpdate) -> Result<Report, ApiError> {
        self.fetch(HttpRequest::put(format!("/reports/{id}")).json(report)?)
            .await
    }

    pub async fn delete_report(&self, id: i64) -> Result<(), ApiError> {
        self.execute(HttpRequest::delete(format!("/reports/{id}"))).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::testing::Harness;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use store::models::datetime;
    use store::{Currency, ParticipantCreate, ParticipantType};

    pub(crate) fn monday_report() -> ReportCreate {
        ReportCreate {
            registration_date: datetime::parse("2024-05-07T09:00:00").unwrap(),
            meeting_datetime: datetime::parse("2024-05-06T19:30:00").unwrap(),
            recurring_meeting_id: 1,
            leader_person_id: 1,
            leader_phone: "+591 700 00000".to_string(),
            collaborator: Some("Luis".to_string()),
            location: "Casa de Ana".to_string(),
            collection_amount: Decimal::from_str("45.50").unwrap(),
            currency: Currency::Usd,
            attendees_count: 12,
            google_maps_link: None,
            participants: vec![
                ParticipantCreate {
                    participant_name: "Marta".to_string(),
                    participant_type: ParticipantType::Member,
                },
                ParticipantCreate {
                    participant_name: "Jorge".to_string(),
                    participant_type: ParticipantType::Visitor,
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_report_scenario_is_preserved() {
        let harness = Harness::logged_in().await;

        let created = harness.client.create_report(&monday_report()).await.unwrap();
        let report = harness.client.get_report(created.id).await.unwrap();

        assert_eq!(report.attendees_count, 12);
        assert_eq!(report.collection_amount.to_string(), "45.50");
        assert_eq!(report.currency, Currency::Usd);
        assert_eq!(report.participants.len(), 2);
        assert_eq!(report.count_participants(ParticipantType::Member), 1);
        assert_eq!(report.count_participants(ParticipantType::Visitor), 1);
        assert_eq!(ReportCreate::from(&report), monday_report());
    }

    #[tokio::test]
    async fn test_update_replaces_participants() {
        let harness = Harness::logged_in().await;
        let report = harness.client.create_report(&monday_report()).await.unwrap();

        let patch = ReportUpdate {
            attendees_count: Some(15),
            participants: Some(vec![ParticipantCreate {
                participant_name: "Rosa".to_string(),
                participant_type: ParticipantType::Participant,
            }]),
            ..Default::default()
        };
        let updated = harness.client.update_report(report.id, &patch).await.unwrap();

        assert_eq!(updated.attendees_count, 15);
        assert_eq!(updated.participants.len(), 1);
        assert_eq!(updated.participants[0].participant_name, "Rosa");
        assert_eq!(updated.collection_amount.to_string(), "45.50");
    }

    #[tokio::test]
    async fn test_delete_removes_from_list() {
        let harness = Harness::logged_in().await;
        let report = harness.client.create_report(&monday_report()).await.unwrap();

        harness.client.delete_report(report.id).await.unwrap();

        assert!(harness.client.list_reports(Page::default()).await.unwrap().is_empty());
        assert!(harness.client.delete_report(report.id).await.unwrap_err().is_not_found());
    }
}
