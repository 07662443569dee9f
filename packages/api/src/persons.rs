use store::{Person, PersonCreate, PersonUpdate};

use crate::client::{ApiClient, Page};
use crate::error::ApiError;
use crate::transport::{HttpRequest, Transport};

impl<T: Transport> ApiClient<T> {
    pub async fn list_persons(&self, page: Page) -> Result<Vec<Person>, ApiError> {
        self.fetch(page.apply(HttpRequest::get("/persons"))).await
    }

    pub async fn get_person(&self, id: i64) -> Result<Person, ApiError> {
        self.fetch(HttpRequest::get(format!("/persons/{id}"))).await
    }

    pub async fn create_person(&self, person: &PersonCreate) -> Result<Person, ApiError> {
        self.fetch(HttpRequest::post("/persons").json(person)?).await
    }

    pub async fn update_person(&self, id: i64, person: &PersonUpdate) -> Result<Person, ApiError> {
        self.fetch(HttpRequest::put(format!("/persons/{id}")).json(person)?)
            .await
    }

    pub async fn delete_person(&self, id: i64) -> Result<(), ApiError> {
        self.execute(HttpRequest::delete(format!("/persons/{id}"))).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::testing::Harness;
    use chrono::NaiveDate;

    pub(crate) fn ana() -> PersonCreate {
        PersonCreate {
            first_name: "Ana".to_string(),
            last_name: "Rojas".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 3, 14).unwrap(),
            phone: "+591 700 00000".to_string(),
            home_address: "Calle 1".to_string(),
            google_maps_link: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let harness = Harness::logged_in().await;

        let created = harness.client.create_person(&ana()).await.unwrap();
        let fetched = harness.client.get_person(created.id).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(PersonCreate::from(&fetched), ana());
    }

    #[tokio::test]
    async fn test_update_changes_only_sent_fields() {
        let harness = Harness::logged_in().await;
        let created = harness.client.create_person(&ana()).await.unwrap();

        let patch = PersonUpdate {
            phone: Some("+591 711 11111".to_string()),
            ..Default::default()
        };
        let updated = harness.client.update_person(created.id, &patch).await.unwrap();

        assert_eq!(updated.phone, "+591 711 11111");
        assert_eq!(updated.first_name, "Ana");
    }

    #[tokio::test]
    async fn test_delete_removes_from_list() {
        let harness = Harness::logged_in().await;
        let first = harness.client.create_person(&ana()).await.unwrap();
        let second = harness.client.create_person(&ana()).await.unwrap();

        harness.client.delete_person(first.id).await.unwrap();

        let ids: Vec<i64> = harness
            .client
            .list_persons(Page::default())
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![second.id]);
        assert!(harness.client.get_person(first.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_sends_pagination() {
        let harness = Harness::logged_in().await;
        for _ in 0..3 {
            harness.client.create_person(&ana()).await.unwrap();
        }

        let page = harness.client.list_persons(Page::new(1, 1)).await.unwrap();
        assert_eq!(page.len(), 1);

        let request = harness.backend.requests().pop().unwrap();
        assert_eq!(
            request.query,
            vec![("skip".to_string(), "1".to_string()), ("limit".to_string(), "1".to_string())]
        );
    }
}
