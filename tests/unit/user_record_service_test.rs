use personas::models::UserRecord;
use personas::services::UserRecordService;

use crate::common::{MockDataGenerator, TestDatabase};

#[cfg(test)]
mod user_record_service_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn setup() -> (TestDatabase, UserRecordService) {
        let db = TestDatabase::new().await;
        let service = UserRecordService::new(db.pool.clone());
        (db, service)
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_echoes_fields() {
        let (_db, service) = setup().await;

        let input = MockDataGenerator::ana();
        let record = service.create_record(input.clone()).await.unwrap();

        assert_eq!(record, UserRecord::from_create(1, input));
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_ids() {
        let (_db, service) = setup().await;

        let mut ids = Vec::new();
        for name in ["ana", "luis", "marta"] {
            let record = service
                .create_record(MockDataGenerator::create(name, "chef"))
                .await
                .unwrap();
            assert!(record.id > 0);
            assert!(!ids.contains(&record.id), "id {} reused", record.id);
            ids.push(record.id);
        }
    }

    #[tokio::test]
    async fn test_round_trip_through_get() {
        let (_db, service) = setup().await;

        let input = MockDataGenerator::create("luis", "pilot");
        let created = service.create_record(input.clone()).await.unwrap();

        let fetched = service.get_record(created.id).await.unwrap();
        assert_eq!(fetched, Some(UserRecord::from_create(created.id, input)));
        assert_eq!(service.get_record(created.id + 100).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_empty_table() {
        let (_db, service) = setup().await;

        assert!(service.list_records().await.unwrap().is_empty());
        assert!(service
            .list_records_by_profession("chef")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_list_contains_each_record_once() {
        let (_db, service) = setup().await;

        let a = service.create_record(MockDataGenerator::create("ana", "chef")).await.unwrap();
        let b = service.create_record(MockDataGenerator::create("luis", "pilot")).await.unwrap();

        let all = service.list_records().await.unwrap();
        assert_eq!(all.len(), 2);
        for created in [&a, &b] {
            assert_eq!(all.iter().filter(|r| *r == created).count(), 1);
        }
    }

    #[tokio::test]
    async fn test_profession_lookup_is_exact() {
        let (_db, service) = setup().await;

        let chef = service.create_record(MockDataGenerator::create("ana", "chef")).await.unwrap();
        service.create_record(MockDataGenerator::create("luis", "Chef")).await.unwrap();
        service.create_record(MockDataGenerator::create("marta", "chef ")).await.unwrap();

        let found = service.list_records_by_profession("chef").await.unwrap();
        assert_eq!(found, vec![chef]);

        assert!(service
            .list_records_by_profession("CHEF")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_overwrites_only_target_row() {
        let (_db, service) = setup().await;

        let target = service.create_record(MockDataGenerator::create("ana", "chef")).await.unwrap();
        let other = service.create_record(MockDataGenerator::create("luis", "chef")).await.unwrap();

        let updated = service
            .update_record(target.id, MockDataGenerator::update("ana2", "pilot", Some("c9")))
            .await
            .unwrap()
            .expect("row exists");

        assert_eq!(updated.id, target.id);
        assert_eq!(updated.username, "ana2");
        assert_eq!(updated.profesion, "pilot");
        assert_eq!(updated.certificado_n, "c9");

        assert_eq!(service.get_record(target.id).await.unwrap(), Some(updated));
        assert_eq!(service.get_record(other.id).await.unwrap(), Some(other));
    }

    #[tokio::test]
    async fn test_update_without_certificate_keeps_it() {
        let (_db, service) = setup().await;

        let created = service.create_record(MockDataGenerator::ana()).await.unwrap();
        let updated = service
            .update_record(created.id, MockDataGenerator::update("ana", "chef", None))
            .await
            .unwrap()
            .expect("row exists");

        assert_eq!(updated.certificado_n, "c1");
        assert_eq!(updated.numero, "777");
    }

    #[tokio::test]
    async fn test_update_missing_id_leaves_store_unchanged() {
        let (db, service) = setup().await;

        let created = service.create_record(MockDataGenerator::ana()).await.unwrap();
        let result = service
            .update_record(created.id + 1, MockDataGenerator::update("ghost", "none", Some("x")))
            .await
            .unwrap();

        assert_eq!(result, None);
        assert_eq!(db.count().await, 1);
        assert_eq!(service.list_records().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_ping() {
        let (_db, service) = setup().await;
        assert!(service.ping().await.is_ok());
    }
}
