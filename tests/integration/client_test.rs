use assert_matches::assert_matches;
use tokio::net::TcpListener;

use personas::api::create_routes;
use personas::client::{ClientError, UsersClient};

use crate::common::{test_app_config, MockDataGenerator, TestDatabase};

#[cfg(test)]
mod client_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Serves the API on an ephemeral port for the lifetime of the test runtime.
    async fn spawn_server() -> (TestDatabase, UsersClient) {
        let db = TestDatabase::new().await;
        let app = create_routes(db.pool.clone(), &test_app_config()).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = UsersClient::new(format!("http://{}", address)).unwrap();
        (db, client)
    }

    #[tokio::test]
    async fn test_client_crud_flow() {
        let (_db, client) = spawn_server().await;

        assert_eq!(client.list_users().await.unwrap(), vec![]);

        let created = client.create_user(&MockDataGenerator::ana()).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.gmail, "ana@x.com");

        let chefs = client.list_users_by_profession("chef").await.unwrap();
        assert_eq!(chefs, vec![created.clone()]);

        let updated = client
            .update_user(created.id, &MockDataGenerator::update("ana", "chef", None))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.certificado_n, "c1");

        assert_eq!(client.list_users().await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn test_client_maps_error_statuses() {
        let (_db, client) = spawn_server().await;

        assert_matches!(
            client.list_users_by_profession("pilot").await,
            Err(ClientError::NotFound(msg)) if msg.contains("pilot")
        );

        assert_matches!(
            client
                .update_user(7, &MockDataGenerator::update("ghost", "none", None))
                .await,
            Err(ClientError::NotFound(_))
        );

        let mut invalid = MockDataGenerator::ana();
        invalid.gmail = "pedro@".to_string();
        assert_matches!(
            client.create_user(&invalid).await,
            Err(ClientError::Unprocessable(_))
        );
    }

    #[tokio::test]
    async fn test_client_escapes_profession_segment() {
        let (_db, client) = spawn_server().await;

        let created = client
            .create_user(&MockDataGenerator::create("luis", "data/ops engineer"))
            .await
            .unwrap();

        let found = client
            .list_users_by_profession("data/ops engineer")
            .await
            .unwrap();
        assert_eq!(found, vec![created]);
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        assert_matches!(
            UsersClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        );
    }
}
