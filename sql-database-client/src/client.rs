//! Database connection admin client.

use common::config::ClientConfig;
use common::errors::AppResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::http::HttpTransport;
use crate::request::ApiRequest;
use crate::routes;
use crate::transport::AdminTransport;

/// One method per administrative action on registered database connections.
///
/// Each call issues exactly one request through the injected transport and
/// hands back whatever the transport returned. The client keeps no state of
/// its own.
///
/// Results decode into any `DeserializeOwned` type; ask for
/// `serde_json::Value` to get the response untouched, or for one of the
/// views in [`common::models`].
///
/// ```rust,no_run
/// use common::models::DatabaseList;
/// use sql_database_client::DatabaseConnectionClient;
///
/// # async fn example() -> common::AppResult<()> {
/// let client = DatabaseConnectionClient::from_config(common::ClientConfig::load()?)?;
/// let list: DatabaseList = client.list_databases().await?;
/// for db in list.databases {
///     println!("{} {}", db.db_id, db.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DatabaseConnectionClient<T> {
    transport: T,
}

impl DatabaseConnectionClient<HttpTransport> {
    /// Creates a client that talks HTTP to the configured server.
    pub fn from_config(config: ClientConfig) -> AppResult<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: AdminTransport> DatabaseConnectionClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET /databases`
    pub async fn list_databases<R: DeserializeOwned>(&self) -> AppResult<R> {
        self.dispatch(ApiRequest::get(routes::databases())).await
    }

    /// `POST /database`
    pub async fn create_database<P, R>(&self, payload: &P) -> AppResult<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode(payload)?;
        self.dispatch(ApiRequest::post(routes::database_collection(), Some(body)))
            .await
    }

    /// `GET /database/{db_id}`
    pub async fn get_database_info<R: DeserializeOwned>(&self, db_id: &str) -> AppResult<R> {
        self.dispatch(ApiRequest::get(routes::database(db_id))).await
    }

    /// `PUT /database/{db_id}`
    pub async fn update_database<P, R>(&self, db_id: &str, payload: &P) -> AppResult<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode(payload)?;
        self.dispatch(ApiRequest::put(routes::database(db_id), Some(body)))
            .await
    }

    /// `DELETE /database/{db_id}`
    pub async fn delete_database<R: DeserializeOwned>(&self, db_id: &str) -> AppResult<R> {
        self.dispatch(ApiRequest::delete(routes::database(db_id))).await
    }

    /// `POST /database/{db_id}/tables/choose`
    pub async fn choose_database_tables<S, R>(&self, db_id: &str, selection: &S) -> AppResult<R>
    where
        S: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode(selection)?;
        self.dispatch(ApiRequest::post(routes::choose_tables(db_id), Some(body)))
            .await
    }

    /// `PUT /database/{db_id}/tables`
    pub async fn update_tables<S, R>(&self, db_id: &str, selection: &S) -> AppResult<R>
    where
        S: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode(selection)?;
        self.dispatch(ApiRequest::put(routes::tables(db_id), Some(body)))
            .await
    }

    /// `GET /database/{db_id}/tables/selected`
    pub async fn get_selected_tables<R: DeserializeOwned>(&self, db_id: &str) -> AppResult<R> {
        self.dispatch(ApiRequest::get(routes::selected_tables(db_id)))
            .await
    }

    /// `DELETE /database/{db_id}/tables/{table_id}`
    pub async fn unchoose_table<R: DeserializeOwned>(
        &self,
        db_id: &str,
        table_id: &str,
    ) -> AppResult<R> {
        self.dispatch(ApiRequest::delete(routes::table(db_id, table_id)))
            .await
    }

    /// `POST /databases/neo4j`
    ///
    /// Builds the knowledge graph from the registered connections.
    pub async fn create_graph_from_databases<R: DeserializeOwned>(&self) -> AppResult<R> {
        self.dispatch(ApiRequest::post(routes::graph(), None)).await
    }

    async fn dispatch<R: DeserializeOwned>(&self, request: ApiRequest) -> AppResult<R> {
        let value = self.transport.send(request).await?;
        Ok(serde_json::from_value(value)?)
    }
}

fn encode<P: Serialize + ?Sized>(payload: &P) -> AppResult<Value> {
    Ok(serde_json::to_value(payload)?)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use common::errors::AppError;
    use common::models::{ChooseTablesRequest, CreateDatabaseRequest, DatabaseList};
    use serde::ser::Error as _;
    use serde_json::json;

    use super::*;
    use crate::request::Method;

    /// Records every call and answers with a canned result.
    struct RecordingTransport {
        calls: Mutex<Vec<ApiRequest>>,
        reply: AppResult<Value>,
    }

    impl RecordingTransport {
        fn replying(reply: AppResult<Value>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply,
            })
        }

        fn calls(&self) -> Vec<ApiRequest> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, method: Method, path: &str, body: Option<Value>) -> AppResult<Value> {
            self.calls.lock().unwrap().push(ApiRequest {
                method,
                path: path.to_string(),
                body,
            });
            self.reply.clone()
        }
    }

    #[async_trait]
    impl AdminTransport for RecordingTransport {
        async fn get(&self, path: &str) -> AppResult<Value> {
            self.record(Method::Get, path, None)
        }

        async fn post(&self, path: &str, body: Option<Value>) -> AppResult<Value> {
            self.record(Method::Post, path, body)
        }

        async fn put(&self, path: &str, body: Option<Value>) -> AppResult<Value> {
            self.record(Method::Put, path, body)
        }

        async fn delete(&self, path: &str) -> AppResult<Value> {
            self.record(Method::Delete, path, None)
        }
    }

    type TestClient = DatabaseConnectionClient<Arc<RecordingTransport>>;

    fn recording_client(reply: AppResult<Value>) -> (TestClient, Arc<RecordingTransport>) {
        let transport = RecordingTransport::replying(reply);
        (DatabaseConnectionClient::new(transport.clone()), transport)
    }

    fn single_call(transport: &RecordingTransport) -> ApiRequest {
        let calls = transport.calls();
        assert_eq!(calls.len(), 1, "expected exactly one request, got {calls:?}");
        calls.into_iter().next().unwrap()
    }

    #[tokio::test]
    async fn test_list_databases() {
        let (client, transport) = recording_client(Ok(json!({"databases": []})));
        let list: DatabaseList = client.list_databases().await.unwrap();
        assert!(list.databases.is_empty());
        assert_eq!(single_call(&transport), ApiRequest::get("/databases"));
    }

    #[tokio::test]
    async fn test_get_database_info_issues_single_get_without_body() {
        for id in ["db_1", "db_private_abc", "with space", ""] {
            let (client, transport) = recording_client(Ok(json!({"db_id": id})));
            let info: Value = client.get_database_info(id).await.unwrap();
            assert_eq!(info, json!({"db_id": id}));

            let call = single_call(&transport);
            assert_eq!(call.method, Method::Get);
            assert_eq!(call.path, format!("/database/{id}"));
            assert_eq!(call.body, None);
        }
    }

    #[tokio::test]
    async fn test_create_database_passes_payload_unmodified() {
        let payload = json!({
            "database_name": "sales",
            "description": "replica",
            "connect_info": {"host": "h", "port": "3306"},
            "unknown_field": [1, 2, 3]
        });
        let (client, transport) = recording_client(Ok(json!({"db_id": "db_x"})));
        let _: Value = client.create_database(&payload).await.unwrap();

        assert_eq!(single_call(&transport), ApiRequest::post("/database", Some(payload)));
    }

    #[tokio::test]
    async fn test_create_database_with_typed_request() {
        let (client, transport) = recording_client(Ok(json!({})));
        let req = CreateDatabaseRequest::new("sales", "");
        let _: Value = client.create_database(&req).await.unwrap();

        let call = single_call(&transport);
        assert_eq!(call.body, Some(serde_json::to_value(&req).unwrap()));
    }

    #[tokio::test]
    async fn test_update_database() {
        let (client, transport) = recording_client(Ok(json!({"message": "更新成功"})));
        let patch = json!({"name": "renamed", "description": ""});
        let _: Value = client.update_database("db_1", &patch).await.unwrap();

        assert_eq!(single_call(&transport), ApiRequest::put("/database/db_1", Some(patch)));
    }

    #[tokio::test]
    async fn test_delete_database() {
        let (client, transport) = recording_client(Ok(json!({"message": "删除成功"})));
        let ack: Value = client.delete_database("db_1").await.unwrap();
        assert_eq!(ack["message"], "删除成功");
        assert_eq!(single_call(&transport), ApiRequest::delete("/database/db_1"));
    }

    #[tokio::test]
    async fn test_choose_and_update_tables_use_different_verbs() {
        let selection: ChooseTablesRequest = ["t1", "t2"].into_iter().collect();

        let (client, transport) = recording_client(Ok(json!({})));
        let _: Value = client.choose_database_tables("db_1", &selection).await.unwrap();
        let choose = single_call(&transport);
        assert_eq!(choose.method, Method::Post);
        assert_eq!(choose.path, "/database/db_1/tables/choose");
        assert_eq!(choose.body, Some(json!(["t1", "t2"])));

        let table_info = json!({"t1": {"description": "orders"}});
        let (client, transport) = recording_client(Ok(json!({})));
        let _: Value = client.update_tables("db_1", &table_info).await.unwrap();
        let update = single_call(&transport);
        assert_eq!(update.method, Method::Put);
        assert_eq!(update.path, "/database/db_1/tables");
        assert_eq!(update.body, Some(table_info));

        assert_ne!(choose.method, update.method);
    }

    #[tokio::test]
    async fn test_selected_tables_and_unchoose() {
        let (client, transport) = recording_client(Ok(json!([])));
        let _: Value = client.get_selected_tables("db_1").await.unwrap();
        assert_eq!(single_call(&transport), ApiRequest::get("/database/db_1/tables/selected"));

        let (client, transport) = recording_client(Ok(json!({})));
        let _: Value = client.unchoose_table("db_1", "t_7").await.unwrap();
        assert_eq!(single_call(&transport), ApiRequest::delete("/database/db_1/tables/t_7"));
    }

    #[tokio::test]
    async fn test_create_graph_posts_to_fixed_engine() {
        let (client, transport) = recording_client(Ok(json!({"status": "ok"})));
        let _: Value = client.create_graph_from_databases().await.unwrap();
        let _: Value = client.create_graph_from_databases().await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        for call in calls {
            assert_eq!(call, ApiRequest::post("/databases/neo4j", None));
        }
    }

    #[tokio::test]
    async fn test_transport_errors_are_forwarded_unchanged() {
        let failure = AppError::NetworkFailure("connection refused".to_string());
        let (client, _) = recording_client(Err(failure.clone()));
        let err = client.list_databases::<Value>().await.unwrap_err();
        assert_eq!(err, failure);

        let failure = AppError::ServerError {
            status: 404,
            message: "Database not found".to_string(),
        };
        let (client, _) = recording_client(Err(failure.clone()));
        let err = client.get_database_info::<Value>("missing").await.unwrap_err();
        assert_eq!(err, failure);
    }

    #[tokio::test]
    async fn test_unserializable_payload_is_not_sent() {
        struct Broken;
        impl Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(S::Error::custom("cannot encode"))
            }
        }

        let (client, transport) = recording_client(Ok(json!({})));
        let err = client.create_database::<_, Value>(&Broken).await.unwrap_err();
        assert!(matches!(err, AppError::SerializationFailure(_)));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_response_that_does_not_fit_requested_type() {
        let (client, _) = recording_client(Ok(json!("not a map")));
        let err = client
            .list_databases::<BTreeMap<String, Value>>()
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SerializationFailure(_)));
    }

    #[tokio::test]
    async fn test_boxed_dyn_transport() {
        let transport = RecordingTransport::replying(Ok(Value::Null));
        let boxed: Box<dyn AdminTransport> = Box::new(transport.clone());
        let client = DatabaseConnectionClient::new(boxed);
        let _: Value = client.delete_database("db_9").await.unwrap();
        assert_eq!(single_call(&transport), ApiRequest::delete("/database/db_9"));
    }
}
