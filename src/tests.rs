#[cfg(test)]
mod integration_tests {
    use crate::router::create_router;
    use crate::schemas::{ApiResponse, AppState, ErrorResponse, HealthResponse};
    use crate::test_utils::test_utils::{init_test_tracing, setup_test_app, setup_test_app_with_db};
    use async_trait::async_trait;
    use axum::body::Bytes;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use common::{
        CheckState, CollaboratorError, ExistenceCheck, Field, LookupOutcome, RecordInsert,
        RecordLookup, RecordPayload, RecordResponse, Residence, SubmissionWorkflow, SubmitOutcome,
        VerifyRequest,
    };
    use model::entities::record;
    use sea_orm::DatabaseConnection;
    use serde_json::json;
    use std::time::Duration;

    /// Record lookup that talks to the in-process server.
    struct ServerLookup<'a> {
        server: &'a TestServer,
    }

    #[async_trait(?Send)]
    impl RecordLookup for ServerLookup<'_> {
        async fn lookup(&self, student_code: &str) -> Result<LookupOutcome, CollaboratorError> {
            let response = self
                .server
                .post("/api/verify")
                .json(&VerifyRequest {
                    student_code: student_code.to_string(),
                })
                .await;

            match response.status_code() {
                StatusCode::OK => Ok(LookupOutcome::Found),
                StatusCode::NOT_FOUND => Ok(LookupOutcome::NotFound),
                status => Err(CollaboratorError::Server {
                    status: status.as_u16(),
                    message: response.text(),
                }),
            }
        }
    }

    /// Record insert that talks to the in-process server.
    struct ServerInsert<'a> {
        server: &'a TestServer,
    }

    #[async_trait(?Send)]
    impl RecordInsert for ServerInsert<'_> {
        async fn insert(&self, payload: &RecordPayload) -> Result<String, CollaboratorError> {
            let response = self.server.post("/api/upload").json(payload).await;

            if response.status_code() == StatusCode::CREATED {
                let body: ApiResponse<RecordResponse> = response.json();
                Ok(body.message)
            } else {
                let body: ErrorResponse = response.json();
                Err(CollaboratorError::Server {
                    status: response.status_code().as_u16(),
                    message: body.error,
                })
            }
        }
    }

    fn pg_payload() -> serde_json::Value {
        json!({
            "student_code": "BWU/BCA/23/406",
            "name": "Jane Doe",
            "mobile": "9876543210",
            "place_of_living": "pg",
            "pg_address": "12 Lane",
            "pg_name": "Green PG",
            "pg_landmark": "Near Mall",
            "pg_owner_mobile": "9123456780",
            "pg_owner_name": "Mr Owner"
        })
    }

    fn home_workflow(raw_code: &str) -> SubmissionWorkflow {
        let workflow = SubmissionWorkflow::new();
        for (field, value) in [
            (Field::StudentCode, raw_code),
            (Field::Name, "John Roy"),
            (Field::Mobile, "9876501234"),
            (Field::PlaceOfLiving, "home"),
            (Field::HomeAddress, "12 St"),
            (Field::HomePs, "Central"),
            (Field::HomePin, "700001"),
            (Field::HomeState, "WB"),
            (Field::HomeDistrict, "Kolkata"),
        ] {
            workflow.set_value(field, value);
        }
        workflow.set_acknowledged(true);
        workflow
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.database, "connected");
    }

    #[tokio::test]
    async fn test_health_check_reports_unreachable_database() {
        let state = AppState {
            db: DatabaseConnection::Disconnected,
        };
        let server = TestServer::new(create_router(state, Duration::from_secs(30))).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "DATABASE_ERROR");
        assert!(!body.success);
    }

    #[tokio::test]
    async fn test_verify_is_not_found_before_insert_and_found_after() {
        let _guard = init_test_tracing();
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let request = json!({ "student_code": "BWU/BCA/23/406" });

        let before = server.post("/api/verify").json(&request).await;
        before.assert_status(StatusCode::NOT_FOUND);
        let error_body: ErrorResponse = before.json();
        assert!(!error_body.success);
        assert_eq!(error_body.code, "RECORD_NOT_FOUND");

        server
            .post("/api/upload")
            .json(&pg_payload())
            .await
            .assert_status(StatusCode::CREATED);

        let after = server.post("/api/verify").json(&request).await;
        after.assert_status(StatusCode::OK);
        assert_eq!(after.json::<serde_json::Value>(), json!({}));
    }

    #[tokio::test]
    async fn test_verify_matches_exact_canonical_code() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        server.post("/api/upload").json(&pg_payload()).await;

        // The raw code is a different key than the canonical one
        server
            .post("/api/verify")
            .json(&json!({ "student_code": "406" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_verify_rejects_empty_code() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/verify")
            .json(&json!({ "student_code": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_pg_record() {
        let _guard = init_test_tracing();
        let (app, db) = setup_test_app_with_db().await;
        let server = TestServer::new(app).unwrap();

        let response = server.post("/api/upload").json(&pg_payload()).await;

        if response.status_code() != StatusCode::CREATED {
            println!("Error response: {}", response.text());
            panic!("Expected 201 Created, got {}", response.status_code());
        }
        let body: ApiResponse<RecordResponse> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Record saved successfully");
        assert_eq!(body.data.student_code, "BWU/BCA/23/406");
        assert!(body.data.id > 0);

        let stored = record::Entity::find_by_student_code("BWU/BCA/23/406")
            .one(&db)
            .await
            .unwrap()
            .expect("record should be stored");
        assert_eq!(stored.place_of_living, record::PlaceOfLiving::Pg);
        assert_eq!(stored.home_address, None);
        assert_eq!(stored.pg_address.as_deref(), Some("12 Lane"));
        assert_eq!(stored.pg_name.as_deref(), Some("Green PG"));
        assert_eq!(stored.pg_landmark.as_deref(), Some("Near Mall"));
        assert_eq!(stored.pg_owner_mobile.as_deref(), Some("9123456780"));
        assert_eq!(stored.pg_owner_name.as_deref(), Some("Mr Owner"));
    }

    #[tokio::test]
    async fn test_upload_ignores_keys_of_the_other_branch() {
        let (app, db) = setup_test_app_with_db().await;
        let server = TestServer::new(app).unwrap();
        let mut payload = pg_payload();
        payload["home_address"] = json!("Address: 1 Rd, PS: X, PIN: 700002, State: WB, District: Y");

        server
            .post("/api/upload")
            .json(&payload)
            .await
            .assert_status(StatusCode::CREATED);

        let stored = record::Entity::find_by_student_code("BWU/BCA/23/406")
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.home_address, None);
    }

    #[tokio::test]
    async fn test_upload_duplicate_student_code_conflicts() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        server
            .post("/api/upload")
            .json(&pg_payload())
            .await
            .assert_status(StatusCode::CREATED);
        let response = server.post("/api/upload").json(&pg_payload()).await;

        response.assert_status(StatusCode::CONFLICT);
        let error_body: ErrorResponse = response.json();
        assert!(!error_body.success);
        assert_eq!(error_body.code, "DUPLICATE_STUDENT_CODE");
        assert_eq!(error_body.error, "Student code BWU/BCA/23/406 is already registered");
    }

    #[tokio::test]
    async fn test_upload_rejects_rule_violations() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let mut payload = pg_payload();
        payload["mobile"] = json!("12345");
        payload["pg_name"] = json!("G");

        let response = server.post("/api/upload").json(&payload).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let error_body: ErrorResponse = response.json();
        assert_eq!(error_body.code, "VALIDATION_ERROR");
        assert!(error_body.error.contains("mobile: Mobile number must be exactly 10 characters long."));
        assert!(error_body.error.contains("pg_name: Name must be at least 2 characters long."));
    }

    #[tokio::test]
    async fn test_upload_rejects_raw_student_code() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let mut payload = pg_payload();
        payload["student_code"] = json!("406");

        let response = server.post("/api/upload").json(&payload).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let error_body: ErrorResponse = response.json();
        assert!(error_body.error.contains("student_code"));
    }

    #[tokio::test]
    async fn test_upload_rejects_incomplete_branch() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let mut payload = pg_payload();
        payload.as_object_mut().unwrap().remove("pg_landmark");

        let response = server.post("/api/upload").json(&payload).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_upload_rejects_malformed_json() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/upload")
            .content_type("application/json")
            .bytes(Bytes::from_static(b"{\"student_code\": "))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_existence_check_against_server() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let lookup = ServerLookup { server: &server };
        let check = ExistenceCheck::new();

        assert_eq!(check.check(&lookup, "406").await, Ok(CheckState::NotFound));

        server.post("/api/upload").json(&pg_payload()).await;

        assert_eq!(check.check(&lookup, "406").await, Ok(CheckState::Found));
        assert!(check.is_found());
    }

    #[tokio::test]
    async fn test_home_submission_persists_composed_address() {
        let _guard = init_test_tracing();
        let (app, db) = setup_test_app_with_db().await;
        let server = TestServer::new(app).unwrap();
        let insert = ServerInsert { server: &server };
        let workflow = home_workflow("512");

        let outcome = workflow.submit(&insert).await.unwrap();

        let (message, payload) = match outcome {
            SubmitOutcome::Submitted { message, payload } => (message, payload),
            other => panic!("Expected the record to be submitted, got {:?}", other),
        };
        assert_eq!(message, "Record saved successfully");
        assert!(matches!(payload.residence, Residence::Home { .. }));
        assert_eq!(workflow.value(Field::Name), "");

        let stored = record::Entity::find_by_student_code("BWU/BCA/23/512")
            .one(&db)
            .await
            .unwrap()
            .expect("record should be stored");
        assert_eq!(stored.place_of_living, record::PlaceOfLiving::Home);
        assert_eq!(
            stored.home_address.as_deref(),
            Some("Address: 12 St, PS: Central, PIN: 700001, State: WB, District: Kolkata")
        );
        assert_eq!(stored.pg_address, None);
        assert_eq!(stored.pg_name, None);
        assert_eq!(stored.pg_landmark, None);
        assert_eq!(stored.pg_owner_mobile, None);
        assert_eq!(stored.pg_owner_name, None);
    }

    #[tokio::test]
    async fn test_rejected_submission_keeps_draft() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let insert = ServerInsert { server: &server };

        let first = home_workflow("512");
        assert!(matches!(
            first.submit(&insert).await,
            Ok(SubmitOutcome::Submitted { .. })
        ));

        let second = home_workflow("512");
        let before = second.draft();
        let outcome = second.submit(&insert).await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "Student code BWU/BCA/23/512 is already registered".to_string()
            }
        );
        assert_eq!(second.draft(), before);
        assert!(second.can_submit());
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status(StatusCode::OK);
        let document: serde_json::Value = response.json();
        assert!(document["paths"].get("/api/verify").is_some());
        assert!(document["paths"].get("/api/upload").is_some());
    }

    #[tokio::test]
    async fn test_prometheus_metrics_endpoint() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // Metrics are not mounted in test builds
        let response = server.get("/metrics").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
