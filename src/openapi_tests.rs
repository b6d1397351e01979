#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::OpenApi;
    use utoipa::openapi::{PathItemType, RefOr, schema::Schema};

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();

        assert!(components.schemas.contains_key("ErrorResponse"));
        assert!(components.schemas.contains_key("HealthResponse"));
        assert!(components.schemas.contains_key("RecordPayload"));
        assert!(components.schemas.contains_key("VerifyRequest"));

        let json_result = serde_json::to_string(&openapi);
        assert!(json_result.is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let error_response_schema = components.schemas.get("ErrorResponse").unwrap();

        if let RefOr::T(Schema::Object(obj)) = error_response_schema {
            let properties = &obj.properties;
            assert!(properties.contains_key("error"));
            assert!(properties.contains_key("code"));
            assert!(properties.contains_key("success"));
        } else {
            panic!("ErrorResponse should be an object schema");
        }
    }

    #[test]
    fn test_verify_request_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let verify_schema = components.schemas.get("VerifyRequest").unwrap();

        if let RefOr::T(Schema::Object(obj)) = verify_schema {
            assert!(obj.properties.contains_key("student_code"));
        } else {
            panic!("VerifyRequest should be an object schema");
        }
    }

    #[test]
    fn test_record_endpoints_document_their_statuses() {
        let openapi = ApiDoc::openapi();

        let verify = openapi.paths.paths.get("/api/verify").unwrap();
        let verify_post = verify.operations.get(&PathItemType::Post).unwrap();
        for status in ["200", "404", "500"] {
            assert!(verify_post.responses.responses.contains_key(status), "verify lacks {}", status);
        }

        let upload = openapi.paths.paths.get("/api/upload").unwrap();
        let upload_post = upload.operations.get(&PathItemType::Post).unwrap();
        for status in ["201", "400", "409", "422", "500"] {
            assert!(upload_post.responses.responses.contains_key(status), "upload lacks {}", status);
        }
    }

    #[test]
    fn test_openapi_paths_contain_health_endpoint() {
        let openapi = ApiDoc::openapi();

        let health_path = openapi.paths.paths.get("/health").unwrap();
        let health_get = health_path.operations.get(&PathItemType::Get).unwrap();

        assert!(health_get.responses.responses.contains_key("200"));
        assert!(health_get.responses.responses.contains_key("500"));
    }

    #[test]
    fn test_all_error_responses_reference_correct_schema() {
        let openapi = ApiDoc::openapi();
        let openapi_json = serde_json::to_string(&openapi).unwrap();

        assert!(!openapi_json.contains("crate.schemas.ErrorResponse"));
        assert!(!openapi_json.contains("crate::schemas::ErrorResponse"));
        assert!(openapi_json.contains("ErrorResponse"));
    }
}
