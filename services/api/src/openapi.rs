use axum::Json;
use job_tracker::applications::ApplicationStatus;
use job_tracker::config::PaginationConfig;
use serde_json::{json, Value};

pub(crate) const OPENAPI_PATH: &str = "/openapi.json";

fn error_response(description: &str) -> Value {
    json!({
      "description": description,
      "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorBody"}}}
    })
}

fn entity_response(description: &str) -> Value {
    json!({
      "description": description,
      "content": {"application/json": {"schema": {"$ref": "#/components/schemas/JobApplication"}}}
    })
}

fn payload_body() -> Value {
    json!({
      "required": true,
      "content": {"application/json": {"schema": {"$ref": "#/components/schemas/JobApplicationPayload"}}}
    })
}

fn id_parameter() -> Value {
    json!({"name": "id", "in": "path", "required": true, "schema": {"type": "integer", "format": "int64"}})
}

/// OpenAPI 3 description of the job application routes.
#[must_use]
pub(crate) fn openapi_document(pagination: PaginationConfig) -> Value {
    let statuses: Vec<&str> = ApplicationStatus::ALL
        .iter()
        .map(|status| status.label())
        .collect();

    json!({
      "openapi": "3.0.3",
      "info": {
        "title": "Job Application Tracker API",
        "version": env!("CARGO_PKG_VERSION")
      },
      "paths": {
        "/jobapplications": {
          "get": {
            "summary": "List job applications, newest first",
            "parameters": [
              {"name": "pageNumber", "in": "query", "schema": {"type": "integer", "minimum": 1, "default": 1}},
              {"name": "pageSize", "in": "query", "schema": {
                "type": "integer",
                "minimum": 1,
                "maximum": pagination.max_page_size,
                "default": pagination.default_page_size
              }}
            ],
            "responses": {
              "200": {
                "description": "one page of job applications",
                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/PaginatedJobApplications"}}}
              },
              "400": error_response("non-numeric paging values")
            }
          },
          "post": {
            "summary": "Create a job application",
            "requestBody": payload_body(),
            "responses": {
              "201": entity_response("created; Location points at the new record"),
              "400": error_response("validation failure or future date")
            }
          }
        },
        "/jobapplications/{id}": {
          "get": {
            "summary": "Fetch one job application",
            "parameters": [id_parameter()],
            "responses": {
              "200": entity_response("the job application"),
              "400": error_response("non-numeric id"),
              "404": error_response("unknown id")
            }
          },
          "put": {
            "summary": "Replace every field of a job application",
            "parameters": [id_parameter()],
            "requestBody": payload_body(),
            "responses": {
              "200": entity_response("the updated job application"),
              "400": error_response("validation failure, future date or ID mismatch"),
              "404": {"description": "unknown id (empty body)"}
            }
          },
          "delete": {
            "summary": "Delete a job application",
            "parameters": [id_parameter()],
            "responses": {
              "204": {"description": "deleted"},
              "400": error_response("non-numeric id"),
              "404": {"description": "unknown id (empty body)"}
            }
          }
        }
      },
      "components": {
        "schemas": {
          "ApplicationStatus": {
            "type": "string",
            "enum": statuses
          },
          "ErrorBody": {
            "type": "object",
            "required": ["status", "error", "details"],
            "properties": {
              "status": {"type": "integer"},
              "error": {"type": "string"},
              "details": {
                "type": "array",
                "nullable": true,
                "items": {"$ref": "#/components/schemas/FieldError"}
              }
            }
          },
          "FieldError": {
            "type": "object",
            "required": ["field", "error"],
            "properties": {
              "field": {"type": "string"},
              "error": {"type": "string"}
            }
          },
          "JobApplication": {
            "type": "object",
            "required": ["id", "companyName", "position", "status", "dateApplied"],
            "properties": {
              "id": {"type": "integer", "format": "int64"},
              "companyName": {"type": "string", "minLength": 2, "maxLength": 100},
              "position": {"type": "string", "minLength": 2, "maxLength": 100},
              "status": {"$ref": "#/components/schemas/ApplicationStatus"},
              "dateApplied": {"type": "string", "format": "date"}
            }
          },
          "JobApplicationPayload": {
            "type": "object",
            "required": ["companyName", "position", "dateApplied"],
            "properties": {
              "id": {"type": "integer", "format": "int64", "description": "must match the path id on update"},
              "companyName": {"type": "string", "minLength": 2, "maxLength": 100},
              "position": {"type": "string", "minLength": 2, "maxLength": 100},
              "status": {"$ref": "#/components/schemas/ApplicationStatus"},
              "dateApplied": {"type": "string", "format": "date"}
            }
          },
          "PaginatedJobApplications": {
            "type": "object",
            "required": ["data", "pageNumber", "pageSize", "totalCount", "totalPages"],
            "properties": {
              "data": {"type": "array", "items": {"$ref": "#/components/schemas/JobApplication"}},
              "pageNumber": {"type": "integer"},
              "pageSize": {"type": "integer"},
              "totalCount": {"type": "integer"},
              "totalPages": {"type": "integer"}
            }
          }
        }
      }
    })
}

pub(crate) async fn openapi_endpoint(pagination: PaginationConfig) -> Json<Value> {
    Json(openapi_document(pagination))
}
