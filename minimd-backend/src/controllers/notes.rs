//! Notes REST API: CRUD over the note table.
//!
//! Identity and timestamps are assigned here, never by the caller.

use actix_web::{HttpResponse, Responder, ResponseError, web};
use minimd_types::{ErrorBody, NoteId, NoteRequest};

use crate::AppState;

fn note_not_found(id: NoteId) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new(format!("Note not found: {}", id)))
}

/// List all notes, most recently updated first
async fn list_notes(state: web::Data<AppState>) -> impl Responder {
    match state.db.list_notes() {
        Ok(notes) => HttpResponse::Ok().json(notes),
        Err(e) => {
            log::error!("[NOTES] Failed to list notes: {}", e);
            e.error_response()
        }
    }
}

/// Get a note by ID
async fn get_note(state: web::Data<AppState>, path: web::Path<NoteId>) -> impl Responder {
    let id = path.into_inner();

    match state.db.get_note(id) {
        Ok(Some(note)) => HttpResponse::Ok().json(note),
        Ok(None) => note_not_found(id),
        Err(e) => {
            log::error!("[NOTES] Failed to get note {}: {}", id, e);
            e.error_response()
        }
    }
}

/// Create a note and return the full stored record
async fn create_note(
    state: web::Data<AppState>,
    body: web::Json<NoteRequest>,
) -> impl Responder {
    let request = body.into_inner();

    match state.db.create_note(&request.title, &request.content) {
        Ok(note) => {
            log::info!("[NOTES] Created note {}", note.id);
            HttpResponse::Created().json(note)
        }
        Err(e) => {
            log::error!("[NOTES] Failed to create note: {}", e);
            e.error_response()
        }
    }
}

/// Replace a note's title and content. Unknown ids are a 404, not an upsert.
async fn update_note(
    state: web::Data<AppState>,
    path: web::Path<NoteId>,
    body: web::Json<NoteRequest>,
) -> impl Responder {
    let id = path.into_inner();
    let request = body.into_inner();

    match state.db.update_note(id, &request.title, &request.content) {
        Ok(Some(note)) => {
            log::debug!("[NOTES] Updated note {} at {}", id, note.updated_at);
            HttpResponse::Ok().json(note)
        }
        Ok(None) => {
            log::warn!("[NOTES] Update for unknown note {}", id);
            note_not_found(id)
        }
        Err(e) => {
            log::error!("[NOTES] Failed to update note {}: {}", id, e);
            e.error_response()
        }
    }
}

/// Delete a note. Repeating the call is harmless.
async fn delete_note(state: web::Data<AppState>, path: web::Path<NoteId>) -> impl Responder {
    let id = path.into_inner();

    match state.db.delete_note(id) {
        Ok(removed) => {
            if removed {
                log::info!("[NOTES] Deleted note {}", id);
            } else {
                log::debug!("[NOTES] Delete for absent note {}", id);
            }
            HttpResponse::NoContent().finish()
        }
        Err(e) => {
            log::error!("[NOTES] Failed to delete note {}: {}", id, e);
            e.error_response()
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/notes")
            .route(web::get().to(list_notes))
            .route(web::post().to(create_note))
            .default_service(web::to(super::api_not_found)),
    )
    .service(
        web::resource("/notes/{id}")
            .route(web::get().to(get_note))
            .route(web::put().to(update_note))
            .route(web::delete().to(delete_note))
            .default_service(web::to(super::api_not_found)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::{AppState, Config, json_config, path_config};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use minimd_types::{Note, UpdatedNote};
    use std::sync::Arc;
    use tempfile::{TempDir, tempdir};

    fn test_state() -> (TempDir, web::Data<AppState>) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("api.db");
        let db = Database::new(db_path.to_str().unwrap()).expect("Failed to create database");
        let state = AppState::new(Arc::new(db), Config::default());
        (dir, web::Data::new(state))
    }

    macro_rules! init_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .app_data(json_config(64 * 1024))
                    .app_data(path_config())
                    .configure(crate::controllers::config),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_note_lifecycle_over_http() {
        let (_dir, state) = test_state();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/notes")
            .set_json(NoteRequest::new("New Note", ""))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Note = test::read_body_json(resp).await;
        assert_eq!(created.title, "New Note");
        assert_eq!(created.created_at, created.updated_at);

        let req = test::TestRequest::put()
            .uri(&format!("/api/notes/{}", created.id))
            .set_json(NoteRequest::new("Hi", "Hello"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: UpdatedNote = test::read_body_json(resp).await;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.content, "Hello");
        assert!(updated.updated_at > created.updated_at);

        let req = test::TestRequest::get()
            .uri(&format!("/api/notes/{}", created.id))
            .to_request();
        let fetched: Note = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.content, "Hello");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/notes/{}", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(test::read_body(resp).await.is_empty());

        let req = test::TestRequest::get()
            .uri(&format!("/api/notes/{}", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_list_returns_most_recent_first() {
        let (_dir, state) = test_state();
        let older = state.db.create_note("older", "").unwrap();
        let newer = state.db.create_note("newer", "").unwrap();
        let app = init_app!(state);

        let req = test::TestRequest::get().uri("/api/notes").to_request();
        let notes: Vec<Note> = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<NoteId> = notes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[actix_web::test]
    async fn test_empty_list() {
        let (_dir, state) = test_state();
        let app = init_app!(state);

        let req = test::TestRequest::get().uri("/api/notes").to_request();
        let notes: Vec<Note> = test::call_and_read_body_json(&app, req).await;
        assert!(notes.is_empty());
    }

    #[actix_web::test]
    async fn test_update_unknown_id_is_404() {
        let (_dir, state) = test_state();
        let app = init_app!(state);

        let req = test::TestRequest::put()
            .uri("/api/notes/999")
            .set_json(NoteRequest::new("t", "c"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert!(body.error.contains("999"));

        assert!(state.db.list_notes().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_delete_is_idempotent() {
        let (_dir, state) = test_state();
        let note = state.db.create_note("bye", "").unwrap();
        let app = init_app!(state);

        for _ in 0..2 {
            let req = test::TestRequest::delete()
                .uri(&format!("/api/notes/{}", note.id))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        }
    }

    #[actix_web::test]
    async fn test_malformed_bodies_are_400() {
        let (_dir, state) = test_state();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/notes")
            .set_json(serde_json::json!({ "title": "no content" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert!(body.error.starts_with("Malformed request"));

        let req = test::TestRequest::post()
            .uri("/api/notes")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        assert!(state.db.list_notes().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_oversized_body_is_rejected() {
        let (_dir, state) = test_state();
        let app = init_app!(state);

        let huge = "x".repeat(128 * 1024);
        let req = test::TestRequest::post()
            .uri("/api/notes")
            .set_json(NoteRequest::new("big", huge))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unmatched_api_routes_are_404() {
        let (_dir, state) = test_state();
        let app = init_app!(state);

        for uri in ["/api/nope", "/api/notes/abc", "/api/notes/1/extra"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
        }

        let req = test::TestRequest::patch().uri("/api/notes").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_duplicate_creates_stay_independent() {
        let (_dir, state) = test_state();
        let app = init_app!(state);

        let mut ids = Vec::new();
        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/notes")
                .set_json(NoteRequest::new("twin", "same"))
                .to_request();
            let note: Note = test::call_and_read_body_json(&app, req).await;
            ids.push(note.id);
        }
        assert_ne!(ids[0], ids[1]);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/notes/{}", ids[0]))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/notes/{}", ids[1]))
            .to_request();
        let survivor: Note = test::call_and_read_body_json(&app, req).await;
        assert_eq!(survivor.content, "same");
    }

    #[actix_web::test]
    async fn test_health_reports_ok() {
        let (_dir, state) = test_state();
        let app = init_app!(state);

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let health: minimd_types::HealthStatus = test::call_and_read_body_json(&app, req).await;
        assert_eq!(health.status, "ok");
    }
}
