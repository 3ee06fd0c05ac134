use std::env;

use agency_site_backend::{routes, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

const BOUNDARY: &str = "------------------------testboundary";

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn json_req(method: &str, uri: &str, token: Option<&str>, body: &JsonValue) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn text_part(name: &str, value: &str) -> String {
    format!(
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
        BOUNDARY, name, value
    )
}

fn multipart_req(method: &str, uri: &str, token: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("host", "localhost:5000")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(body))
        .unwrap()
}

/// End-to-end pass over every resource. Needs a reachable Postgres; skipped
/// when DATABASE_URL is not configured.
#[tokio::test]
async fn content_api_end_to_end() {
    dotenvy::dotenv().ok();
    let Ok(database_url) = env::var("DATABASE_URL") else {
        eprintln!("skipping content_api_end_to_end: DATABASE_URL is not set");
        return;
    };

    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    let uploads_dir = env::temp_dir().join("agency-site-backend-test-uploads");
    env::set_var("UPLOADS_DIR", &uploads_dir);
    agency_site_backend::config::init_config().expect("init config");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");
    sqlx::query("TRUNCATE admins, jobs, applications, projects, services, contacts CASCADE")
        .execute(&pool)
        .await
        .expect("truncate");

    let app = routes::router(AppState::new(pool.clone()));

    // Empty collection keeps the normal paginated shape.
    let (status, body) = send(&app, get("/api/jobs", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["total"], 0);
    assert_eq!(body["totalPages"], 0);

    // Bootstrap: first call succeeds with a superadmin and a token.
    let setup_payload = json!({
        "username": "root",
        "email": "root@example.com",
        "password": "sup3rsecret"
    });
    let (status, body) = send(
        &app,
        json_req("POST", "/api/admin/setup", None, &setup_payload),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let root_token = body["token"].as_str().expect("setup token").to_string();
    let root_id = body["admin"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["admin"]["role"], "superadmin");

    // Bootstrap-once: a second valid payload is refused and nothing is created.
    let (status, _) = send(
        &app,
        json_req(
            "POST",
            "/api/admin/setup",
            None,
            &json!({
                "username": "other",
                "email": "other@example.com",
                "password": "sup3rsecret"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) = send(&app, get("/api/admin/all", Some(&root_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    // Login sets the session cookie; the cookie authenticates on its own.
    let login_resp = app
        .clone()
        .oneshot(json_req(
            "POST",
            "/api/admin/login",
            None,
            &json!({"email": "root@example.com", "password": "sup3rsecret"}),
        ))
        .await
        .unwrap();
    assert_eq!(login_resp.status(), StatusCode::OK);
    let cookie = login_resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .expect("session cookie")
        .to_string();
    let login_bytes = to_bytes(login_resp.into_body(), 1024 * 1024).await.unwrap();
    let login_body: JsonValue = serde_json::from_slice(&login_bytes).unwrap();
    assert!(!login_body["admin"]["lastLogin"].is_null());

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/api/admin/profile")
            .header("cookie", &cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admin"]["username"], "root");
    assert!(body["admin"].get("password").is_none());

    // Wrong password is indistinguishable from an unknown email.
    let (status, _) = send(
        &app,
        json_req(
            "POST",
            "/api/admin/login",
            None,
            &json!({"email": "root@example.com", "password": "wrong-password"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A plain admin can log in but cannot manage admin accounts.
    let (status, _) = send(
        &app,
        json_req(
            "POST",
            "/api/admin/create",
            Some(&root_token),
            &json!({
                "username": "staff",
                "email": "staff@example.com",
                "password": "staffpass"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(
        &app,
        json_req(
            "POST",
            "/api/admin/login",
            None,
            &json!({"email": "staff@example.com", "password": "staffpass"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let staff_token = body["token"].as_str().unwrap().to_string();
    let staff_id = body["admin"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, get("/api/admin/all", Some(&staff_token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Self-delete guard.
    let (status, body) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/admin/{}", root_id))
            .header("authorization", format!("Bearer {}", root_token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You cannot delete your own account");

    // Job CRUD with the documented scenario payload.
    let (status, body) = send(
        &app,
        json_req(
            "POST",
            "/api/jobs",
            Some(&root_token),
            &json!({
                "title": "Engineer",
                "type": "Full-time",
                "location": "Remote",
                "description": "Build things",
                "status": "Open"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let job_id = body["id"].as_str().unwrap().to_string();

    // Idempotent read.
    let (_, first) = send(&app, get(&format!("/api/jobs/{}", job_id), None)).await;
    let (_, second) = send(&app, get(&format!("/api/jobs/{}", job_id), None)).await;
    assert_eq!(first, second);

    // Partial patch changes only the supplied field.
    let (status, patched) = send(
        &app,
        json_req(
            "PUT",
            &format!("/api/jobs/{}", job_id),
            Some(&root_token),
            &json!({"location": "Hybrid"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["location"], "Hybrid");
    assert_eq!(patched["title"], first["title"]);
    assert_eq!(patched["type"], first["type"]);
    assert_eq!(patched["description"], first["description"]);
    assert_eq!(patched["status"], first["status"]);

    // Application lifecycle: Pending on create, narrow status update only.
    let (status, body) = send(
        &app,
        json_req(
            "POST",
            "/api/applications",
            None,
            &json!({
                "name": "Alice",
                "email": "alice@example.com",
                "phone": "+1 555 0100",
                "coverLetter": "Hello",
                "jobId": job_id
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "Pending");
    let application_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        json_req(
            "POST",
            "/api/applications",
            None,
            &json!({
                "name": "Bob",
                "email": "bob@example.com",
                "phone": "+1 555 0101",
                "jobId": "9be4d2f0-0000-0000-0000-000000000000"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, before) = send(
        &app,
        get(&format!("/api/applications/{}", application_id), Some(&root_token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before["status"], "Pending");
    assert_eq!(before["job"]["title"], "Engineer");

    let (status, _) = send(
        &app,
        json_req(
            "PUT",
            &format!("/api/applications/{}/status", application_id),
            Some(&root_token),
            &json!({"status": "Accepted"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = send(
        &app,
        get(&format!("/api/applications/{}", application_id), Some(&root_token)),
    )
    .await;
    assert_eq!(after["status"], "Accepted");
    assert_eq!(after["name"], before["name"]);
    assert_eq!(after["email"], before["email"]);
    assert_eq!(after["phone"], before["phone"]);
    assert_eq!(after["coverLetter"], before["coverLetter"]);

    // Pagination over 12 services: page 2 of 5 holds 5 items, pages cover
    // the collection exactly once.
    for i in 0..12 {
        let (status, _) = send(
            &app,
            json_req(
                "POST",
                "/api/services",
                Some(&root_token),
                &json!({
                    "title": format!("Service {}", i),
                    "description": "A service we offer"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, body) = send(&app, get("/api/services?page=2&limit=5", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
    assert_eq!(body["total"], 12);
    assert_eq!(body["totalPages"], 3);

    let mut seen = std::collections::HashSet::new();
    for page in 1..=3 {
        let (_, body) = send(
            &app,
            get(&format!("/api/services?page={}&limit=5", page), None),
        )
        .await;
        for item in body["items"].as_array().unwrap() {
            assert!(seen.insert(item["id"].as_str().unwrap().to_string()));
        }
    }
    assert_eq!(seen.len(), 12);

    // Default icon, and non-numeric paging falls back to defaults.
    let (_, body) = send(&app, get("/api/services?page=abc&limit=xyz", None)).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["items"][0]["icon"], "code");

    // Projects: multipart create with a URL image, partial multipart update.
    let mut form = String::new();
    form.push_str(&text_part("title", "Site Redesign"));
    form.push_str(&text_part("description", "Full redesign"));
    form.push_str(&text_part("link", "https://example.com/work"));
    form.push_str(&text_part("image", "https://cdn.example.com/shot.png"));
    form.push_str(&format!("--{}--\r\n", BOUNDARY));
    let (status, body) = send(
        &app,
        multipart_req("POST", "/api/projects", &root_token, form.into_bytes()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let project_id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["image"], "https://cdn.example.com/shot.png");

    let mut form = String::new();
    form.push_str(&text_part("title", "Site Redesign v2"));
    form.push_str(&format!("--{}--\r\n", BOUNDARY));
    let (status, body) = send(
        &app,
        multipart_req(
            "PUT",
            &format!("/api/projects/{}", project_id),
            &root_token,
            form.into_bytes(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Site Redesign v2");
    assert_eq!(body["image"], "https://cdn.example.com/shot.png");

    // Missing required fields on create are a 400.
    let mut form = String::new();
    form.push_str(&text_part("title", "No description"));
    form.push_str(&format!("--{}--\r\n", BOUNDARY));
    let (status, _) = send(
        &app,
        multipart_req("POST", "/api/projects", &root_token, form.into_bytes()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Standalone upload returns an absolute URL under /uploads.
    let mut upload = Vec::new();
    upload.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"pixel.png\"\r\nContent-Type: image/png\r\n\r\n",
            BOUNDARY
        )
        .as_bytes(),
    );
    upload.extend_from_slice(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00]);
    upload.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    let (status, body) = send(
        &app,
        multipart_req("POST", "/api/projects/upload", &root_token, upload),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let image_url = body["imageUrl"].as_str().unwrap();
    assert!(image_url.starts_with("http://localhost:5000/uploads/projects/"));

    // A renamed non-image is refused by the magic-byte check.
    let mut bogus = Vec::new();
    bogus.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"fake.png\"\r\nContent-Type: image/png\r\n\r\n",
            BOUNDARY
        )
        .as_bytes(),
    );
    bogus.extend_from_slice(b"plain text, not an image");
    bogus.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    let (status, _) = send(
        &app,
        multipart_req("POST", "/api/projects/upload", &root_token, bogus),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Contact messages: public create, admin-only reads and mutations.
    let (status, body) = send(
        &app,
        json_req(
            "POST",
            "/api/contacts",
            None,
            &json!({
                "name": "Visitor",
                "email": "visitor@example.com",
                "phone": "+1 555 0102",
                "message": "Hi there"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let contact_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, get("/api/contacts", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, body) = send(&app, get("/api/contacts", Some(&root_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);

    // Dashboard aggregation: counts plus six month buckets.
    let (status, body) = send(&app, get("/api/dashboard/stats", Some(&root_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["counts"]["jobs"], 1);
    assert_eq!(body["counts"]["applications"], 1);
    assert_eq!(body["counts"]["projects"], 1);
    assert_eq!(body["counts"]["services"], 12);
    assert_eq!(body["counts"]["contacts"], 1);
    let monthly = body["monthly"].as_array().unwrap();
    assert_eq!(monthly.len(), 6);
    assert_eq!(monthly[5]["jobs"], 1);
    assert_eq!(monthly[5]["projects"], 1);

    // Deleting the job cascades to its applications.
    let (status, _) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/jobs/{}", job_id))
            .header("authorization", format!("Bearer {}", root_token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        get(&format!("/api/applications/{}", application_id), Some(&root_token)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deactivating an account invalidates its otherwise-valid token.
    let (status, _) = send(
        &app,
        json_req(
            "PUT",
            &format!("/api/admin/{}", staff_id),
            Some(&root_token),
            &json!({"isActive": false}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, get("/api/admin/profile", Some(&staff_token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, admin account is inactive");

    // Logout clears the session cookie.
    let logout_resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/logout")
                .header("cookie", &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(logout_resp.status(), StatusCode::OK);
    let cleared = logout_resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap();
    assert!(cleared.starts_with("token="));
}
