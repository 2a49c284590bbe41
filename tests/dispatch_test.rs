//! Dispatcher behaviour against real directories and injected API handlers.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use frontdoor::api::{ApiDomain, ApiHandler, ApiHandlers};
use frontdoor::error::BoxError;
use frontdoor::handler::{Dispatcher, SpaServer, UploadsServer};
use frontdoor::http::response::{ALLOW_ORIGIN, BUILD_MISSING_BODY, NOT_FOUND_BODY};
use frontdoor::http::{build_json_response, full_body, Request, Response};
use frontdoor::routing::RouteTable;
use http_body_util::BodyExt;
use hyper::header::CONTENT_TYPE;
use hyper::{Method, StatusCode};
use tempfile::TempDir;

const INDEX: &str = "<!doctype html><title>app</title><div id=\"root\"></div>";

type CallLog = Arc<Mutex<Vec<ApiDomain>>>;

/// Handler that records which domain it was registered for
fn recorder(domain: ApiDomain, calls: CallLog) -> impl ApiHandler {
    move |_req: Request| {
        let calls = Arc::clone(&calls);
        async move {
            calls.lock().unwrap().push(domain);
            let body = serde_json::json!({ "domain": domain.name() });
            Ok::<_, BoxError>(build_json_response(StatusCode::OK, &body))
        }
    }
}

struct Site {
    root: TempDir,
    dispatcher: Dispatcher,
    calls: CallLog,
}

impl Site {
    fn new(with_build: bool) -> Self {
        let root = tempfile::tempdir().unwrap();
        let public = root.path().join("public");
        let uploads = root.path().join("uploads");
        std::fs::create_dir_all(public.join("static/js")).unwrap();
        std::fs::create_dir_all(uploads.join("menu")).unwrap();

        if with_build {
            std::fs::write(public.join("index.html"), INDEX).unwrap();
        }
        std::fs::write(public.join("static/js/main.js"), "console.log(1)").unwrap();
        std::fs::write(public.join("favicon.ico"), [0u8, 0, 1, 0]).unwrap();
        std::fs::write(uploads.join("menu/pizza.webp"), b"RIFFwebp").unwrap();
        // Sibling of the uploads dir, must never be reachable
        std::fs::write(root.path().join("secret.env"), "DB_PASSWORD=hunter2").unwrap();

        let calls = CallLog::default();
        let handlers = ApiDomain::ALL
            .into_iter()
            .fold(ApiHandlers::new(), |h, d| h.register(d, recorder(d, Arc::clone(&calls))));

        let dispatcher = Dispatcher::new(
            RouteTable::standard(handlers),
            UploadsServer::new(&uploads),
            SpaServer::new(&public),
            Duration::from_secs(5),
        );

        Self {
            root,
            dispatcher,
            calls,
        }
    }

    fn root(&self) -> &Path {
        self.root.path()
    }

    async fn send(&self, method: Method, uri: &str) -> Response {
        let req = hyper::Request::builder()
            .method(method)
            .uri(uri)
            .body(full_body(""))
            .unwrap();
        self.dispatcher.dispatch(req).await
    }

    async fn get(&self, uri: &str) -> Response {
        self.send(Method::GET, uri).await
    }

    fn take_calls(&self) -> Vec<ApiDomain> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }
}

async fn body_string(resp: Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[tokio::test]
async fn options_is_preflight_everywhere() {
    let site = Site::new(true);
    for uri in ["/", "/uploads/menu/pizza.webp", "/api/menu/items", "/api/auth", "/x/y"] {
        let resp = site.send(Method::OPTIONS, uri).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        assert_eq!(resp.headers()[ALLOW_ORIGIN], "*");
        assert_eq!(
            resp.headers()["access-control-allow-methods"],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(resp.headers()["access-control-allow-headers"], "Content-Type");
        assert!(body_string(resp).await.is_empty());
    }
    assert!(site.take_calls().is_empty(), "preflight must not reach handlers");
}

#[tokio::test]
async fn each_prefix_reaches_only_its_handler() {
    let site = Site::new(true);
    let cases = [
        ("/api/staff/notifications", ApiDomain::Notifications),
        ("/api/editpage/home", ApiDomain::EditPage),
        ("/api/menu/items", ApiDomain::Menu),
        ("/api/welcome", ApiDomain::Welcome),
        ("/api/auth/login", ApiDomain::Auth),
        ("/api/checkout", ApiDomain::Checkout),
        ("/api/inventory/stock", ApiDomain::Inventory),
        ("/api/utilities/ping", ApiDomain::Utilities),
        ("/api/reports/sales?from=2024-01-01", ApiDomain::Reports),
    ];

    for (uri, domain) in cases {
        for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
            let resp = site.send(method.clone(), uri).await;
            assert_eq!(resp.status(), StatusCode::OK, "{method} {uri}");
            assert_eq!(site.take_calls(), vec![domain], "{method} {uri}");
        }
    }
}

#[tokio::test]
async fn non_api_paths_never_reach_handlers() {
    let site = Site::new(true);
    for uri in ["/", "/api/menu", "/api", "/apis/auth", "/uploads/menu/pizza.webp"] {
        site.get(uri).await;
    }
    assert!(site.take_calls().is_empty());
}

#[tokio::test]
async fn uploads_serve_images() {
    let site = Site::new(true);
    let resp = site.get("/uploads/menu/pizza.webp").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[CONTENT_TYPE], "image/webp");
    assert_eq!(resp.headers()[ALLOW_ORIGIN], "*");
    assert_eq!(body_string(resp).await, "RIFFwebp");
}

#[tokio::test]
async fn missing_upload_is_generic_404() {
    let site = Site::new(true);
    for uri in ["/uploads/menu/burger.png", "/uploads/none/at/all.jpg", "/uploads/menu/"] {
        let resp = site.get(uri).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html");
        assert_eq!(body_string(resp).await, NOT_FOUND_BODY);
    }
}

#[tokio::test]
async fn upload_traversal_is_404() {
    let site = Site::new(true);
    assert!(site.root().join("secret.env").exists());
    for uri in [
        "/uploads/../secret.env",
        "/uploads/../../etc/passwd",
        "/uploads/menu/../../secret.env",
    ] {
        let resp = site.get(uri).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        let body = body_string(resp).await;
        assert_eq!(body, NOT_FOUND_BODY);
        assert!(!body.contains("hunter2"));
    }
}

#[tokio::test]
async fn root_serves_index() {
    let site = Site::new(true);
    let resp = site.get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[CONTENT_TYPE], "text/html");
    assert_eq!(resp.headers()[ALLOW_ORIGIN], "*");
    assert_eq!(body_string(resp).await, INDEX);
}

#[tokio::test]
async fn build_assets_are_served_with_types() {
    let site = Site::new(true);

    let resp = site.get("/static/js/main.js").await;
    assert_eq!(resp.headers()[CONTENT_TYPE], "application/javascript");
    assert_eq!(body_string(resp).await, "console.log(1)");

    let resp = site.get("/favicon.ico").await;
    assert_eq!(resp.headers()[CONTENT_TYPE], "image/x-icon");
}

#[tokio::test]
async fn client_routes_fall_back_to_index() {
    let site = Site::new(true);
    for uri in ["/dashboard/settings", "/menu", "/api/menu", "/static/js/missing.js", "/../secret.env"] {
        let resp = site.get(uri).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html");
        assert_eq!(body_string(resp).await, INDEX, "{uri}");
    }
}

#[tokio::test]
async fn missing_build_is_distinct_404() {
    let site = Site::new(false);
    for uri in ["/", "/dashboard/settings"] {
        let resp = site.get(uri).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_string(resp).await;
        assert_eq!(body, BUILD_MISSING_BODY);
        assert_ne!(body, NOT_FOUND_BODY);
    }

    // Real build assets still resolve without an index document
    let resp = site.get("/static/js/main.js").await;
    assert_eq!(resp.status(), StatusCode::OK);
}
