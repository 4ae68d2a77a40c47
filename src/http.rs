use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::handlers::{suggest, Ctx};

/// Initialize HTTP routes.
pub fn init_handlers(ctx: Arc<Ctx>) -> Router {
    // Public read-only routes.
    let pub_routes = Router::new()
        .route("/api/suggestions", get(suggest::get_suggestions))
        .route("/api/terms/{term}", get(suggest::get_term))
        .route("/api/stats", get(suggest::get_stats));

    // Writes (requires auth).
    let admin_routes = Router::new()
        .route("/api/terms", post(suggest::insert_terms))
        .route_layer(middleware::from_fn_with_state(ctx.clone(), auth_middleware));

    Router::new()
        .merge(pub_routes)
        .merge(admin_routes)
        .with_state(ctx)
}

/// BasicAuth middleware checks for admin username & password defined in ctx constants.
async fn auth_middleware(
    State(ctx): State<Arc<Ctx>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if validate_basic_auth(
        request.headers(),
        &ctx.consts.admin_username,
        &ctx.consts.admin_password,
    ) {
        return next.run(request).await;
    }

    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"wordsuggest\"")],
        "unauthorized",
    )
        .into_response()
}

/// Validate BasicAuth credentials from request headers. Empty configured
/// credentials never match.
fn validate_basic_auth(headers: &header::HeaderMap, username: &str, password: &str) -> bool {
    if username.is_empty() || password.is_empty() {
        return false;
    }

    let check = || {
        let hdr = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let decoded = base64_decode(hdr.strip_prefix("Basic ")?).ok()?;
        let (user, pass) = decoded.split_once(':')?;
        Some(user == username && pass == password)
    };
    check().unwrap_or(false)
}

fn base64_decode(s: &str) -> Result<String, ()> {
    let bytes = STANDARD.decode(s).map_err(|_| ())?;
    String::from_utf8(bytes).map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::HeaderValue;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{handlers::Consts, init};

    fn router() -> Router {
        let consts = Consts {
            normalize: false,
            admin_username: "admin".to_string(),
            admin_password: "secret".to_string(),
        };
        init_handlers(Arc::new(Ctx::new(init::init_demo(), consts)))
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, header::HeaderMap, Value) {
        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, headers, value)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_terms(body: &Value, auth: Option<&str>) -> Request<Body> {
        let mut req = Request::builder()
            .method("POST")
            .uri("/api/terms")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(a) = auth {
            req = req.header(header::AUTHORIZATION, a);
        }
        req.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_router_reads() {
        let router = router();

        let (status, _, body) = send(&router, get("/api/suggestions?q=ap&scores=true")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0], json!({"term": "app", "frequency": 15}));
        assert_eq!(body["data"].as_array().unwrap().len(), 5);

        let (_, _, body) = send(&router, get("/api/suggestions")).await;
        assert_eq!(
            body["data"],
            json!(["app", "apex", "apple", "apply", "application"])
        );

        let (status, _, body) = send(&router, get("/api/terms/apex")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!({"term": "apex", "frequency": 12}));

        let (status, _, body) = send(&router, get("/api/terms/pear")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "term not found");

        let (_, _, body) = send(&router, get("/api/stats")).await;
        assert_eq!(body["data"]["terms"], 7);
        assert_eq!(body["data"]["top_k"], 5);
    }

    #[tokio::test]
    async fn test_router_writes_require_auth() {
        let router = router();
        let body = json!({"term": "apricot", "frequency": 20});

        let (status, headers, _) = send(&router, post_terms(&body, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            headers.get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"wordsuggest\""
        );

        let wrong = format!("Basic {}", STANDARD.encode("admin:nope"));
        let (status, _, _) = send(&router, post_terms(&body, Some(&wrong))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // Nothing was written by the rejected requests.
        let (status, _, _) = send(&router, get("/api/terms/apricot")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let ok = format!("Basic {}", STANDARD.encode("admin:secret"));
        let (status, _, resp) = send(&router, post_terms(&body, Some(&ok))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp["data"], 1);

        let (_, _, resp) = send(&router, get("/api/suggestions?q=apr")).await;
        assert_eq!(resp["data"], json!(["apricot"]));
        let (_, _, resp) = send(&router, get("/api/suggestions?q=ap")).await;
        assert_eq!(resp["data"][0], "apricot");
    }

    fn headers(auth: &str) -> header::HeaderMap {
        let mut h = header::HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        h
    }

    #[test]
    fn test_validate_basic_auth() {
        let ok = format!("Basic {}", STANDARD.encode("admin:secret"));
        assert!(validate_basic_auth(&headers(&ok), "admin", "secret"));

        let wrong = format!("Basic {}", STANDARD.encode("admin:nope"));
        assert!(!validate_basic_auth(&headers(&wrong), "admin", "secret"));
        assert!(!validate_basic_auth(&headers("Bearer abc"), "admin", "secret"));
        assert!(!validate_basic_auth(&headers("Basic !!!"), "admin", "secret"));
        assert!(!validate_basic_auth(&header::HeaderMap::new(), "admin", "secret"));

        // Unconfigured credentials lock writes.
        let empty = format!("Basic {}", STANDARD.encode(":"));
        assert!(!validate_basic_auth(&headers(&empty), "", ""));
    }
}
