use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::utils::mime::content_type_for;
use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, error};

/// Serve a file from the static root for any path no route claimed.
/// `/` serves the configured index document.
pub async fn static_file_handler(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let settings = &state.config.static_files;
    let relative = requested_file(uri.path(), &settings.index);
    let shown = format!("./{}", relative.display());

    if !is_contained(&relative) {
        debug!(path = %uri.path(), "Rejected path outside the static root");
        return Err(ApiError::FileNotFound(shown));
    }

    let full_path = settings.root.join(&relative);
    match fs::read(&full_path).await {
        Ok(content) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(&relative))],
            content,
        )
            .into_response()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %shown, "Static file not found");
            Err(ApiError::FileNotFound(shown))
        }
        Err(e) => {
            error!(path = %full_path.display(), error = %e, "Failed to read static file");
            Err(ApiError::Io(e.kind()))
        }
    }
}

fn requested_file(uri_path: &str, index: &str) -> PathBuf {
    match uri_path.trim_start_matches('/') {
        "" => PathBuf::from(index),
        rest => PathBuf::from(rest),
    }
}

/// Only plain relative components may appear in a served path.
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::create_test_state;
    use axum::body::Body;
    use http_body_util::BodyExt;

    async fn fetch(state: &Arc<AppState>, path: &str) -> Response {
        let uri: Uri = path.parse().unwrap();
        match static_file_handler(State(state.clone()), uri).await {
            Ok(response) => response,
            Err(e) => e.into_response(),
        }
    }

    async fn body_string(response: Response) -> String {
        let bytes = Body::new(response.into_body())
            .collect()
            .await
            .unwrap()
            .to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let (dir, state) = create_test_state().await;
        std::fs::write(dir.path().join("index.htm"), "<h1>Welcome</h1>").unwrap();

        let response = fetch(&state, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "text/html");
        assert_eq!(body_string(response).await, "<h1>Welcome</h1>");
    }

    #[tokio::test]
    async fn test_nested_file_with_mime() {
        let (dir, state) = create_test_state().await;
        std::fs::create_dir(dir.path().join("css")).unwrap();
        std::fs::write(dir.path().join("css/site.css"), "body{}").unwrap();

        let response = fetch(&state, "/css/site.css?v=2").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "text/css");
    }

    #[tokio::test]
    async fn test_unknown_extension_is_octet_stream() {
        let (dir, state) = create_test_state().await;
        std::fs::write(dir.path().join("notes.bin"), [0u8, 1, 2]).unwrap();

        let response = fetch(&state, "/notes.bin").await;
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_404_html() {
        let (_dir, state) = create_test_state().await;

        let response = fetch(&state, "/nope.html").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_string(response).await,
            "<h1>404 Not Found</h1><p>File not found: ./nope.html</p>"
        );
    }

    #[tokio::test]
    async fn test_parent_directory_is_not_served() {
        let (_dir, state) = create_test_state().await;

        let response = fetch(&state, "/../secret.txt").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_directory_read_is_server_error() {
        let (dir, state) = create_test_state().await;
        std::fs::create_dir(dir.path().join("assets")).unwrap();

        let response = fetch(&state, "/assets").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(response).await.starts_with("Server Error: "));
    }

    #[test]
    fn test_requested_file() {
        assert_eq!(requested_file("/", "index.htm"), PathBuf::from("index.htm"));
        assert_eq!(requested_file("/a/b.js", "index.htm"), PathBuf::from("a/b.js"));
    }

    #[test]
    fn test_is_contained() {
        assert!(is_contained(Path::new("a/b.css")));
        assert!(!is_contained(Path::new("../etc/passwd")));
        assert!(!is_contained(Path::new("/etc/passwd")));
    }
}
