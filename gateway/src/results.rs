use std::fs;
use std::path::{Path as StdPath, PathBuf};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::state::AppState;

/// `GET /analysis/results/<slug>`: an HTML listing of every file under the
/// scenario's output directory (which nests one subdirectory per demand
/// metric run for that scenario). Path-traversal refusal follows the same
/// canonicalize-and-`starts_with` check the file endpoint below uses.
pub async fn list_results(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let root = state.pipeline_config.output_root.clone();
    let scenario_dir = root.join(&slug);

    let canonical_root = match fs::canonicalize(&root) {
        Ok(p) => p,
        Err(_) => return (StatusCode::NOT_FOUND, "no results directory configured").into_response(),
    };
    let canonical_scenario = match fs::canonicalize(&scenario_dir) {
        Ok(p) if p.starts_with(&canonical_root) => p,
        _ => return (StatusCode::NOT_FOUND, "unknown scenario").into_response(),
    };

    let mut files = Vec::new();
    collect_files(&canonical_scenario, &canonical_scenario, &mut files);
    files.sort();

    let mut body = format!("<html><body><h1>Results: {slug}</h1><ul>\n");
    for relpath in &files {
        body.push_str(&format!(
            "<li><a href=\"/analysis/files/{slug}/{relpath}\">{relpath}</a></li>\n"
        ));
    }
    body.push_str("</ul></body></html>");
    Html(body).into_response()
}

fn collect_files(root: &StdPath, dir: &StdPath, out: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else if let Ok(rel) = path.strip_prefix(root) {
            out.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
}

/// `GET /analysis/files/<slug>/<relpath>`: streams a single artifact,
/// refusing any path that canonicalizes outside the scenario directory.
pub async fn get_file(
    State(state): State<AppState>,
    Path((slug, relpath)): Path<(String, String)>,
) -> Response {
    let root = state.pipeline_config.output_root.clone();
    let scenario_dir = root.join(&slug);

    let canonical_scenario = match fs::canonicalize(&scenario_dir) {
        Ok(p) => p,
        Err(_) => return (StatusCode::NOT_FOUND, "unknown scenario").into_response(),
    };

    let target: PathBuf = scenario_dir.join(&relpath);
    match fs::canonicalize(&target) {
        Ok(canonical) if canonical.starts_with(&canonical_scenario) => match fs::read(&canonical) {
            Ok(bytes) => {
                let content_type = guess_content_type(&canonical);
                Response::builder()
                    .status(StatusCode::OK)
                    .header("content-type", content_type)
                    .body(bytes.into())
                    .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
            }
            Err(_) => (StatusCode::NOT_FOUND, "file not readable").into_response(),
        },
        Ok(_) => (StatusCode::FORBIDDEN, "invalid path").into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

fn guess_content_type(path: &StdPath) -> &'static str {
    match path.extension().and_then(|s| s.to_str()) {
        Some("png") => "image/png",
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        _ => "text/plain",
    }
}
