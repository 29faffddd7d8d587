use actix_web::http::header;
use actix_web::{web, HttpResponse};
use log::{debug, error};
use serde::Deserialize;
use serde_json::json;

use crate::interfaces::{
    convert_merged, convert_url, preview, ConvertError, ConvertOutput, SubconverterConfigBuilder,
};
use crate::models::SubconverterTarget;
use crate::settings::{DefaultOptions, Settings};
use crate::utils::http::HttpFetcher;

/// Shared state of every worker
pub struct AppState {
    pub fetcher: HttpFetcher,
}

impl AppState {
    pub fn new(fetcher: HttpFetcher) -> Self {
        AppState { fetcher }
    }
}

/// Query parameters for single subscription conversion
#[derive(Deserialize, Debug, Default, Clone)]
pub struct ConvertQuery {
    /// Target format
    pub target: Option<String>,
    /// Subscription URL
    pub url: Option<String>,
    /// Add region emoji (`1`/`true`)
    pub emoji: Option<String>,
    /// Enable UDP on structured formats
    pub udp: Option<String>,
    /// Skip certificate verification
    pub scert: Option<String>,
    /// Sort nodes by name
    pub sort: Option<String>,
    /// Include keywords, separated by '|'
    pub include: Option<String>,
    /// Exclude keywords, separated by '|'
    pub exclude: Option<String>,
    /// Rename rules, one `from->to` per line
    pub rename: Option<String>,
}

/// JSON body of a merge request
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    #[serde(default)]
    pub urls: Vec<String>,
    pub target: Option<String>,
    pub dedupe: Option<bool>,
    pub emoji: Option<bool>,
    pub sort: Option<bool>,
    pub udp: Option<bool>,
    pub skip_cert: Option<bool>,
    #[serde(default)]
    pub include: String,
    #[serde(default)]
    pub exclude: String,
    #[serde(default)]
    pub rename: String,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct MergeQuery {
    /// `json` wraps the output together with the merge summary
    pub format: Option<String>,
}

/// JSON body of a preview request
#[derive(Deserialize, Debug, Default, Clone)]
pub struct PreviewRequest {
    #[serde(default)]
    pub urls: Vec<String>,
    pub dedupe: Option<bool>,
}

/// `1` and `true` are truthy, any other value is false, absence keeps
/// the default
fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value {
        Some(v) => v == "1" || v.eq_ignore_ascii_case("true"),
        None => default,
    }
}

fn error_response(err: &ConvertError) -> HttpResponse {
    match err {
        ConvertError::InvalidTarget(_) => HttpResponse::BadRequest().json(json!({
            "error": err.to_string(),
            "code": err.code(),
            "supported": SubconverterTarget::supported(),
        })),
        ConvertError::MissingUrl | ConvertError::MissingSources => {
            HttpResponse::BadRequest().json(json!({
                "error": err.to_string(),
                "code": err.code(),
            }))
        }
        ConvertError::Fetch { .. } => {
            error!("{}", err);
            HttpResponse::BadGateway().json(json!({
                "error": err.to_string(),
                "code": err.code(),
            }))
        }
    }
}

fn output_response(output: ConvertOutput, filename: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(format!("{}; charset=utf-8", output.mime_type))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}.{}\"", filename, output.extension),
        ))
        .body(output.content)
}

/// Handler for single subscription conversion
pub async fn convert_handler(
    query: web::Query<ConvertQuery>,
    app_state: web::Data<AppState>,
) -> HttpResponse {
    debug!("Convert request: {:?}", query);
    let defaults: DefaultOptions = Settings::current().defaults;

    let target = query.target.as_deref().unwrap_or("");
    let config = match SubconverterConfigBuilder::new()
        .target_from_str(target)
        .add_emoji(parse_flag(query.emoji.as_deref(), defaults.emoji))
        .udp(parse_flag(query.udp.as_deref(), defaults.udp))
        .skip_cert_verify(parse_flag(query.scert.as_deref(), defaults.skip_cert_verify))
        .sort(parse_flag(query.sort.as_deref(), defaults.sort))
        .include_remarks_from_str(query.include.as_deref().unwrap_or(""))
        .exclude_remarks_from_str(query.exclude.as_deref().unwrap_or(""))
        .rename_from_str(query.rename.as_deref().unwrap_or(""))
        .build()
    {
        Ok(config) => config,
        Err(e) => return error_response(&e),
    };

    let url = query.url.as_deref().unwrap_or("");
    match convert_url(&app_state.fetcher, url, &config).await {
        Ok(output) => output_response(output, config.target.as_str()),
        Err(e) => error_response(&e),
    }
}

/// Handler for merging several subscriptions
pub async fn merge_handler(
    query: web::Query<MergeQuery>,
    body: web::Json<MergeRequest>,
    app_state: web::Data<AppState>,
) -> HttpResponse {
    let request = body.into_inner();
    if request.urls.iter().all(|url| url.trim().is_empty()) {
        return error_response(&ConvertError::MissingSources);
    }

    let defaults = Settings::current().defaults;
    let config = match SubconverterConfigBuilder::new()
        .target_from_str(request.target.as_deref().unwrap_or(""))
        .urls(request.urls)
        .dedupe(request.dedupe.unwrap_or(defaults.dedupe))
        .add_emoji(request.emoji.unwrap_or(defaults.emoji))
        .sort(request.sort.unwrap_or(defaults.sort))
        .udp(request.udp.unwrap_or(defaults.udp))
        .skip_cert_verify(request.skip_cert.unwrap_or(defaults.skip_cert_verify))
        .include_remarks_from_str(&request.include)
        .exclude_remarks_from_str(&request.exclude)
        .rename_from_str(&request.rename)
        .build()
    {
        Ok(config) => config,
        Err(e) => return error_response(&e),
    };

    let merged = match convert_merged(&app_state.fetcher, &config).await {
        Ok(merged) => merged,
        Err(e) => return error_response(&e),
    };

    if query.format.as_deref() == Some("json") {
        return HttpResponse::Ok().json(json!({
            "success": true,
            "summary": merged.summary,
            "subscriptions": merged.subscriptions,
            "output": merged.output.content,
        }));
    }

    output_response(merged.output, &format!("merged-{}", config.target))
}

/// Handler for listing merged nodes without converting them
pub async fn preview_handler(
    body: web::Json<PreviewRequest>,
    app_state: web::Data<AppState>,
) -> HttpResponse {
    let dedupe = body.dedupe.unwrap_or(Settings::current().defaults.dedupe);
    match preview(&app_state.fetcher, &body.urls, dedupe).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(&e),
    }
}

pub async fn index_handler() -> &'static str {
    "submerge is running!"
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index_handler))
        .route("/sub", web::get().to(convert_handler))
        .route("/api/convert", web::get().to(convert_handler))
        .route("/api/merge", web::post().to(merge_handler))
        .route("/api/merge/preview", web::post().to(preview_handler));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FetchSettings;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;

    fn state() -> web::Data<AppState> {
        let fetcher = HttpFetcher::new(&FetchSettings::default()).unwrap();
        web::Data::new(AppState::new(fetcher))
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("1"), false));
        assert!(parse_flag(Some("TRUE"), false));
        assert!(!parse_flag(Some("0"), true));
        assert!(!parse_flag(Some("yes"), true));
        assert!(parse_flag(None, true));
    }

    #[actix_web::test]
    async fn test_invalid_target_lists_supported() {
        let app = test::init_service(App::new().app_data(state()).configure(config)).await;
        let req = test::TestRequest::get()
            .uri("/api/convert?target=mellow&url=http%3A%2F%2Fexample.com")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "invalid_target");
        let supported = body["supported"].as_array().unwrap();
        assert!(supported.iter().any(|t| t == "clash"));
        assert!(supported.iter().any(|t| t == "nekobox"));
    }

    #[actix_web::test]
    async fn test_missing_url() {
        let app = test::init_service(App::new().app_data(state()).configure(config)).await;
        let req = test::TestRequest::get().uri("/sub?target=clash").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "missing_url");
    }

    #[actix_web::test]
    async fn test_merge_requires_urls() {
        let app = test::init_service(App::new().app_data(state()).configure(config)).await;
        let req = test::TestRequest::post()
            .uri("/api/merge")
            .set_json(json!({"urls": [], "target": "clash"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/merge/preview")
            .set_json(json!({"urls": ["  "]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_index() {
        let app = test::init_service(App::new().app_data(state()).configure(config)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "submerge is running!");
    }
}
