//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{
        auth_guard, auth_guard_api, get_log_in_page, get_log_out, get_register_page, post_log_in,
        register_user,
    },
    dashboard::{get_dashboard_page, get_dashboard_summary},
    endpoints,
    not_found::get_404_not_found,
    profile::{get_profile_endpoint, get_profile_page},
    record::{
        create_record_endpoint, create_record_form_endpoint, delete_record_endpoint,
        delete_record_form_endpoint, get_edit_record_page, get_new_record_page,
        get_record_endpoint, get_records_page, list_records_endpoint, record_totals_endpoint,
        update_record_endpoint, update_record_form_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::USERS, post(register_user));

    let protected_pages = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::PROFILE_VIEW, get(get_profile_page))
        .route(
            endpoints::RECORDS_VIEW,
            get(get_records_page).post(create_record_form_endpoint),
        )
        .route(endpoints::NEW_RECORD_VIEW, get(get_new_record_page))
        .route(
            endpoints::RECORD_VIEW,
            put(update_record_form_endpoint).delete(delete_record_form_endpoint),
        )
        .route(endpoints::EDIT_RECORD_VIEW, get(get_edit_record_page))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // API clients get a 401 JSON error instead of a redirect to the log-in page.
    let protected_api = Router::new()
        .route(endpoints::PROFILE_API, get(get_profile_endpoint))
        .route(endpoints::DASHBOARD_API, get(get_dashboard_summary))
        .route(
            endpoints::RECORDS_API,
            get(list_records_endpoint).post(create_record_endpoint),
        )
        .route(endpoints::RECORD_TOTALS_API, get(record_totals_endpoint))
        .route(
            endpoints::RECORD_API,
            get(get_record_endpoint)
                .put(update_record_endpoint)
                .delete(delete_record_endpoint),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard_api));

    protected_pages
        .merge(protected_api)
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }
}
