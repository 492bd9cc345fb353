use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::{Logger, NormalizePath},
    web::Data,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{auth::security::WebSecurity, docs::ApiDoc, repository::EmployeeRepository, routes};

/// The full application: logging, path normalization, API docs and the
/// secured employee routes. Shared by the server and the HTTP tests.
pub fn build_app(
    repository: Data<EmployeeRepository>,
    security: Data<WebSecurity>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Logger::default())
        .wrap(NormalizePath::trim())
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard so JS/CSS assets resolve
                .url("/api-doc/openapi.json", ApiDoc::openapi()),
        )
        .app_data(repository)
        .app_data(security)
        .configure(routes::configure)
}
