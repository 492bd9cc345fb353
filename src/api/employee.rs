use crate::{
    api::{
        assembler::{EmployeeModel, EmployeeModelAssembler},
        error::ApiError,
    },
    auth::auth::AuthUser,
    model::{
        employee::{Employee, date_format},
        status::Status,
    },
    repository::EmployeeRepository,
};
use actix_web::{HttpResponse, http::header, web};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};
use utoipa::ToSchema;

/// Body of POST and PUT. `id` and `status` are not accepted from clients.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[schema(example = "Marc")]
    pub first_name: String,
    #[schema(example = "J", value_type = String)]
    pub middle_initial: char,
    #[schema(example = "Christensen")]
    pub last_name: String,
    #[serde(with = "date_format")]
    #[schema(example = "06-18-1996", value_type = String)]
    pub date_of_birth: NaiveDate,
    #[serde(with = "date_format")]
    #[schema(example = "01-15-2022", value_type = String)]
    pub date_of_employment: NaiveDate,
}

impl EmployeeRequest {
    pub fn into_employee(self) -> Employee {
        Employee::new(
            self.first_name,
            self.middle_initial,
            self.last_name,
            self.date_of_birth,
            self.date_of_employment,
        )
    }

    /// Overwrites the editable fields. Status is left as it is.
    pub fn apply_to(self, employee: &mut Employee) {
        employee.first_name = self.first_name;
        employee.middle_initial = self.middle_initial;
        employee.last_name = self.last_name;
        employee.date_of_birth = self.date_of_birth;
        employee.date_of_employment = self.date_of_employment;
    }
}

fn created(model: EmployeeModel) -> HttpResponse {
    HttpResponse::Created()
        .insert_header((header::LOCATION, model.self_href().to_owned()))
        .json(model)
}

/// List employees
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "Every stored employee, inactive ones included", body = EmployeeCollectionModel)
    ),
    tag = "Employee"
)]
pub async fn all_employees(
    repository: web::Data<EmployeeRepository>,
    assembler: EmployeeModelAssembler,
) -> Result<HttpResponse, ApiError> {
    let employees = repository.find_all().await?;
    debug!(count = employees.len(), "Listing employees");

    Ok(HttpResponse::Ok().json(assembler.to_collection_model(employees)?))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/employees",
    request_body = EmployeeRequest,
    responses(
        (status = 201, description = "Employee created; Location points at the new resource", body = EmployeeModel),
        (status = 400, description = "Malformed body")
    ),
    tag = "Employee"
)]
pub async fn new_employee(
    repository: web::Data<EmployeeRepository>,
    assembler: EmployeeModelAssembler,
    payload: web::Json<EmployeeRequest>,
) -> Result<HttpResponse, ApiError> {
    let saved = repository.save(payload.into_inner().into_employee()).await?;
    info!(employee = %saved, "Employee created");

    Ok(created(assembler.to_model(saved)?))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeModel),
        (status = 404, description = "Employee not found", body = String, example = json!("Could not find employee 9"))
    ),
    tag = "Employee"
)]
pub async fn one_employee(
    repository: web::Data<EmployeeRepository>,
    assembler: EmployeeModelAssembler,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let employee = repository.find_by_id(id).await?.ok_or(ApiError::NotFound(id))?;

    Ok(HttpResponse::Ok().json(assembler.to_model(employee)?))
}

/// Replace Employee
///
/// Updates the employee stored under `id`, or creates one with exactly that id.
#[utoipa::path(
    put,
    path = "/employees/{id}",
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    request_body = EmployeeRequest,
    responses(
        (status = 201, description = "Employee replaced or created", body = EmployeeModel),
        (status = 400, description = "Malformed body")
    ),
    tag = "Employee"
)]
pub async fn replace_employee(
    repository: web::Data<EmployeeRepository>,
    assembler: EmployeeModelAssembler,
    path: web::Path<i64>,
    payload: web::Json<EmployeeRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let request = payload.into_inner();

    let employee = match repository.find_by_id(id).await? {
        Some(mut existing) => {
            request.apply_to(&mut existing);
            existing
        }
        None => {
            debug!(employee_id = id, "No employee to replace, inserting");
            let mut fresh = request.into_employee();
            fresh.id = Some(id);
            fresh
        }
    };

    let updated = repository.save(employee).await?;
    info!(employee = %updated, "Employee replaced");

    Ok(created(assembler.to_model(updated)?))
}

/// Deactivate Employee
///
/// Soft delete: the record stays stored and readable, with status INACTIVE.
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee set to INACTIVE"),
        (status = 401, description = "Missing or bad credentials", body = String),
        (status = 404, description = "Employee not found", body = String, example = json!("Could not find employee 9"))
    ),
    tag = "Employee",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn deactivate_employee(
    user: AuthUser,
    repository: web::Data<EmployeeRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let mut employee = repository.find_by_id(id).await?.ok_or(ApiError::NotFound(id))?;

    employee.status = Status::Inactive;
    repository.save(employee).await?;
    info!(employee_id = id, by = %user.username, "Employee set to INACTIVE");

    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use super::EmployeeRequest;
    use crate::{
        app::build_app,
        auth::security::{SecurityConfig, WebSecurity},
        db::init_db,
        repository::EmployeeRepository,
        seed,
    };
    use actix_web::{
        http::{StatusCode, header},
        test,
        web::Data,
    };
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use serde_json::{Value, json};

    async fn repository(seeded: bool) -> EmployeeRepository {
        let repo = EmployeeRepository::new(init_db("sqlite::memory:", 1).await.unwrap());
        if seeded {
            seed::load_database(&repo).await.unwrap();
        }
        repo
    }

    macro_rules! app {
        ($repo:expr) => {
            test::init_service(build_app(
                Data::new($repo.clone()),
                Data::new(WebSecurity::build(SecurityConfig::new("admin", "admin", "admin")).unwrap()),
            ))
            .await
        };
    }

    fn basic(user: &str, password: &str) -> (header::HeaderName, String) {
        let token = STANDARD.encode(format!("{user}:{password}"));
        (header::AUTHORIZATION, format!("Basic {token}"))
    }

    fn body() -> Value {
        json!({
            "firstName": "Ada",
            "middleInitial": "K",
            "lastName": "Lovelace",
            "dateOfBirth": "12-10-1985",
            "dateOfEmployment": "03-01-2021"
        })
    }

    #[actix_web::test]
    async fn lists_seeded_employees_with_links() {
        let repo = repository(true).await;
        let app = app!(repo);

        let req = test::TestRequest::get().uri("/employees").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let value: Value = test::read_body_json(resp).await;
        let employees = value["employees"].as_array().unwrap();
        assert_eq!(employees.len(), 3);

        let names: Vec<String> = employees
            .iter()
            .map(|e| {
                format!(
                    "{} {} {}",
                    e["firstName"].as_str().unwrap(),
                    e["middleInitial"].as_str().unwrap(),
                    e["lastName"].as_str().unwrap()
                )
            })
            .collect();
        assert_eq!(names, ["Marc J Christensen", "Bob A Smith", "Test C Employee"]);
        assert!(employees.iter().all(|e| e["status"] == "ACTIVE"));
        assert_eq!(employees[0]["dateOfBirth"], "06-18-1996");

        assert!(value["_links"]["self"]["href"].as_str().unwrap().ends_with("/employees"));
        assert!(
            employees[1]["_links"]["self"]["href"]
                .as_str()
                .unwrap()
                .ends_with("/employees/2")
        );
    }

    #[actix_web::test]
    async fn missing_employee_is_plain_404() {
        let repo = repository(true).await;
        let app = app!(repo);

        let req = test::TestRequest::get().uri("/employees/99").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = test::read_body(resp).await;
        assert_eq!(body, "Could not find employee 99");
    }

    #[actix_web::test]
    async fn create_returns_location_of_new_employee() {
        let repo = repository(true).await;
        let app = app!(repo);

        let req = test::TestRequest::post().uri("/employees").set_json(body()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap().to_owned();
        assert!(location.ends_with("/employees/4"));

        let value: Value = test::read_body_json(resp).await;
        assert_eq!(value["id"], 4);
        assert_eq!(value["status"], "ACTIVE");
        assert_eq!(value["dateOfEmployment"], "03-01-2021");
        assert_eq!(value["_links"]["self"]["href"], location.as_str());
        assert!(value["_links"]["employees"]["href"].as_str().unwrap().ends_with("/employees"));

        let req = test::TestRequest::get().uri("/employees/4").to_request();
        let value: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(value["lastName"], "Lovelace");
    }

    #[actix_web::test]
    async fn create_ignores_client_status_and_rejects_bad_dates() {
        let repo = repository(false).await;
        let app = app!(repo);

        let mut payload = body();
        payload["status"] = json!("INACTIVE");
        let req = test::TestRequest::post().uri("/employees").set_json(payload).to_request();
        let value: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(value["status"], "ACTIVE");

        let mut payload = body();
        payload["dateOfBirth"] = json!("1985-12-10");
        let req = test::TestRequest::post().uri("/employees").set_json(payload).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn put_on_unknown_id_creates_it() {
        let repo = repository(true).await;
        let app = app!(repo);

        let req = test::TestRequest::put().uri("/employees/42").set_json(body()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert!(
            resp.headers()
                .get(header::LOCATION)
                .unwrap()
                .to_str()
                .unwrap()
                .ends_with("/employees/42")
        );

        let value: Value = test::read_body_json(resp).await;
        assert_eq!(value["id"], 42);
        assert_eq!(value["status"], "ACTIVE");
        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[actix_web::test]
    async fn put_replaces_fields_but_not_status() {
        let repo = repository(true).await;
        let app = app!(repo);

        let req = test::TestRequest::delete()
            .uri("/employees/2")
            .insert_header(basic("admin", "admin"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::put().uri("/employees/2").set_json(body()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let value: Value = test::read_body_json(resp).await;
        assert_eq!(value["id"], 2);
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["dateOfBirth"], "12-10-1985");
        assert_eq!(value["status"], "INACTIVE");
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[actix_web::test]
    async fn delete_requires_credentials() {
        let repo = repository(true).await;
        let app = app!(repo);

        let req = test::TestRequest::delete().uri("/employees/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"admin\""
        );
        let body = test::read_body(resp).await;
        assert_eq!(
            body,
            "HTTP Status 401 - Full authentication is required to access this resource\n"
        );

        let req = test::TestRequest::delete()
            .uri("/employees/1")
            .insert_header(basic("admin", "wrong"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(test::read_body(resp).await, "HTTP Status 401 - Bad credentials\n");

        let employee = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(employee.status, crate::model::status::Status::Active);
    }

    #[actix_web::test]
    async fn delete_as_admin_deactivates_but_keeps_record_visible() {
        let repo = repository(true).await;
        let app = app!(repo);

        let req = test::TestRequest::delete()
            .uri("/employees/1")
            .insert_header(basic("admin", "admin"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(test::read_body(resp).await.is_empty());

        let req = test::TestRequest::get().uri("/employees/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let value: Value = test::read_body_json(resp).await;
        assert_eq!(value["status"], "INACTIVE");

        let req = test::TestRequest::get().uri("/employees").to_request();
        let value: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(value["employees"].as_array().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn delete_unknown_id_is_404_for_admin() {
        let repo = repository(true).await;
        let app = app!(repo);

        let req = test::TestRequest::delete()
            .uri("/employees/77")
            .insert_header(basic("admin", "admin"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(test::read_body(resp).await, "Could not find employee 77");
    }

    #[actix_web::test]
    async fn bad_credentials_fail_even_on_public_routes() {
        let repo = repository(true).await;
        let app = app!(repo);

        let req = test::TestRequest::get()
            .uri("/employees")
            .insert_header(basic("admin", "wrong"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/employees")
            .insert_header(basic("admin", "admin"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[::core::prelude::v1::test]
    fn request_dates_must_be_month_day_year() {
        let mut payload = body();
        assert!(serde_json::from_value::<EmployeeRequest>(payload.clone()).is_ok());

        payload["dateOfEmployment"] = json!("2021-03-01");
        assert!(serde_json::from_value::<EmployeeRequest>(payload).is_err());
    }

    #[actix_web::test]
    async fn trailing_slash_is_the_same_route() {
        let repo = repository(true).await;
        let app = app!(repo);

        let req = test::TestRequest::get().uri("/employees/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let value: Value = test::read_body_json(resp).await;
        assert_eq!(value["employees"].as_array().unwrap().len(), 3);

        let req = test::TestRequest::get().uri("/employees/3/").to_request();
        let value: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(value["firstName"], "Test");
    }

    #[actix_web::test]
    async fn trailing_slash_delete_is_still_challenged() {
        let repo = repository(true).await;
        let app = app!(repo);

        let req = test::TestRequest::delete().uri("/employees/1/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"admin\""
        );

        let employee = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(employee.status, crate::model::status::Status::Active);
    }

    #[actix_web::test]
    async fn percent_encoded_delete_path_is_challenged() {
        let repo = repository(true).await;
        let app = app!(repo);

        let req = test::TestRequest::delete().uri("/%65mployees/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"admin\""
        );
        assert_eq!(
            test::read_body(resp).await,
            "HTTP Status 401 - Full authentication is required to access this resource\n"
        );

        let req = test::TestRequest::delete()
            .uri("/%65mployees/1")
            .insert_header(basic("admin", "admin"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn malformed_basic_header_is_rejected() {
        let repo = repository(true).await;
        let app = app!(repo);

        let req = test::TestRequest::delete()
            .uri("/employees/1")
            .insert_header((header::AUTHORIZATION, "Basic %%%not-base64"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"admin\""
        );
        assert_eq!(
            test::read_body(resp).await,
            "HTTP Status 401 - Invalid basic authentication token\n"
        );

        let no_colon = format!("Basic {}", STANDARD.encode("admin"));
        let req = test::TestRequest::get()
            .uri("/employees")
            .insert_header((header::AUTHORIZATION, no_colon))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            test::read_body(resp).await,
            "HTTP Status 401 - Invalid basic authentication token\n"
        );
    }
}
