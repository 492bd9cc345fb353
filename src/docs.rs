use crate::api::assembler::{
    CollectionLinks, EmployeeCollectionModel, EmployeeLinks, EmployeeModel, Link,
};
use crate::api::employee::EmployeeRequest;
use crate::model::{employee::Employee, status::Status};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Service API",
        version = "0.1.0",
        description = r#"
Create, read, replace and deactivate employee records.

Every employee representation carries `_links`: `self` points at the employee,
`employees` at the collection.

DELETE never removes a record, it sets the status to `INACTIVE` and requires
HTTP Basic credentials with the `ADMIN` authority. All other operations are public.

Dates use the `MM-dd-yyyy` format.
"#,
    ),
    paths(
        crate::api::employee::all_employees,
        crate::api::employee::new_employee,
        crate::api::employee::one_employee,
        crate::api::employee::replace_employee,
        crate::api::employee::deactivate_employee
    ),
    components(
        schemas(
            Employee,
            Status,
            EmployeeRequest,
            EmployeeModel,
            EmployeeLinks,
            EmployeeCollectionModel,
            CollectionLinks,
            Link
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Employee", description = "Employee management APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}
