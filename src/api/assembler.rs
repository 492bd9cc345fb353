use actix_web::{FromRequest, HttpRequest, dev::Payload, error::UrlGenerationError};
use futures::future::{Ready, ready};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::employee::Employee;

/// Route name of the employee collection resource.
pub const EMPLOYEES_ROUTE: &str = "employees";
/// Route name of a single employee resource.
pub const EMPLOYEE_ROUTE: &str = "employee";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Link {
    #[schema(example = "http://localhost:8080/employees/1")]
    pub href: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub employees: Link,
}

/// An employee plus its navigation links.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeModel {
    #[serde(flatten)]
    pub employee: Employee,
    #[serde(rename = "_links")]
    pub links: EmployeeLinks,
}

impl EmployeeModel {
    pub fn self_href(&self) -> &str {
        &self.links.self_link.href
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeCollectionModel {
    pub employees: Vec<EmployeeModel>,
    #[serde(rename = "_links")]
    pub links: CollectionLinks,
}

/// Wraps employees with links resolved through the named employee routes.
#[derive(Debug, Clone)]
pub struct EmployeeModelAssembler {
    req: HttpRequest,
}

impl EmployeeModelAssembler {
    pub fn new(req: HttpRequest) -> Self {
        Self { req }
    }

    fn collection_link(&self) -> Result<Link, UrlGenerationError> {
        let url = self.req.url_for_static(EMPLOYEES_ROUTE)?;
        Ok(Link { href: url.into() })
    }

    pub fn to_model(&self, employee: Employee) -> Result<EmployeeModel, UrlGenerationError> {
        let employees = self.collection_link()?;
        // Unsaved employees have no resource of their own yet.
        let self_link = match employee.id {
            Some(id) => Link {
                href: self.req.url_for(EMPLOYEE_ROUTE, [id.to_string()])?.into(),
            },
            None => employees.clone(),
        };

        Ok(EmployeeModel {
            employee,
            links: EmployeeLinks { self_link, employees },
        })
    }

    pub fn to_collection_model(
        &self,
        employees: Vec<Employee>,
    ) -> Result<EmployeeCollectionModel, UrlGenerationError> {
        Ok(EmployeeCollectionModel {
            employees: employees
                .into_iter()
                .map(|e| self.to_model(e))
                .collect::<Result<_, _>>()?,
            links: CollectionLinks {
                self_link: self.collection_link()?,
            },
        })
    }
}

impl FromRequest for EmployeeModelAssembler {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(EmployeeModelAssembler::new(req.clone())))
    }
}
