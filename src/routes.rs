use crate::{
    api::{
        assembler::{EMPLOYEE_ROUTE, EMPLOYEES_ROUTE},
        employee,
    },
    auth::middleware::basic_auth_middleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/employees")
            .wrap(from_fn(basic_auth_middleware))
            // /employees
            .service(
                web::resource("")
                    .name(EMPLOYEES_ROUTE)
                    .route(web::get().to(employee::all_employees))
                    .route(web::post().to(employee::new_employee)),
            )
            // /employees/{id}
            .service(
                web::resource("/{id}")
                    .name(EMPLOYEE_ROUTE)
                    .route(web::get().to(employee::one_employee))
                    .route(web::put().to(employee::replace_employee))
                    .route(web::delete().to(employee::deactivate_employee)),
            ),
    );
}
