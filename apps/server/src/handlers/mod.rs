//! Request handlers

pub mod auth;
pub mod company;
pub mod draft;
pub mod employee;
pub mod health;
pub mod order;
pub mod report;

pub use auth::{current_session, login, logout};
pub use company::{
    create_company, delete_company, get_company, list_companies, set_company_status,
    update_company,
};
pub use draft::{
    add_draft_item, add_draft_pack, get_draft, remove_draft_item, remove_draft_pack,
    rename_draft_item, reset_draft, select_draft_company, submit_draft, update_draft_meta,
    update_draft_pack,
};
pub use employee::{
    create_employee, delete_employee, get_employee, list_employees, set_employee_status,
    update_employee,
};
pub use health::health_check;
pub use order::{delete_order, get_order, list_orders, set_order_status};
pub use report::{dashboard_report, monthly_report};
