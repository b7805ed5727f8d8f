//! Row structs bridging Diesel and the domain types.
//!
//! Rows hold raw database representations (plain strings, UUIDs); conversion
//! to validated domain types happens in the repositories so a corrupt row
//! surfaces as a store error rather than a panic.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use super::schema::{projects, submissions, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub domain: String,
    pub api_key: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: &'a str,
    pub domain: &'a str,
    pub api_key: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a project; `None` fields are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = projects)]
pub struct ProjectRowChanges<'a> {
    pub name: Option<&'a str>,
    pub domain: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubmissionRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub form_id: String,
    pub data: Value,
    pub page_url: String,
    pub user_agent: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = submissions)]
pub struct NewSubmissionRow<'a> {
    pub id: Uuid,
    pub project_id: Uuid,
    pub form_id: &'a str,
    pub data: &'a Value,
    pub page_url: &'a str,
    pub user_agent: &'a str,
    pub submitted_at: DateTime<Utc>,
}
