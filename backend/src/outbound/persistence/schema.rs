//! Diesel schema definitions for the PostgreSQL backend.
//!
//! Kept in step with the SQL under `migrations/`.

diesel::table! {
    users (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    projects (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Text,
        domain -> Text,
        api_key -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    submissions (id) {
        id -> Uuid,
        project_id -> Uuid,
        form_id -> Text,
        data -> Jsonb,
        page_url -> Text,
        user_agent -> Text,
        submitted_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> users (owner_id));
diesel::joinable!(submissions -> projects (project_id));

diesel::allow_tables_to_appear_in_same_query!(users, projects, submissions);
