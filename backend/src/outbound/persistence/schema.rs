//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Accounts for candidates, lecturers, and admins.
    users (id) {
        id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Stored lower-case; unique.
        email -> Varchar,
        password_hash -> Text,
        /// `candidate`, `lecturer`, or `admin`.
        role -> Varchar,
        is_blocked -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per candidate once availability or skills are saved.
    candidate_profiles (user_id) {
        user_id -> Uuid,
        availability -> Nullable<Varchar>,
        skills -> Array<Text>,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    academic_credentials (id) {
        id -> Uuid,
        candidate_id -> Uuid,
        qualification -> Varchar,
        institution -> Varchar,
        year -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    previous_roles (id) {
        id -> Uuid,
        candidate_id -> Uuid,
        position -> Varchar,
        organisation -> Varchar,
        start_date -> Date,
        end_date -> Nullable<Date>,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    courses (id) {
        id -> Uuid,
        /// Unique, upper-case.
        code -> Varchar,
        name -> Varchar,
        semester -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    lecturer_courses (lecturer_id, course_id) {
        lecturer_id -> Uuid,
        course_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Unique per (candidate, course, session type); rankings unique per
    /// (course, session type).
    candidate_applications (id) {
        id -> Uuid,
        candidate_id -> Uuid,
        course_id -> Uuid,
        /// `tutor` or `lab_assistant`.
        session_type -> Varchar,
        /// `pending`, `accepted`, or `rejected`.
        status -> Varchar,
        ranking -> Nullable<Int4>,
        comment -> Nullable<Text>,
        availability -> Varchar,
        skills -> Array<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(candidate_profiles -> users (user_id));
diesel::joinable!(academic_credentials -> users (candidate_id));
diesel::joinable!(previous_roles -> users (candidate_id));
diesel::joinable!(lecturer_courses -> courses (course_id));
diesel::joinable!(lecturer_courses -> users (lecturer_id));
diesel::joinable!(candidate_applications -> courses (course_id));
diesel::joinable!(candidate_applications -> users (candidate_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    candidate_profiles,
    academic_credentials,
    previous_roles,
    courses,
    lecturer_courses,
    candidate_applications,
);
