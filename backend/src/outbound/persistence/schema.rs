//! Diesel table definitions; must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts. `username` and `email` carry unique constraints.
    users (id) {
        id -> Int8,
        username -> Varchar,
        email -> Varchar,
        /// PHC-format PBKDF2 digest.
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Notes; `user_id` cascades on account deletion.
    notes (id) {
        id -> Int8,
        user_id -> Int8,
        title -> Varchar,
        content -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(notes -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(notes, users);
