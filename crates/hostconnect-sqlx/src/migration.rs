// Schema for the SQL store.
//
// Timestamps are RFC 3339 text and booleans are 0/1 integers so the same DDL
// runs on SQLite and Postgres.

/// `CREATE TABLE` statements, in dependency order.
pub const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    name TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)"#,
    r#"CREATE TABLE IF NOT EXISTS stripe_accounts (
    id TEXT PRIMARY KEY,
    access_token TEXT NOT NULL,
    refresh_token TEXT NOT NULL,
    token_type TEXT NOT NULL,
    stripe_publishable_key TEXT NOT NULL,
    stripe_user_id TEXT NOT NULL,
    scope TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)"#,
    r#"CREATE TABLE IF NOT EXISTS groups (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    currency TEXT NOT NULL,
    is_host BIGINT NOT NULL DEFAULT 0,
    stripe_account_id TEXT REFERENCES stripe_accounts(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)"#,
    r#"CREATE TABLE IF NOT EXISTS memberships (
    id TEXT PRIMARY KEY,
    group_id TEXT NOT NULL REFERENCES groups(id),
    user_id TEXT NOT NULL REFERENCES users(id),
    role TEXT NOT NULL,
    created_at TEXT NOT NULL
)"#,
    "CREATE INDEX IF NOT EXISTS idx_groups_stripe_account_id ON groups(stripe_account_id)",
    "CREATE INDEX IF NOT EXISTS idx_memberships_group_id ON memberships(group_id)",
];

/// The whole schema as one script, for `hostconnect migrate --print`.
pub fn schema_sql() -> String {
    SCHEMA
        .iter()
        .map(|stmt| format!("{stmt};"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_come_after_stripe_accounts() {
        let accounts = SCHEMA.iter().position(|s| s.contains("TABLE IF NOT EXISTS stripe_accounts"));
        let groups = SCHEMA.iter().position(|s| s.contains("TABLE IF NOT EXISTS groups"));
        assert!(accounts.unwrap() < groups.unwrap());
    }

    #[test]
    fn schema_sql_terminates_statements() {
        let sql = schema_sql();
        assert_eq!(sql.matches(';').count(), SCHEMA.len());
    }
}
