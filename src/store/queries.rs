pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    telegram_id BIGINT NOT NULL UNIQUE,
    surname TEXT NOT NULL,
    home_latitude DOUBLE PRECISION NOT NULL,
    home_longitude DOUBLE PRECISION NOT NULL
);
"#;

pub const CREATE_TODAY_CONTROL_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS today_control (
    telegram_id BIGINT PRIMARY KEY REFERENCES users (telegram_id) ON DELETE CASCADE,
    latitude DOUBLE PRECISION NOT NULL,
    longitude DOUBLE PRECISION NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

pub const CREATE_ALTERNATIVE_LOCATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS alternative_locations (
    id UUID PRIMARY KEY,
    telegram_id BIGINT NOT NULL REFERENCES users (telegram_id) ON DELETE CASCADE,
    latitude DOUBLE PRECISION NOT NULL,
    longitude DOUBLE PRECISION NOT NULL,
    comment TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

pub const CREATE_QUESTIONNAIRE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS questionnaire (
    telegram_id BIGINT PRIMARY KEY REFERENCES users (telegram_id) ON DELETE CASCADE,
    surname TEXT NOT NULL,
    will_feed BOOLEAN NOT NULL
);
"#;

pub const SELECT_USER_BY_TELEGRAM_ID: &str = r#"
SELECT id, telegram_id, surname, home_latitude, home_longitude
FROM users WHERE telegram_id = $1;
"#;

pub const SELECT_ALL_USERS: &str = r#"
SELECT id, telegram_id, surname, home_latitude, home_longitude
FROM users ORDER BY id;
"#;

pub const INSERT_USER: &str = r#"
INSERT INTO users (telegram_id, surname, home_latitude, home_longitude)
VALUES ($1, $2, $3, $4);
"#;

pub const DELETE_USER: &str = r#"
DELETE FROM users WHERE telegram_id = $1;
"#;

pub const SELECT_TODAY_CONTROL: &str = r#"
SELECT telegram_id, latitude, longitude, created_at
FROM today_control WHERE telegram_id = $1;
"#;

pub const SELECT_ALL_TODAY_CONTROLS: &str = r#"
SELECT telegram_id, latitude, longitude, created_at
FROM today_control ORDER BY created_at;
"#;

pub const INSERT_TODAY_CONTROL: &str = r#"
INSERT INTO today_control (telegram_id, latitude, longitude)
VALUES ($1, $2, $3);
"#;

pub const DELETE_ALL_TODAY_CONTROLS: &str = r#"
DELETE FROM today_control;
"#;

pub const SELECT_ALTERNATIVE_LOCATIONS: &str = r#"
SELECT id, telegram_id, latitude, longitude, comment, created_at
FROM alternative_locations WHERE telegram_id = $1 ORDER BY created_at, id;
"#;

pub const INSERT_ALTERNATIVE_LOCATION: &str = r#"
INSERT INTO alternative_locations (id, telegram_id, latitude, longitude, comment)
VALUES ($1, $2, $3, $4, $5);
"#;

pub const DELETE_ALTERNATIVE_LOCATION: &str = r#"
DELETE FROM alternative_locations WHERE id = $1;
"#;

pub const SELECT_QUESTIONNAIRE: &str = r#"
SELECT telegram_id, surname, will_feed
FROM questionnaire WHERE telegram_id = $1;
"#;

pub const SELECT_ALL_QUESTIONNAIRES: &str = r#"
SELECT telegram_id, surname, will_feed
FROM questionnaire ORDER BY telegram_id;
"#;

pub const INSERT_QUESTIONNAIRE: &str = r#"
INSERT INTO questionnaire (telegram_id, surname, will_feed)
VALUES ($1, $2, $3);
"#;

pub const DELETE_ALL_QUESTIONNAIRES: &str = r#"
DELETE FROM questionnaire;
"#;
