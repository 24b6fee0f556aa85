pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:5173", "http://127.0.0.1:5173"];
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://taskboard.db?mode=rwc";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_DB_MIN_IDLE: u32 = 2;
pub const DEFAULT_JWT_SECRET: &str = "super-secret-change-me";
pub const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: u64 = 30;
pub const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 7;
pub const DEFAULT_MAX_BOARDS_PER_USER: u64 = 7;
pub const DEFAULT_MAX_CARDS_PER_BOARD: u64 = 20;
