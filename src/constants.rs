pub mod cache {
    use std::time::Duration;

    pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
}

pub mod schedule {

    pub const SLOT_DURATION_MINUTES: u32 = 90;
}

pub mod api {

    pub const USER_AGENT: &str = "PortalLookup/1.0";

    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

    pub const TOKEN_ENV: &str = "PORTAL_API_TOKEN";

    pub const BASE_URL_ENV: &str = "PORTAL_API_URL";
}
