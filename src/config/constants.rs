pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000";

pub const DEFAULT_COLLECTION: &str = "tasks";
