/// Default generator configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = include_str!("../../config.default.toml");
