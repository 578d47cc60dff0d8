/// Model used when neither the config file nor the command line names one.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";
