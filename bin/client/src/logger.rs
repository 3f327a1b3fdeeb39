/// Initialize the client logger.
/// Human output already goes to stderr, so only warnings are shown unless
/// RUST_LOG asks for more.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}
