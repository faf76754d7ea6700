use log::LevelFilter;
use simplelog::{ConfigBuilder, SimpleLogger};

/// Stdout logger for the checkout and the ntex request log
pub fn setup_simple_logger(level: LevelFilter) -> anyhow::Result<()> {
    let logger_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("xnet_pay")
        .add_filter_allow_str("ntex::web::middleware")
        .build();

    Ok(SimpleLogger::init(level, logger_config)?)
}
