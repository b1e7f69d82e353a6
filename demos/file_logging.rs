//! File sinks with rotation, retention, compression, and filters
//!
//! Run with: cargo run --example file_logging

use logdock::prelude::*;

fn main() {
    let logger = Logger::builder().default_level("DEBUG").build();
    logger.declare_level("TEMP", 25, Some("<cyan>"));

    // Console sink for everything
    logger.attach_sink("stdout", SinkOptions::new().name("stdout_main"));

    // System log: rotating file that excludes TEMP records
    logger.attach_sink(
        "file",
        SinkOptions::new()
            .target("logs/system.log")
            .rotation("500 MB")
            .retention("10 days")
            .compression("gz")
            .filter(|r: &LogRecord| r.level != "TEMP")
            .name("system_file"),
    );

    // Model temp results only
    logger.attach_sink(
        "file",
        SinkOptions::new()
            .target("logs/model_temp.log")
            .rotation("500 MB")
            .retention("10 days")
            .compression("gz")
            .filter(LevelNameFilter::new("TEMP"))
            .name("model_temp_file"),
    );

    logger.debug("this is a debug message");
    logger.info("this is a system info message");
    logger.warning("this is a system warning message");
    logger.error("this is a system error message");
    logger.emit("TEMP", "this is a model temp result message");

    // Detach the console; file sinks keep receiving records.
    logger.detach_sink("stdout_main");
    logger.info("this only lands in logs/system.log");
}
