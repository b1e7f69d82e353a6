//! Basic facade usage
//!
//! Demonstrates declaring a custom level, attaching a console sink, and
//! emitting at built-in and custom levels.
//!
//! Run with: cargo run --example basic_usage

use logdock::prelude::*;

fn main() {
    println!("=== Logdock - Basic Usage Example ===\n");

    // A fresh logger has no sinks: this first message is dropped silently.
    let logger = Logger::builder().default_level("DEBUG").build();
    logger.info("this message goes nowhere");

    // Declare a custom level between INFO (20) and WARNING (30)
    logger.declare_level("TEMP", 25, Some("<cyan>"));

    // Attach a console sink; threshold resolution consults LOG_LEVEL and
    // DEBUG before falling back to this logger's default.
    logger.attach_sink("stdout", SinkOptions::new().name("stdout_main"));

    println!("1. Logging at different levels:");
    logger.debug("this is a debug message");
    logger.info("this is a system info message");
    logger.warning("this is a system warning message");
    logger.error("this is a system error message");
    logger.emit("TEMP", "this is a model temp result message");

    println!("\n2. Sinks currently attached:");
    for sink in logger.list_sinks() {
        println!("   {} (#{}, level {})", sink.friendly_name, sink.backend_id, sink.resolved_level);
    }

    // Detach by name; emits are silently dropped again afterwards.
    logger.detach_sink("stdout_main");
    logger.info("after removing the console sink this message is not displayed");

    println!("\n=== Example completed successfully! ===");
}
