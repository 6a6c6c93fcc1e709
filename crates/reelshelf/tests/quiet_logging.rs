use reelshelf::{LogOutput, init_logging};

// Own test binary: the logger is process-global.
#[test]
fn quiet_output_ignores_rust_log() {
    // SAFETY: the only test in this binary, no other threads read the environment.
    unsafe { std::env::set_var("RUST_LOG", "debug,reelshelf=trace") };

    init_logging(LogOutput::Quiet).expect("init");

    assert_eq!(log::max_level(), log::LevelFilter::Off);
    assert!(!log::log_enabled!(target: "reelshelf", log::Level::Error));
}
