// Unit tests for logger initialisation and level selection.

use crate::logger::{initialize, level_from_verbosity, resolve_level};

use log::LevelFilter;

/// **VALUE**: Calling initialize() more than once must not fail.
///
/// **BUG THIS CATCHES**: Would catch removal of the Once/AtomicBool guards,
/// which makes fern refuse to install a second global logger.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    let first = initialize(0);
    let second = initialize(2);

    assert!(first.is_ok(), "First initialization should succeed");
    assert!(second.is_ok(), "Second initialization should be a no-op");
}

#[test]
fn given_verbosity_counts_when_mapped_then_levels_increase() {
    assert_eq!(level_from_verbosity(0), LevelFilter::Warn);
    assert_eq!(level_from_verbosity(1), LevelFilter::Info);
    assert_eq!(level_from_verbosity(2), LevelFilter::Debug);
    assert_eq!(level_from_verbosity(7), LevelFilter::Trace);
}

#[test]
fn given_env_level_when_resolving_then_env_wins_unless_unparseable() {
    assert_eq!(resolve_level(0, Some("debug")), LevelFilter::Debug);
    assert_eq!(resolve_level(3, Some("OFF")), LevelFilter::Off);
    assert_eq!(resolve_level(1, Some("loud")), LevelFilter::Info);
    assert_eq!(resolve_level(1, None), LevelFilter::Info);
}
