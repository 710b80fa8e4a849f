pub mod assertions;
pub mod fixtures;
pub mod logging;

#[allow(unused_imports)]
pub use assertions::assert_contains;
#[allow(unused_imports)]
pub use fixtures::TestProject;
#[allow(unused_imports)]
pub use logging::init_test_logging;
