
pub use harness::TestContext;
