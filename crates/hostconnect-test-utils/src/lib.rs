// hostconnect-test-utils: shared test doubles.
//
// - `StubExchanger`: a `TokenExchanger` that returns a canned reply and
//   records every code it was asked to exchange
// - fixtures for seeding users and groups into any `Store`

pub mod exchanger;
pub mod fixtures;

pub use exchanger::StubExchanger;
pub use fixtures::{seed_group, seed_user, stripe_reply, TEST_SECRET};
