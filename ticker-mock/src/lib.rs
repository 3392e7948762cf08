//! Test doubles for the ticker consensus service.
//!
//! [`MockPageSource`] serves scripted instrument pages without network access;
//! [`PageFixture`] renders markup that the default selectors understand.

mod dynamic;
mod fixtures;

pub use dynamic::{MockBehavior, MockPageController, MockPageSource};
pub use fixtures::PageFixture;
