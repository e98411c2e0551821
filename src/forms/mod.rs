// SPDX-License-Identifier: MPL-2.0
//! Form handling.

pub mod login;

pub use login::{FieldError, LoginField, LoginForm, LoginOutcome};
