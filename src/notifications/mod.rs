// SPDX-License-Identifier: MPL-2.0
//! User-facing notifications.

mod notification;

pub use notification::{Notification, NotificationId, Severity};
