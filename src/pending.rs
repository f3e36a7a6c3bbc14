//! "Request in flight" tracking, keyed per form.
//!
//! A key names one form instance (e.g. a customer's submission form or the
//! checkout of one order). Only a second request under the same key is
//! refused; unrelated requests never wait on each other.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
pub struct PendingFlag {
    busy: Arc<Mutex<HashSet<String>>>,
}

/// Releases its key when dropped.
#[derive(Debug)]
pub struct PendingTicket {
    key: String,
    busy: Arc<Mutex<HashSet<String>>>,
}

fn lock(set: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    // The set stays consistent even if a holder panicked mid-insert.
    set.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl PendingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` while another request holds `key`.
    pub fn try_begin(&self, key: impl Into<String>) -> Option<PendingTicket> {
        let key = key.into();
        if !lock(&self.busy).insert(key.clone()) {
            return None;
        }
        Some(PendingTicket {
            key,
            busy: self.busy.clone(),
        })
    }

    pub fn is_pending(&self, key: &str) -> bool {
        lock(&self.busy).contains(key)
    }
}

impl Drop for PendingTicket {
    fn drop(&mut self) {
        lock(&self.busy).remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_refused_until_ticket_drops() {
        let flag = PendingFlag::new();
        let ticket = flag.try_begin("submit:user_1").unwrap();
        assert!(flag.is_pending("submit:user_1"));
        assert!(flag.try_begin("submit:user_1").is_none());

        drop(ticket);
        assert!(!flag.is_pending("submit:user_1"));
        assert!(flag.try_begin("submit:user_1").is_some());
    }

    #[test]
    fn test_keys_are_independent() {
        let flag = PendingFlag::new();
        let _first = flag.try_begin("submit:user_1").unwrap();
        let second = flag.try_begin("submit:user_2");
        assert!(second.is_some());
        assert!(!flag.is_pending("pay:order_1"));
    }

    #[test]
    fn test_clones_share_keys() {
        let flag = PendingFlag::new();
        let _ticket = flag.try_begin("pay:order_1").unwrap();
        assert!(flag.clone().try_begin("pay:order_1").is_none());
    }
}
