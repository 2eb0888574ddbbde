//! Pluggable choice of tenant and payload kind for each launch.

use rand::Rng;
use spate_core::PayloadKind;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Decides which tenant and payload kind the next launch uses. Implementors
/// must be callable from many tasks at once.
pub trait SelectionPolicy: Send + Sync {
    fn tenant(&self) -> String;
    fn kind(&self) -> PayloadKind;
}

/// Uniform-random selection over a fixed tenant set with a 50/50 payload
/// split. This is the policy real runs use.
pub struct UniformSelection {
    tenants: Vec<String>,
}

impl UniformSelection {
    /// `tenants` must be non-empty.
    pub fn new(tenants: Vec<String>) -> Self {
        debug_assert!(!tenants.is_empty());
        Self { tenants }
    }
}

impl SelectionPolicy for UniformSelection {
    fn tenant(&self) -> String {
        let idx = rand::thread_rng().gen_range(0..self.tenants.len());
        self.tenants[idx].clone()
    }

    fn kind(&self) -> PayloadKind {
        if rand::thread_rng().gen_bool(0.5) {
            PayloadKind::Structured
        } else {
            PayloadKind::Raw
        }
    }
}

/// Deterministic cycling selection. Tests substitute this for the uniform
/// policy so assertions can predict every launch.
pub struct RoundRobinSelection {
    tenants: Vec<String>,
    next_tenant: AtomicUsize,
    next_kind: AtomicUsize,
}

impl RoundRobinSelection {
    /// `tenants` must be non-empty.
    pub fn new(tenants: Vec<String>) -> Self {
        debug_assert!(!tenants.is_empty());
        Self {
            tenants,
            next_tenant: AtomicUsize::new(0),
            next_kind: AtomicUsize::new(0),
        }
    }
}

impl SelectionPolicy for RoundRobinSelection {
    fn tenant(&self) -> String {
        let idx = self.next_tenant.fetch_add(1, Ordering::Relaxed);
        self.tenants[idx % self.tenants.len()].clone()
    }

    fn kind(&self) -> PayloadKind {
        if self.next_kind.fetch_add(1, Ordering::Relaxed) % 2 == 0 {
            PayloadKind::Structured
        } else {
            PayloadKind::Raw
        }
    }
}
