//! The closed set of job kinds the operator can serve.
//!
//! [`supported_schemes`] is built once on first access from a fixed table and
//! is read-only afterwards. Adding a kind means adding a row to that table.

use std::collections::HashMap;
use std::sync::LazyLock;

use training_core::kind::{MX_JOB_KIND, PYTORCH_JOB_KIND, TF_JOB_KIND, XGBOOST_JOB_KIND};

use crate::error::ManagerError;
use crate::manager::Manager;
use crate::reconciler;

/// Attaches one kind's reconciler to a manager.
///
/// The second argument enables gang scheduling for every job of that kind.
pub type ReconcilerSetupFn = fn(&mut dyn Manager, bool) -> Result<(), ManagerError>;

/// Maps canonical job-kind names to their reconciler setup functions.
#[derive(Debug)]
pub struct SchemeRegistry {
    entries: Vec<(&'static str, ReconcilerSetupFn)>,
    exact: HashMap<&'static str, usize>,
    folded: HashMap<String, usize>,
}

impl SchemeRegistry {
    /// Assemble a registry from a fixed list of entries.
    ///
    /// # Panics
    ///
    /// Panics if two kinds are equal, or equal once lower-cased. The table is
    /// fixed at build time so a collision is a programming error.
    pub fn new(entries: impl IntoIterator<Item = (&'static str, ReconcilerSetupFn)>) -> Self {
        let entries: Vec<_> = entries.into_iter().collect();
        let mut exact: HashMap<&'static str, usize> = HashMap::with_capacity(entries.len());
        let mut folded: HashMap<String, usize> = HashMap::with_capacity(entries.len());

        for (idx, (kind, _)) in entries.iter().enumerate() {
            let lowered = kind.to_lowercase();
            if let Some(&prev) = folded.get(&lowered) {
                let other = entries[prev].0;
                panic!("scheme {kind} collides with already registered scheme {other}");
            }
            exact.insert(*kind, idx);
            folded.insert(lowered, idx);
        }

        Self {
            entries,
            exact,
            folded,
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, kind: &str) -> Option<ReconcilerSetupFn> {
        self.exact.get(kind).map(|&idx| self.entries[idx].1)
    }

    /// Resolve user input to the canonical kind, ignoring case.
    pub fn canonical(&self, text: &str) -> Option<&'static str> {
        self.folded
            .get(&text.to_lowercase())
            .map(|&idx| self.entries[idx].0)
    }

    /// All registered kinds. Callers must not depend on the order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(kind, _)| *kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.exact.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static SUPPORTED_SCHEMES: LazyLock<SchemeRegistry> = LazyLock::new(|| {
    let table: [(&'static str, ReconcilerSetupFn); 4] = [
        (TF_JOB_KIND, reconciler::setup_tf_job),
        (PYTORCH_JOB_KIND, reconciler::setup_pytorch_job),
        (MX_JOB_KIND, reconciler::setup_mx_job),
        (XGBOOST_JOB_KIND, reconciler::setup_xgboost_job),
    ];
    SchemeRegistry::new(table)
});

/// Process-wide registry of every job kind this operator supports.
pub fn supported_schemes() -> &'static SchemeRegistry {
    &SUPPORTED_SCHEMES
}
