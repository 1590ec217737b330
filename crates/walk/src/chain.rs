use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use crate::entry::WalkEntry;
use crate::error::WalkError;
use crate::plan::TraversalPlan;
use crate::walker::Walker;

/// Concatenation of the walks below several search roots.
///
/// Roots are visited in the order they were supplied. A root is opened only
/// when the previous one is exhausted, so a failing root does not prevent
/// the walks of the roots after it.
pub struct WalkChain {
    roots: VecDeque<PathBuf>,
    plan: Arc<TraversalPlan>,
    current: Option<Walker>,
}

impl WalkChain {
    /// Creates a chain over `roots` sharing one `plan`.
    pub fn new<I, P>(roots: I, plan: Arc<TraversalPlan>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            plan,
            current: None,
        }
    }

    /// Returns the plan shared by every root.
    #[must_use]
    pub fn plan(&self) -> &TraversalPlan {
        &self.plan
    }
}

impl Iterator for WalkChain {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(walker) = self.current.as_mut() {
                if let Some(item) = walker.next() {
                    return Some(item);
                }
                self.current = None;
            }

            let root = self.roots.pop_front()?;
            self.current = Some(Walker::new(root, Arc::clone(&self.plan)));
        }
    }
}
