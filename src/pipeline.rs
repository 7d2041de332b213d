//! Ordered rewrite pipeline.
//!
//! Annotation is a fold of `text -> text` passes over the input. Later passes
//! scan markup and sentinels that earlier passes introduced, so the order is
//! part of the contract. Each pass names the passes it depends on in
//! [`PassInfo::requires`], and [`Pipeline::new`] refuses any ordering in which
//! a dependency has not already run.
//!
//! ```text
//! raw ──▶ pass 1 ──▶ pass 2 ──▶ ... ──▶ pass N ──▶ annotated
//!            │                             │
//!            └──── PassContext (sentinels) ┘
//! ```
//!
//! # Implementing a Pass
//!
//! ```ignore
//! use crate::pipeline::{Pass, PassContext, PassInfo};
//!
//! pub struct Shout;
//!
//! impl Pass for Shout {
//!     fn info(&self) -> PassInfo {
//!         PassInfo {
//!             id:       "shout",
//!             name:     "Upper-case everything",
//!             requires: &[]
//!         }
//!     }
//!
//!     fn apply(&self, text: String, _ctx: &mut PassContext) -> String {
//!         text.to_uppercase()
//!     }
//! }
//! ```

use tracing::trace;

use crate::{
    error::{AppResult, pipeline_order_error},
    placeholder::PlaceholderTable
};

/// Metadata describing a pass and its ordering constraints.
#[derive(Debug, Clone, Copy)]
pub struct PassInfo {
    /// Stable identifier, referenced by other passes' `requires`
    pub id:       &'static str,
    /// Human-readable description
    pub name:     &'static str,
    /// Passes that must appear earlier in the pipeline
    pub requires: &'static [&'static str]
}

/// Per-call state threaded through the passes.
#[derive(Debug, Default)]
pub struct PassContext {
    /// Regions parked behind sentinels, restored by a later pass
    pub placeholders: PlaceholderTable
}

impl PassContext {
    /// Fresh context whose sentinels cannot collide with `raw`.
    pub fn for_text(raw: &str) -> Self {
        Self {
            placeholders: PlaceholderTable::for_text(raw)
        }
    }
}

/// A single rewrite step.
///
/// Passes are stateless; everything call-specific lives in [`PassContext`].
/// They must be `Send + Sync` because pipelines are shared statics.
pub trait Pass: Send + Sync {
    /// Returns metadata about this pass.
    fn info(&self) -> PassInfo;

    /// Rewrites `text`, possibly parking or restoring regions through `ctx`.
    fn apply(&self, text: String, ctx: &mut PassContext) -> String;
}

/// Validated, ordered sequence of passes.
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.passes.iter().map(|p| p.info().id))
            .finish()
    }
}

impl Pipeline {
    /// Build a pipeline, checking that every pass runs after its requirements.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first pass whose requirement is missing or
    /// scheduled later.
    pub fn new(passes: Vec<Box<dyn Pass>>) -> AppResult<Self> {
        let mut seen: Vec<&'static str> = Vec::with_capacity(passes.len());
        for pass in &passes {
            let info = pass.info();
            if let Some(missing) = info.requires.iter().find(|req| !seen.contains(*req)) {
                return Err(pipeline_order_error(info.id, missing));
            }
            seen.push(info.id);
        }
        Ok(Self {
            passes
        })
    }

    /// Pass identifiers in execution order.
    pub fn pass_ids(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.info().id).collect()
    }

    /// Run every pass over `raw`.
    ///
    /// Every region parked during the run must have been restored by the
    /// time the last pass returns.
    pub fn run(&self, raw: &str) -> String {
        let mut ctx = PassContext::for_text(raw);
        let mut text = raw.to_string();
        for pass in &self.passes {
            text = pass.apply(text, &mut ctx);
            trace!(pass = pass.info().id, len = text.len(), "pass applied");
        }
        debug_assert!(ctx.placeholders.is_empty(), "unrestored placeholders");
        debug_assert!(!ctx.placeholders.leaks_into(&text), "placeholder leaked");
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Append(&'static str, &'static [&'static str]);

    impl Pass for Append {
        fn info(&self) -> PassInfo {
            PassInfo {
                id:       self.0,
                name:     "append id",
                requires: self.1
            }
        }

        fn apply(&self, mut text: String, _ctx: &mut PassContext) -> String {
            text.push_str(self.0);
            text
        }
    }

    #[test]
    fn test_runs_in_order() {
        let passes: Vec<Box<dyn Pass>> =
            vec![Box::new(Append("a", &[])), Box::new(Append("b", &["a"]))];
        let pipeline = Pipeline::new(passes).unwrap();
        assert_eq!(pipeline.run(">"), ">ab");
        assert_eq!(pipeline.pass_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_rejects_requirement_scheduled_later() {
        let passes: Vec<Box<dyn Pass>> =
            vec![Box::new(Append("b", &["a"])), Box::new(Append("a", &[]))];
        let result = Pipeline::new(passes);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_missing_requirement() {
        let passes: Vec<Box<dyn Pass>> = vec![Box::new(Append("b", &["a"]))];
        let result = Pipeline::new(passes);
        assert!(result.is_err());
    }
}
