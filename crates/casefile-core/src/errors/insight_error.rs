/// Insight engine errors.
///
/// Only a failed snapshot load is fatal: a partial snapshot could produce
/// misleading false negatives, so the whole run aborts. Everything else
/// (unparseable dates, dangling endpoints, a faulting detector) is
/// recovered locally and at most logged.
#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    #[error("graph snapshot load failed: {reason}")]
    LoadFailed { reason: String },
}
