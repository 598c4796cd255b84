use crate::models::{PostStatus, SubmissionAction};

/// Which submission, if any, a status edge calls for.
///
/// | old | new | action |
/// |---|---|---|
/// | publish | publish | update |
/// | anything else | publish | add |
/// | publish | trash / deleted | delete |
/// | anything else | anything else | none |
pub fn classify_transition(old: &PostStatus, new: &PostStatus) -> Option<SubmissionAction> {
    match (old.is_published(), new) {
        (true, PostStatus::Publish) => Some(SubmissionAction::Update),
        (false, PostStatus::Publish) => Some(SubmissionAction::Add),
        (true, new) if new.is_removed() => Some(SubmissionAction::Delete),
        _ => None,
    }
}
