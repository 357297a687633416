use crate::state::{EpicStatus, RoleStatus};

/// Aggregate status of an epic, computed only from its roles' statuses.
///
/// A failure while work is still active or queued blocks the epic; once
/// nothing is active, any failure fails it.
pub fn derive_epic_status<I>(statuses: I) -> EpicStatus
where
    I: IntoIterator<Item = RoleStatus>,
{
    let mut active = false;
    let mut failed = false;
    let mut any = false;

    for status in statuses {
        any = true;
        match status {
            RoleStatus::Pending | RoleStatus::Running => active = true,
            RoleStatus::Failed => failed = true,
            RoleStatus::Complete => {}
        }
    }

    match (any, active, failed) {
        (false, _, _) => EpicStatus::Running,
        (_, true, true) => EpicStatus::Blocked,
        (_, true, false) => EpicStatus::Running,
        (_, false, true) => EpicStatus::Failed,
        (_, false, false) => EpicStatus::Complete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RoleStatus::*;

    #[test]
    fn test_all_complete() {
        assert_eq!(derive_epic_status([Complete, Complete]), EpicStatus::Complete);
    }

    #[test]
    fn test_active_without_failure_is_running() {
        assert_eq!(derive_epic_status([Complete, Running, Pending]), EpicStatus::Running);
        assert_eq!(derive_epic_status([Pending]), EpicStatus::Running);
    }

    #[test]
    fn test_failure_with_queued_roles_is_blocked() {
        assert_eq!(derive_epic_status([Failed, Pending]), EpicStatus::Blocked);
        assert_eq!(derive_epic_status([Complete, Failed, Running]), EpicStatus::Blocked);
    }

    #[test]
    fn test_failure_with_nothing_active_is_failed() {
        assert_eq!(derive_epic_status([Complete, Failed]), EpicStatus::Failed);
        assert_eq!(derive_epic_status([Failed]), EpicStatus::Failed);
    }

    #[test]
    fn test_no_roles_is_running() {
        assert_eq!(derive_epic_status(Vec::new()), EpicStatus::Running);
    }
}
