use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RestrictionError {
    /// A moderator attempted to restrict themselves.
    #[error("Members cannot restrict themselves")]
    SelfRestriction,

    /// The target holds an elevated privilege (owner, administrator, moderator).
    #[error("Member {0} holds an elevated privilege and cannot be restricted")]
    PrivilegedTarget(u64),
}
