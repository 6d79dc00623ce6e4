pub use super::invite_role_binding::Entity as InviteRoleBinding;
pub use super::restriction::Entity as Restriction;
pub use super::restriction_role_config::Entity as RestrictionRoleConfig;
pub use super::voice_monitor_config::Entity as VoiceMonitorConfig;
