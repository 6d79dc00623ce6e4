mod invite_role_binding;
mod restriction;
mod voice_monitor_config;
