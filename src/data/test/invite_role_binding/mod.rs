use crate::{data::invite_role_binding::InviteRoleBindingRepository, error::AppError};
use sea_orm::{EntityTrait, PaginatorTrait};
use serenity::all::{GuildId, RoleId};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod find;
mod upsert;
