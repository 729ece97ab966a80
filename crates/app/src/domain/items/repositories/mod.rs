//! Item Repositories

mod comments;
mod items;

pub(crate) use comments::PgCommentsRepository;
pub(crate) use items::PgItemsRepository;
