use crate::{
    config::AuthConfig,
    db::{DbPool, OrmConn, create_orm_conn},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(pool: DbPool, auth: AuthConfig) -> Self {
        let orm = create_orm_conn(&pool);
        Self { pool, orm, auth }
    }
}
