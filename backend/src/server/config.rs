//! HTTP server configuration object.

use std::net::SocketAddr;

use mentor_match::inbound::http::session_config::SessionSettings;
use mentor_match::outbound::persistence::DbPool;

/// Everything `create_server` needs to bind and wire the application.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            session,
            bind_addr,
            db_pool,
        }
    }
}
