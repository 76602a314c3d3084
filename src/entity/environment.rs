use crate::entity::WalletSession;

/// Where a render is happening.
///
/// Rendering starts `Uninitialized`, where nothing wallet-related may be
/// touched. Only a chat with a live session is hydrated into `ClientReady`,
/// and only then do wallet affordances exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Uninitialized,
    ClientReady(WalletSession),
}

impl Environment {
    /// Second phase of initialisation. Hydrating twice replaces the session.
    pub fn hydrate(self, session: WalletSession) -> Self {
        Environment::ClientReady(session)
    }

    pub fn is_client_ready(&self) -> bool {
        matches!(self, Environment::ClientReady(_))
    }

    /// Wallet session visible to rendering; disconnected until hydrated.
    pub fn wallet(&self) -> WalletSession {
        match self {
            Environment::Uninitialized => WalletSession::disconnected(),
            Environment::ClientReady(session) => *session,
        }
    }
}
