//! Statement presentation of the transfer log.

use serde::{Deserialize, Serialize};

use atlasbank_shared::types::AccountId;

/// Whether a statement line moves money out of or into the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementKind {
    /// Money left the account.
    Debit,
    /// Money entered the account.
    Credit,
}

/// A transfer seen from one account's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    /// The viewer is the source account.
    Sent,
    /// The viewer is the destination account.
    Received,
}

impl TransferDirection {
    /// Classifies a transfer relative to the viewing account.
    ///
    /// The viewer is always a party of the transfer (statement queries
    /// filter on source or destination), so "not the source" means
    /// "the destination".
    #[must_use]
    pub fn relative_to(viewer_account: AccountId, source_account: AccountId) -> Self {
        if source_account == viewer_account {
            Self::Sent
        } else {
            Self::Received
        }
    }

    /// Statement label, as shown on the dashboard.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Sent => "Pix enviado",
            Self::Received => "Pix recebido",
        }
    }

    /// Debit/credit classification of the line.
    #[must_use]
    pub const fn kind(self) -> MovementKind {
        match self {
            Self::Sent => MovementKind::Debit,
            Self::Received => MovementKind::Credit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sent_when_viewer_is_source() {
        let viewer = AccountId::new();
        let direction = TransferDirection::relative_to(viewer, viewer);
        assert_eq!(direction, TransferDirection::Sent);
        assert_eq!(direction.kind(), MovementKind::Debit);
        assert_eq!(direction.description(), "Pix enviado");
    }

    #[test]
    fn test_received_when_viewer_is_destination() {
        let viewer = AccountId::new();
        let direction = TransferDirection::relative_to(viewer, AccountId::new());
        assert_eq!(direction, TransferDirection::Received);
        assert_eq!(direction.kind(), MovementKind::Credit);
        assert_eq!(direction.description(), "Pix recebido");
    }
}
