//! Broadcast hub for the WebSocket events channel.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use prosite_auth::claims::IdentityClaims;
use prosite_auth::scope::ScopeGate;

/// Buffered events per subscriber before lagging receivers drop messages.
const EVENT_BUFFER: usize = 256;

/// A server-side event pushed to connected clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerEvent {
    /// Company the event belongs to; `None` means visible to everyone.
    pub company_code: Option<String>,
    /// Event kind, e.g. `"demand.approved"`.
    pub kind: String,
    /// Arbitrary event payload.
    pub payload: serde_json::Value,
}

impl ServerEvent {
    /// Whether the event may be delivered to a caller with these claims.
    ///
    /// Company-scoped events reach only that company's users, unless the
    /// caller holds a group-wide scope.
    pub fn visible_to(&self, claims: &IdentityClaims, gate: &ScopeGate) -> bool {
        match &self.company_code {
            None => true,
            Some(code) => gate.ensure_company_access(claims, code).is_ok(),
        }
    }
}

/// Fan-out hub connecting event producers to WebSocket subscribers.
#[derive(Debug)]
pub struct EventHub {
    tx: broadcast::Sender<ServerEvent>,
}

impl EventHub {
    /// Creates a new hub.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_BUFFER);
        Self { tx }
    }

    /// Subscribes a new receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.tx.subscribe()
    }

    /// Publishes an event to all current subscribers.
    pub fn publish(&self, event: ServerEvent) {
        // A send error only means no subscriber is connected.
        let _ = self.tx.send(event);
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(company_code: Option<&str>, scopes: &[&str]) -> IdentityClaims {
        IdentityClaims {
            sub: "1".to_string(),
            user_id: "1".to_string(),
            email: "a@x.com".to_string(),
            role: "SiteManager".to_string(),
            company_id: company_code.map(|_| "7".to_string()),
            company_code: company_code.map(String::from),
            department_id: None,
            user_roles: scopes.iter().map(|_| "R".to_string()).collect(),
            role_scopes: scopes.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn event(company_code: Option<&str>) -> ServerEvent {
        ServerEvent {
            company_code: company_code.map(String::from),
            kind: "stock.updated".to_string(),
            payload: serde_json::json!({}),
        }
    }

    #[test]
    fn test_global_events_visible_to_all() {
        let gate = ScopeGate::new(vec!["group".to_string()]);
        assert!(event(None).visible_to(&claims(Some("ACME"), &["company"]), &gate));
        assert!(event(None).visible_to(&claims(None, &[]), &gate));
    }

    #[test]
    fn test_company_events_fenced_by_scope() {
        let gate = ScopeGate::new(vec!["group".to_string()]);
        let acme = claims(Some("ACME"), &["company"]);
        assert!(event(Some("ACME")).visible_to(&acme, &gate));
        assert!(!event(Some("OTHER")).visible_to(&acme, &gate));

        let elevated = claims(Some("ACME"), &["group"]);
        assert!(event(Some("OTHER")).visible_to(&elevated, &gate));
    }

    #[tokio::test]
    async fn test_hub_fans_out() {
        let hub = EventHub::new();
        let mut rx = hub.subscribe();
        hub.publish(event(None));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.kind, "stock.updated");
    }
}
