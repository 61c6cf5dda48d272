//! In-memory interface table for testing address resolution.

use std::net::Ipv4Addr;

use crate::collector::net::{NetError, NetQuery};

/// Mock interface table with a fixed enumeration order.
///
/// An entry with `None` simulates an interface that exists without an IPv4
/// address bound (the resolver treats both that and a missing interface as
/// `NotFound`).
#[derive(Debug, Clone, Default)]
pub struct MockNet {
    interfaces: Vec<(String, Option<Ipv4Addr>)>,
}

impl MockNet {
    /// Creates an empty interface table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interface; enumeration follows insertion order.
    pub fn with_interface(mut self, name: impl Into<String>, addr: Option<Ipv4Addr>) -> Self {
        self.interfaces.push((name.into(), addr));
        self
    }
}

impl NetQuery for MockNet {
    fn ipv4_of(&self, iface: &str) -> Result<Ipv4Addr, NetError> {
        self.interfaces
            .iter()
            .find(|(name, _)| name == iface)
            .and_then(|(_, addr)| *addr)
            .ok_or(NetError::NotFound)
    }

    fn interface_names(&self) -> Result<Vec<String>, NetError> {
        Ok(self.interfaces.iter().map(|(name, _)| name.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_net_lookup() {
        let net = MockNet::new()
            .with_interface("br-lan", Some(Ipv4Addr::new(192, 168, 1, 1)))
            .with_interface("wwan0", None);

        assert_eq!(
            net.ipv4_of("br-lan").unwrap(),
            Ipv4Addr::new(192, 168, 1, 1)
        );
        assert!(matches!(net.ipv4_of("wwan0"), Err(NetError::NotFound)));
        assert!(matches!(net.ipv4_of("eth9"), Err(NetError::NotFound)));
        assert_eq!(net.interface_names().unwrap(), vec!["br-lan", "wwan0"]);
    }
}
