use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use crate::protocol::DEFAULT_HTTP_PORT;

/// A device resolved through mDNS.
/// Built fresh on every discovery and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    /// Service type, e.g. "_remo._tcp.local."
    pub service_type: String,

    /// Full DNS-SD instance name, e.g. "Remo-1a2b3c._remo._tcp.local."
    pub instance_name: String,

    /// Hostname, e.g. "Remo-1a2b3c.local."
    pub hostname: String,

    /// Advertised addresses, sorted with IPv4 first
    pub addresses: Vec<IpAddr>,

    /// Service port
    pub port: u16,

    /// TXT record key-value pairs
    pub txt: HashMap<String, String>,

    /// Advertised TTL in seconds
    pub ttl: u32,

    /// When the advertisement was received
    pub discovered_at: DateTime<Utc>,
}

impl ServiceEndpoint {
    /// First advertised IPv4 address, if any.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        self.addresses.iter().find_map(|addr| match addr {
            IpAddr::V4(v4) => Some(*v4),
            IpAddr::V6(_) => None,
        })
    }

    pub fn ipv6(&self) -> impl Iterator<Item = &IpAddr> {
        self.addresses.iter().filter(|addr| addr.is_ipv6())
    }

    /// Address the device's HTTP API is reachable at.
    pub fn http_target(&self) -> Option<SocketAddr> {
        let port = if self.port == 0 { DEFAULT_HTTP_PORT } else { self.port };
        self.ipv4().map(|ip| SocketAddr::new(IpAddr::V4(ip), port))
    }
}

/// An infrared command as exchanged with the device.
///
/// Only the shape is checked on decode. Extra fields are ignored, the
/// frequency and pulse train are taken as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrSignal {
    /// Encoding identifier, e.g. "us"
    pub format: String,

    /// Carrier frequency as reported by the device
    pub freq: u32,

    /// Alternating on/off pulse durations
    pub data: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    fn test_endpoint(addresses: Vec<IpAddr>, port: u16) -> ServiceEndpoint {
        ServiceEndpoint {
            service_type: "_remo._tcp.local.".to_string(),
            instance_name: "Remo-abc._remo._tcp.local.".to_string(),
            hostname: "Remo-abc.local.".to_string(),
            addresses,
            port,
            txt: HashMap::new(),
            ttl: 120,
            discovered_at: Utc::now(),
        }
    }

    #[test]
    fn test_http_target_uses_first_ipv4() {
        let endpoint = test_endpoint(
            vec![
                IpAddr::V6(Ipv6Addr::LOCALHOST),
                IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)),
                IpAddr::V4(Ipv4Addr::new(192, 168, 1, 21)),
            ],
            8080,
        );

        assert_eq!(endpoint.ipv4(), Some(Ipv4Addr::new(192, 168, 1, 20)));
        assert_eq!(
            endpoint.http_target(),
            Some("192.168.1.20:8080".parse().unwrap())
        );
        assert_eq!(endpoint.ipv6().count(), 1);
    }

    #[test]
    fn test_http_target_defaults_port() {
        let endpoint = test_endpoint(vec![IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7))], 0);
        assert_eq!(endpoint.http_target(), Some("10.0.0.7:80".parse().unwrap()));
    }

    #[test]
    fn test_http_target_requires_ipv4() {
        let endpoint = test_endpoint(vec![IpAddr::V6(Ipv6Addr::LOCALHOST)], 80);
        assert_eq!(endpoint.http_target(), None);
    }

    #[test]
    fn test_ir_signal_wire_shape() {
        let json = r#"{"format":"raw","freq":38000,"data":[100,200,100],"name":"tv"}"#;
        let signal: IrSignal = serde_json::from_str(json).unwrap();
        assert_eq!(
            signal,
            IrSignal {
                format: "raw".to_string(),
                freq: 38000,
                data: vec![100, 200, 100],
            }
        );

        let encoded = serde_json::to_string(&signal).unwrap();
        assert_eq!(encoded, r#"{"format":"raw","freq":38000,"data":[100,200,100]}"#);
    }

    #[test]
    fn test_ir_signal_rejects_wrong_shape() {
        assert!(serde_json::from_str::<IrSignal>(r#"{"format":"us","freq":38}"#).is_err());
        assert!(serde_json::from_str::<IrSignal>(r#"{"format":"us","freq":-1,"data":[]}"#).is_err());
        assert!(serde_json::from_str::<IrSignal>(r#"[1,2,3]"#).is_err());
    }
}
