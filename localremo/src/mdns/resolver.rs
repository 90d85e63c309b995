use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;
use mdns_sd::{ServiceDaemon, ServiceEvent, ServiceInfo};
use chrono::Utc;
use shared::types::ServiceEndpoint;
use crate::error::{Error, Result};

/// Browse for `service_type` in `domain` and return the first device that
/// answers within `timeout`.
///
/// `Ok(None)` means nobody answered in time. That is a normal outcome, not an
/// error. The daemon and its multicast socket only live for this call.
///
/// `timeout` is the whole discovery budget and has nothing to do with the
/// deadline later used for HTTP requests.
///
/// mdns-sd only browses the `local.` domain; any other domain fails with
/// [`Error::DiscoveryUnavailable`].
pub async fn discover(
    service_type: &str,
    domain: &str,
    timeout: Duration,
) -> Result<Option<ServiceEndpoint>> {
    let browse_type = qualified_service_type(service_type, domain);
    tracing::debug!("Browsing for {} (timeout {:?})", browse_type, timeout);

    let daemon = ServiceDaemon::new().map_err(Error::DiscoveryUnavailable)?;

    let receiver = match daemon.browse(&browse_type) {
        Ok(receiver) => receiver,
        Err(e) => {
            shutdown_daemon(&daemon);
            return Err(Error::DiscoveryUnavailable(e));
        }
    };

    let found = first_resolved(receiver, timeout).await;

    if let Err(e) = daemon.stop_browse(&browse_type) {
        tracing::debug!("Failed to stop browsing {}: {}", browse_type, e);
    }
    shutdown_daemon(&daemon);

    match &found {
        Some(endpoint) => tracing::info!("Found {} at {:?}", endpoint.instance_name, endpoint.ipv4()),
        None => tracing::info!("No {} responder within {:?}", browse_type, timeout),
    }

    Ok(found)
}

/// Race `timeout` against the browse events; the first resolved entry with an
/// IPv4 address wins and everything after it is ignored.
pub async fn first_resolved(
    receiver: flume::Receiver<ServiceEvent>,
    timeout: Duration,
) -> Option<ServiceEndpoint> {
    let deadline = tokio::time::sleep(timeout);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => return None,

            event = receiver.recv_async() => {
                match event {
                    Ok(ServiceEvent::ServiceResolved(info)) => {
                        if let Some(endpoint) = convert_service_info(&info) {
                            return Some(endpoint);
                        }
                    }
                    Ok(ServiceEvent::ServiceFound(_typ, fullname)) => {
                        tracing::debug!("Found {}, waiting for resolution", fullname);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!("mDNS browse channel closed: {}", e);
                        return None;
                    }
                }
            }
        }
    }
}

/// Join service type and domain into the form mdns-sd expects,
/// e.g. "_remo._tcp" + "local." -> "_remo._tcp.local."
pub fn qualified_service_type(service_type: &str, domain: &str) -> String {
    let service_type = service_type.trim_matches('.');
    let domain = domain.trim_matches('.');
    format!("{}.{}.", service_type, domain)
}

fn shutdown_daemon(daemon: &ServiceDaemon) {
    if let Err(e) = daemon.shutdown() {
        tracing::warn!("Failed to shutdown mDNS daemon: {}", e);
    }
}

/// Convert an mdns-sd ServiceInfo to our ServiceEndpoint
fn convert_service_info(info: &ServiceInfo) -> Option<ServiceEndpoint> {
    let mut addresses: Vec<IpAddr> = info.get_addresses().iter().copied().collect();
    addresses.sort();

    if !addresses.iter().any(IpAddr::is_ipv4) {
        tracing::debug!("Skipping service {} - no IPv4 addresses", info.get_fullname());
        return None;
    }

    let txt: HashMap<String, String> = info
        .get_properties()
        .iter()
        .map(|prop| (prop.key().to_string(), prop.val_str().to_string()))
        .collect();

    Some(ServiceEndpoint {
        service_type: info.get_type().to_string(),
        instance_name: info.get_fullname().to_string(),
        hostname: info.get_hostname().to_string(),
        addresses,
        port: info.get_port(),
        txt,
        ttl: info.get_host_ttl(),
        discovered_at: Utc::now(),
    })
}
