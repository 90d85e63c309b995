/// mDNS service type advertised by Remo devices
pub const REMO_SERVICE_TYPE: &str = "_remo._tcp";

/// Link-local mDNS domain
pub const DEFAULT_DOMAIN: &str = "local.";

/// HTTP path of the signal endpoint on the device
pub const MESSAGES_PATH: &str = "/messages";

/// Port used when a device advertises port 0
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Marker header the device requires on every local API request
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_LOCAL: &str = "local";

/// The only content type spoken by the local API
pub const JSON_CONTENT_TYPE: &str = "application/json";
