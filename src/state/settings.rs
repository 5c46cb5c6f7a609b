//! Client settings and VPN protocol types.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported VPN protocol types.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
pub enum Protocol {
    /// `OpenVPN` protocol.
    OpenVPN,
    /// `WireGuard` VPN protocol.
    #[default]
    WireGuard,
    /// `IKEv2` protocol.
    IKEv2,
}

impl Protocol {
    /// All protocols in picker order.
    pub const ALL: [Protocol; 3] = [Protocol::OpenVPN, Protocol::WireGuard, Protocol::IKEv2];

    /// One-line description shown in the protocol picker.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Protocol::OpenVPN => "Reliable and widely supported protocol",
            Protocol::WireGuard => "Modern, fast, and lightweight protocol",
            Protocol::IKEv2 => "Great for mobile devices and quick reconnections",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::OpenVPN => write!(f, "OpenVPN"),
            Protocol::WireGuard => write!(f, "WireGuard"),
            Protocol::IKEv2 => write!(f, "IKEv2"),
        }
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openvpn" => Ok(Protocol::OpenVPN),
            "wireguard" => Ok(Protocol::WireGuard),
            "ikev2" => Ok(Protocol::IKEv2),
            _ => Err(Error::InvalidProtocol(s.trim().to_string())),
        }
    }
}

/// Editable settings field.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SettingField {
    /// Tunnel protocol.
    Protocol,
    /// Connect on startup.
    AutoConnect,
    /// Block traffic when the tunnel drops.
    KillSwitch,
    /// Keep DNS queries inside the tunnel.
    DnsLeakProtection,
}

impl SettingField {
    /// Fields in settings-screen order.
    pub const ALL: [SettingField; 4] = [
        SettingField::Protocol,
        SettingField::AutoConnect,
        SettingField::KillSwitch,
        SettingField::DnsLeakProtection,
    ];

    /// Row label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SettingField::Protocol => "VPN Protocol",
            SettingField::AutoConnect => "Auto-connect on startup",
            SettingField::KillSwitch => "Kill Switch",
            SettingField::DnsLeakProtection => "DNS Leak Protection",
        }
    }

    /// Row hint.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            SettingField::Protocol => "Tunnel protocol used for new connections",
            SettingField::AutoConnect => "Automatically connect when the app starts",
            SettingField::KillSwitch => "Block internet if VPN disconnects unexpectedly",
            SettingField::DnsLeakProtection => {
                "Prevent DNS queries from leaking outside the VPN tunnel"
            }
        }
    }
}

impl FromStr for SettingField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect();
        match key.as_str() {
            "protocol" => Ok(SettingField::Protocol),
            "autoconnect" => Ok(SettingField::AutoConnect),
            "killswitch" => Ok(SettingField::KillSwitch),
            "dnsleakprotection" | "dns" => Ok(SettingField::DnsLeakProtection),
            _ => Err(Error::UnknownSetting(s.trim().to_string())),
        }
    }
}

/// A single typed settings edit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SettingUpdate {
    Protocol(Protocol),
    AutoConnect(bool),
    KillSwitch(bool),
    DnsLeakProtection(bool),
}

impl SettingUpdate {
    /// Parse a raw `field` / `value` pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSetting`] for an unrecognised field,
    /// [`Error::InvalidProtocol`] for a protocol outside the supported set and
    /// [`Error::InvalidValue`] for a malformed boolean.
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        let flag = || {
            parse_flag(value).ok_or_else(|| Error::InvalidValue {
                field: field.trim().to_string(),
                value: value.to_string(),
            })
        };

        Ok(match field.parse::<SettingField>()? {
            SettingField::Protocol => SettingUpdate::Protocol(value.parse()?),
            SettingField::AutoConnect => SettingUpdate::AutoConnect(flag()?),
            SettingField::KillSwitch => SettingUpdate::KillSwitch(flag()?),
            SettingField::DnsLeakProtection => SettingUpdate::DnsLeakProtection(flag()?),
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// User-editable client settings.
///
/// Lives only for the session; nothing is written back to disk.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Settings {
    /// Tunnel protocol.
    pub protocol: Protocol,
    /// Connect on startup.
    pub auto_connect: bool,
    /// Block traffic when the tunnel drops.
    pub kill_switch: bool,
    /// Keep DNS queries inside the tunnel.
    pub dns_leak_protection: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            protocol: Protocol::WireGuard,
            auto_connect: false,
            kill_switch: true,
            dns_leak_protection: true,
        }
    }
}

impl Settings {
    /// Return a copy with one field replaced.
    #[must_use]
    pub fn with(self, update: SettingUpdate) -> Self {
        match update {
            SettingUpdate::Protocol(protocol) => Self { protocol, ..self },
            SettingUpdate::AutoConnect(auto_connect) => Self {
                auto_connect,
                ..self
            },
            SettingUpdate::KillSwitch(kill_switch) => Self {
                kill_switch,
                ..self
            },
            SettingUpdate::DnsLeakProtection(dns_leak_protection) => Self {
                dns_leak_protection,
                ..self
            },
        }
    }

    /// Boolean value of a toggle field (`None` for the protocol).
    #[must_use]
    pub const fn flag(&self, field: SettingField) -> Option<bool> {
        match field {
            SettingField::Protocol => None,
            SettingField::AutoConnect => Some(self.auto_connect),
            SettingField::KillSwitch => Some(self.kill_switch),
            SettingField::DnsLeakProtection => Some(self.dns_leak_protection),
        }
    }

    /// Update that flips a toggle field (`None` for the protocol).
    #[must_use]
    pub fn toggled(&self, field: SettingField) -> Option<SettingUpdate> {
        match field {
            SettingField::Protocol => None,
            SettingField::AutoConnect => Some(SettingUpdate::AutoConnect(!self.auto_connect)),
            SettingField::KillSwitch => Some(SettingUpdate::KillSwitch(!self.kill_switch)),
            SettingField::DnsLeakProtection => Some(SettingUpdate::DnsLeakProtection(
                !self.dns_leak_protection,
            )),
        }
    }
}
