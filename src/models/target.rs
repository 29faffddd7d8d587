use std::fmt;
use std::str::FromStr;

use crate::interfaces::ConvertError;

/// The output format for subconverter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubconverterTarget {
    Clash,
    ClashMeta,
    Stash,
    Surge,
    Surfboard,
    QuantumultX,
    Loon,
    Shadowrocket,
    V2RayN,
    V2RayNG,
    SingBox,
    NekoBox,
}

impl SubconverterTarget {
    pub const ALL: [SubconverterTarget; 12] = [
        SubconverterTarget::Clash,
        SubconverterTarget::ClashMeta,
        SubconverterTarget::Stash,
        SubconverterTarget::Surge,
        SubconverterTarget::Surfboard,
        SubconverterTarget::QuantumultX,
        SubconverterTarget::Loon,
        SubconverterTarget::Shadowrocket,
        SubconverterTarget::V2RayN,
        SubconverterTarget::V2RayNG,
        SubconverterTarget::SingBox,
        SubconverterTarget::NekoBox,
    ];

    /// Identifier used by clients in the `target` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SubconverterTarget::Clash => "clash",
            SubconverterTarget::ClashMeta => "clashmeta",
            SubconverterTarget::Stash => "stash",
            SubconverterTarget::Surge => "surge",
            SubconverterTarget::Surfboard => "surfboard",
            SubconverterTarget::QuantumultX => "quantumultx",
            SubconverterTarget::Loon => "loon",
            SubconverterTarget::Shadowrocket => "shadowrocket",
            SubconverterTarget::V2RayN => "v2rayn",
            SubconverterTarget::V2RayNG => "v2rayng",
            SubconverterTarget::SingBox => "singbox",
            SubconverterTarget::NekoBox => "nekobox",
        }
    }

    /// Check if this target produces a rule-router YAML config
    pub fn is_clash(&self) -> bool {
        matches!(
            self,
            SubconverterTarget::Clash | SubconverterTarget::ClashMeta | SubconverterTarget::Stash
        )
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            t if t.is_clash() => "text/yaml",
            SubconverterTarget::SingBox | SubconverterTarget::NekoBox => "application/json",
            _ => "text/plain",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            t if t.is_clash() => "yaml",
            SubconverterTarget::SingBox | SubconverterTarget::NekoBox => "json",
            SubconverterTarget::Surge | SubconverterTarget::Loon | SubconverterTarget::Surfboard => {
                "conf"
            }
            _ => "txt",
        }
    }

    /// Identifiers of every supported target, in declaration order
    pub fn supported() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.as_str()).collect()
    }
}

impl FromStr for SubconverterTarget {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| ConvertError::InvalidTarget(s.to_string()))
    }
}

impl fmt::Display for SubconverterTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
