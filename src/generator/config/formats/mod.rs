pub mod clash;
pub mod loon;
pub mod quanx;
pub mod singbox;
pub mod single;
pub mod surge;

use crate::models::{ExtraSettings, Proxy, SubconverterTarget};

// Re-export all format converters
pub use clash::{proxy_to_clash, proxy_to_clash_yaml};
pub use loon::proxy_to_loon;
pub use quanx::proxy_to_quanx;
pub use singbox::proxy_to_singbox;
pub use single::{proxy_to_single, proxy_to_uri};
pub use surge::proxy_to_surge;

/// Encode nodes for the given target
pub fn export(nodes: &[Proxy], target: SubconverterTarget, ext: &ExtraSettings) -> String {
    match target {
        SubconverterTarget::Clash | SubconverterTarget::ClashMeta | SubconverterTarget::Stash => {
            proxy_to_clash(nodes, ext)
        }
        SubconverterTarget::Surge | SubconverterTarget::Surfboard => proxy_to_surge(nodes),
        SubconverterTarget::QuantumultX => proxy_to_quanx(nodes),
        SubconverterTarget::Loon => proxy_to_loon(nodes),
        SubconverterTarget::Shadowrocket
        | SubconverterTarget::V2RayN
        | SubconverterTarget::V2RayNG => proxy_to_single(nodes),
        SubconverterTarget::SingBox | SubconverterTarget::NekoBox => proxy_to_singbox(nodes, ext),
    }
}
