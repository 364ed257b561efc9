use super::labels;
use crate::domain::Network;

pub const KEY: &str = "amazeeio-network";

/// Bridge network the auxiliary services and project containers share.
pub fn new() -> Network {
    Network {
        name: KEY.to_string(),
        driver: "bridge".to_string(),
        labels: labels(&[("pygmy.network", "true")]),
        ..Default::default()
    }
}
