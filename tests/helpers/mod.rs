// Not every test crate uses every helper.
#![allow(dead_code)]

pub mod mock_transport;

use hostwatch::network::HostIdentity;

/// A fixed host identity for tests that never touch the network.
pub fn test_identity() -> HostIdentity {
    HostIdentity {
        hostname: "testhost".to_string(),
        public_ip: "198.51.100.4".to_string(),
    }
}

/// Builds owned rows from string slices.
pub fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
    raw.iter()
        .map(|row| row.iter().map(|field| field.to_string()).collect())
        .collect()
}
