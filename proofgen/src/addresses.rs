//! Deployment addresses of external protocol contracts.
//!
//! A static lookup table consumed by deployment and operations tooling;
//! nothing in this crate derives logic from it.

use alloy::primitives::{address, Address};

pub const TWAP_ADAPTER: Address = address!("2acab6099392867cda1e383250da1b37f4de892a");
pub const TWAP_INVERSE_ADAPTER: Address = address!("1b5477903d61ceab62b083c6e31a839ca7b59dc6");
pub const FLAT_PRICE_CURVE: Address = address!("6ce2cea9ed3f37bb52b51324ff4efdf49c247ba8");
pub const LINEAR_PRICE_CURVE: Address = address!("55cd9066aeec0e91906dd179796c61b2dc52069a");
pub const RESERVOIR_FLOOR_PRICE_ORACLE_ADAPTER: Address =
    address!("d25e620212836070c5270249211fb02520e7e466");
pub const RESERVOIR_TOKEN_STATUS_ORACLE_ADAPTER: Address =
    address!("f90299260bfe07df65066f74649f1262fe9861de");
pub const PRIMITIVES_01: Address = address!("f5f93c22dc82528431440b14f9d94f96df0501fe");
pub const STRATEGY_TARGET_01: Address = address!("a139ee6afaea9f7a515f59dea974c405269a305a");

/// The full table, for tooling that prints or exports it.
pub fn all() -> Vec<(&'static str, Address)> {
    vec![
        ("TWAP_ADAPTER", TWAP_ADAPTER),
        ("TWAP_INVERSE_ADAPTER", TWAP_INVERSE_ADAPTER),
        ("FLAT_PRICE_CURVE", FLAT_PRICE_CURVE),
        ("LINEAR_PRICE_CURVE", LINEAR_PRICE_CURVE),
        (
            "RESERVOIR_FLOOR_PRICE_ORACLE_ADAPTER",
            RESERVOIR_FLOOR_PRICE_ORACLE_ADAPTER,
        ),
        (
            "RESERVOIR_TOKEN_STATUS_ORACLE_ADAPTER",
            RESERVOIR_TOKEN_STATUS_ORACLE_ADAPTER,
        ),
        ("PRIMITIVES_01", PRIMITIVES_01),
        ("STRATEGY_TARGET_01", STRATEGY_TARGET_01),
    ]
}
