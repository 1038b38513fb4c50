//! Session tokens issued after address-signature login

mod jwt;

pub use jwt::{Claims, JwtService, SessionToken};
