//! Auth types shared across Foodgram services.
//!
//! Credentials and tokens are handled upstream by the gateway; services only
//! see the identity it forwards, through the `IdentityHeaders` extractor.

pub mod identity;
