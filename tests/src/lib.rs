//! Integration tests spanning `gatecheck-common` and `gatecheck-core`.

#[cfg(test)]
mod allowlist;
